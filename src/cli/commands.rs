use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deliveryscan", about = "NSE delivery-quantity breakout scanner")]
pub struct Cli {
    /// Debug-level logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Root data folder (overrides DELIVERYSCAN_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the universe for delivery breakouts and write a report
    Scan {
        /// Reference date (YYYY-MM-DD); the window ends the weekday before it. Defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Trading days in the trailing window
        #[arg(long)]
        lookback: Option<usize>,
        /// Latest quantity must exceed this multiple of the average
        #[arg(long)]
        threshold: Option<f64>,
        /// Write plain symbols instead of chart links
        #[arg(long)]
        no_links: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the trading days a scan would use
    Days {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        lookback: Option<usize>,
    },
    /// Load one trading day into the cache
    Fetch {
        /// Trading date (YYYY-MM-DD)
        date: String,
    },
    /// Fetch the index constituent list
    Universe {
        /// Print every symbol
        #[arg(long)]
        list: bool,
    },
}
