use clap::Parser;
use deliveryscan::application::scan::ScanOutcome;
use deliveryscan::cli::commands::{Cli, Commands};
use deliveryscan::config::ScanConfig;
use deliveryscan::domain::values::trading_day::TradingDay;
use deliveryscan::logging::init_logging;
use deliveryscan::DeliveryScan;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match ScanConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.into();
    }

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(mut config: ScanConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Scan {
            date,
            lookback,
            threshold,
            no_links,
            json,
        } => {
            if let Some(n) = lookback {
                config.lookback_days = n;
            }
            if let Some(t) = threshold {
                config.threshold_multiple = t;
            }
            if no_links {
                config.hyperlinks = false;
            }
            let reference = parse_reference(&date)?;
            let ds = DeliveryScan::new(config)?;

            println!("\nRunning delivery breakout scan...\n");
            let outcome = ds.scan(reference).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            match outcome {
                ScanOutcome::NoData { .. } => {
                    println!("No delivery data available.");
                }
                ScanOutcome::NoBreakouts { .. } => {
                    println!(
                        "\nNo universe stocks found with {}x delivery spike.",
                        ds.config().threshold_multiple
                    );
                }
                ScanOutcome::Reported { path, report } => {
                    for c in &report.candidates {
                        println!(
                            "{:<14} {:>14} {:>14.2} {:>8}",
                            c.symbol,
                            c.latest_delivered_quantity,
                            c.trailing_average_delivered_quantity,
                            c.ratio.to_string()
                        );
                    }
                    println!("\nReport saved at: {}", path.display());
                }
            }
        }
        Commands::Days { date, lookback } => {
            if let Some(n) = lookback {
                config.lookback_days = n;
            }
            let reference = parse_reference(&date)?;
            for day in config.trading_days(reference)? {
                println!("{day}");
            }
        }
        Commands::Fetch { date } => {
            let day: TradingDay = date.parse()?;
            let ds = DeliveryScan::new(config)?;
            let (set, source) = ds.fetch_day(day).await?;
            println!("{day}: {} records ({source})", set.len());
        }
        Commands::Universe { list } => {
            let ds = DeliveryScan::new(config)?;
            let universe = ds.universe().await?;
            println!("{} symbols", universe.len());
            if list {
                for symbol in universe.iter() {
                    println!("{symbol}");
                }
            }
        }
    }
    Ok(())
}

fn parse_reference(s: &Option<String>) -> Result<chrono::NaiveDate, String> {
    match s {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format: {s}. Use YYYY-MM-DD")),
    }
}
