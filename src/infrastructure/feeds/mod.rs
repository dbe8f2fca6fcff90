pub mod nse_bhavdata;
pub mod nse_universe;
pub mod session;
pub mod tabular;
