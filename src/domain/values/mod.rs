pub mod ratio;
pub mod trading_day;
pub mod universe;
