pub mod breakout;
pub mod daily_record;
pub mod raw_table;
