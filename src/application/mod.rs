pub mod breakout;
pub mod calendar;
pub mod normalize;
pub mod record_cache;
pub mod scan;
