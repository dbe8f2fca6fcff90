pub mod feeds;
pub mod report;
pub mod storage;
