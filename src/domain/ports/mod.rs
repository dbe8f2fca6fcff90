pub mod provider_session;
pub mod record_provider;
pub mod record_store;
pub mod report_sink;
pub mod universe_provider;
