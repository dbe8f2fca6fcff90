pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::record_cache::DailyRecordCache;
use crate::application::scan::{ScanOutcome, ScanParams, ScanUseCase};
use crate::config::ScanConfig;
use crate::domain::entities::daily_record::{DailyRecordSet, RecordSource};
use crate::domain::error::DomainError;
use crate::domain::ports::provider_session::SessionFactory;
use crate::domain::ports::record_provider::DailyRecordProvider;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::ports::report_sink::ReportSink;
use crate::domain::ports::universe_provider::UniverseProvider;
use crate::domain::values::trading_day::TradingDay;
use crate::domain::values::universe::Universe;
use crate::infrastructure::feeds::nse_bhavdata::NseBhavdataProvider;
use crate::infrastructure::feeds::nse_universe::NseUniverseProvider;
use crate::infrastructure::feeds::session::NseSessionFactory;
use crate::infrastructure::report::csv_report::CsvReportSink;
use crate::infrastructure::storage::csv_record_store::CsvRecordStore;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct DeliveryScan {
    config: ScanConfig,
    universe_provider: Arc<dyn UniverseProvider>,
    cache: Arc<DailyRecordCache>,
    scan_uc: ScanUseCase,
}

impl DeliveryScan {
    /// Wire the NSE providers and on-disk store described by `config`.
    pub fn new(config: ScanConfig) -> Result<Self, DomainError> {
        let sessions: Arc<dyn SessionFactory> = Arc::new(NseSessionFactory::new(
            config.landing_url.clone(),
            config.request_delay(),
        ));
        let universe: Arc<dyn UniverseProvider> = Arc::new(NseUniverseProvider::new(
            sessions.clone(),
            config.universe_url.clone(),
        ));
        let records: Arc<dyn DailyRecordProvider> = Arc::new(NseBhavdataProvider::new(
            sessions,
            config.bhavdata_base_url.clone(),
        ));

        Self::with_providers(config, universe, records)
    }

    /// Same wiring as [`DeliveryScan::new`] with caller-supplied providers.
    pub fn with_providers(
        config: ScanConfig,
        universe_provider: Arc<dyn UniverseProvider>,
        record_provider: Arc<dyn DailyRecordProvider>,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        config.ensure_dirs()?;

        let store: Arc<dyn RecordStore> = Arc::new(CsvRecordStore::new(config.log_dir()));
        let sink: Arc<dyn ReportSink> =
            Arc::new(CsvReportSink::new(config.output_dir(), config.chart_link_base()));
        let cache = Arc::new(DailyRecordCache::new(store, record_provider));

        Ok(Self {
            scan_uc: ScanUseCase::new(
                universe_provider.clone(),
                cache.clone(),
                sink,
                config.request_delay(),
            ),
            config,
            universe_provider,
            cache,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // Delegating methods
    pub async fn scan(&self, reference_date: NaiveDate) -> Result<ScanOutcome, DomainError> {
        let params = ScanParams {
            reference_date,
            lookback_days: self.config.lookback_days,
            threshold_multiple: self.config.threshold_multiple,
        };
        self.scan_uc.execute(&params).await
    }

    pub async fn fetch_day(
        &self,
        date: TradingDay,
    ) -> Result<(DailyRecordSet, RecordSource), DomainError> {
        self.cache.get_records(date).await
    }

    pub async fn universe(&self) -> Result<Universe, DomainError> {
        self.universe_provider.fetch_universe().await
    }
}
