//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::{Arc, Mutex};
use virasat_core::ledger::PreservationLedger;
use virasat_core::ports::{CatalogService, ContributionService, DocumentAnalysisService};

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// The ledger is the one mutable piece. Its operations are synchronous, so a
/// plain mutex is enough to keep `mint`'s check-generate-insert atomic when
/// requests land concurrently; one ledger instance lives for the whole
/// process, and a restart clears it.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<PreservationLedger>>,
    pub catalog: Arc<dyn CatalogService>,
    pub analysis: Arc<dyn DocumentAnalysisService>,
    pub contributions: Arc<dyn ContributionService>,
    pub config: Arc<Config>,
}
