//! crates/virasat_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of how the catalog, the mock analysis pipeline, and
//! the contribution intake are actually backed.

use async_trait::async_trait;

use crate::domain::{
    Category, Contribution, DocumentPreset, HeritageItem, NewContribution, OcrExtraction,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Catalog Filtering
//=========================================================================================

/// Filters applied when listing catalog items. All fields are optional and
/// combine with AND semantics; `query` matches the title or any tag,
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub media_type: Option<String>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read access to the static heritage catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_items(&self, filter: &CatalogFilter) -> PortResult<Vec<HeritageItem>>;

    async fn get_item(&self, item_id: &str) -> PortResult<HeritageItem>;

    async fn list_categories(&self) -> PortResult<Vec<Category>>;
}

/// The mock AI pipeline: preset-keyed OCR extraction plus the hardcoded
/// insight and transcript tables for catalog items.
#[async_trait]
pub trait DocumentAnalysisService: Send + Sync {
    /// The demo documents available for analysis.
    async fn list_presets(&self) -> PortResult<Vec<DocumentPreset>>;

    /// Runs (simulated) OCR over the given preset document. Implementations
    /// may sleep to imitate processing latency before answering.
    async fn analyze(&self, preset_key: &str) -> PortResult<OcrExtraction>;

    /// Canned AI insights for a catalog item; empty when none exist.
    async fn insights(&self, item_id: &str) -> PortResult<Vec<String>>;

    /// Canned transcript for a catalog item, if one exists.
    async fn transcript(&self, item_id: &str) -> PortResult<Option<String>>;
}

/// Intake for community heritage submissions.
#[async_trait]
pub trait ContributionService: Send + Sync {
    async fn submit(&self, submission: NewContribution) -> PortResult<Contribution>;

    async fn list(&self) -> PortResult<Vec<Contribution>>;
}
