pub mod domain;
pub mod ledger;
pub mod ports;

pub use domain::{
    Category, Contribution, DocumentPreset, HeritageItem, MediaType, MintedRecord,
    NewContribution, OcrExtraction, VerifiedRecord,
};
pub use ledger::{LedgerError, MintPolicy, PreservationLedger, DEMO_NETWORK_LABEL, NFT_ID_PREFIX};
pub use ports::{
    CatalogFilter, CatalogService, ContributionService, DocumentAnalysisService, PortError,
    PortResult,
};
