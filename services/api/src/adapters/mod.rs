pub mod catalog;
pub mod contributions;
pub mod ocr;

pub use catalog::StaticCatalogAdapter;
pub use contributions::InMemoryContributionAdapter;
pub use ocr::MockAnalysisAdapter;
