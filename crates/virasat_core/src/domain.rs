//! crates/virasat_core/src/domain.rs
//!
//! Defines the pure, core data structures for the heritage platform.
//! These structs are independent of any transport or storage format beyond
//! the serde derives needed to put them on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The media form of a documented heritage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
    Text,
    Image,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Text => "text",
            MediaType::Image => "image",
        }
    }
}

/// One documented piece of intangible cultural heritage (a song, ritual,
/// manuscript, etc.) as it appears in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub language: String,
    pub media_type: MediaType,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub contributor: String,
    pub date: String,
}

/// A top-level heritage domain used to group catalog items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub item_count: usize,
}

/// The result of running (simulated) OCR over one of the demo documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrExtraction {
    pub title: String,
    pub text: String,
    pub language: String,
    pub confidence: f64,
    pub tags: Vec<String>,
    pub category: String,
    pub region: String,
}

/// A scanned demo document offered for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPreset {
    pub key: String,
    pub label: String,
    pub description: String,
}

/// Proof that a heritage item's extracted content passed (simulated) AI
/// verification. At most one of these exists per item id; re-verifying
/// replaces the previous record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedRecord {
    pub item_id: String,
    pub title: String,
    pub extracted_text: String,
    pub language: String,
    pub tags: Vec<String>,
    pub confidence: f64,
    pub verified_at: DateTime<Utc>,
}

/// A fabricated demo NFT asserting digital preservation of a heritage item.
/// Not a real blockchain artifact; every field is generated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintedRecord {
    pub item_id: String,
    pub nft_id: String,
    pub owner: String,
    pub blockchain: String,
    pub minted_at: DateTime<Utc>,
    pub tx_hash: String,
}

/// A community submission awaiting review. Held in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub language: String,
    pub media_type: MediaType,
    pub contributor: String,
    pub submitted_at: DateTime<Utc>,
}

/// The caller-supplied fields of a contribution, before the service assigns
/// an id and a submission timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContribution {
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub language: String,
    pub media_type: MediaType,
    pub contributor: String,
}
