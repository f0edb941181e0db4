//! crates/virasat_core/src/ledger.rs
//!
//! The in-memory verification/minting store. Tracks which heritage item ids
//! have passed (simulated) verification and which have been minted as demo
//! NFTs, and fabricates the NFT records themselves.
//!
//! All operations are synchronous and mutate only the ledger's own maps.
//! Embedders that share a ledger across tasks must wrap it in a mutex so the
//! read-modify-write inside `mint` stays atomic.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;

use crate::domain::{MintedRecord, VerifiedRecord};

/// Prefix for fabricated NFT identifiers.
pub const NFT_ID_PREFIX: &str = "VRS";

/// Label for the pretend chain the demo "mints" on.
pub const DEMO_NETWORK_LABEL: &str = "Polygon (Demo)";

/// Number of hex digits in a fabricated transaction hash (32 bytes).
const TX_HASH_DIGITS: usize = 64;

/// Length of the random base-36 suffix in an NFT id.
const NFT_SUFFIX_LEN: usize = 4;

//=========================================================================================
// Errors and Policy
//=========================================================================================

/// Errors produced by ledger mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    /// An operation was handed an empty item id.
    #[error("Item id must not be empty")]
    EmptyItemId,

    /// Minting was requested for an unverified item while the ledger is
    /// configured with `MintPolicy::RequireVerified`.
    #[error("Item '{0}' has not been verified")]
    NotVerified(String),
}

/// Controls whether `mint` demands a prior `verify` for the same item id.
///
/// The reference application only enforces verify-before-mint in its UI, so
/// `Permissive` reproduces the original store behavior; `RequireVerified`
/// moves that check into the ledger for embedders that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MintPolicy {
    #[default]
    Permissive,
    RequireVerified,
}

impl std::str::FromStr for MintPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permissive" => Ok(MintPolicy::Permissive),
            "require_verified" | "require-verified" => Ok(MintPolicy::RequireVerified),
            other => Err(format!("'{}' is not a valid mint policy", other)),
        }
    }
}

//=========================================================================================
// The Ledger
//=========================================================================================

/// Process-wide store of verified items and minted demo NFTs.
///
/// The two maps are keyed by catalog item id and evolve independently: each
/// id walks its own Unverified -> Verified -> Minted progression, and under
/// `MintPolicy::Permissive` an id may be minted without ever being verified.
/// Records live only as long as the ledger; there is no persistence.
#[derive(Debug, Default)]
pub struct PreservationLedger {
    verified: HashMap<String, VerifiedRecord>,
    minted: HashMap<String, MintedRecord>,
    policy: MintPolicy,
}

impl PreservationLedger {
    /// Creates an empty ledger with the default (permissive) mint policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger with an explicit mint policy.
    pub fn with_policy(policy: MintPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> MintPolicy {
        self.policy
    }

    /// Inserts or replaces the verification record for `record.item_id`.
    ///
    /// The record is stored by value; later mutation of the caller's copy
    /// does not affect the stored one. Re-verifying an id overwrites the
    /// previous record (last write wins).
    pub fn verify(&mut self, record: VerifiedRecord) -> Result<(), LedgerError> {
        if record.item_id.is_empty() {
            return Err(LedgerError::EmptyItemId);
        }
        self.verified.insert(record.item_id.clone(), record);
        Ok(())
    }

    /// Fabricates a fresh demo NFT for `item_id`, stores it, and returns it.
    ///
    /// Not idempotent: every call draws new randomness, so re-minting the
    /// same id overwrites the old record and issues a different `nft_id`,
    /// `tx_hash`, and `minted_at`.
    pub fn mint(&mut self, item_id: &str, owner: &str) -> Result<MintedRecord, LedgerError> {
        if item_id.is_empty() {
            return Err(LedgerError::EmptyItemId);
        }
        if self.policy == MintPolicy::RequireVerified && !self.verified.contains_key(item_id) {
            return Err(LedgerError::NotVerified(item_id.to_string()));
        }

        let now = Utc::now();
        let record = MintedRecord {
            item_id: item_id.to_string(),
            nft_id: fabricate_nft_id(now.timestamp_millis()),
            owner: owner.to_string(),
            blockchain: DEMO_NETWORK_LABEL.to_string(),
            minted_at: now,
            tx_hash: fabricate_tx_hash(),
        };
        self.minted.insert(item_id.to_string(), record.clone());
        Ok(record)
    }

    /// True iff a verification record exists for `item_id`.
    pub fn is_verified(&self, item_id: &str) -> bool {
        self.verified.contains_key(item_id)
    }

    /// True iff a minted record exists for `item_id`.
    pub fn is_minted(&self, item_id: &str) -> bool {
        self.minted.contains_key(item_id)
    }

    /// The verification record for `item_id`, if any. A missing id is not
    /// an error.
    pub fn get_verified(&self, item_id: &str) -> Option<&VerifiedRecord> {
        self.verified.get(item_id)
    }

    /// The minted record for `item_id`, if any.
    pub fn get_minted(&self, item_id: &str) -> Option<&MintedRecord> {
        self.minted.get(item_id)
    }
}

//=========================================================================================
// Identifier Fabrication
//=========================================================================================

/// Builds a human-legible NFT id: fixed prefix, uppercase base-36 timestamp,
/// and a short random uppercase base-36 suffix, joined by dashes.
/// Example: `VRS-LX2K9QF1-8A3Z`.
fn fabricate_nft_id(timestamp_millis: i64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..NFT_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "{}-{}-{}",
        NFT_ID_PREFIX,
        to_base36_upper(timestamp_millis.max(0) as u64),
        suffix
    )
}

/// Builds a fake transaction hash: `0x` followed by 64 lowercase hex digits,
/// each nibble drawn independently. Non-cryptographic on purpose; this is a
/// demo artifact, not a signature.
fn fabricate_tx_hash() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..TX_HASH_DIGITS)
        .map(|_| char::from_digit(rng.random_range(0..16), 16).unwrap_or('0'))
        .collect();
    format!("0x{}", digits)
}

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn to_base36_upper(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record(item_id: &str) -> VerifiedRecord {
        VerifiedRecord {
            item_id: item_id.to_string(),
            title: "T".to_string(),
            extracted_text: "X".to_string(),
            language: "Hindi".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            confidence: 94.2,
            verified_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn unknown_ids_are_neither_verified_nor_minted() {
        let ledger = PreservationLedger::new();
        assert!(!ledger.is_verified("nowhere"));
        assert!(!ledger.is_minted("nowhere"));
        assert!(ledger.get_verified("nowhere").is_none());
        assert!(ledger.get_minted("nowhere").is_none());
    }

    #[test]
    fn verify_stores_the_record_by_value() {
        let mut ledger = PreservationLedger::new();
        let mut record = sample_record("manuscript");
        ledger.verify(record.clone()).unwrap();

        // Mutating the caller's copy must not leak into the ledger.
        record.confidence = 1.0;
        record.tags.push("c".to_string());

        assert!(ledger.is_verified("manuscript"));
        let stored = ledger.get_verified("manuscript").unwrap();
        assert_eq!(stored.confidence, 94.2);
        assert_eq!(stored.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(stored, &sample_record("manuscript"));
    }

    #[test]
    fn re_verifying_overwrites_the_previous_record() {
        let mut ledger = PreservationLedger::new();
        ledger.verify(sample_record("manuscript")).unwrap();

        let mut second = sample_record("manuscript");
        second.title = "Revised".to_string();
        second.confidence = 87.8;
        ledger.verify(second.clone()).unwrap();

        assert_eq!(ledger.get_verified("manuscript"), Some(&second));
    }

    #[test]
    fn verify_rejects_an_empty_item_id() {
        let mut ledger = PreservationLedger::new();
        let record = sample_record("");
        assert_eq!(ledger.verify(record), Err(LedgerError::EmptyItemId));
        assert!(!ledger.is_verified(""));
    }

    #[test]
    fn mint_returns_the_stored_record() {
        let mut ledger = PreservationLedger::new();
        let nft = ledger.mint("manuscript", "Alice").unwrap();

        assert_eq!(nft.item_id, "manuscript");
        assert_eq!(nft.owner, "Alice");
        assert_eq!(nft.blockchain, DEMO_NETWORK_LABEL);
        assert!(ledger.is_minted("manuscript"));
        assert_eq!(ledger.get_minted("manuscript"), Some(&nft));
        assert_eq!(ledger.get_minted("manuscript").unwrap().owner, "Alice");
    }

    #[test]
    fn mint_rejects_an_empty_item_id() {
        let mut ledger = PreservationLedger::new();
        assert_eq!(ledger.mint("", "Alice"), Err(LedgerError::EmptyItemId));
    }

    #[test]
    fn minting_twice_issues_fresh_identifiers_and_overwrites() {
        let mut ledger = PreservationLedger::new();
        let first = ledger.mint("manuscript", "o1").unwrap();
        let second = ledger.mint("manuscript", "o2").unwrap();

        assert_ne!(first.nft_id, second.nft_id);
        assert_ne!(first.tx_hash, second.tx_hash);

        let stored = ledger.get_minted("manuscript").unwrap();
        assert_eq!(stored, &second);
        assert_eq!(stored.owner, "o2");
    }

    #[test]
    fn nft_id_has_the_prefix_timestamp_suffix_shape() {
        let mut ledger = PreservationLedger::new();
        let nft = ledger.mint("manuscript", "Demo Contributor").unwrap();

        let parts: Vec<&str> = nft.nft_id.split('-').collect();
        assert_eq!(parts.len(), 3, "unexpected nft id: {}", nft.nft_id);
        assert_eq!(parts[0], NFT_ID_PREFIX);
        assert!(!parts[1].is_empty());
        assert!(parts[1].bytes().all(|b| BASE36.contains(&b)));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn tx_hash_is_0x_plus_64_lowercase_hex_digits() {
        let mut ledger = PreservationLedger::new();
        for id in ["a", "b", "c", "d", "e"] {
            let nft = ledger.mint(id, "owner").unwrap();
            assert_eq!(nft.tx_hash.len(), 66);
            assert!(nft.tx_hash.starts_with("0x"));
            assert!(nft.tx_hash[2..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn operations_on_distinct_ids_are_independent() {
        let mut ledger = PreservationLedger::new();
        ledger.verify(sample_record("a")).unwrap();
        ledger.mint("a", "owner-a").unwrap();

        assert!(!ledger.is_verified("b"));
        assert!(!ledger.is_minted("b"));
        assert!(ledger.get_verified("b").is_none());
        assert!(ledger.get_minted("b").is_none());

        ledger.mint("b", "owner-b").unwrap();
        assert_eq!(ledger.get_minted("a").unwrap().owner, "owner-a");
    }

    #[test]
    fn permissive_policy_allows_minting_unverified_ids() {
        let mut ledger = PreservationLedger::new();
        assert!(!ledger.is_verified("ritual"));
        assert!(ledger.mint("ritual", "owner").is_ok());
    }

    #[test]
    fn require_verified_policy_rejects_unverified_ids() {
        let mut ledger = PreservationLedger::with_policy(MintPolicy::RequireVerified);
        assert_eq!(
            ledger.mint("ritual", "owner"),
            Err(LedgerError::NotVerified("ritual".to_string()))
        );
        assert!(!ledger.is_minted("ritual"));

        ledger.verify(sample_record("ritual")).unwrap();
        assert!(ledger.mint("ritual", "owner").is_ok());
    }

    #[test]
    fn base36_encoding_round_trips_through_u64() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(
            u64::from_str_radix(&to_base36_upper(1_712_345_678_901), 36).unwrap(),
            1_712_345_678_901
        );
    }

    #[test]
    fn mint_policy_parses_from_config_strings() {
        assert_eq!("permissive".parse(), Ok(MintPolicy::Permissive));
        assert_eq!("require_verified".parse(), Ok(MintPolicy::RequireVerified));
        assert_eq!("Require-Verified".parse(), Ok(MintPolicy::RequireVerified));
        assert!("strict".parse::<MintPolicy>().is_err());
    }
}
