//! services/api/src/adapters/contributions.rs
//!
//! This module contains the contribution intake adapter, the concrete
//! implementation of the `ContributionService` port. Submissions are held in
//! memory for the lifetime of the process; there is no review workflow behind
//! the demo, so "list" is the whole queue.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use virasat_core::domain::{Contribution, NewContribution};
use virasat_core::ports::{ContributionService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An in-memory contribution store.
#[derive(Default)]
pub struct InMemoryContributionAdapter {
    entries: Mutex<Vec<Contribution>>,
}

impl InMemoryContributionAdapter {
    /// Creates an empty contribution store.
    pub fn new() -> Self {
        Self::default()
    }
}

//=========================================================================================
// `ContributionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContributionService for InMemoryContributionAdapter {
    /// Accepts a submission, assigning it an id and a server-side timestamp.
    /// Title and description are the only required fields, mirroring the
    /// original intake form.
    async fn submit(&self, submission: NewContribution) -> PortResult<Contribution> {
        if submission.title.trim().is_empty() {
            return Err(PortError::InvalidInput("title must not be empty".to_string()));
        }
        if submission.description.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }

        let contribution = Contribution {
            id: Uuid::new_v4(),
            title: submission.title,
            description: submission.description,
            category: submission.category,
            region: submission.region,
            language: submission.language,
            media_type: submission.media_type,
            contributor: submission.contributor,
            submitted_at: Utc::now(),
        };

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PortError::Unexpected("contribution store lock poisoned".to_string()))?;
        entries.push(contribution.clone());
        Ok(contribution)
    }

    async fn list(&self) -> PortResult<Vec<Contribution>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PortError::Unexpected("contribution store lock poisoned".to_string()))?;
        Ok(entries.clone())
    }
}

//=========================================================================================
// Tests
//=========================================================================================
