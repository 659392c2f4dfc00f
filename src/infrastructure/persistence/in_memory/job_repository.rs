//! # In-Memory Job Repository
//!
//! In-memory implementation of [`JobRepository`] for testing.

use crate::domain::entities::Job;
use crate::domain::value_objects::{JobId, PartnerId};
use crate::infrastructure::persistence::traits::{JobRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`JobRepository`].
///
/// Uses a thread-safe `HashMap` for storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    storage: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobRepository {
    /// Creates a new empty in-memory job repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of jobs in the repository.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.storage.read().await.is_empty()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn save(&self, job: &Job) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(job.id(), job.clone());
        Ok(())
    }

    async fn get(&self, id: &JobId) -> RepositoryResult<Option<Job>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_partner(&self, partner_id: &PartnerId) -> RepositoryResult<Vec<Job>> {
        let storage = self.storage.read().await;
        let mut jobs: Vec<Job> = storage
            .values()
            .filter(|job| job.partner_id() == Some(partner_id))
            .cloned()
            .collect();
        jobs.sort_by_key(Job::created_at);
        Ok(jobs)
    }
}
