//! Per account, per challenge progress.
//!
//! Only `started` and `submitted` are persisted. The store implementations
//! turn a missing row into [`ChallengeProgress::NotStarted`], nothing above
//! this module has to know how "not started" is represented.

use std::collections::HashMap;

use async_trait::async_trait;
use common::ChallengeProgress;

use super::Store;

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Records that the account opened the challenge. A no-op when any
    /// record exists, so a submitted challenge never goes back to started.
    async fn ensure_started(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error>;

    /// Moves the pair to submitted, creating the record if needed.
    async fn mark_submitted(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error>;

    async fn get_progress(
        &self,
        account: i32,
        challenge: &str,
    ) -> Result<ChallengeProgress, sqlx::Error>;

    /// Progress for every challenge the account has a record for. Challenges
    /// missing from the map are not started.
    async fn get_all_progress(
        &self,
        account: i32,
    ) -> Result<HashMap<String, ChallengeProgress>, sqlx::Error>;
}

/// Marks the challenge as started for a detail page view and returns the
/// status to display.
///
/// Store failures are logged and never fail the page: the status falls back
/// to whatever can still be read, or `NotStarted`. The next view retries.
pub async fn start_challenge(store: &dyn Store, account: i32, challenge: &str) -> ChallengeProgress {
    if let Err(e) = store.ensure_started(account, challenge).await {
        tracing::warn!(error = ?e, account, challenge, "could not record challenge start");
    }

    match store.get_progress(account, challenge).await {
        Ok(progress) => progress,
        Err(e) => {
            tracing::warn!(error = ?e, account, challenge, "could not read challenge progress");
            ChallengeProgress::NotStarted
        }
    }
}

/// Dashboard variant of [`ProgressStore::get_all_progress`] that degrades to
/// an empty map.
pub async fn all_progress_or_default(
    store: &dyn Store,
    account: i32,
) -> HashMap<String, ChallengeProgress> {
    store
        .get_all_progress(account)
        .await
        .inspect_err(|e| tracing::warn!(error = ?e, account, "could not read progress"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Barrier;

    use super::*;
    use crate::models::memory::MemoryStore;

    #[tokio::test]
    async fn fresh_pair_is_not_started() {
        let store = MemoryStore::default();
        assert_eq!(
            store.get_progress(1, "1").await.unwrap(),
            ChallengeProgress::NotStarted
        );
        assert!(store.get_all_progress(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_started_is_idempotent() {
        let store = MemoryStore::default();
        store.ensure_started(1, "2").await.unwrap();
        store.ensure_started(1, "2").await.unwrap();
        assert_eq!(
            store.get_progress(1, "2").await.unwrap(),
            ChallengeProgress::Started
        );
        assert_eq!(store.progress_row_count(), 1);
    }

    #[tokio::test]
    async fn submitted_never_regresses() {
        let store = MemoryStore::default();
        store.mark_submitted(1, "3").await.unwrap();
        store.ensure_started(1, "3").await.unwrap();
        assert_eq!(
            store.get_progress(1, "3").await.unwrap(),
            ChallengeProgress::Submitted
        );
    }

    #[tokio::test]
    async fn progress_is_per_account() {
        let store = MemoryStore::default();
        store.ensure_started(1, "1").await.unwrap();
        store.mark_submitted(2, "1").await.unwrap();

        let first = store.get_all_progress(1).await.unwrap();
        assert_eq!(first.get("1"), Some(&ChallengeProgress::Started));
        assert_eq!(first.len(), 1);
        assert_eq!(
            store.get_progress(2, "1").await.unwrap(),
            ChallengeProgress::Submitted
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_views_leave_one_started_record() {
        let store = Arc::new(MemoryStore::default());
        let barrier = Arc::new(Barrier::new(8));
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    store.ensure_started(4, "5").await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.progress_row_count(), 1);
        assert_eq!(
            store.get_progress(4, "5").await.unwrap(),
            ChallengeProgress::Started
        );
    }

    #[tokio::test]
    async fn start_challenge_falls_back_when_store_is_down() {
        let store = MemoryStore::default();
        store.set_unavailable(true);
        assert_eq!(
            start_challenge(&store, 1, "1").await,
            ChallengeProgress::NotStarted
        );
        assert!(all_progress_or_default(&store, 1).await.is_empty());

        store.set_unavailable(false);
        assert_eq!(start_challenge(&store, 1, "1").await, ChallengeProgress::Started);
    }
}
