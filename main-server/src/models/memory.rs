//! In-process store used by the tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use common::{ChallengeProgress, RecordedProgress};
use time::OffsetDateTime;

use super::{
    account::{Account, AccountCredentials, AccountStore},
    progress::ProgressStore,
    submission::{Submission, SubmissionStore, SubmissionSummary, SubmissionWithAuthor},
};

#[derive(Default)]
struct Tables {
    accounts: Vec<(Account, String)>,
    progress: HashMap<(i32, String), RecordedProgress>,
    submissions: Vec<Submission>,
}

/// A single kind of operation that can be made to fail on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fault {
    ProgressWrites,
    SubmissionWrites,
    SubmissionReads,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
    faults: Mutex<HashSet<Fault>>,
}

impl MemoryStore {
    /// While set, every operation fails the way a lost connection would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fails only the operations of one kind, the rest keep working.
    pub fn set_fault(&self, fault: Fault, active: bool) {
        let mut faults = self.faults.lock().unwrap();
        if active {
            faults.insert(fault);
        } else {
            faults.remove(&fault);
        }
    }

    pub fn progress_row_count(&self) -> usize {
        self.tables.lock().unwrap().progress.len()
    }

    pub fn submission_count(&self) -> usize {
        self.tables.lock().unwrap().submissions.len()
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.tables.lock().unwrap())
    }

    fn tables_for(&self, fault: Fault) -> Result<std::sync::MutexGuard<'_, Tables>, sqlx::Error> {
        if self.faults.lock().unwrap().contains(&fault) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.tables()
    }

    fn username(tables: &Tables, account: i32) -> String {
        tables
            .accounts
            .iter()
            .find(|(a, _)| a.id == account)
            .map(|(a, _)| a.username.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<Account>, sqlx::Error> {
        let mut tables = self.tables()?;
        if tables.accounts.iter().any(|(a, _)| a.username == username) {
            return Ok(None);
        }
        let account = Account {
            id: tables.accounts.len() as i32 + 1,
            username: username.to_string(),
            admin,
        };
        tables
            .accounts
            .push((account.clone(), password_hash.to_string()));
        Ok(Some(account))
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, sqlx::Error> {
        Ok(self
            .tables()?
            .accounts
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(a, _)| a.clone()))
    }

    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, sqlx::Error> {
        Ok(self
            .tables()?
            .accounts
            .iter()
            .find(|(a, _)| a.username == username)
            .map(|(account, password_hash)| AccountCredentials {
                account: account.clone(),
                password_hash: password_hash.clone(),
            }))
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn ensure_started(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error> {
        self.tables_for(Fault::ProgressWrites)?
            .progress
            .entry((account, challenge.to_string()))
            .or_insert(RecordedProgress::Started);
        Ok(())
    }

    async fn mark_submitted(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error> {
        self.tables_for(Fault::ProgressWrites)?
            .progress
            .insert((account, challenge.to_string()), RecordedProgress::Submitted);
        Ok(())
    }

    async fn get_progress(
        &self,
        account: i32,
        challenge: &str,
    ) -> Result<ChallengeProgress, sqlx::Error> {
        Ok(self
            .tables()?
            .progress
            .get(&(account, challenge.to_string()))
            .copied()
            .into())
    }

    async fn get_all_progress(
        &self,
        account: i32,
    ) -> Result<HashMap<String, ChallengeProgress>, sqlx::Error> {
        Ok(self
            .tables()?
            .progress
            .iter()
            .filter(|((owner, _), _)| *owner == account)
            .map(|((_, challenge), progress)| (challenge.clone(), (*progress).into()))
            .collect())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn record_submission(
        &self,
        account: i32,
        challenge: &str,
        language: &str,
        code: &str,
    ) -> Result<Submission, sqlx::Error> {
        let mut tables = self.tables_for(Fault::SubmissionWrites)?;
        let submission = Submission {
            id: tables.submissions.len() as i32 + 1,
            account,
            challenge: challenge.to_string(),
            language: language.to_string(),
            code: code.to_string(),
            submitted_at: OffsetDateTime::now_utc(),
        };
        tables.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, sqlx::Error> {
        let tables = self.tables_for(Fault::SubmissionReads)?;
        let mut summaries: Vec<SubmissionSummary> = tables
            .submissions
            .iter()
            .map(|s| {
                SubmissionSummary {
                    id: s.id,
                    account: s.account,
                    username: Self::username(&tables, s.account),
                    challenge: s.challenge.clone(),
                    challenge_title: "",
                    language: s.language.clone(),
                    submitted_at: s.submitted_at,
                }
                .with_title()
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }

    async fn get_submission(&self, id: i32) -> Result<Option<SubmissionWithAuthor>, sqlx::Error> {
        let tables = self.tables_for(Fault::SubmissionReads)?;
        Ok(tables
            .submissions
            .iter()
            .find(|s| s.id == id)
            .map(|s| {
                SubmissionWithAuthor {
                    submission: s.clone(),
                    username: Self::username(&tables, s.account),
                    challenge_title: "",
                }
                .with_title()
            }))
    }
}
