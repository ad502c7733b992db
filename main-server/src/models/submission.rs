use async_trait::async_trait;
use common::catalog::challenge_title;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use time::OffsetDateTime;

use super::{Store, account::Account};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewSubmission {
    pub language: String,
    pub code: String,
}

#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: i32,
    pub account: i32,
    pub challenge: String,
    pub language: String,
    pub code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// A row of the admin submission list. Leaves out the code.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct SubmissionSummary {
    pub id: i32,
    pub account: i32,
    pub username: String,
    pub challenge: String,
    #[sqlx(skip)]
    pub challenge_title: &'static str,
    pub language: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct SubmissionWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub submission: Submission,
    pub username: String,
    #[sqlx(skip)]
    pub challenge_title: &'static str,
}

impl SubmissionSummary {
    pub(super) fn with_title(mut self) -> Self {
        self.challenge_title = challenge_title(&self.challenge);
        self
    }
}

impl SubmissionWithAuthor {
    pub(super) fn with_title(mut self) -> Self {
        self.challenge_title = challenge_title(&self.submission.challenge);
        self
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Appends a submission stamped with the current time.
    async fn record_submission(
        &self,
        account: i32,
        challenge: &str,
        language: &str,
        code: &str,
    ) -> Result<Submission, sqlx::Error>;

    /// Every submission, newest first.
    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, sqlx::Error>;

    async fn get_submission(&self, id: i32) -> Result<Option<SubmissionWithAuthor>, sqlx::Error>;
}

#[derive(Debug)]
pub enum SubmitError {
    EmptyCode,
    /// The code holds a NUL character, which a `TEXT` column cannot store.
    NulCharacter,
    UnknownLanguage,
    /// The submission could not be written, progress was left untouched.
    RecordFailed(sqlx::Error),
    /// The submission was written but the status update failed.
    MarkFailed(Submission, sqlx::Error),
}

/// Stores a solution and then marks the challenge as submitted.
///
/// The status write only happens after the submission write returned, so a
/// submitted status is always backed by at least one stored submission.
pub async fn submit_solution(
    store: &dyn Store,
    account: &Account,
    challenge: &str,
    solution: &NewSubmission,
) -> Result<Submission, SubmitError> {
    if !common::langs::LANGS.contains_key(solution.language.as_str()) {
        return Err(SubmitError::UnknownLanguage);
    }
    if solution.code.trim().is_empty() {
        return Err(SubmitError::EmptyCode);
    }
    if solution.code.contains('\0') {
        return Err(SubmitError::NulCharacter);
    }

    let submission = store
        .record_submission(account.id, challenge, &solution.language, &solution.code)
        .await
        .map_err(SubmitError::RecordFailed)?;

    tracing::info!(
        submission = submission.id,
        account = account.id,
        challenge,
        language = %solution.language,
        "recorded submission"
    );

    if let Err(e) = store.mark_submitted(account.id, challenge).await {
        return Err(SubmitError::MarkFailed(submission, e));
    }

    Ok(submission)
}
