use std::collections::HashMap;

use async_trait::async_trait;
use common::{ChallengeProgress, RecordedProgress};
use sqlx::{PgPool, query, query_as, query_scalar};
use time::OffsetDateTime;

use super::{
    account::{Account, AccountCredentials, AccountStore},
    progress::ProgressStore,
    submission::{Submission, SubmissionStore, SubmissionSummary, SubmissionWithAuthor},
};

/// The production store, one PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<Account>, sqlx::Error> {
        query_as::<_, Account>(
            r#"
                INSERT INTO accounts(username, password_hash, admin)
                VALUES ($1, $2, $3)
                ON CONFLICT (username) DO NOTHING
                RETURNING id, username, admin
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(admin)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, sqlx::Error> {
        query_as::<_, Account>("SELECT id, username, admin FROM accounts WHERE id=$1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, sqlx::Error> {
        query_as::<_, AccountCredentials>(
            "SELECT id, username, admin, password_hash FROM accounts WHERE username=$1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn ensure_started(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error> {
        // The primary key on (account, challenge) settles concurrent first views
        query(
            r#"
                INSERT INTO challenge_status(account, challenge, status)
                VALUES ($1, $2, 'started')
                ON CONFLICT (account, challenge) DO NOTHING
            "#,
        )
        .bind(account)
        .bind(challenge)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_submitted(&self, account: i32, challenge: &str) -> Result<(), sqlx::Error> {
        query(
            r#"
                INSERT INTO challenge_status(account, challenge, status)
                VALUES ($1, $2, 'submitted')
                ON CONFLICT (account, challenge)
                DO UPDATE SET status='submitted', updated_at=now()
            "#,
        )
        .bind(account)
        .bind(challenge)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_progress(
        &self,
        account: i32,
        challenge: &str,
    ) -> Result<ChallengeProgress, sqlx::Error> {
        let status: Option<RecordedProgress> = query_scalar(
            "SELECT status FROM challenge_status WHERE account=$1 AND challenge=$2",
        )
        .bind(account)
        .bind(challenge)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.into())
    }

    async fn get_all_progress(
        &self,
        account: i32,
    ) -> Result<HashMap<String, ChallengeProgress>, sqlx::Error> {
        let rows: Vec<(String, RecordedProgress)> =
            query_as("SELECT challenge, status FROM challenge_status WHERE account=$1")
                .bind(account)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(challenge, status)| (challenge, status.into()))
            .collect())
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn record_submission(
        &self,
        account: i32,
        challenge: &str,
        language: &str,
        code: &str,
    ) -> Result<Submission, sqlx::Error> {
        query_as::<_, Submission>(
            r#"
                INSERT INTO submissions(account, challenge, language, code, submitted_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, account, challenge, language, code, submitted_at
            "#,
        )
        .bind(account)
        .bind(challenge)
        .bind(language)
        .bind(code)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionSummary>, sqlx::Error> {
        let rows = query_as::<_, SubmissionSummary>(
            r#"
                SELECT
                    submissions.id,
                    submissions.account,
                    accounts.username,
                    submissions.challenge,
                    submissions.language,
                    submissions.submitted_at
                FROM submissions
                JOIN accounts ON submissions.account = accounts.id
                ORDER BY submissions.submitted_at DESC, submissions.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubmissionSummary::with_title).collect())
    }

    async fn get_submission(&self, id: i32) -> Result<Option<SubmissionWithAuthor>, sqlx::Error> {
        let row = query_as::<_, SubmissionWithAuthor>(
            r#"
                SELECT
                    submissions.id,
                    submissions.account,
                    submissions.challenge,
                    submissions.language,
                    submissions.code,
                    submissions.submitted_at,
                    accounts.username
                FROM submissions
                JOIN accounts ON submissions.account = accounts.id
                WHERE submissions.id=$1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubmissionWithAuthor::with_title))
    }
}
