use std::borrow::Cow;

use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
};
use common::{
    Challenge, ChallengeProgress, get_challenge,
    langs::{DEFAULT_LANGUAGE, LANGS},
    urls::Page,
};
use macros::CustomResponseMetadata;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    models::{
        DataStore, Store,
        account::Account,
        progress::start_challenge,
        submission::{NewSubmission, SubmitError, submit_solution},
    },
    tera_utils::auto_input::AutoInput,
};

const SUBMIT_FAILED: &str = "We could not save your submission. Please try again.";

#[derive(Deserialize)]
pub struct LanguageQuery {
    language: Option<String>,
}

#[derive(Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Serialize)]
pub struct Notice {
    kind: NoticeKind,
    message: Cow<'static, str>,
}

#[derive(Serialize)]
pub struct ChallengePage {
    challenge: &'static Challenge,
    progress: ChallengeProgress,
    language: String,
    editor_mode: &'static str,
    code: String,
    notice: Option<Notice>,
    submission_id: Option<i32>,
}

impl ChallengePage {
    fn new(
        challenge: &'static Challenge,
        progress: ChallengeProgress,
        language: Option<&str>,
        code: Option<String>,
    ) -> Self {
        let language = language
            .filter(|l| LANGS.contains_key(*l))
            .unwrap_or(DEFAULT_LANGUAGE);
        ChallengePage {
            challenge,
            progress,
            language: language.to_string(),
            editor_mode: LANGS
                .get(language)
                .map(|lang| lang.editor_mode)
                .unwrap_or_default(),
            code: code
                .or_else(|| challenge.starter_code_for(language).map(str::to_string))
                .unwrap_or_default(),
            notice: None,
            submission_id: None,
        }
    }

    fn with_notice(mut self, kind: NoticeKind, message: impl Into<Cow<'static, str>>) -> Self {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
        self
    }
}

fn find_challenge(id: &str) -> Result<&'static Challenge, Error> {
    get_challenge(id).ok_or_else(|| Error::redirect_to(Page::Dashboard))
}

pub async fn view_challenge(
    Path(id): Path<String>,
    Query(query): Query<LanguageQuery>,
    account: Account,
    Extension(store): Extension<DataStore>,
) -> Result<ChallengePage, Error> {
    let challenge = find_challenge(&id)?;
    let progress = start_challenge(store.as_ref(), account.id, challenge.id).await;

    Ok(ChallengePage::new(
        challenge,
        progress,
        query.language.as_deref(),
        None,
    ))
}

async fn current_progress(store: &dyn Store, account: i32, challenge: &str) -> ChallengeProgress {
    store
        .get_progress(account, challenge)
        .await
        .inspect_err(|e| tracing::warn!(error = ?e, account, challenge, "could not read progress"))
        .unwrap_or_default()
}

pub async fn submit_challenge(
    Path(id): Path<String>,
    account: Account,
    Extension(store): Extension<DataStore>,
    AutoInput(solution): AutoInput<NewSubmission>,
) -> Result<CustomResponseMetadata<ChallengePage>, Error> {
    let challenge = find_challenge(&id)?;

    let result = submit_solution(store.as_ref(), &account, challenge.id, &solution).await;
    let NewSubmission { language, code } = solution;

    let (status, page) = match result {
        Ok(submission) => {
            let mut page = ChallengePage::new(
                challenge,
                ChallengeProgress::Submitted,
                Some(&language),
                Some(code),
            )
            .with_notice(NoticeKind::Success, "Your solution was submitted.");
            page.submission_id = Some(submission.id);
            (StatusCode::CREATED, page)
        }
        Err(e) => {
            let (status, message) = match e {
                SubmitError::EmptyCode => (StatusCode::BAD_REQUEST, "Your solution is empty."),
                SubmitError::NulCharacter => (
                    StatusCode::BAD_REQUEST,
                    "Your solution contains a NUL character, remove it and try again.",
                ),
                SubmitError::UnknownLanguage => {
                    (StatusCode::BAD_REQUEST, "Pick one of the offered languages.")
                }
                SubmitError::RecordFailed(e) => {
                    tracing::error!(
                        error = ?e,
                        account = account.id,
                        challenge = challenge.id,
                        "could not record submission"
                    );
                    (StatusCode::SERVICE_UNAVAILABLE, SUBMIT_FAILED)
                }
                SubmitError::MarkFailed(submission, e) => {
                    tracing::error!(
                        error = ?e,
                        submission = submission.id,
                        account = account.id,
                        challenge = challenge.id,
                        "submission stored but progress was not updated"
                    );
                    (StatusCode::SERVICE_UNAVAILABLE, SUBMIT_FAILED)
                }
            };
            let progress = current_progress(store.as_ref(), account.id, challenge.id).await;
            let page = ChallengePage::new(challenge, progress, Some(&language), Some(code))
                .with_notice(NoticeKind::Error, message);
            (status, page)
        }
    };

    Ok(CustomResponseMetadata::new(page).with_status(status))
}
