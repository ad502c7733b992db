use axum::{
    Extension,
    extract::Path,
    http::{HeaderValue, header::CACHE_CONTROL},
};
use common::urls::Page;
use macros::CustomResponseMetadata;
use serde::Serialize;

use crate::{
    error::Error,
    models::{
        DataStore,
        account::Admin,
        submission::{SubmissionSummary, SubmissionWithAuthor},
    },
};

/// Admin pages show other users' code, browsers must not keep a copy.
fn no_store() -> HeaderValue {
    HeaderValue::from_static("no-store")
}

#[derive(Serialize)]
pub struct SubmissionList {
    submissions: Vec<SubmissionSummary>,
    /// Set when the list could not be read and is shown empty.
    unavailable: bool,
}

pub async fn all_submissions(
    Admin(admin): Admin,
    Extension(store): Extension<DataStore>,
) -> Result<CustomResponseMetadata<SubmissionList>, Error> {
    let list = match store.list_submissions().await {
        Ok(submissions) => {
            tracing::debug!(admin = admin.id, count = submissions.len(), "listed submissions");
            SubmissionList {
                submissions,
                unavailable: false,
            }
        }
        Err(e) => {
            tracing::warn!(error = ?e, admin = admin.id, "could not list submissions");
            SubmissionList {
                submissions: Vec::new(),
                unavailable: true,
            }
        }
    };

    Ok(CustomResponseMetadata::new(list).with_header(CACHE_CONTROL, no_store()))
}

pub async fn view_submission(
    Path(id): Path<String>,
    Admin(_): Admin,
    Extension(store): Extension<DataStore>,
) -> Result<CustomResponseMetadata<SubmissionWithAuthor>, Error> {
    let submission = match id.parse::<i32>() {
        Ok(id) => store.get_submission(id).await?,
        Err(_) => None,
    };
    let Some(submission) = submission else {
        return Err(Error::redirect_to(Page::Admin));
    };

    Ok(CustomResponseMetadata::new(submission).with_header(CACHE_CONTROL, no_store()))
}

