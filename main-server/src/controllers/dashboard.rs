use axum::Extension;
use common::{Challenge, ChallengeProgress, catalog::all_challenges, urls::get_url_for_challenge};
use serde::Serialize;

use crate::{
    error::Error,
    models::{DataStore, account::Account, progress::all_progress_or_default},
};

#[derive(Serialize)]
pub struct ChallengeCard {
    #[serde(flatten)]
    challenge: &'static Challenge,
    progress: ChallengeProgress,
    url: String,
}

#[derive(Serialize)]
pub struct Dashboard {
    username: String,
    submitted: usize,
    challenges: Vec<ChallengeCard>,
}

pub async fn dashboard(
    account: Account,
    Extension(store): Extension<DataStore>,
) -> Result<Dashboard, Error> {
    let progress = all_progress_or_default(store.as_ref(), account.id).await;

    let challenges: Vec<_> = all_challenges()
        .map(|challenge| ChallengeCard {
            challenge,
            progress: progress.get(challenge.id).copied().unwrap_or_default(),
            url: get_url_for_challenge(challenge.id, None).to_string(),
        })
        .collect();

    Ok(Dashboard {
        username: account.username,
        submitted: challenges
            .iter()
            .filter(|card| card.progress.is_submitted())
            .count(),
        challenges,
    })
}
