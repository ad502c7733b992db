use common::{catalog::all_challenges, urls::Page};
use serde::Serialize;

use crate::{error::Error, models::account::Account};

#[derive(Serialize)]
pub struct LandingPage {
    challenge_count: usize,
}

pub async fn get_homepage(account: Option<Account>) -> Result<LandingPage, Error> {
    if account.is_some() {
        return Err(Error::redirect_to(Page::Dashboard));
    }

    Ok(LandingPage {
        challenge_count: all_challenges().count(),
    })
}
