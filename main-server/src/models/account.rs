use async_trait::async_trait;
use axum::{
    Extension,
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use common::urls::Page;
use serde::Serialize;
use sqlx::prelude::FromRow;
use tower_sessions::Session;

use crate::{controllers::auth::ACCOUNT_ID_KEY, models::DataStore};

#[derive(FromRow, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub admin: bool,
}

/// An account together with its stored Argon2 hash. Only used to check a
/// login attempt, never serialized.
#[derive(FromRow)]
pub struct AccountCredentials {
    #[sqlx(flatten)]
    pub account: Account,
    pub password_hash: String,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Returns `None` when the username is taken.
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<Account>, sqlx::Error>;

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, sqlx::Error>;

    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AccountCredentials>, sqlx::Error>;
}

#[derive(Debug)]
pub enum AccountFetchError {
    SessionLoadFailed,
    StoreLoadFailed,
    NotLoggedIn,
    NoAccountFound,
}

impl IntoResponse for AccountFetchError {
    fn into_response(self) -> Response {
        match self {
            AccountFetchError::NotLoggedIn | AccountFetchError::NoAccountFound => {
                Redirect::to(&Page::Login.to_string()).into_response()
            }
            e => {
                tracing::error!(error = ?e, "could not load the current account");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [("Content-Type", "text/plain")],
                    "Could not load your account, please try again.",
                )
                    .into_response()
            }
        }
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for Account {
    type Rejection = AccountFetchError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Account as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(e) => Ok(Some(e)),
            Err(AccountFetchError::NotLoggedIn | AccountFetchError::NoAccountFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Account {
    type Rejection = AccountFetchError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AccountFetchError::SessionLoadFailed)?;
        let Extension(store) =
            <Extension<DataStore> as FromRequestParts<S>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AccountFetchError::StoreLoadFailed)?;

        let account_id: Option<i32> = session
            .get(ACCOUNT_ID_KEY)
            .await
            .map_err(|_| AccountFetchError::SessionLoadFailed)?;

        match account_id {
            Some(account_id) => store
                .get_account_by_id(account_id)
                .await
                .map_err(|_| AccountFetchError::StoreLoadFailed)?
                .ok_or(AccountFetchError::NoAccountFound),
            None => Err(AccountFetchError::NotLoggedIn),
        }
    }
}

/// An account with the admin flag set.
pub struct Admin(pub Account);

#[derive(Debug)]
pub enum AdminFetchError {
    Account(AccountFetchError),
    NotAdmin,
}

impl IntoResponse for AdminFetchError {
    fn into_response(self) -> Response {
        match self {
            AdminFetchError::Account(e) => e.into_response(),
            AdminFetchError::NotAdmin => Redirect::to(&Page::Dashboard.to_string()).into_response(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Admin {
    type Rejection = AdminFetchError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let account = <Account as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .map_err(AdminFetchError::Account)?;
        if !account.admin {
            return Err(AdminFetchError::NotAdmin);
        }
        Ok(Admin(account))
    }
}
