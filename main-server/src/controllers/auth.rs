use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Extension, http::StatusCode};
use common::urls::Page;
use macros::CustomResponseMetadata;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    error::Error,
    models::{
        DataStore, Store,
        account::{Account, AccountStore},
    },
    tera_utils::auto_input::AutoInput,
};

pub const ACCOUNT_ID_KEY: &str = "ACCOUNT_ID";

const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=32;
const MIN_PASSWORD_LENGTH: usize = 6;

const DEMO_ACCOUNTS: [(&str, &str, bool); 2] = [("user", "password", false), ("admin", "admin123", true)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    UsernameTaken,
    InvalidUsername,
    InvalidPassword,
}

impl AuthError {
    pub fn message(self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid username or password",
            AuthError::UsernameTaken => "Username already exists",
            AuthError::InvalidUsername => {
                "Usernames are 3 to 32 letters, digits, dashes or underscores"
            }
            AuthError::InvalidPassword => "Passwords need at least 6 characters",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::InvalidUsername | AuthError::InvalidPassword => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Default)]
pub struct AuthPage {
    username: String,
    error: Option<&'static str>,
}

fn validate_signup(credentials: &Credentials) -> Result<(), AuthError> {
    let username = &credentials.username;
    if !USERNAME_LENGTH.contains(&username.chars().count())
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AuthError::InvalidUsername);
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidPassword);
    }
    Ok(())
}

async fn hash_password(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|_| Error::ServerError)?
    .map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        Error::ServerError
    })
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&password_hash) else {
            tracing::error!("stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|_| Error::ServerError)
}

pub async fn register(store: &dyn Store, credentials: Credentials) -> Result<Account, Error> {
    validate_signup(&credentials).map_err(Error::Auth)?;
    let password_hash = hash_password(credentials.password).await?;

    store
        .create_account(&credentials.username, &password_hash, false)
        .await?
        .ok_or(Error::Auth(AuthError::UsernameTaken))
}

pub async fn authenticate(store: &dyn Store, credentials: Credentials) -> Result<Account, Error> {
    let Some(stored) = store.get_credentials(&credentials.username).await? else {
        return Err(Error::Auth(AuthError::InvalidCredentials));
    };

    if verify_password(credentials.password, stored.password_hash).await? {
        Ok(stored.account)
    } else {
        Err(Error::Auth(AuthError::InvalidCredentials))
    }
}

async fn start_session(session: &Session, account: &Account) -> Result<(), Error> {
    session.cycle_id().await.map_err(|e| {
        tracing::error!(error = ?e, "could not rotate session id");
        Error::ServerError
    })?;
    session
        .insert(ACCOUNT_ID_KEY, account.id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "could not store session");
            Error::ServerError
        })
}

/// Turns the outcome of a login or signup into the next response: the
/// dashboard on success, the form again with a message on an auth error.
async fn finish_auth(
    session: &Session,
    username: String,
    result: Result<Account, Error>,
) -> Result<CustomResponseMetadata<AuthPage>, Error> {
    match result {
        Ok(account) => {
            start_session(session, &account).await?;
            tracing::info!(account = account.id, username = %account.username, "logged in");
            Err(Error::redirect_to(Page::Dashboard))
        }
        Err(Error::Auth(e)) => Ok(CustomResponseMetadata::new(AuthPage {
            username,
            error: Some(e.message()),
        })
        .with_status(e.status_code())),
        Err(e) => Err(e),
    }
}

pub async fn login_page(account: Option<Account>) -> Result<AuthPage, Error> {
    if account.is_some() {
        return Err(Error::redirect_to(Page::Dashboard));
    }
    Ok(AuthPage::default())
}

pub async fn login(
    session: Session,
    Extension(store): Extension<DataStore>,
    AutoInput(credentials): AutoInput<Credentials>,
) -> Result<CustomResponseMetadata<AuthPage>, Error> {
    let username = credentials.username.clone();
    let result = authenticate(store.as_ref(), credentials).await;
    finish_auth(&session, username, result).await
}

pub async fn signup_page(account: Option<Account>) -> Result<AuthPage, Error> {
    login_page(account).await
}

pub async fn signup(
    session: Session,
    Extension(store): Extension<DataStore>,
    AutoInput(credentials): AutoInput<Credentials>,
) -> Result<CustomResponseMetadata<AuthPage>, Error> {
    let username = credentials.username.clone();
    let result = register(store.as_ref(), credentials).await;
    if let Ok(account) = &result {
        tracing::info!(account = account.id, username = %account.username, "new account");
    }
    finish_auth(&session, username, result).await
}

pub async fn logout(session: Session) -> Result<(), Error> {
    session.flush().await.map_err(|e| {
        tracing::error!(error = ?e, "could not clear session");
        Error::ServerError
    })?;
    Err(Error::redirect_to(Page::Landing))
}

/// Creates the `user` and `admin` demo accounts if they do not exist yet.
pub async fn seed_demo_accounts(store: &dyn Store) -> Result<(), Error> {
    for (username, password, admin) in DEMO_ACCOUNTS {
        if store.get_credentials(username).await?.is_some() {
            continue;
        }
        let password_hash = hash_password(password.to_string()).await?;
        if store
            .create_account(username, &password_hash, admin)
            .await?
            .is_some()
        {
            tracing::info!(username, admin, "created demo account");
        }
    }
    Ok(())
}
