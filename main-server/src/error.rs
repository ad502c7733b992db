use std::borrow::Cow;

use axum::http::StatusCode;
use common::urls::Page;
use serde::Serialize;

use crate::controllers::auth::AuthError;

#[derive(Debug)]
pub enum Error {
    NotFound,
    #[allow(clippy::enum_variant_names)]
    ServerError,
    StoreUnavailable(sqlx::Error),
    Auth(AuthError),
    Redirect(RedirectType, Cow<'static, str>),
}

#[derive(Debug)]
pub enum RedirectType {
    TemporaryGet,
    Permanent,
}

#[derive(Serialize)]
pub struct ErrorRepresentation {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub title: Cow<'static, str>,
    pub body: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Cow<'static, str>>,
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Error::StoreUnavailable(value)
    }
}

impl Error {
    /// 303 to another page of the site.
    pub fn redirect_to(page: Page<'_>) -> Self {
        Error::Redirect(RedirectType::TemporaryGet, Cow::Owned(page.to_string()))
    }

    pub fn get_representation(self) -> ErrorRepresentation {
        match self {
            Error::NotFound => ErrorRepresentation {
                status_code: StatusCode::NOT_FOUND,
                title: Cow::Borrowed("Not Found"),
                body: None,
                location: None,
            },
            Error::ServerError => ErrorRepresentation {
                status_code: StatusCode::INTERNAL_SERVER_ERROR,
                title: Cow::Borrowed("Internal Server Error"),
                body: None,
                location: None,
            },
            Error::StoreUnavailable(e) => {
                tracing::error!(error = ?e, "data store unavailable");
                ErrorRepresentation {
                    status_code: StatusCode::SERVICE_UNAVAILABLE,
                    title: Cow::Borrowed("Service Unavailable"),
                    body: Some(Cow::Borrowed(
                        "We could not reach the database. Please try again in a moment.",
                    )),
                    location: None,
                }
            }
            Error::Auth(e) => ErrorRepresentation {
                status_code: e.status_code(),
                title: Cow::Borrowed(e.message()),
                body: None,
                location: None,
            },
            Error::Redirect(redirect_type, e) => ErrorRepresentation {
                status_code: match redirect_type {
                    RedirectType::TemporaryGet => StatusCode::SEE_OTHER,
                    RedirectType::Permanent => StatusCode::PERMANENT_REDIRECT,
                },
                title: Cow::Borrowed(""),
                body: None,
                location: Some(e),
            },
        }
    }
}
