use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header::ACCEPT, request::Parts},
};
use serde::Serialize;

use crate::models::account::Account;

pub enum Format<HtmlRendererContext> {
    Json,
    Html(HtmlRendererContext),
}

impl<C: FromRequestParts<S>, S: Send + Sync> FromRequestParts<S> for Format<C> {
    type Rejection = C::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let wants_json = parts.headers.get(ACCEPT).is_some_and(|accept| {
            accept
                .as_bytes()
                .eq_ignore_ascii_case(b"application/json")
        });

        if wants_json {
            Ok(Format::Json)
        } else {
            let context = C::from_request_parts(parts, state).await?;

            Ok(Format::Html(context))
        }
    }
}

/// Values every HTML page has access to next to the handler output.
#[derive(Serialize)]
pub struct HtmlContext {
    pub(super) account: Option<Account>,
}

impl<S: Send + Sync> FromRequestParts<S> for HtmlContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A failing account lookup only hides the navigation links, the
        // handler's own extractor reports the error
        let account = <Account as OptionalFromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .ok()
            .flatten();

        Ok(HtmlContext { account })
    }
}

pub type RenderContext = Format<HtmlContext>;
