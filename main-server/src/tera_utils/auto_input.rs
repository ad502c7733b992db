use axum::{
    Form, Json,
    body::Body,
    extract::{
        FromRequest, Request,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

pub enum AutoInputRejection {
    JsonRejection(JsonRejection),
    FormRejection(FormRejection),
    BadContentType,
}

impl From<JsonRejection> for AutoInputRejection {
    fn from(value: JsonRejection) -> Self {
        AutoInputRejection::JsonRejection(value)
    }
}

impl From<FormRejection> for AutoInputRejection {
    fn from(value: FormRejection) -> Self {
        AutoInputRejection::FormRejection(value)
    }
}

impl IntoResponse for AutoInputRejection {
    fn into_response(self) -> Response {
        match self {
            AutoInputRejection::JsonRejection(json_rejection) => json_rejection.into_response(),
            AutoInputRejection::FormRejection(form_rejection) => form_rejection.into_response(),
            AutoInputRejection::BadContentType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                [(CONTENT_TYPE, "text/plain")],
                "Expected a JSON or form encoded body",
            )
                .into_response(),
        }
    }
}

/// Request body that is either JSON or an url encoded form, picked by the
/// `Content-Type` header. Parameters such as `; charset=utf-8` are ignored.
pub struct AutoInput<T: DeserializeOwned>(pub T);

fn media_type(request: &Request<Body>) -> Option<&[u8]> {
    let value = request.headers().get(CONTENT_TYPE)?.as_bytes();
    let essence = value.split(|&b| b == b';').next().unwrap_or(value);
    Some(essence.trim_ascii())
}

impl<T: DeserializeOwned, S: Sync + Send> FromRequest<S> for AutoInput<T> {
    type Rejection = AutoInputRejection;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let (is_json, is_form) = match media_type(&request) {
            Some(media_type) => (
                media_type.eq_ignore_ascii_case(b"application/json"),
                media_type.eq_ignore_ascii_case(b"application/x-www-form-urlencoded"),
            ),
            None => (false, false),
        };

        if is_json {
            let Json(value) = Json::<T>::from_request(request, state).await?;
            Ok(AutoInput(value))
        } else if is_form {
            let Form(value) = Form::<T>::from_request(request, state).await?;
            Ok(AutoInput(value))
        } else {
            Err(AutoInputRejection::BadContentType)
        }
    }
}
