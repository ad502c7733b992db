use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

/// Turns handler output into a response. The context decides between the
/// HTML template and plain JSON.
pub trait HtmlRenderer<S> {
    type Context: FromRequestParts<S> + Send + Sync + 'static;
    type Err;

    fn render(
        &self,
        data: impl Serialize,
        context: Self::Context,
        template: &'static str,
        status_code: StatusCode,
    ) -> Response;

    fn render_error(&self, err: Self::Err, context: Self::Context) -> Response;
}

pub trait IntoSerializedResponse<S, R: HtmlRenderer<S>> {
    fn into_serialized_response(
        self,
        context: R::Context,
        renderer: R,
        template: &'static str,
    ) -> Response;
}

impl<S, K, R: HtmlRenderer<S>> IntoSerializedResponse<S, R> for K
where
    K: Serialize,
{
    fn into_serialized_response(
        self,
        context: R::Context,
        renderer: R,
        template: &'static str,
    ) -> Response {
        renderer.render(self, context, template, StatusCode::OK)
    }
}

/// Handler output with a non-default status code or extra headers.
pub struct CustomResponseMetadata<T> {
    value: T,
    status_code: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl<K> CustomResponseMetadata<K> {
    pub fn new(data: K) -> Self {
        CustomResponseMetadata {
            value: data,
            status_code: StatusCode::OK,
            headers: vec![],
        }
    }

    pub fn with_status(self, status: StatusCode) -> Self {
        CustomResponseMetadata {
            status_code: status,
            ..self
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

impl<S, K, R: HtmlRenderer<S>> IntoSerializedResponse<S, R> for CustomResponseMetadata<K>
where
    K: Serialize,
{
    fn into_serialized_response(
        self,
        context: R::Context,
        renderer: R,
        template: &'static str,
    ) -> Response {
        let mut response = renderer.render(self.value, context, template, self.status_code);
        for (name, value) in self.headers {
            response.headers_mut().insert(name, value);
        }
        response
    }
}
