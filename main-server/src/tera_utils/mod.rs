use axum::{
    Json,
    http::{
        HeaderValue, StatusCode,
        header::LOCATION,
    },
    response::{Html, IntoResponse, Response},
};
use html_context::{Format, HtmlContext, RenderContext};
use macros::HtmlRenderer;
use serde::Serialize;
use std::error::Error;
use tera::{Context, escape_html};

pub mod auto_input;
mod get_tera;
mod html_context;

fn render_html_error(title: &str, error: &tera::Error) -> Response {
    tracing::error!(error = ?error, "{title}");
    let message = match &error.kind {
        tera::ErrorKind::Msg(e) => format!("{e}\n{:?}", error.source()),
        _ => format!("{:#?}", error.kind),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!(
            "<h2>{}</h2>\n<pre>{:#}</pre>",
            escape_html(title),
            escape_html(&message)
        )),
    )
        .into_response()
}

#[derive(Clone)]
pub struct TeraHtmlRenderer;

impl TeraHtmlRenderer {
    fn render_html(
        data: impl Serialize,
        context: HtmlContext,
        status_code: StatusCode,
        template: &'static str,
    ) -> Response {
        let tera = match get_tera::get_tera() {
            Ok(tera) => tera,
            Err(e) => return e.into_response(),
        };

        let mut tera_context = Context::new();
        tera_context.insert("object", &data);
        tera_context.insert("account", &context.account);
        tera_context.insert("dev", &cfg!(debug_assertions));

        match tera.render(template, &tera_context) {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(err) => render_html_error("Error rendering template", &err),
        }
    }

    fn render_json(data: impl Serialize, status_code: StatusCode) -> Response {
        (status_code, Json(data)).into_response()
    }
}

impl<S: Send + Sync> HtmlRenderer<S> for TeraHtmlRenderer {
    type Context = RenderContext;
    type Err = crate::error::Error;

    fn render(
        &self,
        data: impl Serialize,
        context: Self::Context,
        template: &'static str,
        status_code: StatusCode,
    ) -> Response {
        match context {
            Format::Html(e) => Self::render_html(data, e, status_code, template),
            Format::Json => Self::render_json(data, status_code),
        }
    }

    fn render_error(&self, err: Self::Err, context: Self::Context) -> Response {
        let representation = err.get_representation();
        let status_code = representation.status_code;

        // Redirects are real redirects in both formats, JSON clients get the
        // representation as the body
        if let Some(location) = representation.location.as_deref() {
            let Ok(location) = HeaderValue::from_str(location) else {
                tracing::error!(location, "redirect to an invalid location");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            let mut response = match context {
                Format::Json => Self::render_json(&representation, status_code),
                Format::Html(_) => status_code.into_response(),
            };
            response.headers_mut().insert(LOCATION, location);
            return response;
        }

        match context {
            Format::Json => Self::render_json(representation, status_code),
            Format::Html(ctx) => {
                Self::render_html(representation, ctx, status_code, "error.html.jinja")
            }
        }
    }
}
