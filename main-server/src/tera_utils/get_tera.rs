use std::{collections::HashMap, sync::OnceLock};

use axum::response::{IntoResponse, Response};
use common::{ChallengeDifficulty, ChallengeProgress, langs::language_options};
use tera::{Tera, Value, to_value};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339, macros::format_description};

use super::render_html_error;

static TERA: OnceLock<tera::Result<Tera>> = OnceLock::new();

pub enum GetTeraError {
    Initializing(&'static tera::Error),
}

impl IntoResponse for GetTeraError {
    fn into_response(self) -> Response {
        match self {
            GetTeraError::Initializing(error) => {
                render_html_error("Error initializing Tera", error)
            }
        }
    }
}

pub fn get_tera() -> Result<&'static Tera, GetTeraError> {
    let value = TERA.get_or_init(|| {
        Tera::new("templates/**/*.jinja").map(|mut tera| {
            tera.autoescape_on(vec![".html.jinja", ".html"]);
            tera.register_function("languages", get_langs);
            tera.register_filter("format_date", format_date);
            tera.register_filter("difficulty_class", difficulty_class);
            tera.register_filter("progress_label", progress_label);
            tera
        })
    });

    value.as_ref().map_err(GetTeraError::Initializing)
}

fn no_arguments(name: &str, args: &HashMap<String, Value>) -> Result<(), tera::Error> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(tera::Error::msg(format!("{name} takes no arguments")))
    }
}

fn get_langs(values: &HashMap<String, Value>) -> Result<Value, tera::Error> {
    no_arguments("languages", values)?;
    to_value(language_options()).map_err(tera::Error::json)
}

/// `2024-10-16T09:30:00Z` to `2024-10-16 09:30 UTC`.
fn format_date(value: &Value, args: &HashMap<String, Value>) -> Result<Value, tera::Error> {
    no_arguments("format_date", args)?;
    let Value::String(raw) = value else {
        return Err(tera::Error::msg(format!(
            "format_date: expected a date string, got {value}"
        )));
    };

    let date = OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| tera::Error::call_filter("format_date", e))?
        .to_offset(UtcOffset::UTC);
    let formatted = date
        .format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .map_err(|e| tera::Error::call_filter("format_date", e))?;

    Ok(Value::String(formatted))
}

fn difficulty_class(value: &Value, args: &HashMap<String, Value>) -> Result<Value, tera::Error> {
    no_arguments("difficulty_class", args)?;
    let difficulty: ChallengeDifficulty =
        serde_json::from_value(value.clone()).map_err(tera::Error::json)?;

    Ok(Value::String(format!(
        "difficulty-{}",
        difficulty.as_str().to_ascii_lowercase()
    )))
}

fn progress_label(value: &Value, args: &HashMap<String, Value>) -> Result<Value, tera::Error> {
    no_arguments("progress_label", args)?;
    let progress: ChallengeProgress =
        serde_json::from_value(value.clone()).map_err(tera::Error::json)?;

    Ok(Value::String(progress.label().to_string()))
}
