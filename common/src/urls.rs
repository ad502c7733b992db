use std::fmt::Display;

use crate::langs::LANGS;

pub enum Page<'a> {
    Landing,
    Login,
    Signup,
    Dashboard,
    Challenge {
        id: &'a str,
        language: Option<&'a str>,
    },
    Admin,
    Submission {
        id: i32,
    },
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Landing => write!(f, "/"),
            Page::Login => write!(f, "/login"),
            Page::Signup => write!(f, "/signup"),
            Page::Dashboard => write!(f, "/dashboard"),
            Page::Challenge { id, language } => {
                write!(f, "/challenge/{id}")?;
                // Only known language ids are safe to put in a query string unescaped
                if let Some(language) = language.filter(|l| LANGS.contains_key(*l)) {
                    write!(f, "?language={language}")?;
                }
                Ok(())
            }
            Page::Admin => write!(f, "/admin"),
            Page::Submission { id } => write!(f, "/admin/submission/{id}"),
        }
    }
}

pub fn get_url_for_challenge<'a>(id: &'a str, language: Option<&'a str>) -> Page<'a> {
    Page::Challenge { id, language }
}
