pub mod admin;
pub mod auth;
pub mod challenge;
pub mod dashboard;
pub mod home;
