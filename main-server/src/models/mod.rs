use std::sync::Arc;

pub mod account;
#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod progress;
pub mod submission;

use account::AccountStore;
use progress::ProgressStore;
use submission::SubmissionStore;

/// Everything the handlers need from the backing database.
pub trait Store: AccountStore + ProgressStore + SubmissionStore {}

impl<T: AccountStore + ProgressStore + SubmissionStore> Store for T {}

/// Shared handle passed to handlers through an `Extension` layer.
pub type DataStore = Arc<dyn Store>;
