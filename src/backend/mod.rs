pub mod local;

#[cfg(test)]
mod local_test;

use crate::chat_search::domain::models::{FoundMessages, PageRequest};
use anyhow::Result;

/// Transport for one page of a message search.
///
/// Implementations are stateless with respect to pagination: the cursor to
/// continue from travels inside the request. Calls may block; hosts run them
/// off the UI thread.
pub trait SearchBackend: Send + Sync {
    fn search(&self, request: &PageRequest) -> Result<FoundMessages>;
}

pub use local::LocalExportBackend;
