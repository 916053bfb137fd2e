// Name resolution.
// Turns a user-supplied identifier, title, or slash-path into a concrete
// Notion object id: cache first, remote search as the fallback.

use tracing::info;

use crate::cache::Cache;
use crate::error::{NotaError, Result};
use crate::notion::NotionClient;
use crate::notion::types::{ObjectKind, RemoteObject};

/// Search capability the resolver falls back on when the cache misses.
/// Injected so resolution logic is testable without a network.
#[allow(async_fn_in_trait)]
pub trait ObjectSearch {
    async fn search_objects(
        &self,
        query: &str,
        kind: Option<ObjectKind>,
    ) -> Result<Vec<RemoteObject>>;
}

impl ObjectSearch for NotionClient {
    async fn search_objects(
        &self,
        query: &str,
        kind: Option<ObjectKind>,
    ) -> Result<Vec<RemoteObject>> {
        self.search_all(query, kind).await
    }
}

/// Whether a string is syntactically a Notion object id: 32 hex characters
/// once hyphens are stripped. Says nothing about whether the object exists.
pub fn looks_like_id(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != '-').collect();
    cleaned.len() == 32 && cleaned.chars().all(|c| c.is_ascii_hexdigit())
}

/// Resolve `name_or_id` to an object identifier.
///
/// Literal ids pass through untouched. Otherwise the cache is consulted,
/// and on a miss the remote search runs with the final path segment as the
/// query; any results are merged into the cache before one retry. A miss
/// after that is terminal.
pub async fn resolve<S: ObjectSearch>(
    cache: &mut Cache,
    gateway: &S,
    name_or_id: &str,
    kind: ObjectKind,
) -> Result<String> {
    if looks_like_id(name_or_id) {
        return Ok(name_or_id.to_string());
    }

    if let Some(id) = cache.find_by_path(name_or_id, kind) {
        return Ok(id);
    }

    info!("'{}' not in cache, searching", name_or_id);
    let query = name_or_id.rsplit('/').next().unwrap_or(name_or_id);
    let results = gateway.search_objects(query, Some(kind)).await?;

    if !results.is_empty() {
        cache.update_from_search(&results)?;
        if let Some(id) = cache.find_by_path(name_or_id, kind) {
            return Ok(id);
        }
    }

    Err(NotaError::Unresolved {
        name: name_or_id.to_string(),
        kind,
    })
}
