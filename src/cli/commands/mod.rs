// Command implementations.
// Each module holds the args struct and handler for one command family.

pub mod add;
pub mod blocks;
pub mod delete;
pub mod diag;
pub mod get;
pub mod list;
pub mod move_page;
pub mod query;
pub mod refresh;
pub mod search;
pub mod todos;
pub mod update;

use serde_json::Value;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::{NotaError, Result};
use crate::notion::NotionClient;

/// Build an authenticated client from the global options.
pub(crate) fn client(global: &GlobalOpts) -> Result<NotionClient> {
    match global.api_key.as_deref() {
        Some(token) if !token.trim().is_empty() => NotionClient::new(token),
        _ => Err(NotaError::MissingToken),
    }
}

/// Print a JSON result envelope to stdout.
pub(crate) fn emit(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Re-run the full search and merge it into the cache. Mutating commands
/// call this so later name lookups see the change.
pub(crate) async fn refresh_cache(client: &NotionClient, cache: &mut Cache) -> Result<()> {
    let results = client.search_all("", None).await?;
    cache.update_from_search(&results)
}

/// Parse a JSON-valued flag, naming the flag in the error.
pub(crate) fn parse_json_flag(flag: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| NotaError::InvalidArgument(format!("invalid JSON in {}: {}", flag, e)))
}
