// `nota refresh-cache` - full cache rebuild from the search endpoint.

use serde_json::json;
use tracing::info;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;

pub async fn run(global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    info!("refreshing cache from Notion API");
    super::refresh_cache(&client, &mut cache).await?;

    super::emit(&json!({
        "success": true,
        "cached_pages": cache.entries(ObjectKind::Page).len(),
        "cached_databases": cache.entries(ObjectKind::Database).len(),
        "cache_file": cache.path().display().to_string(),
    }))
}
