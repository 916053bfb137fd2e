// `nota search` - remote search that also warms the local cache.

use serde_json::{Value, json};

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search query (empty returns everything)
    #[arg(default_value = "")]
    pub query: String,

    /// Restrict results to one object kind
    #[arg(long = "type", value_enum)]
    pub kind: Option<ObjectKind>,
}

pub async fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    let results = client.search_all(&args.query, args.kind).await?;

    let mut cache = Cache::open_default()?;
    cache.update_from_search(&results)?;

    let formatted: Vec<Value> = results
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "type": item.object,
                "title": item.display_title(),
                "url": item.url,
                "archived": item.archived,
            })
        })
        .collect();

    super::emit(&json!({
        "success": true,
        "count": formatted.len(),
        "results": formatted,
    }))
}
