// `nota list` - list cached pages or databases.

use clap::ValueEnum;
use serde_json::{Value, json};
use tracing::info;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub entity: ListEntity,

    /// Force a cache refresh first
    #[arg(long)]
    pub refresh: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ListEntity {
    Pages,
    Databases,
}

impl ListEntity {
    fn kind(self) -> ObjectKind {
        match self {
            ListEntity::Pages => ObjectKind::Page,
            ListEntity::Databases => ObjectKind::Database,
        }
    }

    fn key(self) -> &'static str {
        match self {
            ListEntity::Pages => "pages",
            ListEntity::Databases => "databases",
        }
    }
}

pub async fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    if args.refresh || cache.is_stale() {
        info!("refreshing cache");
        super::refresh_cache(&client, &mut cache).await?;
    }

    let mut items: Vec<Value> = cache
        .entries(args.entity.kind())
        .iter()
        .filter(|(_, entry)| !entry.archived)
        .map(|(id, entry)| {
            json!({
                "title": entry.title,
                "id": id,
                "url": entry.url,
                "last_seen": entry.last_seen,
            })
        })
        .collect();

    items.sort_by(|a, b| a["title"].as_str().cmp(&b["title"].as_str()));

    super::emit(&json!({
        "success": true,
        "count": items.len(),
        (args.entity.key()): items,
    }))
}
