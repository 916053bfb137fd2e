// `nota get` - retrieve a page, database, or block.

use clap::ValueEnum;
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;
use crate::resolver;

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// What to retrieve
    #[arg(value_enum)]
    pub entity: GetEntity,

    /// Name, path, or id (blocks take a raw id)
    pub identifier: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GetEntity {
    Page,
    Database,
    Block,
}

pub async fn run(args: GetArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    let (key, result) = match args.entity {
        GetEntity::Page => {
            let mut cache = Cache::open_default()?;
            let id =
                resolver::resolve(&mut cache, &client, &args.identifier, ObjectKind::Page).await?;
            ("page", client.get_page(&id).await?)
        }
        GetEntity::Database => {
            let mut cache = Cache::open_default()?;
            let id =
                resolver::resolve(&mut cache, &client, &args.identifier, ObjectKind::Database)
                    .await?;
            ("database", client.get_database(&id).await?)
        }
        GetEntity::Block => ("block", client.get_block(&args.identifier).await?),
    };

    super::emit(&json!({ "success": true, (key): result }))
}
