// `nota delete` - archive a page or delete a block.
// The API has no hard delete for pages, so deletion archives them.

use clap::ValueEnum;
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;
use crate::resolver;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// What to delete
    #[arg(value_enum)]
    pub entity: DeleteEntity,

    /// Name, path, or id (blocks take a raw id)
    pub identifier: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DeleteEntity {
    Page,
    Block,
}

pub async fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    let deleted = match args.entity {
        DeleteEntity::Page => {
            let mut cache = Cache::open_default()?;
            let id =
                resolver::resolve(&mut cache, &client, &args.identifier, ObjectKind::Page).await?;

            client.update_page(&id, &json!({ "archived": true })).await?;
            super::refresh_cache(&client, &mut cache).await?;
            id
        }
        DeleteEntity::Block => {
            client.delete_block(&args.identifier).await?;
            args.identifier
        }
    };

    let kind = match args.entity {
        DeleteEntity::Page => "page",
        DeleteEntity::Block => "block",
    };
    super::emit(&json!({ "success": true, "deleted": deleted, "type": kind }))
}
