// `nota move` - reparent pages.

use clap::Subcommand;
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;
use crate::resolver;

#[derive(Subcommand, Debug)]
pub enum MoveCommands {
    /// Move a page to a new parent
    Page(MovePageArgs),
}

#[derive(clap::Args, Debug)]
pub struct MovePageArgs {
    /// Page to move (name, path, or id)
    pub page: String,

    /// New parent page (name, path, or id)
    #[arg(long)]
    pub to: String,
}

pub async fn run(cmd: MoveCommands, global: &GlobalOpts) -> Result<()> {
    let MoveCommands::Page(args) = cmd;

    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let page_id = resolver::resolve(&mut cache, &client, &args.page, ObjectKind::Page).await?;
    let new_parent_id = resolver::resolve(&mut cache, &client, &args.to, ObjectKind::Page).await?;

    let result = client
        .update_page(
            &page_id,
            &json!({ "parent": { "type": "page_id", "page_id": new_parent_id } }),
        )
        .await?;

    super::refresh_cache(&client, &mut cache).await?;

    super::emit(&json!({ "success": true, "page": result }))
}
