// `nota update` - change titles, properties, text, or archived state.

use clap::ValueEnum;
use serde_json::{Value, json};

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::{NotaError, Result};
use crate::notion::props::rich_text;
use crate::notion::{NotionClient, ObjectKind};
use crate::resolver;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// What to update
    #[arg(value_enum)]
    pub entity: UpdateEntity,

    /// Name, path, or id (blocks take a raw id)
    pub identifier: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// Updated properties as JSON
    #[arg(long)]
    pub properties: Option<String>,

    /// New text content (for blocks)
    #[arg(long)]
    pub text: Option<String>,

    /// Archive the entity
    #[arg(long, conflicts_with = "restore")]
    pub archive: bool,

    /// Restore an archived entity
    #[arg(long)]
    pub restore: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum UpdateEntity {
    Page,
    Database,
    Block,
}

pub async fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    let (key, result) = match args.entity {
        UpdateEntity::Page => {
            let mut cache = Cache::open_default()?;
            let id =
                resolver::resolve(&mut cache, &client, &args.identifier, ObjectKind::Page).await?;

            let mut body = json!({});
            if let Some(title) = &args.title {
                body["properties"] = json!({ "title": { "title": rich_text(title) } });
            }
            apply_archived(&mut body, args.archive, args.restore);
            require_updates(&body)?;

            let result = client.update_page(&id, &body).await?;
            super::refresh_cache(&client, &mut cache).await?;
            ("page", result)
        }
        UpdateEntity::Database => {
            let mut cache = Cache::open_default()?;
            let id =
                resolver::resolve(&mut cache, &client, &args.identifier, ObjectKind::Database)
                    .await?;

            let mut body = json!({});
            if let Some(title) = &args.title {
                body["title"] = rich_text(title);
            }
            if let Some(raw) = &args.properties {
                body["properties"] = super::parse_json_flag("--properties", raw)?;
            }
            apply_archived(&mut body, args.archive, args.restore);
            require_updates(&body)?;

            let result = client.update_database(&id, &body).await?;
            super::refresh_cache(&client, &mut cache).await?;
            ("database", result)
        }
        UpdateEntity::Block => {
            let body = match &args.text {
                Some(text) => block_text_body(&client, &args.identifier, text).await?,
                None => {
                    return Err(NotaError::InvalidArgument(
                        "no updates specified".to_string(),
                    ));
                }
            };
            ("block", client.update_block(&args.identifier, &body).await?)
        }
    };

    super::emit(&json!({ "success": true, (key): result }))
}

fn apply_archived(body: &mut Value, archive: bool, restore: bool) {
    if archive {
        body["archived"] = json!(true);
    } else if restore {
        body["archived"] = json!(false);
    }
}

fn require_updates(body: &Value) -> Result<()> {
    match body.as_object() {
        Some(map) if !map.is_empty() => Ok(()),
        _ => Err(NotaError::InvalidArgument(
            "no updates specified".to_string(),
        )),
    }
}

/// Build the text-update body for a block, which depends on its type.
async fn block_text_body(client: &NotionClient, block_id: &str, text: &str) -> Result<Value> {
    let block = client.get_block(block_id).await?;
    let kind = block["type"].as_str().unwrap_or_default();

    match kind {
        "paragraph" | "heading_1" | "heading_2" | "heading_3" | "quote" | "callout" | "toggle"
        | "bulleted_list_item" | "numbered_list_item" | "to_do" => {
            Ok(json!({ kind: { "rich_text": rich_text(text) } }))
        }
        "code" => {
            let language = block["code"]["language"].as_str().unwrap_or("plain text");
            Ok(json!({
                "code": { "rich_text": rich_text(text), "language": language }
            }))
        }
        other => Err(NotaError::InvalidArgument(format!(
            "cannot update text for block type: {}",
            other
        ))),
    }
}
