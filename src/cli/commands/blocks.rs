// `nota blocks` - add, list, and delete blocks, plus todo subtasks.

use clap::Subcommand;
use serde_json::{Value, json};

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;
use crate::notion::blocks::{BlockOptions, BlockType, build_block};
use crate::resolver;

#[derive(Subcommand, Debug)]
pub enum BlocksCommands {
    /// Add a block of any type to a page
    Add(BlocksAddArgs),

    /// List all blocks in a page
    List(BlocksListArgs),

    /// Delete a block
    Delete(BlocksDeleteArgs),

    /// Manage todo subtasks
    #[command(subcommand)]
    Subtasks(SubtasksCommands),
}

#[derive(clap::Args, Debug)]
pub struct BlocksAddArgs {
    /// Parent page (name, path, or id)
    pub parent: String,

    /// Block type
    #[arg(long = "type", value_enum)]
    pub block_type: BlockType,

    /// Text content
    #[arg(long)]
    pub text: Option<String>,

    /// URL (for media/bookmark/embed blocks)
    #[arg(long)]
    pub url: Option<String>,

    /// Language (for code blocks)
    #[arg(long)]
    pub language: Option<String>,

    /// Icon emoji (for callout blocks)
    #[arg(long)]
    pub icon: Option<String>,

    /// Checked status (for to_do blocks)
    #[arg(long)]
    pub checked: bool,

    /// Math expression (for equation blocks)
    #[arg(long)]
    pub expression: Option<String>,

    /// Page id (for link_to_page blocks)
    #[arg(long)]
    pub page_id: Option<String>,

    /// Title (for child_page/child_database blocks)
    #[arg(long)]
    pub title: Option<String>,

    /// Block id to position after
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct BlocksListArgs {
    /// Parent page (name, path, or id)
    pub parent: String,
}

#[derive(clap::Args, Debug)]
pub struct BlocksDeleteArgs {
    /// Block id
    pub block_id: String,
}

#[derive(Subcommand, Debug)]
pub enum SubtasksCommands {
    /// Add a subtask to a todo block
    Add(SubtaskAddArgs),

    /// List subtasks of a todo block
    List(SubtaskIdArgs),

    /// Mark a subtask as completed
    Check(SubtaskIdArgs),

    /// Mark a subtask as incomplete
    Uncheck(SubtaskIdArgs),
}

#[derive(clap::Args, Debug)]
pub struct SubtaskAddArgs {
    /// Todo block id
    pub todo_block_id: String,

    /// Subtask text
    #[arg(long)]
    pub text: String,

    /// Mark as completed
    #[arg(long)]
    pub checked: bool,
}

#[derive(clap::Args, Debug)]
pub struct SubtaskIdArgs {
    /// Block id
    pub block_id: String,
}

pub async fn run(cmd: BlocksCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BlocksCommands::Add(args) => add(args, global).await,
        BlocksCommands::List(args) => list(args, global).await,
        BlocksCommands::Delete(args) => delete(args, global).await,
        BlocksCommands::Subtasks(cmd) => subtasks(cmd, global).await,
    }
}

async fn add(args: BlocksAddArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let parent_id = resolver::resolve(&mut cache, &client, &args.parent, ObjectKind::Page).await?;

    let block = build_block(
        args.block_type,
        &BlockOptions {
            text: args.text.as_deref(),
            url: args.url.as_deref(),
            language: args.language.as_deref(),
            icon: args.icon.as_deref(),
            checked: args.checked,
            expression: args.expression.as_deref(),
            page_id: args.page_id.as_deref(),
            title: args.title.as_deref(),
        },
    )?;

    let result = client
        .append_children(&parent_id, vec![block], args.after.as_deref())
        .await?;

    super::emit(&json!({ "success": true, "result": result }))
}

async fn list(args: BlocksListArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let parent_id = resolver::resolve(&mut cache, &client, &args.parent, ObjectKind::Page).await?;

    let formatted: Vec<Value> = client
        .block_children(&parent_id)
        .await?
        .iter()
        .map(format_block)
        .collect();

    super::emit(&json!({
        "success": true,
        "count": formatted.len(),
        "blocks": formatted,
    }))
}

async fn delete(args: BlocksDeleteArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    client.delete_block(&args.block_id).await?;

    super::emit(&json!({ "success": true, "deleted": args.block_id }))
}

async fn subtasks(cmd: SubtasksCommands, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;

    match cmd {
        SubtasksCommands::Add(args) => {
            let block = build_block(
                BlockType::ToDo,
                &BlockOptions {
                    text: Some(&args.text),
                    checked: args.checked,
                    ..Default::default()
                },
            )?;
            let result = client
                .append_children(&args.todo_block_id, vec![block], None)
                .await?;
            super::emit(&json!({ "success": true, "result": result }))
        }
        SubtasksCommands::List(args) => {
            let subtasks: Vec<Value> = client
                .block_children(&args.block_id)
                .await?
                .iter()
                .filter(|block| block["type"] == "to_do")
                .map(|block| {
                    json!({
                        "id": block["id"],
                        "text": first_plain_text(&block["to_do"]),
                        "checked": block["to_do"]["checked"].as_bool().unwrap_or(false),
                    })
                })
                .collect();
            super::emit(&json!({
                "success": true,
                "count": subtasks.len(),
                "subtasks": subtasks,
            }))
        }
        SubtasksCommands::Check(args) => {
            let result = client
                .update_block(&args.block_id, &json!({ "to_do": { "checked": true } }))
                .await?;
            super::emit(&json!({ "success": true, "result": result }))
        }
        SubtasksCommands::Uncheck(args) => {
            let result = client
                .update_block(&args.block_id, &json!({ "to_do": { "checked": false } }))
                .await?;
            super::emit(&json!({ "success": true, "result": result }))
        }
    }
}

/// Summarize a block for display: id, type, and the interesting content.
fn format_block(block: &Value) -> Value {
    let kind = block["type"].as_str().unwrap_or_default();
    let mut info = json!({ "id": block["id"], "type": kind });

    match kind {
        "paragraph" | "heading_1" | "heading_2" | "heading_3" | "quote" | "callout" | "toggle"
        | "bulleted_list_item" | "numbered_list_item" => {
            info["text"] = json!(first_plain_text(&block[kind]));
        }
        "to_do" => {
            info["text"] = json!(first_plain_text(&block["to_do"]));
            info["checked"] = json!(block["to_do"]["checked"].as_bool().unwrap_or(false));
        }
        "code" => {
            info["text"] = json!(first_plain_text(&block["code"]));
            info["language"] = json!(block["code"]["language"].as_str().unwrap_or("plain text"));
        }
        "child_page" => {
            info["title"] = block["child_page"]["title"].clone();
        }
        _ => {}
    }

    info
}

fn first_plain_text(content: &Value) -> &str {
    content["rich_text"]
        .get(0)
        .and_then(|t| t["plain_text"].as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_paragraph_block() {
        let block = json!({
            "id": "b1",
            "type": "paragraph",
            "paragraph": { "rich_text": [{ "plain_text": "Hello" }] }
        });

        let info = format_block(&block);
        assert_eq!(info["type"], "paragraph");
        assert_eq!(info["text"], "Hello");
    }

    #[test]
    fn test_format_todo_block() {
        let block = json!({
            "id": "b2",
            "type": "to_do",
            "to_do": { "rich_text": [{ "plain_text": "Task" }], "checked": true }
        });

        let info = format_block(&block);
        assert_eq!(info["text"], "Task");
        assert_eq!(info["checked"], true);
    }

    #[test]
    fn test_format_block_without_text() {
        let block = json!({ "id": "b3", "type": "divider", "divider": {} });

        let info = format_block(&block);
        assert_eq!(info["type"], "divider");
        assert!(info.get("text").is_none());
    }
}
