// `nota add` - create pages, databases, todos, and simple blocks.

use clap::{Subcommand, ValueEnum};
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::{NotaError, Result};
use crate::notion::blocks::{BlockOptions, BlockType, build_block};
use crate::notion::props::{rich_text, template_schema, todo_properties};
use crate::notion::{NotionClient, ObjectKind};
use crate::resolver;

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Add a new page with optional icon, cover, and content
    Page(AddPageArgs),

    /// Create a new database
    Database(AddDatabaseArgs),

    /// Add a todo item to a database
    Todo(AddTodoArgs),

    /// Append a paragraph or heading block to a page
    Block(AddBlockArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddPageArgs {
    /// Page title
    #[arg(long)]
    pub title: String,

    /// Parent page or database (name, path, or id)
    #[arg(long, env = "NOTION_PARENT_PAGE_ID")]
    pub parent: Option<String>,

    /// Parent type
    #[arg(long, value_enum, default_value_t = ObjectKind::Page)]
    pub parent_type: ObjectKind,

    /// Page icon (emoji or URL)
    #[arg(long)]
    pub icon: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub cover: Option<String>,

    /// Initial text content (creates a paragraph block)
    #[arg(long)]
    pub content: Option<String>,

    /// Page properties as JSON (for database parents)
    #[arg(long)]
    pub properties: Option<String>,

    /// Block id, or heading/paragraph text, to position after
    #[arg(long, conflicts_with = "position")]
    pub after: Option<String>,

    /// Position within the parent
    #[arg(long, value_enum)]
    pub position: Option<PagePosition>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PagePosition {
    Start,
    End,
}

#[derive(clap::Args, Debug)]
pub struct AddDatabaseArgs {
    /// Database title
    #[arg(long)]
    pub title: String,

    /// Parent page (name, path, or id)
    #[arg(long, env = "NOTION_PARENT_PAGE_ID")]
    pub parent: Option<String>,

    /// Database properties schema as JSON
    #[arg(long)]
    pub properties: Option<String>,

    /// Use a predefined schema
    #[arg(long, value_enum)]
    pub template: Option<DatabaseTemplate>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DatabaseTemplate {
    Tasks,
    Notes,
    Contacts,
}

impl DatabaseTemplate {
    fn name(self) -> &'static str {
        match self {
            DatabaseTemplate::Tasks => "tasks",
            DatabaseTemplate::Notes => "notes",
            DatabaseTemplate::Contacts => "contacts",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddTodoArgs {
    /// Database name or id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database: Option<String>,

    /// Todo title
    #[arg(long)]
    pub title: String,

    /// Todo description
    #[arg(long)]
    pub description: Option<String>,

    /// Due date (ISO format: YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Priority level
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Status (e.g. Not Started, In Progress, Done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "verbatim")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddBlockArgs {
    /// Parent page (name, path, or id)
    #[arg(long)]
    pub parent: String,

    /// Plain text content
    #[arg(long)]
    pub text: Option<String>,

    /// Heading text (creates a heading_2 block)
    #[arg(long)]
    pub heading: Option<String>,
}

pub async fn run(cmd: AddCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AddCommands::Page(args) => add_page(args, global).await,
        AddCommands::Database(args) => add_database(args, global).await,
        AddCommands::Todo(args) => add_todo(args, global).await,
        AddCommands::Block(args) => add_block(args, global).await,
    }
}

async fn add_page(args: AddPageArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let parent = args.parent.ok_or_else(|| {
        NotaError::InvalidArgument("--parent required or set NOTION_PARENT_PAGE_ID".to_string())
    })?;
    let parent_id = resolver::resolve(&mut cache, &client, &parent, args.parent_type).await?;

    let after_block_id = match &args.after {
        Some(after) if resolver::looks_like_id(after) => Some(after.clone()),
        Some(after) => Some(find_block_matching(&client, &parent_id, after).await?),
        None => None,
    };

    let parent_key = match args.parent_type {
        ObjectKind::Page => "page_id",
        ObjectKind::Database => "database_id",
    };
    let mut body = json!({
        "parent": { "type": parent_key, parent_key: parent_id },
        "properties": { "title": { "title": rich_text(&args.title) } }
    });

    if let Some(raw) = &args.properties {
        let custom = super::parse_json_flag("--properties", raw)?;
        let Some(map) = custom.as_object() else {
            return Err(NotaError::InvalidArgument(
                "--properties must be a JSON object".to_string(),
            ));
        };
        for (key, value) in map {
            body["properties"][key] = value.clone();
        }
    }

    if let Some(icon) = &args.icon {
        body["icon"] = if icon.starts_with("http") {
            json!({ "type": "external", "external": { "url": icon } })
        } else {
            json!({ "type": "emoji", "emoji": icon })
        };
    }

    if let Some(cover) = &args.cover {
        body["cover"] = json!({ "type": "external", "external": { "url": cover } });
    }

    if let Some(content) = &args.content {
        let paragraph = build_block(
            BlockType::Paragraph,
            &BlockOptions {
                text: Some(content),
                ..Default::default()
            },
        )?;
        body["children"] = json!([paragraph]);
    }

    if let Some(after) = &after_block_id {
        body["position"] = json!({ "type": "after_block", "after_block": { "id": after } });
    } else if let Some(position) = args.position {
        let kind = match position {
            PagePosition::Start => "page_start",
            PagePosition::End => "page_end",
        };
        body["position"] = json!({ "type": kind });
    }

    let result = client.create_page(&body).await?;
    super::refresh_cache(&client, &mut cache).await?;

    super::emit(&json!({ "success": true, "page": result }))
}

async fn add_database(args: AddDatabaseArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let parent = args.parent.ok_or_else(|| {
        NotaError::InvalidArgument("--parent required or set NOTION_PARENT_PAGE_ID".to_string())
    })?;
    let parent_id = resolver::resolve(&mut cache, &client, &parent, ObjectKind::Page).await?;

    let schema = if let Some(raw) = &args.properties {
        super::parse_json_flag("--properties", raw)?
    } else if let Some(template) = args.template {
        template_schema(template.name())
            .ok_or_else(|| NotaError::InvalidArgument(format!("unknown template '{}'", template.name())))?
    } else {
        json!({ "Name": { "title": {} } })
    };

    let body = json!({
        "parent": { "type": "page_id", "page_id": parent_id },
        "title": rich_text(&args.title),
        "properties": schema,
    });

    let result = client.create_database(&body).await?;
    super::refresh_cache(&client, &mut cache).await?;

    super::emit(&json!({ "success": true, "database": result }))
}

async fn add_todo(args: AddTodoArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let database = args.database.ok_or_else(|| {
        NotaError::InvalidArgument("--database required or set NOTION_DATABASE_ID".to_string())
    })?;
    let database_id =
        resolver::resolve(&mut cache, &client, &database, ObjectKind::Database).await?;

    let tags: Option<Vec<String>> = args
        .tags
        .as_deref()
        .map(|t| t.split(',').map(|s| s.trim().to_string()).collect());

    let props = todo_properties(
        &args.title,
        args.description.as_deref(),
        args.due_date.as_deref(),
        args.priority.map(Priority::name),
        tags.as_deref(),
        args.status.as_deref(),
    );

    let body = json!({
        "parent": { "type": "database_id", "database_id": database_id },
        "properties": props,
    });

    let result = client.create_page(&body).await?;
    super::emit(&json!({ "success": true, "todo": result }))
}

async fn add_block(args: AddBlockArgs, global: &GlobalOpts) -> Result<()> {
    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let (kind, text) = match (&args.heading, &args.text) {
        (Some(heading), _) => (BlockType::Heading2, heading.as_str()),
        (None, Some(text)) => (BlockType::Paragraph, text.as_str()),
        (None, None) => {
            return Err(NotaError::InvalidArgument(
                "either --text or --heading required".to_string(),
            ));
        }
    };

    let parent_id = resolver::resolve(&mut cache, &client, &args.parent, ObjectKind::Page).await?;

    let block = build_block(
        kind,
        &BlockOptions {
            text: Some(text),
            ..Default::default()
        },
    )?;
    let result = client.append_children(&parent_id, vec![block], None).await?;

    super::emit(&json!({ "success": true, "result": result }))
}

/// Find a child block whose heading or paragraph text contains `needle`.
async fn find_block_matching(
    client: &NotionClient,
    parent_id: &str,
    needle: &str,
) -> Result<String> {
    let wanted = needle.to_lowercase();

    for block in client.block_children(parent_id).await? {
        let kind = block["type"].as_str().unwrap_or_default();
        if matches!(kind, "heading_1" | "heading_2" | "heading_3" | "paragraph") {
            let text = block[kind]["rich_text"]
                .get(0)
                .and_then(|t| t["plain_text"].as_str())
                .unwrap_or_default();
            if text.to_lowercase().contains(&wanted) {
                if let Some(id) = block["id"].as_str() {
                    return Ok(id.to_string());
                }
            }
        }
    }

    Err(NotaError::InvalidArgument(format!(
        "could not find block matching '{}'",
        needle
    )))
}
