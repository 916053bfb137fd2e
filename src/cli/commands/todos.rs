// `nota todos` - shortcuts for searching task databases.

use clap::Subcommand;
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::{NotaError, Result};
use crate::notion::ObjectKind;
use crate::notion::props::todo_filter;
use crate::resolver;

#[derive(Subcommand, Debug)]
pub enum TodosCommands {
    /// Search todos with filters
    Search(TodosSearchArgs),
}

#[derive(clap::Args, Debug)]
pub struct TodosSearchArgs {
    /// Database name, path, or id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database: Option<String>,

    /// Filter by status
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Due before date (YYYY-MM-DD)
    #[arg(long)]
    pub due_before: Option<String>,

    /// Due after date (YYYY-MM-DD)
    #[arg(long)]
    pub due_after: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tags: Option<String>,

    /// Max results
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

pub async fn run(cmd: TodosCommands, global: &GlobalOpts) -> Result<()> {
    let TodosCommands::Search(args) = cmd;

    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let database = args.database.ok_or_else(|| {
        NotaError::InvalidArgument("--database required or set NOTION_DATABASE_ID".to_string())
    })?;
    let database_id =
        resolver::resolve(&mut cache, &client, &database, ObjectKind::Database).await?;

    let filter = todo_filter(
        args.status.as_deref(),
        args.priority.as_deref(),
        args.due_before.as_deref(),
        args.due_after.as_deref(),
        args.tags.as_deref(),
    )?;

    let todos = client
        .query_database(&database_id, filter.as_ref(), None, args.limit, false)
        .await?;

    super::emit(&json!({
        "success": true,
        "count": todos.len(),
        "todos": todos,
    }))
}
