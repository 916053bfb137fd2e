// `nota query` - database queries with filters and sorts.

use clap::Subcommand;
use serde_json::json;

use crate::cache::Cache;
use crate::cli::GlobalOpts;
use crate::error::Result;
use crate::notion::ObjectKind;
use crate::notion::props::todo_filter;
use crate::resolver;

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Query a database with filters and sorting
    Database(QueryDatabaseArgs),
}

#[derive(clap::Args, Debug)]
pub struct QueryDatabaseArgs {
    /// Database name, path, or id
    pub database: String,

    /// Filter as JSON
    #[arg(long)]
    pub filter: Option<String>,

    /// Sorts as JSON array
    #[arg(long)]
    pub sorts: Option<String>,

    /// Filter by status (shortcut)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by priority (shortcut)
    #[arg(long)]
    pub priority: Option<String>,

    /// Filter by due date before (YYYY-MM-DD)
    #[arg(long)]
    pub due_before: Option<String>,

    /// Filter by due date after (YYYY-MM-DD)
    #[arg(long)]
    pub due_after: Option<String>,

    /// Filter by tag (shortcut)
    #[arg(long)]
    pub tags: Option<String>,

    /// Results per page
    #[arg(long, default_value_t = 100)]
    pub page_size: u32,

    /// Fetch all pages with auto-pagination
    #[arg(long)]
    pub all: bool,
}

pub async fn run(cmd: QueryCommands, global: &GlobalOpts) -> Result<()> {
    let QueryCommands::Database(args) = cmd;

    let client = super::client(global)?;
    let mut cache = Cache::open_default()?;

    let database_id =
        resolver::resolve(&mut cache, &client, &args.database, ObjectKind::Database).await?;

    let filter = match &args.filter {
        Some(raw) => Some(super::parse_json_flag("--filter", raw)?),
        None => todo_filter(
            args.status.as_deref(),
            args.priority.as_deref(),
            args.due_before.as_deref(),
            args.due_after.as_deref(),
            args.tags.as_deref(),
        )?,
    };

    let sorts = match &args.sorts {
        Some(raw) => Some(super::parse_json_flag("--sorts", raw)?),
        None => None,
    };

    let results = client
        .query_database(
            &database_id,
            filter.as_ref(),
            sorts.as_ref(),
            args.page_size,
            args.all,
        )
        .await?;

    super::emit(&json!({
        "success": true,
        "count": results.len(),
        "results": results,
    }))
}
