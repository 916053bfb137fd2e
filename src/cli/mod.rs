// CLI argument definitions and dispatch.
// REST-like verb structure: add, get, update, delete, list, search, query, move.

pub mod commands;

use clap::{Parser, Subcommand};

use crate::error::Result;

use commands::{add, blocks, delete, diag, get, list, move_page, query, refresh, search, todos, update};

#[derive(Parser)]
#[command(name = "nota")]
#[command(version, about = "Human-friendly command line client for the Notion API")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Notion integration token
    #[arg(long, global = true, env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cached pages or databases
    List(list::ListArgs),

    /// Search pages and databases, updating the local cache
    Search(search::SearchArgs),

    /// Add entities (page, database, todo, block)
    #[command(subcommand)]
    Add(add::AddCommands),

    /// Manage content blocks
    #[command(subcommand)]
    Blocks(blocks::BlocksCommands),

    /// Retrieve a page, database, or block
    Get(get::GetArgs),

    /// Update a page, database, or block
    Update(update::UpdateArgs),

    /// Delete a page (archives it) or a block
    Delete(delete::DeleteArgs),

    /// Query databases with filters and sorts
    #[command(subcommand)]
    Query(query::QueryCommands),

    /// Todo management
    #[command(subcommand)]
    Todos(todos::TodosCommands),

    /// Move pages to new parents
    #[command(subcommand)]
    Move(move_page::MoveCommands),

    /// Refresh the local cache of pages and databases
    RefreshCache,

    /// Verify Notion API connection and authentication
    VerifyConnection,

    /// Check current environment configuration
    CheckConfig,
}

pub async fn run(cli: Cli) -> Result<()> {
    let global = cli.global;

    match cli.command {
        Commands::List(args) => list::run(args, &global).await,
        Commands::Search(args) => search::run(args, &global).await,
        Commands::Add(cmd) => add::run(cmd, &global).await,
        Commands::Blocks(cmd) => blocks::run(cmd, &global).await,
        Commands::Get(args) => get::run(args, &global).await,
        Commands::Update(args) => update::run(args, &global).await,
        Commands::Delete(args) => delete::run(args, &global).await,
        Commands::Query(cmd) => query::run(cmd, &global).await,
        Commands::Todos(cmd) => todos::run(cmd, &global).await,
        Commands::Move(cmd) => move_page::run(cmd, &global).await,
        Commands::RefreshCache => refresh::run(&global).await,
        Commands::VerifyConnection => diag::verify_connection(&global).await,
        Commands::CheckConfig => diag::check_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_page() {
        let cli = Cli::try_parse_from([
            "nota", "add", "page", "--title", "Meeting Notes", "--parent", "Work/Projects",
        ])
        .unwrap();

        match cli.command {
            Commands::Add(add::AddCommands::Page(args)) => {
                assert_eq!(args.title, "Meeting Notes");
                assert_eq!(args.parent.as_deref(), Some("Work/Projects"));
            }
            _ => panic!("expected add page"),
        }
    }

    #[test]
    fn test_update_archive_conflicts_with_restore() {
        let result = Cli::try_parse_from([
            "nota", "update", "page", "Old Page", "--archive", "--restore",
        ]);
        assert!(result.is_err());
    }
}
