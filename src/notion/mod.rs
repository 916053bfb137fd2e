// Notion API module.
// Provides the HTTP client, typed endpoints, and payload builders.

pub mod blocks;
pub mod client;
pub mod endpoints;
pub mod props;
pub mod types;

pub use client::NotionClient;
pub use types::{ObjectKind, RemoteObject};
