// Notion API response types.
// Defines structs for deserializing Notion REST API responses.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Object kind discriminator (page or database).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Page,
    Database,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Page => write!(f, "page"),
            ObjectKind::Database => write!(f, "database"),
        }
    }
}

/// Parent reference carried by pages and databases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParentRef {
    PageId { page_id: String },
    DatabaseId { database_id: String },
    BlockId { block_id: String },
    Workspace { workspace: bool },
    #[serde(other)]
    Unknown,
}

impl ParentRef {
    /// The parent identifier usable as a hierarchy key.
    /// Workspace and block parents have no cacheable parent page.
    pub fn cache_parent_id(&self) -> Option<&str> {
        match self {
            ParentRef::PageId { page_id } => Some(page_id),
            ParentRef::DatabaseId { database_id } => Some(database_id),
            ParentRef::BlockId { .. } | ParentRef::Workspace { .. } | ParentRef::Unknown => None,
        }
    }
}

/// One element of a rich text array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: Option<String>,
}

/// A page property, of which only title content is interesting here.
/// Non-title properties deserialize with an empty title array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichTextItem>,
}

/// A page or database as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteObject {
    pub object: ObjectKind,
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, TitleProperty>,
    #[serde(default)]
    pub title: Vec<RichTextItem>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
}

impl RemoteObject {
    /// Extract the display title.
    /// Pages store it in a `title` (or `Name`) property, databases at top level.
    pub fn display_title(&self) -> String {
        let rich: &[RichTextItem] = match self.object {
            ObjectKind::Page => self
                .properties
                .get("title")
                .or_else(|| self.properties.get("Name"))
                .map(|p| p.title.as_slice())
                .unwrap_or(&[]),
            ObjectKind::Database => &self.title,
        };

        rich.first()
            .and_then(|t| t.plain_text.clone())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// Response wrapper for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RemoteObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Response wrapper for database queries and block children listings.
/// Results are passed through untyped since the CLI prints them verbatim.
#[derive(Debug, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// The authenticated bot user, for connection verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub bot: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_title_from_title_property() {
        let obj: RemoteObject = serde_json::from_value(json!({
            "object": "page",
            "id": "p1",
            "properties": {"title": {"title": [{"plain_text": "Notes"}]}},
            "parent": {"type": "workspace", "workspace": true},
            "url": "https://notion.so/p1",
            "archived": false
        }))
        .unwrap();

        assert_eq!(obj.object, ObjectKind::Page);
        assert_eq!(obj.display_title(), "Notes");
        assert_eq!(obj.parent.unwrap().cache_parent_id(), None);
    }

    #[test]
    fn test_page_title_from_name_property() {
        let obj: RemoteObject = serde_json::from_value(json!({
            "object": "page",
            "id": "p2",
            "properties": {
                "Status": {"select": {"name": "Done"}},
                "Name": {"title": [{"plain_text": "Tasks entry"}]}
            }
        }))
        .unwrap();

        assert_eq!(obj.display_title(), "Tasks entry");
    }

    #[test]
    fn test_database_title_top_level() {
        let obj: RemoteObject = serde_json::from_value(json!({
            "object": "database",
            "id": "d1",
            "title": [{"plain_text": "Tasks"}],
            "parent": {"type": "page_id", "page_id": "p1"}
        }))
        .unwrap();

        assert_eq!(obj.display_title(), "Tasks");
        assert_eq!(obj.parent.unwrap().cache_parent_id(), Some("p1"));
    }

    #[test]
    fn test_missing_title_defaults_to_untitled() {
        let page: RemoteObject = serde_json::from_value(json!({
            "object": "page",
            "id": "p3",
            "properties": {}
        }))
        .unwrap();
        assert_eq!(page.display_title(), "Untitled");

        let database: RemoteObject = serde_json::from_value(json!({
            "object": "database",
            "id": "d2",
            "title": []
        }))
        .unwrap();
        assert_eq!(database.display_title(), "Untitled");
    }

    #[test]
    fn test_unknown_parent_type() {
        let obj: RemoteObject = serde_json::from_value(json!({
            "object": "page",
            "id": "p4",
            "parent": {"type": "data_source_id", "data_source_id": "x"}
        }))
        .unwrap();

        assert_eq!(obj.parent.unwrap().cache_parent_id(), None);
    }
}
