// Notion API endpoint functions.
// Provides typed methods for the endpoints the CLI uses, including the
// sequential cursor pagination loops for search and database queries.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;

use super::client::NotionClient;
use super::types::{ObjectKind, ObjectList, RemoteObject, SearchResponse, User};

/// API version that understands the page `position` parameter.
const PAGE_POSITION_VERSION: &str = "2025-09-03";

const SEARCH_PAGE_SIZE: u32 = 100;

impl NotionClient {
    /// Get the authenticated bot user.
    pub async fn get_current_user(&self) -> Result<User> {
        let response = self.get("/users/me").await?;
        let user: User = response.json().await?;
        Ok(user)
    }

    /// Search for pages and databases, following the cursor until the
    /// result set is exhausted. Results arrive sorted by last edit time.
    pub async fn search_all(
        &self,
        query: &str,
        kind: Option<ObjectKind>,
    ) -> Result<Vec<RemoteObject>> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({
                "page_size": SEARCH_PAGE_SIZE,
                "sort": {
                    "direction": "descending",
                    "timestamp": "last_edited_time"
                }
            });
            if !query.is_empty() {
                body["query"] = json!(query);
            }
            if let Some(kind) = kind {
                body["filter"] = json!({ "value": kind, "property": "object" });
            }
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response = self.post("/search", &body).await?;
            let page: SearchResponse = response.json().await?;
            all.extend(page.results);

            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        debug!(count = all.len(), query = query, "search complete");
        Ok(all)
    }

    /// Retrieve a page.
    pub async fn get_page(&self, page_id: &str) -> Result<Value> {
        let response = self.get(&format!("/pages/{}", page_id)).await?;
        Ok(response.json().await?)
    }

    /// Create a page from a prebuilt request body.
    pub async fn create_page(&self, body: &Value) -> Result<Value> {
        // Position parameters are only honored by newer API versions.
        let response = if body.get("position").is_some() {
            self.post_with_version("/pages", body, PAGE_POSITION_VERSION)
                .await?
        } else {
            self.post("/pages", body).await?
        };
        Ok(response.json().await?)
    }

    /// Update page properties, parent, or archived state.
    pub async fn update_page(&self, page_id: &str, body: &Value) -> Result<Value> {
        let response = self.patch(&format!("/pages/{}", page_id), body).await?;
        Ok(response.json().await?)
    }

    /// Retrieve a database.
    pub async fn get_database(&self, database_id: &str) -> Result<Value> {
        let response = self.get(&format!("/databases/{}", database_id)).await?;
        Ok(response.json().await?)
    }

    /// Create a database from a prebuilt request body.
    pub async fn create_database(&self, body: &Value) -> Result<Value> {
        let response = self.post("/databases", body).await?;
        Ok(response.json().await?)
    }

    /// Update database title, schema, or archived state.
    pub async fn update_database(&self, database_id: &str, body: &Value) -> Result<Value> {
        let response = self
            .patch(&format!("/databases/{}", database_id), body)
            .await?;
        Ok(response.json().await?)
    }

    /// Query a database with optional filter and sorts. With `fetch_all`,
    /// follows the cursor until every page has been collected.
    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<&Value>,
        sorts: Option<&Value>,
        page_size: u32,
        fetch_all: bool,
    ) -> Result<Vec<Value>> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": page_size });
            if let Some(filter) = filter {
                body["filter"] = filter.clone();
            }
            if let Some(sorts) = sorts {
                body["sorts"] = sorts.clone();
            }
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response = self
                .post(&format!("/databases/{}/query", database_id), &body)
                .await?;
            let page: ObjectList = response.json().await?;
            all.extend(page.results);

            if !fetch_all || !page.has_more {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(all)
    }

    /// Retrieve a single block.
    pub async fn get_block(&self, block_id: &str) -> Result<Value> {
        let response = self.get(&format!("/blocks/{}", block_id)).await?;
        Ok(response.json().await?)
    }

    /// List the direct children of a block or page.
    pub async fn block_children(&self, block_id: &str) -> Result<Vec<Value>> {
        let response = self.get(&format!("/blocks/{}/children", block_id)).await?;
        let list: ObjectList = response.json().await?;
        Ok(list.results)
    }

    /// Append child blocks, optionally positioned after an existing block.
    pub async fn append_children(
        &self,
        block_id: &str,
        children: Vec<Value>,
        after: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({ "children": children });
        if let Some(after) = after {
            body["after"] = json!(after);
        }
        let response = self
            .patch(&format!("/blocks/{}/children", block_id), &body)
            .await?;
        Ok(response.json().await?)
    }

    /// Update a block's content.
    pub async fn update_block(&self, block_id: &str, body: &Value) -> Result<Value> {
        let response = self.patch(&format!("/blocks/{}", block_id), body).await?;
        Ok(response.json().await?)
    }

    /// Delete (archive) a block.
    pub async fn delete_block(&self, block_id: &str) -> Result<()> {
        self.delete(&format!("/blocks/{}", block_id)).await?;
        Ok(())
    }
}
