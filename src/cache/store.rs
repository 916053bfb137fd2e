// Local resolution cache.
// A TTL-bounded, disk-persisted mirror of remote pages and databases that
// backs name-to-identifier lookups without a network round trip.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NotaError, Result};
use crate::notion::types::{ObjectKind, RemoteObject};

use super::paths;

/// Hours before a full refresh is considered due.
const CACHE_TTL_HOURS: i64 = 24;

/// One cached remote object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
    pub url: String,
    pub last_seen: DateTime<Utc>,
    pub archived: bool,
}

/// The persisted cache document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct CacheState {
    #[serde(default)]
    pages: HashMap<String, CacheEntry>,
    #[serde(default)]
    databases: HashMap<String, CacheEntry>,
    /// parent id -> child ids, duplicates suppressed.
    #[serde(default)]
    hierarchy: HashMap<String, Vec<String>>,
    #[serde(default)]
    last_refresh: Option<DateTime<Utc>>,
}

/// Parent constraint for a title lookup.
enum ParentFilter<'a> {
    /// Any parent, or none.
    Any,
    /// No cached parent (root-level entries).
    Root,
    /// A specific parent identifier.
    Under(&'a str),
}

impl ParentFilter<'_> {
    fn matches(&self, parent_id: Option<&str>) -> bool {
        match self {
            ParentFilter::Any => true,
            ParentFilter::Root => parent_id.is_none(),
            ParentFilter::Under(wanted) => parent_id == Some(*wanted),
        }
    }
}

/// Local name-resolution cache with an injectable backing path.
pub struct Cache {
    path: PathBuf,
    state: CacheState,
}

impl Cache {
    /// Load the cache from `path`. A missing, truncated, or otherwise
    /// unparseable file degrades to the default empty state; this never
    /// fails. Parent directories are created on the first `save`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        Self { path, state }
    }

    /// Load the cache from the per-user default location.
    pub fn open_default() -> Result<Self> {
        let path = paths::cache_file()
            .ok_or_else(|| NotaError::Other("could not determine cache directory".to_string()))?;
        Ok(Self::load(path))
    }

    /// Persist the current state, overwriting any existing file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Whether a full refresh is due. A cache that has never been refreshed
    /// is stale, as is one exactly at the TTL boundary.
    pub fn is_stale(&self) -> bool {
        match self.state.last_refresh {
            None => true,
            Some(last_refresh) => Utc::now() - last_refresh >= Duration::hours(CACHE_TTL_HOURS),
        }
    }

    /// Merge a search result set into the cache and persist. Existing
    /// entries for the same identifier are overwritten; applying the same
    /// results twice leaves the cache content unchanged.
    pub fn update_from_search(&mut self, results: &[RemoteObject]) -> Result<()> {
        for item in results {
            let parent_id = item
                .parent
                .as_ref()
                .and_then(|p| p.cache_parent_id())
                .map(str::to_string);

            let entry = CacheEntry {
                id: item.id.clone(),
                title: item.display_title(),
                parent_id: parent_id.clone(),
                url: item.url.clone().unwrap_or_default(),
                last_seen: Utc::now(),
                archived: item.archived,
            };

            let collection = match item.object {
                ObjectKind::Page => &mut self.state.pages,
                ObjectKind::Database => &mut self.state.databases,
            };
            collection.insert(item.id.clone(), entry);

            if let Some(parent_id) = parent_id {
                let children = self.state.hierarchy.entry(parent_id).or_default();
                if !children.contains(&item.id) {
                    children.push(item.id.clone());
                }
            }
        }

        self.state.last_refresh = Some(Utc::now());
        self.save()
    }

    /// Resolve a slash-separated path (or bare title) to an identifier.
    ///
    /// A single segment matches under any parent. For longer paths the
    /// first segment must be root-level and every later segment must sit
    /// under the previously resolved identifier. Titles compare
    /// case-insensitively; duplicate titles resolve to whichever entry the
    /// map yields first.
    pub fn find_by_path(&self, path: &str, kind: ObjectKind) -> Option<String> {
        let parts: Vec<&str> = path.split('/').map(str::trim).collect();

        if let [title] = parts.as_slice() {
            return self.find_by_title(title, kind, ParentFilter::Any);
        }

        let mut current: Option<String> = None;
        for part in &parts {
            let filter = match &current {
                None => ParentFilter::Root,
                Some(parent) => ParentFilter::Under(parent),
            };
            current = Some(self.find_by_title(part, kind, filter)?);
        }
        current
    }

    fn find_by_title(&self, title: &str, kind: ObjectKind, parent: ParentFilter<'_>) -> Option<String> {
        let collection = match kind {
            ObjectKind::Page => &self.state.pages,
            ObjectKind::Database => &self.state.databases,
        };

        let wanted = title.to_lowercase();
        collection
            .iter()
            .find(|(_, entry)| {
                entry.title.to_lowercase() == wanted && parent.matches(entry.parent_id.as_deref())
            })
            .map(|(id, _)| id.clone())
    }

    /// Look up the cached title for an identifier, pages first.
    pub fn get_title(&self, id: &str) -> Option<&str> {
        self.state
            .pages
            .get(id)
            .or_else(|| self.state.databases.get(id))
            .map(|entry| entry.title.as_str())
    }

    /// The cached entries of one kind.
    pub fn entries(&self, kind: ObjectKind) -> &HashMap<String, CacheEntry> {
        match kind {
            ObjectKind::Page => &self.state.pages,
            ObjectKind::Database => &self.state.databases,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> Cache {
        Cache::load(dir.path().join("cache.json"))
    }

    fn page(id: &str, title: &str, parent: Option<&str>) -> RemoteObject {
        let parent = match parent {
            Some(p) => json!({ "type": "page_id", "page_id": p }),
            None => json!({ "type": "workspace", "workspace": true }),
        };
        serde_json::from_value(json!({
            "object": "page",
            "id": id,
            "properties": { "title": { "title": [{ "plain_text": title }] } },
            "parent": parent,
            "url": format!("https://notion.so/{}", id),
            "archived": false
        }))
        .unwrap()
    }

    fn database(id: &str, title: &str, parent: Option<&str>) -> RemoteObject {
        let parent = match parent {
            Some(p) => json!({ "type": "page_id", "page_id": p }),
            None => json!({ "type": "workspace", "workspace": true }),
        };
        serde_json::from_value(json!({
            "object": "database",
            "id": id,
            "title": [{ "plain_text": title }],
            "parent": parent,
            "url": format!("https://notion.so/{}", id),
            "archived": false
        }))
        .unwrap()
    }

    #[test]
    fn test_load_missing_file_yields_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        assert!(cache.entries(ObjectKind::Page).is_empty());
        assert!(cache.entries(ObjectKind::Database).is_empty());
        assert!(cache.is_stale());
    }

    #[test]
    fn test_load_corrupt_file_yields_empty_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json at all").unwrap();

        let cache = Cache::load(&path);
        assert!(cache.entries(ObjectKind::Page).is_empty());
        assert!(cache.is_stale());
    }

    #[test]
    fn test_update_then_find_root_level() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Notes", None)])
            .unwrap();

        assert_eq!(cache.find_by_path("Notes", ObjectKind::Page), Some("p1".to_string()));
        assert_eq!(cache.get_title("p1"), Some("Notes"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");

        let mut cache = Cache::load(&path);
        cache
            .update_from_search(&[page("p1", "Notes", None), database("d1", "Tasks", Some("p1"))])
            .unwrap();

        let reloaded = Cache::load(&path);
        assert_eq!(cache.state, reloaded.state);
        assert!(!reloaded.is_stale());
    }

    #[test]
    fn test_update_from_search_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);
        let results = [
            page("p1", "Parent", None),
            page("p2", "Child", Some("p1")),
            database("d1", "Tasks", Some("p1")),
        ];

        cache.update_from_search(&results).unwrap();
        let pages_first: Vec<_> = {
            let mut ids: Vec<_> = cache.entries(ObjectKind::Page).keys().cloned().collect();
            ids.sort();
            ids
        };
        let hierarchy_first = cache.state.hierarchy.clone();

        cache.update_from_search(&results).unwrap();
        let mut pages_second: Vec<_> = cache.entries(ObjectKind::Page).keys().cloned().collect();
        pages_second.sort();

        assert_eq!(pages_first, pages_second);
        assert_eq!(hierarchy_first, cache.state.hierarchy);
        assert_eq!(cache.state.hierarchy["p1"], vec!["p2".to_string(), "d1".to_string()]);
    }

    #[test]
    fn test_staleness_threshold() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        assert!(cache.is_stale());

        cache.update_from_search(&[page("p1", "Notes", None)]).unwrap();
        assert!(!cache.is_stale());

        cache.state.last_refresh = Some(Utc::now() - Duration::hours(CACHE_TTL_HOURS));
        assert!(cache.is_stale());

        cache.state.last_refresh = Some(Utc::now() - Duration::hours(25));
        assert!(cache.is_stale());

        cache.state.last_refresh = Some(Utc::now() - Duration::hours(23));
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_find_by_path_traverses_hierarchy() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[
                page("p1", "Parent", None),
                page("p2", "Child", Some("p1")),
                page("p3", "Grandchild", Some("p2")),
            ])
            .unwrap();

        assert_eq!(
            cache.find_by_path("Parent/Child", ObjectKind::Page),
            Some("p2".to_string())
        );
        assert_eq!(
            cache.find_by_path("Parent/Child/Grandchild", ObjectKind::Page),
            Some("p3".to_string())
        );
        assert!(cache.state.hierarchy["p1"].contains(&"p2".to_string()));
    }

    #[test]
    fn test_find_by_path_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Parent", None), page("p2", "Child", Some("p1"))])
            .unwrap();

        for path in ["Parent/Child", "PARENT/CHILD", "parent/child"] {
            assert_eq!(
                cache.find_by_path(path, ObjectKind::Page),
                Some("p2".to_string()),
                "path {:?} should resolve",
                path
            );
        }
    }

    #[test]
    fn test_find_by_path_trims_segment_whitespace() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Parent", None), page("p2", "Child", Some("p1"))])
            .unwrap();

        assert_eq!(
            cache.find_by_path(" Parent / Child ", ObjectKind::Page),
            Some("p2".to_string())
        );
    }

    #[test]
    fn test_find_by_path_misses() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Parent", None), page("p2", "Child", Some("p1"))])
            .unwrap();

        // Title does not exist.
        assert_eq!(cache.find_by_path("Nope", ObjectKind::Page), None);
        // Title exists but under the wrong kind.
        assert_eq!(cache.find_by_path("Parent", ObjectKind::Database), None);
        // Intermediate segment does not exist.
        assert_eq!(cache.find_by_path("Missing/Child", ObjectKind::Page), None);
    }

    #[test]
    fn test_multi_segment_first_part_must_be_root() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[
                page("p1", "Parent", None),
                page("p2", "Child", Some("p1")),
                page("p3", "Leaf", Some("p2")),
            ])
            .unwrap();

        // "Child" is not root-level, so it cannot start a multi-segment path.
        assert_eq!(cache.find_by_path("Child/Leaf", ObjectKind::Page), None);
        // As a single segment it matches under any parent.
        assert_eq!(cache.find_by_path("Child", ObjectKind::Page), Some("p2".to_string()));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_one_of_them() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Notes", None), page("p2", "Notes", None)])
            .unwrap();

        let resolved = cache.find_by_path("Notes", ObjectKind::Page).unwrap();
        assert!(resolved == "p1" || resolved == "p2");
    }

    #[test]
    fn test_workspace_parent_not_in_hierarchy() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache.update_from_search(&[page("p1", "Notes", None)]).unwrap();

        assert!(cache.state.hierarchy.is_empty());
        assert_eq!(cache.entries(ObjectKind::Page)["p1"].parent_id, None);
    }

    #[test]
    fn test_untitled_default() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        let bare: RemoteObject = serde_json::from_value(json!({
            "object": "page",
            "id": "p1",
            "properties": {}
        }))
        .unwrap();
        cache.update_from_search(&[bare]).unwrap();

        assert_eq!(cache.get_title("p1"), Some("Untitled"));
        assert_eq!(cache.find_by_path("untitled", ObjectKind::Page), Some("p1".to_string()));
    }

    #[test]
    fn test_get_title_checks_both_collections() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache
            .update_from_search(&[page("p1", "Notes", None), database("d1", "Tasks", None)])
            .unwrap();

        assert_eq!(cache.get_title("p1"), Some("Notes"));
        assert_eq!(cache.get_title("d1"), Some("Tasks"));
        assert_eq!(cache.get_title("missing"), None);
    }

    #[test]
    fn test_overwrite_keeps_one_entry_per_id() {
        let dir = TempDir::new().unwrap();
        let mut cache = cache_in(&dir);

        cache.update_from_search(&[page("p1", "Old Title", None)]).unwrap();
        cache.update_from_search(&[page("p1", "New Title", None)]).unwrap();

        assert_eq!(cache.entries(ObjectKind::Page).len(), 1);
        assert_eq!(cache.get_title("p1"), Some("New Title"));
        assert_eq!(cache.find_by_path("Old Title", ObjectKind::Page), None);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cache.json");

        let mut cache = Cache::load(&path);
        cache.update_from_search(&[page("p1", "Notes", None)]).unwrap();

        assert!(path.exists());
    }
}
