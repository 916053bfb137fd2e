// Property, filter, and sort payload builders.
// Builds the JSON bodies the Notion API expects for page properties and
// database queries.

use serde_json::{Value, json};

use crate::error::{NotaError, Result};

/// Build a rich text array from plain content.
pub fn rich_text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

/// Build the property map for a todo row in a task database.
/// The schema matches the `tasks` database template.
pub fn todo_properties(
    title: &str,
    description: Option<&str>,
    due_date: Option<&str>,
    priority: Option<&str>,
    tags: Option<&[String]>,
    status: Option<&str>,
) -> Value {
    let mut props = json!({
        "Task": { "title": rich_text(title) }
    });

    if let Some(description) = description {
        props["Description"] = json!({ "rich_text": rich_text(description) });
    }
    if let Some(due_date) = due_date {
        props["Due Date"] = json!({ "date": { "start": due_date } });
    }
    if let Some(priority) = priority {
        props["Priority"] = json!({ "select": { "name": priority } });
    }
    if let Some(tags) = tags {
        let options: Vec<Value> = tags.iter().map(|t| json!({ "name": t })).collect();
        props["Tags"] = json!({ "multi_select": options });
    }
    if let Some(status) = status {
        props["Status"] = json!({ "status": { "name": status } });
    }

    props
}

/// Build a single database query filter.
pub fn build_filter(property: &str, filter_type: &str, condition: &str, value: Value) -> Value {
    json!({ "property": property, filter_type: { condition: value } })
}

/// Combine filters with AND/OR logic.
pub fn compound_filter(filters: Vec<Value>, operator: &str) -> Result<Value> {
    if operator != "and" && operator != "or" {
        return Err(NotaError::InvalidArgument(format!(
            "operator must be 'and' or 'or', got '{}'",
            operator
        )));
    }
    Ok(json!({ operator: filters }))
}

/// Build a filter from the todo shortcut flags, or None when no flag is set.
pub fn todo_filter(
    status: Option<&str>,
    priority: Option<&str>,
    due_before: Option<&str>,
    due_after: Option<&str>,
    tags: Option<&str>,
) -> Result<Option<Value>> {
    let mut conditions = Vec::new();

    if let Some(status) = status {
        conditions.push(build_filter("Status", "status", "equals", json!(status)));
    }
    if let Some(priority) = priority {
        conditions.push(build_filter("Priority", "select", "equals", json!(priority)));
    }
    if let Some(due_before) = due_before {
        conditions.push(build_filter(
            "Due Date",
            "date",
            "on_or_before",
            json!(due_before),
        ));
    }
    if let Some(due_after) = due_after {
        conditions.push(build_filter(
            "Due Date",
            "date",
            "on_or_after",
            json!(due_after),
        ));
    }
    if let Some(tags) = tags {
        conditions.push(build_filter("Tags", "multi_select", "contains", json!(tags)));
    }

    match conditions.len() {
        0 => Ok(None),
        1 => Ok(Some(conditions.remove(0))),
        _ => Ok(Some(compound_filter(conditions, "and")?)),
    }
}

/// Predefined database schemas for `add database --template`.
pub fn template_schema(template: &str) -> Option<Value> {
    match template {
        "tasks" => Some(json!({
            "Task": { "title": {} },
            "Status": {
                "status": {
                    "options": [
                        { "name": "Not Started", "color": "gray" },
                        { "name": "In Progress", "color": "blue" },
                        { "name": "Done", "color": "green" }
                    ]
                }
            },
            "Priority": {
                "select": {
                    "options": [
                        { "name": "Low", "color": "gray" },
                        { "name": "Medium", "color": "yellow" },
                        { "name": "High", "color": "red" }
                    ]
                }
            },
            "Due Date": { "date": {} },
            "Tags": { "multi_select": {} }
        })),
        "notes" => Some(json!({
            "Name": { "title": {} },
            "Category": { "select": {} },
            "Created": { "created_time": {} },
            "Last Edited": { "last_edited_time": {} }
        })),
        "contacts" => Some(json!({
            "Name": { "title": {} },
            "Email": { "email": {} },
            "Phone": { "phone_number": {} },
            "Company": { "rich_text": {} },
            "Tags": { "multi_select": {} }
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_shape() {
        let rt = rich_text("hello");
        assert_eq!(rt[0]["type"], "text");
        assert_eq!(rt[0]["text"]["content"], "hello");
    }

    #[test]
    fn test_todo_properties_full() {
        let tags = vec!["work".to_string(), "urgent".to_string()];
        let props = todo_properties(
            "Ship it",
            Some("Finish the release"),
            Some("2026-12-31"),
            Some("High"),
            Some(&tags),
            Some("In Progress"),
        );

        assert_eq!(props["Task"]["title"][0]["text"]["content"], "Ship it");
        assert_eq!(props["Due Date"]["date"]["start"], "2026-12-31");
        assert_eq!(props["Priority"]["select"]["name"], "High");
        assert_eq!(props["Tags"]["multi_select"][1]["name"], "urgent");
        assert_eq!(props["Status"]["status"]["name"], "In Progress");
    }

    #[test]
    fn test_todo_properties_title_only() {
        let props = todo_properties("Just a task", None, None, None, None, None);
        assert!(props.get("Description").is_none());
        assert!(props.get("Priority").is_none());
    }

    #[test]
    fn test_todo_filter_empty() {
        assert!(todo_filter(None, None, None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_todo_filter_single_condition_not_wrapped() {
        let filter = todo_filter(Some("Done"), None, None, None, None)
            .unwrap()
            .unwrap();
        assert_eq!(filter["property"], "Status");
        assert_eq!(filter["status"]["equals"], "Done");
    }

    #[test]
    fn test_todo_filter_multiple_conditions_anded() {
        let filter = todo_filter(Some("Done"), Some("High"), None, None, Some("urgent"))
            .unwrap()
            .unwrap();
        let and = filter["and"].as_array().unwrap();
        assert_eq!(and.len(), 3);
    }

    #[test]
    fn test_compound_filter_rejects_bad_operator() {
        assert!(compound_filter(vec![], "xor").is_err());
    }

    #[test]
    fn test_template_schemas() {
        assert!(template_schema("tasks").unwrap().get("Status").is_some());
        assert!(template_schema("contacts").unwrap().get("Email").is_some());
        assert!(template_schema("nope").is_none());
    }
}
