// Block payload builders.
// One constructor covering every block type the CLI can create.

use clap::ValueEnum;
use serde_json::{Value, json};

use crate::error::{NotaError, Result};

use super::props::rich_text;

/// Block types accepted by `blocks add --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    #[value(name = "heading_1")]
    Heading1,
    #[value(name = "heading_2")]
    Heading2,
    #[value(name = "heading_3")]
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Code,
    Callout,
    Divider,
    TableOfContents,
    Breadcrumb,
    Equation,
    Image,
    Video,
    File,
    Pdf,
    Audio,
    Bookmark,
    Embed,
    LinkPreview,
    LinkToPage,
    ChildPage,
    ChildDatabase,
}

impl BlockType {
    /// The key the API uses for this block type.
    pub fn api_name(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ToDo => "to_do",
            BlockType::Toggle => "toggle",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Callout => "callout",
            BlockType::Divider => "divider",
            BlockType::TableOfContents => "table_of_contents",
            BlockType::Breadcrumb => "breadcrumb",
            BlockType::Equation => "equation",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::File => "file",
            BlockType::Pdf => "pdf",
            BlockType::Audio => "audio",
            BlockType::Bookmark => "bookmark",
            BlockType::Embed => "embed",
            BlockType::LinkPreview => "link_preview",
            BlockType::LinkToPage => "link_to_page",
            BlockType::ChildPage => "child_page",
            BlockType::ChildDatabase => "child_database",
        }
    }
}

/// Optional inputs for block construction, mirroring the CLI flags.
#[derive(Debug, Default, Clone)]
pub struct BlockOptions<'a> {
    pub text: Option<&'a str>,
    pub url: Option<&'a str>,
    pub language: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub checked: bool,
    pub expression: Option<&'a str>,
    pub page_id: Option<&'a str>,
    pub title: Option<&'a str>,
}

/// Build a block object for the API from a type and its options.
pub fn build_block(kind: BlockType, opts: &BlockOptions<'_>) -> Result<Value> {
    let name = kind.api_name();

    match kind {
        BlockType::Divider | BlockType::Breadcrumb => Ok(json!({ "type": name, name: {} })),

        BlockType::TableOfContents => {
            Ok(json!({ "type": name, name: { "color": "default" } }))
        }

        BlockType::Paragraph
        | BlockType::Heading1
        | BlockType::Heading2
        | BlockType::Heading3
        | BlockType::Quote
        | BlockType::Toggle
        | BlockType::BulletedListItem
        | BlockType::NumberedListItem => {
            let mut content = json!({});
            if let Some(text) = opts.text {
                content["rich_text"] = rich_text(text);
            }
            Ok(json!({ "type": name, name: content }))
        }

        BlockType::Callout => {
            let mut content = json!({
                "icon": { "emoji": opts.icon.unwrap_or("💡") },
                "color": "default"
            });
            if let Some(text) = opts.text {
                content["rich_text"] = rich_text(text);
            }
            Ok(json!({ "type": name, name: content }))
        }

        BlockType::ToDo => {
            let mut content = json!({ "checked": opts.checked });
            if let Some(text) = opts.text {
                content["rich_text"] = rich_text(text);
            }
            Ok(json!({ "type": name, name: content }))
        }

        BlockType::Code => {
            let mut content = json!({ "language": opts.language.unwrap_or("plain text") });
            if let Some(text) = opts.text {
                content["rich_text"] = rich_text(text);
            }
            Ok(json!({ "type": name, name: content }))
        }

        BlockType::Equation => {
            let expression = opts.expression.or(opts.text).unwrap_or("");
            Ok(json!({ "type": name, name: { "expression": expression } }))
        }

        BlockType::Image | BlockType::Video | BlockType::File | BlockType::Pdf | BlockType::Audio => {
            let url = opts.url.or(opts.text).ok_or_else(|| {
                NotaError::InvalidArgument(format!("{} requires a url", name))
            })?;
            Ok(json!({
                "type": name,
                name: { "type": "external", "external": { "url": url } }
            }))
        }

        BlockType::Bookmark | BlockType::Embed | BlockType::LinkPreview => {
            let url = opts.url.or(opts.text).ok_or_else(|| {
                NotaError::InvalidArgument(format!("{} requires a url", name))
            })?;
            Ok(json!({ "type": name, name: { "url": url } }))
        }

        BlockType::LinkToPage => {
            let page_id = opts.page_id.ok_or_else(|| {
                NotaError::InvalidArgument("link_to_page requires --page-id".to_string())
            })?;
            Ok(json!({
                "type": name,
                name: { "type": "page_id", "page_id": page_id }
            }))
        }

        BlockType::ChildPage | BlockType::ChildDatabase => {
            let title = opts.title.or(opts.text).ok_or_else(|| {
                NotaError::InvalidArgument(format!("{} requires a title", name))
            })?;
            Ok(json!({ "type": name, name: { "title": title } }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_block() {
        let block = build_block(
            BlockType::Paragraph,
            &BlockOptions {
                text: Some("Hello"),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(block["type"], "paragraph");
        assert_eq!(
            block["paragraph"]["rich_text"][0]["text"]["content"],
            "Hello"
        );
    }

    #[test]
    fn test_divider_has_no_content() {
        let block = build_block(BlockType::Divider, &BlockOptions::default()).unwrap();
        assert_eq!(block["divider"], json!({}));
    }

    #[test]
    fn test_todo_block_checked() {
        let block = build_block(
            BlockType::ToDo,
            &BlockOptions {
                text: Some("Task"),
                checked: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(block["to_do"]["checked"], true);
    }

    #[test]
    fn test_code_block_default_language() {
        let block = build_block(
            BlockType::Code,
            &BlockOptions {
                text: Some("fn main() {}"),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(block["code"]["language"], "plain text");
    }

    #[test]
    fn test_media_block_requires_url() {
        let err = build_block(BlockType::Image, &BlockOptions::default()).unwrap_err();
        assert!(err.to_string().contains("image"));

        let block = build_block(
            BlockType::Image,
            &BlockOptions {
                url: Some("https://example.com/a.png"),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(block["image"]["external"]["url"], "https://example.com/a.png");
    }

    #[test]
    fn test_equation_falls_back_to_text() {
        let block = build_block(
            BlockType::Equation,
            &BlockOptions {
                text: Some("E=mc^2"),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(block["equation"]["expression"], "E=mc^2");
    }

    #[test]
    fn test_link_to_page_requires_page_id() {
        assert!(build_block(BlockType::LinkToPage, &BlockOptions::default()).is_err());
    }
}
