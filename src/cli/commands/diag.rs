// Diagnostic commands: connection verification and environment inspection.

use serde_json::{Value, json};

use crate::cli::GlobalOpts;
use crate::error::{NotaError, Result};

pub async fn verify_connection(global: &GlobalOpts) -> Result<()> {
    let result = match try_verify(global).await {
        Ok(user) => json!({
            "success": true,
            "message": "Successfully connected to Notion API",
            "user": user,
        }),
        Err(NotaError::Unauthorized) => json!({
            "success": false,
            "error": "Authentication failed - invalid API key",
        }),
        Err(err) => json!({
            "success": false,
            "error": err.to_string(),
        }),
    };

    let success = result["success"].as_bool().unwrap_or(false);
    super::emit(&result)?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

async fn try_verify(global: &GlobalOpts) -> Result<Value> {
    let client = super::client(global)?;
    let user = client.get_current_user().await?;
    Ok(json!({
        "id": user.id,
        "name": user.name,
        "type": user.user_type,
        "bot": user.bot,
    }))
}

pub fn check_config() -> Result<()> {
    let mut configuration = json!({});

    for key in ["NOTION_API_KEY", "NOTION_DATABASE_ID", "NOTION_PARENT_PAGE_ID"] {
        configuration[key] = match std::env::var(key) {
            Ok(value) if !value.is_empty() => {
                if key == "NOTION_API_KEY" {
                    json!({
                        "set": true,
                        "value": mask_token(&value),
                        "length": value.len(),
                    })
                } else {
                    json!({ "set": true, "value": value })
                }
            }
            _ => json!({ "set": false, "value": null }),
        };
    }

    super::emit(&json!({ "configuration": configuration }))
}

/// Show only a short prefix of the API key.
fn mask_token(value: &str) -> String {
    if value.len() > 10 {
        let prefix: String = value.chars().take(10).collect();
        format!("{}...", prefix)
    } else {
        "***".to_string()
    }
}
