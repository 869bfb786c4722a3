//! Conversation and checkpoint record types
//!
//! The raw history is kept in the same shape the live session uses so a
//! resumed checkpoint can be reinjected without loss. Part fields other than
//! `text` (tool calls, inline data, ...) are carried through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One fragment of a conversation turn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// A single turn of the conversation as stored by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenation of every text fragment in this turn.
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

/// Identity context the session was authenticated with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthType {
    OAuthPersonal,
    ApiKey,
    VertexAi,
    CloudShell,
    Other(String),
}

impl AuthType {
    pub fn as_str(&self) -> &str {
        match self {
            AuthType::OAuthPersonal => "oauth-personal",
            AuthType::ApiKey => "api-key",
            AuthType::VertexAi => "vertex-ai",
            AuthType::CloudShell => "cloud-shell",
            AuthType::Other(value) => value,
        }
    }
}

impl From<String> for AuthType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "oauth-personal" => AuthType::OAuthPersonal,
            "api-key" => AuthType::ApiKey,
            "vertex-ai" => AuthType::VertexAi,
            "cloud-shell" => AuthType::CloudShell,
            _ => AuthType::Other(value),
        }
    }
}

impl From<&str> for AuthType {
    fn from(value: &str) -> Self {
        AuthType::from(value.to_string())
    }
}

impl From<AuthType> for String {
    fn from(value: AuthType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted checkpoint: conversation history plus the auth context it was
/// recorded under. Records written before auth tracking have no `authType`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckpointRecord {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(
        default,
        rename = "authType",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_type: Option<AuthType>,
}

/// Role shown when replaying a history to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayRole {
    User,
    Model,
}

impl DisplayRole {
    /// Anything that is not a user turn is shown as model output.
    pub fn from_role(role: &str) -> Self {
        if role == "user" {
            DisplayRole::User
        } else {
            DisplayRole::Model
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTurn {
    pub role: DisplayRole,
    pub text: String,
}

/// A saved checkpoint as presented by list and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDetail {
    /// Tag exactly as stored in the ledger.
    pub name: String,
    pub mtime: DateTime<Utc>,
}
