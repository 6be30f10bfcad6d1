//! Saved design templates and the HTTP client for the template store.
//!
//! The `designOptions` object inside every template body is the same wire shape
//! as [`DesignOptions`]; its field names and id ranges are part of the stored data.

mod client;

pub use client::{TemplateClient, TemplateError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::options::DesignOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QRTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub design_options: DesignOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of create and update requests. The server assigns ids and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub design_options: DesignOptions,
}

impl NewTemplate {
    pub fn new(name: impl Into<String>, design_options: DesignOptions) -> Self {
        Self { name: name.into(), description: None, design_options }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..self }
    }
}

impl From<&QRTemplate> for NewTemplate {
    fn from(t: &QRTemplate) -> Self {
        Self { name: t.name.clone(), description: t.description.clone(), design_options: t.design_options.clone() }
    }
}
