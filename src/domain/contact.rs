//! Contacts and their buying-role classification.

use super::ContactId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuyingRole {
    Champion,
    EconomicBuyer,
    TechnicalEvaluator,
    Blocker,
    Coach,
    User,
    #[default]
    Unknown,
}

/// A person associated with one or more deals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Job title.
    pub title: String,
    pub company: String,
    pub email: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub buying_role: BuyingRole,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: ContactId::new(id),
            name: name.into(),
            title: String::new(),
            company: company.into(),
            email: email.into(),
            tags: Vec::new(),
            buying_role: BuyingRole::Unknown,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_buying_role(mut self, role: BuyingRole) -> Self {
        self.buying_role = role;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}
