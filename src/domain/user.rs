//! Users and their roles.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The single role a user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    SalesRep,
    Finance,
    SalesOps,
    PsManager,
    DeliveryManager,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::SalesRep,
        Role::Finance,
        Role::SalesOps,
        Role::PsManager,
        Role::DeliveryManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::SalesRep => "SALES_REP",
            Role::Finance => "FINANCE",
            Role::SalesOps => "SALES_OPS",
            Role::PsManager => "PS_MANAGER",
            Role::DeliveryManager => "DELIVERY_MANAGER",
        }
    }

    /// Sales reps are restricted to the deals they own.
    pub fn sees_only_own_deals(&self) -> bool {
        matches!(self, Role::SalesRep)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// An actor viewing or editing the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            email: String::new(),
            role,
            department: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sales_rep_is_restricted() {
        for role in Role::ALL {
            assert_eq!(role.sees_only_own_deals(), role == Role::SalesRep);
        }
    }

    #[test]
    fn test_role_parse_roundtrips_ids() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("sales_rep".parse::<Role>().unwrap(), Role::SalesRep);
        assert!("OWNER".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::DeliveryManager).unwrap();
        assert_eq!(json, "\"DELIVERY_MANAGER\"");
    }
}
