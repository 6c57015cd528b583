//! Approval gates recorded on every deal.

use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four named approval checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gate {
    Finance,
    SalesOps,
    Ps,
    Delivery,
}

impl Gate {
    pub const ALL: [Gate; 4] = [Gate::Finance, Gate::SalesOps, Gate::Ps, Gate::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gate::Finance => "finance",
            Gate::SalesOps => "salesOps",
            Gate::Ps => "ps",
            Gate::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approval gate: {0}")]
pub struct GateParseError(pub String);

impl FromStr for Gate {
    type Err = GateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Gate::ALL
            .into_iter()
            .find(|gate| gate.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GateParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    AutoApproved,
}

impl ApprovalStatus {
    pub fn is_cleared(&self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::AutoApproved)
    }
}

/// Stored state of a single gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Approval {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn approved(approver: UserId, at: DateTime<Utc>) -> Self {
        Self {
            status: ApprovalStatus::Approved,
            approver_id: Some(approver),
            timestamp: Some(at),
        }
    }

    pub fn rejected(approver: UserId, at: DateTime<Utc>) -> Self {
        Self {
            status: ApprovalStatus::Rejected,
            approver_id: Some(approver),
            timestamp: Some(at),
        }
    }
}

/// Exactly four gates per deal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approvals {
    pub finance: Approval,
    pub sales_ops: Approval,
    pub ps: Approval,
    pub delivery: Approval,
}

impl Approvals {
    /// All four gates pending.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, gate: Gate) -> &Approval {
        match gate {
            Gate::Finance => &self.finance,
            Gate::SalesOps => &self.sales_ops,
            Gate::Ps => &self.ps,
            Gate::Delivery => &self.delivery,
        }
    }

    pub fn get_mut(&mut self, gate: Gate) -> &mut Approval {
        match gate {
            Gate::Finance => &mut self.finance,
            Gate::SalesOps => &mut self.sales_ops,
            Gate::Ps => &mut self.ps,
            Gate::Delivery => &mut self.delivery,
        }
    }

    pub fn with(mut self, gate: Gate, approval: Approval) -> Self {
        *self.get_mut(gate) = approval;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gate, &Approval)> {
        Gate::ALL.into_iter().map(move |gate| (gate, self.get(gate)))
    }
}
