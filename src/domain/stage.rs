//! Pipeline stages.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five ordered pipeline phases a deal passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Discover,
    Understand,
    Proposal,
    Negotiating,
    Closed,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Discover,
        Stage::Understand,
        Stage::Proposal,
        Stage::Negotiating,
        Stage::Closed,
    ];

    /// Stable string id, e.g. `NEGOTIATING`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discover => "DISCOVER",
            Stage::Understand => "UNDERSTAND",
            Stage::Proposal => "PROPOSAL",
            Stage::Negotiating => "NEGOTIATING",
            Stage::Closed => "CLOSED",
        }
    }

    /// Column heading shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Discover => "Descubrimiento",
            Stage::Understand => "Comprensión",
            Stage::Proposal => "Propuesta",
            Stage::Negotiating => "Negociación",
            Stage::Closed => "Cerrado",
        }
    }

    /// Zero-based position in the pipeline.
    pub fn position(&self) -> usize {
        match self {
            Stage::Discover => 0,
            Stage::Understand => 1,
            Stage::Proposal => 2,
            Stage::Negotiating => 3,
            Stage::Closed => 4,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        Stage::ALL.get(self.position() + 1).copied()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage: {0}")]
pub struct StageParseError(pub String);

impl FromStr for Stage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StageParseError(s.to_string()))
    }
}
