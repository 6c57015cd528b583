//! Approval-gate transitions and the read-time auto-approval overlay.
//!
//! Stored gate state only ever changes through [`toggle`]. The finance
//! gate's AUTO_APPROVED status is a projection computed by
//! [`effective_status`] from the current margin and is never stored, so a
//! margin that later drops below the threshold shows the gate as pending
//! again. A human approval, once stored, survives margin changes.

use crate::domain::{Approval, ApprovalStatus, Approvals, Gate, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status to display for `gate` given its stored state and the margin signal.
pub fn effective_status(gate: Gate, stored: &Approval, auto_approvable: bool) -> ApprovalStatus {
    match (gate, stored.status) {
        (Gate::Finance, ApprovalStatus::Pending) if auto_approvable => ApprovalStatus::AutoApproved,
        (_, status) => status,
    }
}

/// Flip a gate between PENDING and APPROVED, returning the replacement record.
///
/// A gate whose effective status is AUTO_APPROVED cannot be toggled; the
/// input is returned unchanged. Approving stamps `approver` and `now`;
/// un-approving clears both. A REJECTED gate toggles to APPROVED.
pub fn toggle(
    approvals: &Approvals,
    gate: Gate,
    auto_approvable: bool,
    approver: &UserId,
    now: DateTime<Utc>,
) -> Approvals {
    let current = approvals.get(gate);
    let next = match effective_status(gate, current, auto_approvable) {
        ApprovalStatus::AutoApproved => {
            tracing::debug!(%gate, "toggle ignored on auto-approved gate");
            return approvals.clone();
        }
        ApprovalStatus::Approved => Approval::pending(),
        ApprovalStatus::Pending | ApprovalStatus::Rejected => {
            Approval::approved(approver.clone(), now)
        }
    };
    approvals.clone().with(gate, next)
}

/// One row of the approval panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateView {
    pub gate: Gate,
    pub status: ApprovalStatus,
    pub stored_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub toggleable: bool,
}

/// Display view of all four gates.
pub fn gate_views(approvals: &Approvals, auto_approvable: bool) -> Vec<GateView> {
    approvals
        .iter()
        .map(|(gate, stored)| {
            let status = effective_status(gate, stored, auto_approvable);
            GateView {
                gate,
                status,
                stored_status: stored.status,
                approver_id: stored.approver_id.clone(),
                timestamp: stored.timestamp,
                toggleable: status != ApprovalStatus::AutoApproved,
            }
        })
        .collect()
}

/// True when every gate is cleared, counting the auto-approval overlay.
pub fn all_cleared(approvals: &Approvals, auto_approvable: bool) -> bool {
    approvals
        .iter()
        .all(|(gate, stored)| effective_status(gate, stored, auto_approvable).is_cleared())
}
