//! Domain types for the sales pipeline.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Identifier newtypes: DealId, UserId, ContactId
//! - Deals, stages, line items and the four approval gates
//! - Users with roles, contacts with buying roles
//! - Billing entity descriptors and sales-order confirmations

pub mod approval;
pub mod contact;
pub mod deal;
pub mod decimal;
pub mod entity;
pub mod primitives;
pub mod stage;
pub mod user;

pub use approval::{Approval, ApprovalStatus, Approvals, Gate, GateParseError};
pub use contact::{BuyingRole, Contact};
pub use deal::{Deal, HealthStatus, LineItem, Qualification};
pub use decimal::Decimal;
pub use entity::{EntityDescriptor, SalesOrderLink, SalesOrderStatus};
pub use primitives::{ContactId, DealId, UserId};
pub use stage::{Stage, StageParseError};
pub use user::{Role, RoleParseError, User};
