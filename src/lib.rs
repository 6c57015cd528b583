pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod erp;
pub mod error;
pub mod store;

pub use config::Config;
pub use domain::{
    Approval, ApprovalStatus, Approvals, Contact, Deal, DealId, Decimal, Gate, Role, Stage, User,
    UserId,
};
pub use erp::{ErpError, MockSalesOrderGateway, SalesOrderGateway};
pub use error::AppError;
pub use store::{Repository, StoreError};
