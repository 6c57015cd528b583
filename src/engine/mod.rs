//! Pure computation over the in-memory pipeline.
//!
//! Nothing here performs I/O or holds state: callers pass the deals,
//! viewer and rate table in, and get values or typed errors back.

pub mod approvals;
pub mod contacts;
pub mod currency;
pub mod entity_resolver;
pub mod margin;
pub mod pipeline;
pub mod search;
pub mod settlement;
pub mod visibility;

pub use approvals::{effective_status, gate_views, toggle, GateView};
pub use contacts::{filter_contacts, ContactFilter};
pub use currency::{convert, CurrencyError, ExchangeRateTable, RateSource, BASE_CURRENCY};
pub use entity_resolver::resolve;
pub use margin::{compute, CostEstimate, MarginBreakdown, MarginError};
pub use pipeline::{board, move_deal, StageColumn};
pub use search::{parse, ParsedQuery, SearchField};
pub use settlement::{quote, SettlementQuote};
pub use visibility::filter_deals;
