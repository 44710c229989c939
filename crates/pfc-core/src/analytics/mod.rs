//! Transaction analytics
//!
//! Pure functions over a snapshot of the ledger:
//!
//! - **Aggregator** - totals, per-month series, per-category breakdown
//! - **Trend analyzer** - compares a sub-item's price with last month's average
//!
//! None of these fail for a well-formed collection, including an empty one.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pfc_core::analytics::{summarize, price_trend};
//!
//! let stats = summarize(ledger.transactions());
//! let badge = price_trend(&row, ledger.transactions());
//! ```

pub mod aggregator;
pub mod trend;

pub use aggregator::{category_breakdown, item_breakdown, monthly_series, summarize};
pub use trend::{price_trend, PriceIndex};
