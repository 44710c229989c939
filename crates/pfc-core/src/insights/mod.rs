//! AI financial insights
//!
//! `build_insight_payload` reduces the ledger to monthly totals and a
//! category breakdown; `InsightAdvisor` sends that to the configured backend
//! and always comes back with something displayable.
//!
//! ```rust,ignore
//! let advisor = InsightAdvisor::new(AIClient::from_env().unwrap_or_else(AIClient::mock));
//! let text = advisor.generate(ledger.transactions(), "Rahim").await;
//! ```

pub mod advisor;
pub mod payload;

pub use advisor::{
    InsightAdvisor, InsightOutcome, EMPTY_LEDGER_MESSAGE, FALLBACK_MESSAGE, NO_TEXT_MESSAGE,
};
pub use payload::{build_insight_payload, InsightPayload, InsightRequest};
