//! Strategy module for trade decision making
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SIMULATION LOOP (sync)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tick arrives                                               │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  Strategy.on_tick() ── may place orders ──▶ ExecutionVenue  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  Broker.mark_to_market() ──▶ history entry                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Strategy`]: Trait for implementing tick-driven strategies
//! - [`SurvivorStrategy`]: Two-leg options-selling state machine
//! - [`LegState`]: Per-leg strike-tracking state
//!
//! The strategy holds no broker state of its own: orders go through the
//! injected [`ExecutionVenue`](crate::broker::ExecutionVenue), positions and
//! cash live in the broker.

mod survivor;
mod traits;

pub use survivor::{LegState, OpenEntry, StrikeSelection, SurvivorStrategy};
pub use traits::{BoxedStrategy, Strategy};
