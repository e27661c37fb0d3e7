//! Simulated broker and the execution-venue seam
//!
//! The broker owns cash and the position book and is the only place either
//! is mutated. Strategies talk to it through the [`ExecutionVenue`] trait so
//! the simulated venue can be swapped for a live one.

mod sim;
mod venue;

pub use sim::SimBroker;
pub use venue::{BoxedVenue, ExecutionVenue, FixedPriceModel, PricingModel};
