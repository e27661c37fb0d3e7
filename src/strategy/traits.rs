use chrono::{DateTime, Utc};

use crate::broker::ExecutionVenue;
use crate::common::errors::Result;
use crate::common::types::Tick;

/// Core strategy trait
///
/// Strategies receive price ticks and place orders through the injected
/// execution venue. They manage their own internal state; the venue owns
/// cash and positions.
///
/// # Implementation Notes
///
/// - `on_tick` runs synchronously inside the simulation loop - no blocking I/O
/// - Internal state (reference prices, tracked entries) is owned by the strategy
/// - A recoverable error aborts only that tick's decision; the driver logs it
///   and moves on to the next tick
pub trait Strategy: Send {
    /// Unique identifier for this strategy
    fn name(&self) -> &str;

    /// Called once per tick with the current underlying price
    ///
    /// # Arguments
    /// * `tick` - The timestamped underlying price observation
    /// * `venue` - Execution capability for placing orders and quoting
    fn on_tick(&mut self, tick: &Tick, venue: &mut dyn ExecutionVenue) -> Result<()>;

    /// Called when the feed is exhausted and the run is over
    ///
    /// Use for cleanup or final logging. Default implementation does nothing.
    fn on_finish(&mut self, _timestamp: Option<DateTime<Utc>>) {}
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn Strategy>;
