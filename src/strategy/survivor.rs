//! Survivor options-selling strategy
//!
//! Sells out-of-the-money premium on both sides of the underlying and keeps
//! re-entering as the market moves. Each side (leg) runs its own small state
//! machine off the same price ticks:
//!
//! - **PE leg**: when the underlying falls `pe_gap` points below the leg's
//!   reference, sell a put `pe_symbol_gap` points below the market and move
//!   the reference down to the current price.
//! - **CE leg**: symmetric on the way up.
//! - **Reset**: a move of `reset_gap` points buys back the leg's open short
//!   before the new entry is considered, returning the leg to a clean state.
//!
//! The strategy talks to its broker only through [`ExecutionVenue`], so the
//! same state machine drives a simulated or a live venue.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::broker::ExecutionVenue;
use crate::common::errors::{BacktestError, Result};
use crate::common::types::{OptionType, OrderIntent, Side, Tick};
use crate::config::SurvivorConfig;
use crate::strategy::traits::Strategy;

/// A short entry currently tracked by a leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEntry {
    pub symbol: String,
    pub quantity: u32,
}

/// Per-leg state, evolved exclusively by [`SurvivorStrategy::on_tick`]
#[derive(Debug, Clone)]
pub struct LegState {
    /// Underlying price at which this leg last traded (or started)
    pub last_value: Decimal,
    /// Short entry placed on the last trigger, if any
    pub open: Option<OpenEntry>,
    /// Declared by the original parameter set but not yet read by the
    /// control flow; wiring it up together with `sell_multiplier_threshold`
    /// is a pending follow-up of the source strategy.
    pub reset_gap_flag: u8,
}

impl LegState {
    fn new(last_value: Decimal) -> Self {
        Self {
            last_value,
            open: None,
            reset_gap_flag: 0,
        }
    }
}

/// Deterministically selected option instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeSelection {
    pub tradingsymbol: String,
    pub strike: Decimal,
}

/// The Survivor two-leg state machine
pub struct SurvivorStrategy {
    config: SurvivorConfig,
    pe: LegState,
    ce: LegState,
}

impl SurvivorStrategy {
    /// Build the strategy, validating the configuration once up front
    ///
    /// A bad parameter set fails here, before any tick is processed.
    pub fn new(config: SurvivorConfig) -> Result<Self> {
        config.validate()?;

        let pe_start = config.start_price + config.pe_start_point;
        let ce_start = config.start_price + config.ce_start_point;

        info!(
            pe_start = %pe_start,
            ce_start = %ce_start,
            "initialized survivor strategy state"
        );

        Ok(Self {
            pe: LegState::new(pe_start),
            ce: LegState::new(ce_start),
            config,
        })
    }

    /// PE leg state (read-only)
    pub fn pe_leg(&self) -> &LegState {
        &self.pe
    }

    /// CE leg state (read-only)
    pub fn ce_leg(&self) -> &LegState {
        &self.ce
    }

    /// Select the option instrument `gap` points away from the market
    ///
    /// CE strikes sit above the last traded price, PE strikes below. The
    /// trading symbol is derived from the target strike alone; the simplified
    /// backtest needs no instrument-list lookup.
    pub fn find_symbol_from_gap(
        &self,
        option_type: OptionType,
        ltp: Decimal,
        gap: Decimal,
    ) -> StrikeSelection {
        let strike = match option_type {
            OptionType::Ce => ltp + gap,
            OptionType::Pe => ltp - gap,
        };
        let strike = strike.round();
        StrikeSelection {
            tradingsymbol: format!("{}{}{}", self.config.symbol_initials, strike, option_type),
            strike,
        }
    }

    /// Run one leg's ACTIVE/RESET transitions for the current price
    fn update_leg(
        &mut self,
        option_type: OptionType,
        tick: &Tick,
        venue: &mut dyn ExecutionVenue,
    ) -> Result<()> {
        let price = tick.price;
        let (delta, gap, symbol_gap, reset_gap, quantity) = match option_type {
            OptionType::Pe => (
                self.pe.last_value - price,
                self.config.pe_gap,
                self.config.pe_symbol_gap,
                self.config.pe_reset_gap,
                self.config.pe_quantity,
            ),
            OptionType::Ce => (
                price - self.ce.last_value,
                self.config.ce_gap,
                self.config.ce_symbol_gap,
                self.config.ce_reset_gap,
                self.config.ce_quantity,
            ),
        };

        // RESET: the move is large enough to abandon the tracked short.
        // Buy it back at the venue quote, then fall through to the normal
        // entry check so the leg ends the tick ACTIVE again.
        if delta >= reset_gap {
            let leg = self.leg_mut(option_type);
            if let Some(open) = leg.open.clone() {
                let quote = venue.quote(&open.symbol);
                let buy_back =
                    OrderIntent::new(open.symbol.as_str(), open.quantity, Side::Buy, quote);
                venue.place_order(&buy_back, tick.timestamp)?;
                debug!(leg = %option_type, symbol = %open.symbol, "reset: bought back open short");
                self.leg_mut(option_type).open = None;
            }
        }

        // ENTRY: sell fresh premium beyond the configured distance.
        if delta >= gap {
            let selection = self.find_symbol_from_gap(option_type, price, symbol_gap);
            let quote = venue.quote(&selection.tradingsymbol);
            if quote < self.config.min_price_to_sell {
                debug!(
                    leg = %option_type,
                    symbol = %selection.tradingsymbol,
                    %quote,
                    "skipping entry: quote below min_price_to_sell"
                );
                return Ok(());
            }

            let intent = OrderIntent::new(
                selection.tradingsymbol.as_str(),
                quantity,
                self.config.trans_type,
                quote,
            );
            venue.place_order(&intent, tick.timestamp)?;
            debug!(
                leg = %option_type,
                symbol = %selection.tradingsymbol,
                strike = %selection.strike,
                %delta,
                "entered new position"
            );

            let leg = self.leg_mut(option_type);
            leg.last_value = price;
            leg.open = Some(OpenEntry {
                symbol: selection.tradingsymbol,
                quantity,
            });
        }

        Ok(())
    }

    fn leg_mut(&mut self, option_type: OptionType) -> &mut LegState {
        match option_type {
            OptionType::Pe => &mut self.pe,
            OptionType::Ce => &mut self.ce,
        }
    }
}

impl Strategy for SurvivorStrategy {
    fn name(&self) -> &str {
        "survivor"
    }

    fn on_tick(&mut self, tick: &Tick, venue: &mut dyn ExecutionVenue) -> Result<()> {
        if !tick.is_valid() {
            return Err(BacktestError::InvalidTick(format!(
                "non-positive price {} at {}",
                tick.price, tick.timestamp
            )));
        }

        self.update_leg(OptionType::Pe, tick, venue)?;
        self.update_leg(OptionType::Ce, tick, venue)?;
        Ok(())
    }
}
