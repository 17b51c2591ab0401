//! Read the selected price, discount it, and type the new price back in.

use log::{debug, info};
use std::fmt;
use std::thread;
use std::time::Duration;

use crate::constants::PASTE_SETTLE_DELAY;
use crate::error::InputError;
use crate::input::InputDriver;

/// Parse clipboard text as a price, ignoring `,`/`.` separators.
pub fn parse_price(text: &str) -> Option<i64> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();
    digits.parse().ok()
}

/// A discounted price and the ratio it actually realises after truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    pub new_price: i64,
    pub actual_factor: f64,
}

impl Discount {
    /// `new = floor(current * factor)`, `actual = new / current`.
    ///
    /// `current` must be positive.
    pub fn compute(current: i64, factor: f64) -> Self {
        let new_price = (current as f64 * factor).floor() as i64;
        Self {
            new_price,
            actual_factor: new_price as f64 / current as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoOpReason {
    NotAPrice,
    TooLow(i64),
    FactorBelowMinimum { actual: f64, minimum: f64 },
    NonPositiveResult,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOpReason::NotAPrice => write!(f, "clipboard does not hold a valid price"),
            NoOpReason::TooLow(p) => write!(f, "price {} is too low to discount", p),
            NoOpReason::FactorBelowMinimum { actual, minimum } => write!(
                f,
                "actual factor {:.3} is below the minimum {:.3}",
                actual, minimum
            ),
            NoOpReason::NonPositiveResult => write!(f, "new price would be below 1"),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    NoOp(NoOpReason),
    Applied { old_price: i64, new_price: i64 },
    Failed(InputError),
}

pub struct PriceRewriteHandler {
    adjustment_factor: f64,
    min_actual_factor: f64,
    confirm_immediately: bool,
    settle_delay: Duration,
}

impl PriceRewriteHandler {
    pub fn new(adjustment_factor: f64, min_actual_factor: f64, confirm_immediately: bool) -> Self {
        Self {
            adjustment_factor,
            min_actual_factor,
            confirm_immediately,
            settle_delay: PASTE_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn confirm_immediately(&self) -> bool {
        self.confirm_immediately
    }

    /// Run one copy → discount → paste cycle. Never retries.
    pub fn apply<D: InputDriver + ?Sized>(&self, driver: &mut D) -> Outcome {
        match self.try_apply(driver) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed(e),
        }
    }

    fn try_apply<D: InputDriver + ?Sized>(&self, driver: &mut D) -> Result<Outcome, InputError> {
        driver.copy_selection()?;

        let text = driver.clipboard_text()?;
        let Some(current) = parse_price(&text) else {
            debug!("Clipboard text {:?} is not a price", text);
            return Ok(Outcome::NoOp(NoOpReason::NotAPrice));
        };

        if current <= 1 {
            return Ok(Outcome::NoOp(NoOpReason::TooLow(current)));
        }

        let discount = Discount::compute(current, self.adjustment_factor);
        if discount.actual_factor < self.min_actual_factor {
            return Ok(Outcome::NoOp(NoOpReason::FactorBelowMinimum {
                actual: discount.actual_factor,
                minimum: self.min_actual_factor,
            }));
        }
        if discount.new_price < 1 {
            return Ok(Outcome::NoOp(NoOpReason::NonPositiveResult));
        }

        // The game mishandles pasting over a selection, so clear it first
        driver.delete_selection()?;
        driver.set_clipboard_text(&discount.new_price.to_string())?;
        driver.paste()?;

        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        if self.confirm_immediately {
            driver.confirm()?;
        }

        info!("Price {} -> {}", current, discount.new_price);
        Ok(Outcome::Applied {
            old_price: current,
            new_price: discount.new_price,
        })
    }
}
