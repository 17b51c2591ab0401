//! Hotkey-driven repricing helper for Path of Exile 1/2 merchant tabs.
//!
//! Select a listed price in the game, press the calculate hotkey, and the
//! price is copied, discounted by the configured factor and pasted back.
//! At startup the current currency exchange rates are fetched (or read from
//! an hourly cache) to suggest new prices for 1-unit currency listings.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod keys;
pub mod market;
#[cfg(test)]
mod testing;
pub mod ui;
pub mod update;
