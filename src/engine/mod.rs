//! Hotkey handling: the OS key hook, the dispatcher and the price rewrite.

pub mod dispatcher;
pub mod listener;
pub mod rewrite;

pub use dispatcher::{DispatcherState, HotkeyAction, HotkeyDispatcher};
pub use listener::spawn_key_listener;
pub use rewrite::{parse_price, Discount, NoOpReason, Outcome, PriceRewriteHandler};
