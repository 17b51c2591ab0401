//! Synthetic input and clipboard access.
//!
//! The repricing logic only talks to these traits; the OS-backed
//! implementations live in the submodules.

pub mod click;
#[cfg(test)]
pub mod fake;
pub mod keyboard;

use crate::error::InputError;

pub use click::{platform_click_injector, EnigoClicker, RdevClicker};
pub use keyboard::EnigoDriver;

/// Keystrokes and clipboard operations used to rewrite a price field.
pub trait InputDriver {
    /// Copy the current selection to the clipboard (Ctrl+C).
    fn copy_selection(&mut self) -> Result<(), InputError>;
    fn clipboard_text(&mut self) -> Result<String, InputError>;
    fn set_clipboard_text(&mut self, text: &str) -> Result<(), InputError>;
    /// Remove the selected text (Backspace).
    fn delete_selection(&mut self) -> Result<(), InputError>;
    /// Paste the clipboard (Ctrl+V).
    fn paste(&mut self) -> Result<(), InputError>;
    /// Confirm the dialog (Enter).
    fn confirm(&mut self) -> Result<(), InputError>;
}

/// Opens the price dialog of the item under the cursor.
pub trait ClickInjector {
    fn secondary_click(&mut self) -> Result<(), InputError>;
}
