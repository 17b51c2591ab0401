use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::error::InputError;
use crate::input::InputDriver;

#[cfg(target_os = "macos")]
const SHORTCUT_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const SHORTCUT_MODIFIER: Key = Key::Control;

/// Keystrokes through enigo, clipboard through arboard.
pub struct EnigoDriver {
    enigo: Enigo,
    clipboard: Clipboard,
}

impl EnigoDriver {
    pub fn new() -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Connection(e.to_string()))?;
        let clipboard = Clipboard::new().map_err(|e| InputError::Clipboard(e.to_string()))?;
        Ok(Self { enigo, clipboard })
    }

    fn shortcut(&mut self, c: char) -> Result<(), InputError> {
        self.enigo
            .key(SHORTCUT_MODIFIER, Direction::Press)
            .map_err(keyboard_error)?;
        let result = self.enigo.key(Key::Unicode(c), Direction::Click);
        // Always let go of the modifier, even if the letter failed
        let release = self.enigo.key(SHORTCUT_MODIFIER, Direction::Release);
        result.map_err(keyboard_error)?;
        release.map_err(keyboard_error)
    }

    fn tap(&mut self, key: Key) -> Result<(), InputError> {
        self.enigo
            .key(key, Direction::Click)
            .map_err(keyboard_error)
    }
}

fn keyboard_error(e: enigo::InputError) -> InputError {
    InputError::Keyboard(e.to_string())
}

fn clipboard_text_or_empty(result: Result<String, arboard::Error>) -> Result<String, InputError> {
    match result {
        Ok(text) => Ok(text),
        // Nothing copied, or not text: just not a price
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(InputError::Clipboard(e.to_string())),
    }
}

impl InputDriver for EnigoDriver {
    fn copy_selection(&mut self) -> Result<(), InputError> {
        self.shortcut('c')
    }

    fn clipboard_text(&mut self) -> Result<String, InputError> {
        clipboard_text_or_empty(self.clipboard.get_text())
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), InputError> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|e| InputError::Clipboard(e.to_string()))
    }

    fn delete_selection(&mut self) -> Result<(), InputError> {
        self.tap(Key::Backspace)
    }

    fn paste(&mut self) -> Result<(), InputError> {
        self.shortcut('v')
    }

    fn confirm(&mut self) -> Result<(), InputError> {
        self.tap(Key::Return)
    }
}
