//! Recording fakes for the input traits.

use std::sync::{Arc, Mutex};

use crate::error::InputError;
use crate::input::{ClickInjector, InputDriver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Copy,
    ReadClipboard,
    SetClipboard(String),
    Delete,
    Paste,
    Confirm,
    RightClick,
}

/// Shared action log, so a test can inspect it after handing the fakes away.
pub type ActionLog = Arc<Mutex<Vec<Action>>>;

pub struct FakeDriver {
    pub clipboard: String,
    /// Fail the first operation of this kind.
    pub fail_on: Option<Action>,
    pub log: ActionLog,
}

impl FakeDriver {
    pub fn with_clipboard(text: &str) -> Self {
        Self {
            clipboard: text.to_string(),
            fail_on: None,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.log.lock().unwrap().clone()
    }

    fn record(&mut self, action: Action) -> Result<(), InputError> {
        if self.fail_on.as_ref() == Some(&action) {
            self.fail_on = None;
            return Err(InputError::Keyboard(format!("{:?} rejected", action)));
        }
        self.log.lock().unwrap().push(action);
        Ok(())
    }
}

impl InputDriver for FakeDriver {
    fn copy_selection(&mut self) -> Result<(), InputError> {
        self.record(Action::Copy)
    }

    fn clipboard_text(&mut self) -> Result<String, InputError> {
        self.record(Action::ReadClipboard)?;
        Ok(self.clipboard.clone())
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), InputError> {
        self.record(Action::SetClipboard(text.to_string()))?;
        self.clipboard = text.to_string();
        Ok(())
    }

    fn delete_selection(&mut self) -> Result<(), InputError> {
        self.record(Action::Delete)
    }

    fn paste(&mut self) -> Result<(), InputError> {
        self.record(Action::Paste)
    }

    fn confirm(&mut self) -> Result<(), InputError> {
        self.record(Action::Confirm)
    }
}

pub struct FakeClicker {
    pub log: ActionLog,
    pub fail: bool,
}

impl ClickInjector for FakeClicker {
    fn secondary_click(&mut self) -> Result<(), InputError> {
        if self.fail {
            return Err(InputError::Mouse("no display".to_string()));
        }
        self.log.lock().unwrap().push(Action::RightClick);
        Ok(())
    }
}
