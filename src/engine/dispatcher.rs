use log::{debug, error, info};
use std::sync::mpsc::Receiver;

use crate::config::settings::HotkeyBindings;
use crate::engine::rewrite::{Outcome, PriceRewriteHandler};
use crate::error::DispatchError;
use crate::input::{ClickInjector, InputDriver};
use crate::keys::KeyIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Listening,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    OpenDialog,
    CalculatePrice,
    Confirm,
    Exit,
}

/// Routes released hotkeys to their actions until the exit key is seen.
pub struct HotkeyDispatcher<D> {
    bindings: HotkeyBindings,
    handler: PriceRewriteHandler,
    driver: D,
    clicker: Box<dyn ClickInjector>,
    state: DispatcherState,
}

impl<D: InputDriver> HotkeyDispatcher<D> {
    pub fn new(
        bindings: HotkeyBindings,
        handler: PriceRewriteHandler,
        driver: D,
        clicker: Box<dyn ClickInjector>,
    ) -> Self {
        Self {
            bindings,
            handler,
            driver,
            clicker,
            state: DispatcherState::Listening,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// First matching binding wins, in the order the actions are listed.
    pub fn action_for(&self, key: &KeyIdentity) -> Option<HotkeyAction> {
        let b = &self.bindings;
        if b.rightclick.matches(key) {
            Some(HotkeyAction::OpenDialog)
        } else if b.calcprice.matches(key) {
            Some(HotkeyAction::CalculatePrice)
        } else if b.enter.matches(key) {
            Some(HotkeyAction::Confirm)
        } else if b.exit.matches(key) {
            Some(HotkeyAction::Exit)
        } else {
            None
        }
    }

    /// Handle one released key. Failures are logged; only the exit key stops.
    pub fn handle(&mut self, key: KeyIdentity) -> DispatcherState {
        if self.state == DispatcherState::Stopped {
            return self.state;
        }

        let Some(action) = self.action_for(&key) else {
            return self.state;
        };
        debug!("{} released: {:?}", key, action);

        match action {
            HotkeyAction::OpenDialog => {
                if let Err(e) = self.clicker.secondary_click() {
                    error!("Error: {}", e);
                }
            }
            HotkeyAction::CalculatePrice => match self.handler.apply(&mut self.driver) {
                Outcome::Applied { .. } => {}
                Outcome::NoOp(reason) => debug!("Price left unchanged: {}", reason),
                Outcome::Failed(e) => error!("Error: {}", e),
            },
            HotkeyAction::Confirm => {
                if !self.handler.confirm_immediately() {
                    if let Err(e) = self.driver.confirm() {
                        error!("Error: {}", e);
                    }
                }
            }
            HotkeyAction::Exit => {
                info!("Exiting...");
                self.state = DispatcherState::Stopped;
            }
        }
        self.state
    }

    /// Consume key events until the exit key is released.
    pub fn run(mut self, events: Receiver<KeyIdentity>) -> Result<(), DispatchError> {
        for key in events.iter() {
            if self.handle(key) == DispatcherState::Stopped {
                return Ok(());
            }
        }
        Err(DispatchError::ListenerClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::fake::{Action, ActionLog, FakeClicker, FakeDriver};
    use crate::keys::resolve;
    use std::sync::mpsc;
    use std::time::Duration;

    fn bindings() -> HotkeyBindings {
        HotkeyBindings {
            rightclick: resolve("f2").unwrap(),
            calcprice: resolve("f3").unwrap(),
            enter: resolve("f4").unwrap(),
            exit: resolve("f6").unwrap(),
        }
    }

    fn dispatcher(
        clipboard: &str,
        confirm_immediately: bool,
    ) -> (HotkeyDispatcher<FakeDriver>, ActionLog, ActionLog) {
        let driver = FakeDriver::with_clipboard(clipboard);
        let driver_log = driver.log.clone();
        let click_log = ActionLog::default();
        let clicker = FakeClicker {
            log: click_log.clone(),
            fail: false,
        };
        let handler = PriceRewriteHandler::new(0.9, 0.85, confirm_immediately)
            .with_settle_delay(Duration::ZERO);
        (
            HotkeyDispatcher::new(bindings(), handler, driver, Box::new(clicker)),
            driver_log,
            click_log,
        )
    }

    fn key(name: &str) -> KeyIdentity {
        resolve(name).unwrap()
    }

    #[test]
    fn test_action_lookup() {
        let (d, _, _) = dispatcher("10", true);
        assert_eq!(d.action_for(&key("f2")), Some(HotkeyAction::OpenDialog));
        assert_eq!(d.action_for(&key("f3")), Some(HotkeyAction::CalculatePrice));
        assert_eq!(d.action_for(&key("f4")), Some(HotkeyAction::Confirm));
        assert_eq!(d.action_for(&key("f6")), Some(HotkeyAction::Exit));
        assert_eq!(d.action_for(&key("a")), None);
    }

    #[test]
    fn test_open_dialog_clicks() {
        let (mut d, driver_log, click_log) = dispatcher("10", true);
        assert_eq!(d.handle(key("f2")), DispatcherState::Listening);
        assert_eq!(*click_log.lock().unwrap(), vec![Action::RightClick]);
        assert!(driver_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_click_failure_keeps_listening() {
        let (mut d, _, _) = dispatcher("10", true);
        d.clicker = Box::new(FakeClicker {
            log: ActionLog::default(),
            fail: true,
        });
        assert_eq!(d.handle(key("f2")), DispatcherState::Listening);
    }

    #[test]
    fn test_calculate_price_stays_listening() {
        let (mut d, driver_log, _) = dispatcher("10", true);
        assert_eq!(d.handle(key("f3")), DispatcherState::Listening);
        assert!(driver_log
            .lock()
            .unwrap()
            .contains(&Action::SetClipboard("9".to_string())));

        // A no-op outcome does not stop the dispatcher either
        let (mut d, _, _) = dispatcher("not a price", true);
        assert_eq!(d.handle(key("f3")), DispatcherState::Listening);
    }

    #[test]
    fn test_confirm_key_only_when_not_immediate() {
        let (mut d, driver_log, _) = dispatcher("10", false);
        d.handle(key("f4"));
        assert_eq!(*driver_log.lock().unwrap(), vec![Action::Confirm]);

        let (mut d, driver_log, _) = dispatcher("10", true);
        d.handle(key("f4"));
        assert!(driver_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (mut d, driver_log, click_log) = dispatcher("10", true);
        assert_eq!(d.handle(key("q")), DispatcherState::Listening);
        assert!(driver_log.lock().unwrap().is_empty());
        assert!(click_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_exit_stops_once_and_ignores_later_events() {
        let (mut d, driver_log, _) = dispatcher("10", true);
        assert_eq!(d.handle(key("f6")), DispatcherState::Stopped);
        assert_eq!(d.state(), DispatcherState::Stopped);
        assert_eq!(d.handle(key("f3")), DispatcherState::Stopped);
        assert!(driver_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_until_exit() {
        let (d, driver_log, click_log) = dispatcher("10", true);
        let (tx, rx) = mpsc::channel();
        for name in ["f2", "f6", "f3", "f2"] {
            tx.send(key(name)).unwrap();
        }

        assert!(d.run(rx).is_ok());
        // Only the click before the exit key was processed
        assert_eq!(*click_log.lock().unwrap(), vec![Action::RightClick]);
        assert!(driver_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_reports_closed_listener() {
        let (d, _, _) = dispatcher("10", true);
        let (tx, rx) = mpsc::channel();
        tx.send(key("f3")).unwrap();
        drop(tx);
        assert!(matches!(d.run(rx), Err(DispatchError::ListenerClosed)));
    }
}
