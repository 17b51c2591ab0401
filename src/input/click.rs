use enigo::{Button, Direction, Enigo, Mouse, Settings};
use log::debug;
use std::thread;

use crate::constants::CLICK_HOLD_DELAY;
use crate::error::InputError;
use crate::input::ClickInjector;

/// Right click through enigo's high-level mouse API.
pub struct EnigoClicker {
    enigo: Enigo,
}

impl EnigoClicker {
    pub fn new() -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Connection(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl ClickInjector for EnigoClicker {
    fn secondary_click(&mut self) -> Result<(), InputError> {
        self.enigo
            .button(Button::Right, Direction::Click)
            .map_err(|e| InputError::Mouse(e.to_string()))
    }
}

/// Right click as separate low-level down/up events with a hold in between.
///
/// The game ignores instantaneous synthetic clicks on Windows, so the button
/// has to stay down for a moment.
pub struct RdevClicker;

impl RdevClicker {
    fn send(event: rdev::EventType) -> Result<(), InputError> {
        rdev::simulate(&event).map_err(|_| {
            InputError::Mouse(format!("could not simulate {:?}", event))
        })
    }
}

impl ClickInjector for RdevClicker {
    fn secondary_click(&mut self) -> Result<(), InputError> {
        Self::send(rdev::EventType::ButtonPress(rdev::Button::Right))?;
        thread::sleep(CLICK_HOLD_DELAY);
        Self::send(rdev::EventType::ButtonRelease(rdev::Button::Right))
    }
}

/// Pick the click strategy for the host OS, once at startup.
pub fn platform_click_injector() -> Result<Box<dyn ClickInjector>, InputError> {
    if cfg!(target_os = "windows") {
        debug!("Using low-level click injection");
        Ok(Box::new(RdevClicker))
    } else {
        debug!("Using enigo click injection");
        Ok(Box::new(EnigoClicker::new()?))
    }
}
