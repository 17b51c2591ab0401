use log::error;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::DispatchError;
use crate::keys::KeyIdentity;

/// Hook global key releases on a background thread.
///
/// Released keys arrive in order on the returned channel. The hook cannot be
/// unregistered; it lives until the process exits. If the hook fails the
/// sender is dropped and the channel closes.
pub fn spawn_key_listener() -> Result<(Receiver<KeyIdentity>, JoinHandle<()>), DispatchError> {
    let (tx, rx) = mpsc::channel();

    let handle = thread::Builder::new()
        .name("key-listener".to_string())
        .spawn(move || {
            let result = rdev::listen(move |event| {
                if let rdev::EventType::KeyRelease(key) = event.event_type {
                    if let Some(identity) = KeyIdentity::from_os_key(key) {
                        // Receiver gone means we are shutting down
                        let _ = tx.send(identity);
                    }
                }
            });
            if let Err(e) = result {
                error!("Keyboard listener failed: {:?}", e);
            }
        })
        .map_err(|e| DispatchError::Listener(e.to_string()))?;

    Ok((rx, handle))
}
