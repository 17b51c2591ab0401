//! Hotkey names from the settings file and the key identities they resolve to.

use crate::error::KeyError;
use std::fmt;
use std::str::FromStr;

/// A named, non-character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolicKey {
    Alt,
    AltL,
    AltGr,
    Backspace,
    CapsLock,
    Cmd,
    CmdL,
    CmdR,
    Ctrl,
    CtrlL,
    CtrlR,
    Delete,
    Down,
    End,
    Enter,
    Esc,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Home,
    Insert,
    Left,
    NumLock,
    PageDown,
    PageUp,
    Pause,
    PrintScreen,
    Right,
    ScrollLock,
    Shift,
    ShiftL,
    ShiftR,
    Space,
    Tab,
    Up,
}

/// Accepted names. The first entry for a key is its canonical display name.
const SYMBOLIC_NAMES: &[(&str, SymbolicKey)] = &[
    ("alt", SymbolicKey::Alt),
    ("alt_l", SymbolicKey::AltL),
    ("alt_gr", SymbolicKey::AltGr),
    ("alt_r", SymbolicKey::AltGr),
    ("backspace", SymbolicKey::Backspace),
    ("caps_lock", SymbolicKey::CapsLock),
    ("cmd", SymbolicKey::Cmd),
    ("cmd_l", SymbolicKey::CmdL),
    ("cmd_r", SymbolicKey::CmdR),
    ("ctrl", SymbolicKey::Ctrl),
    ("ctrl_l", SymbolicKey::CtrlL),
    ("ctrl_r", SymbolicKey::CtrlR),
    ("delete", SymbolicKey::Delete),
    ("down", SymbolicKey::Down),
    ("end", SymbolicKey::End),
    ("enter", SymbolicKey::Enter),
    ("esc", SymbolicKey::Esc),
    ("f1", SymbolicKey::F1),
    ("f2", SymbolicKey::F2),
    ("f3", SymbolicKey::F3),
    ("f4", SymbolicKey::F4),
    ("f5", SymbolicKey::F5),
    ("f6", SymbolicKey::F6),
    ("f7", SymbolicKey::F7),
    ("f8", SymbolicKey::F8),
    ("f9", SymbolicKey::F9),
    ("f10", SymbolicKey::F10),
    ("f11", SymbolicKey::F11),
    ("f12", SymbolicKey::F12),
    ("home", SymbolicKey::Home),
    ("insert", SymbolicKey::Insert),
    ("left", SymbolicKey::Left),
    ("num_lock", SymbolicKey::NumLock),
    ("page_down", SymbolicKey::PageDown),
    ("page_up", SymbolicKey::PageUp),
    ("pause", SymbolicKey::Pause),
    ("print_screen", SymbolicKey::PrintScreen),
    ("right", SymbolicKey::Right),
    ("scroll_lock", SymbolicKey::ScrollLock),
    ("shift", SymbolicKey::Shift),
    ("shift_l", SymbolicKey::ShiftL),
    ("shift_r", SymbolicKey::ShiftR),
    ("space", SymbolicKey::Space),
    ("tab", SymbolicKey::Tab),
    ("up", SymbolicKey::Up),
];

impl SymbolicKey {
    pub fn name(&self) -> &'static str {
        SYMBOLIC_NAMES
            .iter()
            .find(|(_, key)| key == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        SYMBOLIC_NAMES
            .iter()
            .find(|(n, _)| *n == lower)
            .map(|(_, key)| *key)
    }

    /// Side-less modifier this key belongs to, if it is a sided modifier.
    fn generic(&self) -> Option<Self> {
        match self {
            SymbolicKey::AltL | SymbolicKey::AltGr => Some(SymbolicKey::Alt),
            SymbolicKey::CmdL | SymbolicKey::CmdR => Some(SymbolicKey::Cmd),
            SymbolicKey::CtrlL | SymbolicKey::CtrlR => Some(SymbolicKey::Ctrl),
            SymbolicKey::ShiftL | SymbolicKey::ShiftR => Some(SymbolicKey::Shift),
            _ => None,
        }
    }
}

/// Identity of a physical key, as configured or as reported by the OS hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIdentity {
    Symbolic(SymbolicKey),
    Character(char),
}

/// Resolve a configured key name such as `"f3"` or `"a"`.
pub fn resolve(name: &str) -> Result<KeyIdentity, KeyError> {
    if let Some(key) = SymbolicKey::from_name(name) {
        return Ok(KeyIdentity::Symbolic(key));
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Ok(KeyIdentity::Symbolic(SymbolicKey::Space)),
        (Some(c), None) if !c.is_control() && !c.is_whitespace() => {
            Ok(KeyIdentity::Character(c.to_lowercase().next().unwrap_or(c)))
        }
        _ => Err(KeyError::Invalid(name.to_string())),
    }
}

/// Keys the input driver presses itself while rewriting a price. The global
/// hook sees those releases too, so none of them may be bound.
pub const INJECTED_KEYS: [KeyIdentity; 8] = [
    KeyIdentity::Character('c'),
    KeyIdentity::Character('v'),
    KeyIdentity::Symbolic(SymbolicKey::Backspace),
    KeyIdentity::Symbolic(SymbolicKey::Enter),
    KeyIdentity::Symbolic(SymbolicKey::CtrlL),
    KeyIdentity::Symbolic(SymbolicKey::CtrlR),
    KeyIdentity::Symbolic(SymbolicKey::CmdL),
    KeyIdentity::Symbolic(SymbolicKey::CmdR),
];

impl FromStr for KeyIdentity {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

impl KeyIdentity {
    /// Whether a released key triggers this binding.
    ///
    /// A side-less modifier binding (`ctrl`) accepts either side; everything
    /// else requires an exact match.
    pub fn matches(&self, event: &KeyIdentity) -> bool {
        if self == event {
            return true;
        }
        match (self, event) {
            (KeyIdentity::Symbolic(bound), KeyIdentity::Symbolic(pressed)) => {
                pressed.generic() == Some(*bound)
            }
            _ => false,
        }
    }

    /// Whether pressing this binding's key is part of a price rewrite.
    pub fn is_injected(&self) -> bool {
        INJECTED_KEYS.iter().any(|injected| self.matches(injected))
    }

    /// Map a key reported by the global keyboard hook.
    pub fn from_os_key(key: rdev::Key) -> Option<Self> {
        use rdev::Key as K;

        let symbolic = match key {
            K::Alt => SymbolicKey::AltL,
            K::AltGr => SymbolicKey::AltGr,
            K::Backspace => SymbolicKey::Backspace,
            K::CapsLock => SymbolicKey::CapsLock,
            K::MetaLeft => SymbolicKey::CmdL,
            K::MetaRight => SymbolicKey::CmdR,
            K::ControlLeft => SymbolicKey::CtrlL,
            K::ControlRight => SymbolicKey::CtrlR,
            K::Delete | K::KpDelete => SymbolicKey::Delete,
            K::DownArrow => SymbolicKey::Down,
            K::End => SymbolicKey::End,
            K::Return | K::KpReturn => SymbolicKey::Enter,
            K::Escape => SymbolicKey::Esc,
            K::F1 => SymbolicKey::F1,
            K::F2 => SymbolicKey::F2,
            K::F3 => SymbolicKey::F3,
            K::F4 => SymbolicKey::F4,
            K::F5 => SymbolicKey::F5,
            K::F6 => SymbolicKey::F6,
            K::F7 => SymbolicKey::F7,
            K::F8 => SymbolicKey::F8,
            K::F9 => SymbolicKey::F9,
            K::F10 => SymbolicKey::F10,
            K::F11 => SymbolicKey::F11,
            K::F12 => SymbolicKey::F12,
            K::Home => SymbolicKey::Home,
            K::Insert => SymbolicKey::Insert,
            K::LeftArrow => SymbolicKey::Left,
            K::NumLock => SymbolicKey::NumLock,
            K::PageDown => SymbolicKey::PageDown,
            K::PageUp => SymbolicKey::PageUp,
            K::Pause => SymbolicKey::Pause,
            K::PrintScreen => SymbolicKey::PrintScreen,
            K::RightArrow => SymbolicKey::Right,
            K::ScrollLock => SymbolicKey::ScrollLock,
            K::ShiftLeft => SymbolicKey::ShiftL,
            K::ShiftRight => SymbolicKey::ShiftR,
            K::Space => SymbolicKey::Space,
            K::Tab => SymbolicKey::Tab,
            K::UpArrow => SymbolicKey::Up,
            other => return os_key_char(other).map(KeyIdentity::Character),
        };
        Some(KeyIdentity::Symbolic(symbolic))
    }
}

fn os_key_char(key: rdev::Key) -> Option<char> {
    use rdev::Key as K;

    let c = match key {
        K::KeyA => 'a',
        K::KeyB => 'b',
        K::KeyC => 'c',
        K::KeyD => 'd',
        K::KeyE => 'e',
        K::KeyF => 'f',
        K::KeyG => 'g',
        K::KeyH => 'h',
        K::KeyI => 'i',
        K::KeyJ => 'j',
        K::KeyK => 'k',
        K::KeyL => 'l',
        K::KeyM => 'm',
        K::KeyN => 'n',
        K::KeyO => 'o',
        K::KeyP => 'p',
        K::KeyQ => 'q',
        K::KeyR => 'r',
        K::KeyS => 's',
        K::KeyT => 't',
        K::KeyU => 'u',
        K::KeyV => 'v',
        K::KeyW => 'w',
        K::KeyX => 'x',
        K::KeyY => 'y',
        K::KeyZ => 'z',
        K::Num0 | K::Kp0 => '0',
        K::Num1 | K::Kp1 => '1',
        K::Num2 | K::Kp2 => '2',
        K::Num3 | K::Kp3 => '3',
        K::Num4 | K::Kp4 => '4',
        K::Num5 | K::Kp5 => '5',
        K::Num6 | K::Kp6 => '6',
        K::Num7 | K::Kp7 => '7',
        K::Num8 | K::Kp8 => '8',
        K::Num9 | K::Kp9 => '9',
        K::Minus | K::KpMinus => '-',
        K::KpPlus => '+',
        K::KpMultiply => '*',
        K::KpDivide => '/',
        K::Equal => '=',
        K::LeftBracket => '[',
        K::RightBracket => ']',
        K::SemiColon => ';',
        K::Quote => '\'',
        K::BackSlash | K::IntlBackslash => '\\',
        K::Comma => ',',
        K::Dot => '.',
        K::Slash => '/',
        K::BackQuote => '`',
        _ => return None,
    };
    Some(c)
}

impl fmt::Display for KeyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyIdentity::Symbolic(key) => write!(f, "{}", key.name()),
            KeyIdentity::Character(c) => write!(f, "{}", c),
        }
    }
}
