use crate::error::ConfigError;
use crate::keys::KeyIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub keys: KeySettings,
    pub logic: LogicSettings,
    pub currency: CurrencySettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KeySettings {
    /// Opens the price dialog of the hovered item.
    pub rightclick_key: String,
    /// Copies, discounts and pastes back the selected price.
    pub calcprice_key: String,
    /// Confirms the new price when it is not confirmed immediately.
    pub enter_key: String,
    pub exit_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogicSettings {
    pub adjustment_factor: f64,
    /// Lowest realised new/old ratio accepted after integer truncation.
    #[serde(default = "default_min_actual_factor")]
    pub min_actual_factor: f64,
    /// Press enter right after pasting. Falls back to `currency.autoupdate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_immediately: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencySettings {
    #[serde(default)]
    pub games: GamesSetting,
    #[serde(default)]
    pub poe1league: String,
    #[serde(default)]
    pub poe2league: String,
    #[serde(default = "default_autoupdate")]
    pub autoupdate: bool,
}

fn default_autoupdate() -> bool {
    true
}

fn default_min_actual_factor() -> f64 {
    0.5
}

/// `games = "1,2"` in the settings file, or a bare `games = 2`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum GamesSetting {
    List(String),
    Single(i64),
}

impl Default for GamesSetting {
    fn default() -> Self {
        GamesSetting::List(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Poe1,
    Poe2,
}

impl Game {
    pub fn number(&self) -> u8 {
        match self {
            Game::Poe1 => 1,
            Game::Poe2 => 2,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Game::Poe1),
            "2" => Some(Game::Poe2),
            _ => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoE{}", self.number())
    }
}

/// The four hotkeys, resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub rightclick: KeyIdentity,
    pub calcprice: KeyIdentity,
    pub enter: KeyIdentity,
    pub exit: KeyIdentity,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bindings = self.keys.resolve()?;
        let all = [
            ("rightclick_key", bindings.rightclick),
            ("calcprice_key", bindings.calcprice),
            ("enter_key", bindings.enter),
            ("exit_key", bindings.exit),
        ];
        for (i, (name_a, key_a)) in all.iter().enumerate() {
            for (name_b, key_b) in all.iter().skip(i + 1) {
                if key_a == key_b {
                    return Err(ConfigError::Validation(format!(
                        "{} and {} are both bound to \"{}\".",
                        name_a, name_b, key_a
                    )));
                }
            }
        }
        for (name, key) in all.iter() {
            if key.is_injected() {
                return Err(ConfigError::Validation(format!(
                    "{} \"{}\" is typed by poemarcut itself while repricing and can't be a hotkey.",
                    name, key
                )));
            }
        }

        let factor = self.logic.adjustment_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid adjustment_factor {}: must be a positive number.",
                factor
            )));
        }

        let min = self.logic.min_actual_factor;
        if !(0.0..=1.0).contains(&min) {
            return Err(ConfigError::Validation(format!(
                "Invalid min_actual_factor {}: must be between 0 and 1.",
                min
            )));
        }

        for game in self.currency.games()? {
            if self.currency.league(game).trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "poe{}league must be set when game {} is enabled.",
                    game.number(),
                    game.number()
                )));
            }
        }
        Ok(())
    }

    pub fn confirm_immediately(&self) -> bool {
        self.logic
            .confirm_immediately
            .unwrap_or(self.currency.autoupdate)
    }
}

impl KeySettings {
    pub fn resolve(&self) -> Result<HotkeyBindings, ConfigError> {
        let key = |field: &'static str, value: &str| {
            value
                .parse::<KeyIdentity>()
                .map_err(|source| ConfigError::Key { field, source })
        };
        Ok(HotkeyBindings {
            rightclick: key("rightclick_key", &self.rightclick_key)?,
            calcprice: key("calcprice_key", &self.calcprice_key)?,
            enter: key("enter_key", &self.enter_key)?,
            exit: key("exit_key", &self.exit_key)?,
        })
    }
}

impl CurrencySettings {
    /// Enabled games in configured order, duplicates removed.
    pub fn games(&self) -> Result<Vec<Game>, ConfigError> {
        let raw = match &self.games {
            GamesSetting::List(s) => s.replace(' ', ""),
            GamesSetting::Single(n) => n.to_string(),
        };

        let mut games = Vec::new();
        for part in raw.split(',').filter(|p| !p.is_empty()) {
            let game = Game::parse(part).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "Invalid value for games {:?}. Game must be '1' (PoE1), '2' (PoE2), or '' (none).",
                    raw
                ))
            })?;
            if !games.contains(&game) {
                games.push(game);
            }
        }
        Ok(games)
    }

    pub fn league(&self, game: Game) -> &str {
        match game {
            Game::Poe1 => &self.poe1league,
            Game::Poe2 => &self.poe2league,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeySettings {
                rightclick_key: "f2".to_string(),
                calcprice_key: "f3".to_string(),
                enter_key: "f4".to_string(),
                exit_key: "f6".to_string(),
            },
            logic: LogicSettings {
                adjustment_factor: 0.9,
                min_actual_factor: default_min_actual_factor(),
                confirm_immediately: None,
            },
            currency: CurrencySettings {
                games: GamesSetting::List("1,2".to_string()),
                poe1league: "Standard".to_string(),
                poe2league: "Standard".to_string(),
                autoupdate: true,
            },
        }
    }
}
