//! Console output: usage banner, cache age and currency price suggestions.

use chrono::{DateTime, Local};
use std::fmt::Write;
use std::time::SystemTime;

use crate::config::settings::{Game, HotkeyBindings};
use crate::constants::POE2_EX_WORTHLESS_VAL;
use crate::error::SuggestionError;
use crate::market::types::CurrencyOverview;

struct Tier {
    id: &'static str,
    name: &'static str,
}

const DIVINE: Tier = Tier {
    id: "divine",
    name: "Divine Orb",
};
const ANNUL: Tier = Tier {
    id: "annul",
    name: "Orb of Annulment",
};
const CHAOS: Tier = Tier {
    id: "chaos",
    name: "Chaos Orb",
};
const EXALTED: Tier = Tier {
    id: "exalted",
    name: "Exalted Orb",
};

/// Currency tiers from most to least valuable.
fn tiers(game: Game) -> &'static [Tier] {
    match game {
        Game::Poe1 => &[DIVINE, CHAOS],
        Game::Poe2 => &[DIVINE, ANNUL, CHAOS, EXALTED],
    }
}

/// Divines per unit above which the cheapest tier is not worth listing.
fn worthless_threshold(game: Game) -> Option<f64> {
    match game {
        Game::Poe1 => None,
        Game::Poe2 => Some(POE2_EX_WORTHLESS_VAL),
    }
}

/// Console renderer for startup output.
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Suggested replacement prices for currency listed at 1 unit.
    pub fn render_suggestions(
        game: Game,
        adjustment_factor: f64,
        overview: &CurrencyOverview,
    ) -> Result<String, SuggestionError> {
        let tiers = tiers(game);
        let values = tiers
            .iter()
            .map(|t| {
                overview
                    .value_of(t.id)
                    .ok_or(SuggestionError::MissingCurrency(t.id))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let cheapest = tiers.len() - 1;
        let cheapest_is_worthless = worthless_threshold(game)
            .map(|limit| 1.0 / values[cheapest] > limit)
            .unwrap_or(false);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} suggested new currency setting if current setting is 1, based on current values:",
            game
        );

        for (i, tier) in tiers.iter().enumerate() {
            let _ = writeln!(out, "{}x 1 {}", adjustment_factor, tier.name);
            if i == cheapest {
                let _ = writeln!(out, " = Just vendor it already!");
                continue;
            }
            for (j, lower) in tiers.iter().enumerate().skip(i + 1) {
                let adjusted = values[i] / values[j] * adjustment_factor;
                let _ = write!(
                    out,
                    " = {} {} ({:.2})",
                    adjusted.floor() as i64,
                    lower.name,
                    adjusted
                );
                if i + 1 == cheapest && j == cheapest && cheapest_is_worthless {
                    let _ = write!(out, "... but you should probably vendor it");
                }
                let _ = writeln!(out);
            }
        }

        Ok(out)
    }

    pub fn render_last_updated(
        game: Game,
        league: &str,
        updated_at: SystemTime,
        now: SystemTime,
    ) -> String {
        let secs = now
            .duration_since(updated_at)
            .unwrap_or_default()
            .as_secs();
        let local: DateTime<Local> = updated_at.into();
        format!(
            "({} currency data for '{}' last updated: {}h:{:02}m ago ({}))",
            game,
            league,
            secs / 3600,
            (secs % 3600) / 60,
            local.format("%a %b %e %H:%M:%S %Y")
        )
    }

    pub fn render_banner(bindings: &HotkeyBindings, confirm_immediately: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "> PoEMarcut running <");
        let _ = writeln!(
            out,
            "Press \"{}\" or \"right-click\" with item hovered to open dialog, then... ",
            bindings.rightclick
        );
        let _ = writeln!(out, "press \"{}\" to adjust price", bindings.calcprice);
        if !confirm_immediately {
            let _ = writeln!(
                out,
                "press \"{}\" or \"enter\" to set the new price.",
                bindings.enter
            );
        }
        let _ = writeln!(out, "Press \"{}\" to exit the program.", bindings.exit);
        let _ = write!(out, "{}", "=".repeat(32));
        out
    }

    pub fn print_suggestions(game: Game, adjustment_factor: f64, overview: &CurrencyOverview) {
        match Self::render_suggestions(game, adjustment_factor, overview) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                log::error!(
                    "Could not determine currency suggestions for {}: {}",
                    game,
                    e
                );
                println!();
            }
        }
    }
}
