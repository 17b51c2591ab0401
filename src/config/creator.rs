use crate::config::settings::{
    CurrencySettings, GamesSetting, KeySettings, LogicSettings, Settings,
};
use crate::keys;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use std::fs;

pub fn create_config() -> Result<()> {
    let theme = ColorfulTheme::default();
    let defaults = Settings::default();

    let keys = create_keys(&theme, &defaults.keys)?;
    let logic = create_logic(&theme, &defaults.logic)?;
    let currency = create_currency(&theme, &defaults.currency)?;

    let settings = Settings {
        keys,
        logic,
        currency,
    };
    settings.validate()?;

    let filename: String = Input::with_theme(&theme)
        .with_prompt("Settings filename")
        .default("settings.toml".to_string())
        .interact_text()?;

    let path = if filename.ends_with(".toml") {
        filename
    } else {
        format!("{}.toml", filename)
    };

    if fs::metadata(&path).is_ok() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", path))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Nothing written.");
            return Ok(());
        }
    }

    let toml_string = toml::to_string_pretty(&settings)?;
    fs::write(&path, toml_string)?;
    println!("Settings saved to {}", path);

    Ok(())
}

fn key_prompt(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
    let key: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            match keys::resolve(input) {
                Ok(key) if key.is_injected() => Err(format!(
                    "\"{}\" is typed by poemarcut itself while repricing",
                    key
                )),
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            }
        })
        .interact_text()?;
    Ok(key)
}

fn create_keys(theme: &ColorfulTheme, defaults: &KeySettings) -> Result<KeySettings> {
    Ok(KeySettings {
        rightclick_key: key_prompt(
            theme,
            "Key to right-click (open price dialog)",
            &defaults.rightclick_key,
        )?,
        calcprice_key: key_prompt(
            theme,
            "Key to adjust the selected price",
            &defaults.calcprice_key,
        )?,
        enter_key: key_prompt(theme, "Key to confirm the new price", &defaults.enter_key)?,
        exit_key: key_prompt(theme, "Key to exit", &defaults.exit_key)?,
    })
}

fn create_logic(theme: &ColorfulTheme, defaults: &LogicSettings) -> Result<LogicSettings> {
    let adjustment_factor: f64 = Input::with_theme(theme)
        .with_prompt("Adjustment factor (e.g. 0.9 for a 10% discount)")
        .default(defaults.adjustment_factor)
        .validate_with(|input: &f64| -> Result<(), &str> {
            if input.is_finite() && *input > 0.0 {
                Ok(())
            } else {
                Err("Adjustment factor must be positive")
            }
        })
        .interact_text()?;

    let min_actual_factor: f64 = Input::with_theme(theme)
        .with_prompt("Minimum actual factor after rounding (0-1)")
        .default(defaults.min_actual_factor)
        .validate_with(|input: &f64| -> Result<(), &str> {
            if (0.0..=1.0).contains(input) {
                Ok(())
            } else {
                Err("Minimum actual factor must be between 0 and 1")
            }
        })
        .interact_text()?;

    Ok(LogicSettings {
        adjustment_factor,
        min_actual_factor,
        confirm_immediately: None,
    })
}

fn create_currency(
    theme: &ColorfulTheme,
    defaults: &CurrencySettings,
) -> Result<CurrencySettings> {
    let game_names = vec!["Path of Exile 1", "Path of Exile 2"];
    let selected = MultiSelect::with_theme(theme)
        .with_prompt("Show currency suggestions for (space to toggle)")
        .items(&game_names)
        .defaults(&[true, true])
        .interact()?;

    let mut poe1league = defaults.poe1league.clone();
    let mut poe2league = defaults.poe2league.clone();
    if selected.contains(&0) {
        poe1league = Input::with_theme(theme)
            .with_prompt("PoE1 league")
            .default(poe1league)
            .interact_text()?;
    }
    if selected.contains(&1) {
        poe2league = Input::with_theme(theme)
            .with_prompt("PoE2 league")
            .default(poe2league)
            .interact_text()?;
    }

    let autoupdate = Confirm::with_theme(theme)
        .with_prompt("Refresh currency data hourly and press enter right after pasting?")
        .default(defaults.autoupdate)
        .interact()?;

    let games = selected
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(CurrencySettings {
        games: GamesSetting::List(games),
        poe1league,
        poe2league,
        autoupdate,
    })
}
