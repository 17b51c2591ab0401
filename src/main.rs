use anyhow::Result;
use clap::Parser;
use log::{error, info};
use poemarcut::config::load_config;
use poemarcut::engine::{spawn_key_listener, HotkeyDispatcher, PriceRewriteHandler};
use poemarcut::error::ConfigError;
use poemarcut::input::{platform_click_injector, EnigoDriver};
use poemarcut::market::{PoeNinjaProvider, PriceCache};
use poemarcut::ui::console::ConsoleRenderer;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Parser, Debug)]
#[command(author, version, about = "Path of Exile merchant tab repricing helper", long_about = None)]
struct Args {
    /// Settings file
    #[arg(short, long, default_value = "settings.toml")]
    config: String,

    /// Directory holding the cached currency data
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Interactively create a settings file
    #[arg(long)]
    create: bool,

    /// Don't check GitHub for a newer release
    #[arg(long)]
    skip_update_check: bool,
}

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[tokio::main]
async fn main() -> Result<()> {
    // ---------------------------------------------------------
    // 1. Setup Logging (Tracing)
    // ---------------------------------------------------------
    let file_appender = tracing_appender::rolling::daily("logs", "poemarcut.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Console Layer (Env Filter)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        );

    // File Layer (Simple Text)
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_target(false)
        .with_filter(tracing_subscriber::EnvFilter::new("info,poemarcut=debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    let args = Args::parse();

    if args.create {
        if let Err(e) = poemarcut::config::creator::create_config() {
            error!("Error creating settings: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // ---------------------------------------------------------
    // 2. Load Settings
    // ---------------------------------------------------------
    info!("Loading settings from: {}", args.config);
    let settings = match load_config(&args.config) {
        Ok(s) => s,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            error!(
                "Error: {} not found. Run with --create to make one. Exiting.",
                args.config
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("Error in {}: {}", args.config, e);
            std::process::exit(1);
        }
    };
    // Both were checked by validate() above
    let (bindings, games) = match (settings.keys.resolve(), settings.currency.games()) {
        (Ok(b), Ok(g)) => (b, g),
        (Err(e), _) | (_, Err(e)) => {
            error!("Error in {}: {}", args.config, e);
            std::process::exit(1);
        }
    };
    let confirm_immediately = settings.confirm_immediately();
    let adjustment_factor = settings.logic.adjustment_factor;

    println!(
        "{}",
        ConsoleRenderer::render_banner(&bindings, confirm_immediately)
    );

    // ---------------------------------------------------------
    // 3. Currency Suggestions
    // ---------------------------------------------------------
    let cache = PriceCache::new(&args.cache_dir, PoeNinjaProvider::new());
    for game in games {
        let league = settings.currency.league(game);
        match cache.get(game, league, !settings.currency.autoupdate).await {
            Ok(snapshot) => {
                println!(
                    "{}",
                    ConsoleRenderer::render_last_updated(
                        game,
                        league,
                        snapshot.updated_at,
                        SystemTime::now()
                    )
                );
                ConsoleRenderer::print_suggestions(game, adjustment_factor, &snapshot.overview);
            }
            Err(e) => {
                error!("{}: {}", game, e);
                error!("Could not retrieve currency suggestions for {}.", game);
                println!();
            }
        }
    }

    if !args.skip_update_check {
        if let Some(message) = poemarcut::update::check_for_update().await {
            println!("{}", message);
        }
    }

    // ---------------------------------------------------------
    // 4. Hotkey Loop
    // ---------------------------------------------------------
    let (events, _listener) = match spawn_key_listener() {
        Ok(l) => l,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let handler = PriceRewriteHandler::new(
        adjustment_factor,
        settings.logic.min_actual_factor,
        confirm_immediately,
    );

    // Input handles are created on the thread that uses them
    let result = tokio::task::spawn_blocking(move || -> Result<()> {
        let driver = EnigoDriver::new()?;
        let clicker = platform_click_injector()?;
        HotkeyDispatcher::new(bindings, handler, driver, clicker).run(events)?;
        Ok(())
    })
    .await?;

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
