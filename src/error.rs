use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    Parsing(#[from] toml::de::Error),
    #[error("Error loading {field}: {source}")]
    Key {
        field: &'static str,
        #[source]
        source: KeyError,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key string: {0:?}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned HTTP {0}")]
    Status(u16),
    #[error("No JSON data in response: {0}")]
    Body(#[from] serde_json::Error),
    #[error("Invalid data received for '{league}' league. This is expected if the league does not exist.")]
    LeagueNotFound { league: String },
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Error accessing cache file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error decoding cache file: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Could not connect to the input system: {0}")]
    Connection(String),
    #[error("Keyboard input failed: {0}")]
    Keyboard(String),
    #[error("Mouse input failed: {0}")]
    Mouse(String),
    #[error("Clipboard access failed: {0}")]
    Clipboard(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("No usable rate for '{0}' in currency data")]
    MissingCurrency(&'static str),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Keyboard listener failed: {0}")]
    Listener(String),
    #[error("Keyboard listener stopped before the exit key was pressed")]
    ListenerClosed,
}
