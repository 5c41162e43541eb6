//! Load configuration from XDG `config.toml` and project `.env`, then apply it to the
//! process environment with priority: **existing env > .env > XDG**.
//!
//! Library crates read their settings from the environment afterwards (e.g.
//! `baton::TeamConfig::from_env`), so every source ends up behind one lookup.
//!
//! Feature `tracing-init`: [`init_tracing`] installs a `tracing-subscriber` for binaries.

mod dotenv;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

#[cfg(feature = "tracing-init")]
pub use tracing_init::init_tracing;
pub use xdg_toml::config_path;

use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("xdg config [env] key '{key}' must be a string, number or boolean, got {kind}")]
    XdgValue { key: String, kind: String },
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Picks the value to apply for each key not already in the environment.
fn merge(
    dotenv: HashMap<String, String>,
    xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> HashMap<String, String> {
    let keys: HashSet<&String> = dotenv.keys().chain(xdg.keys()).collect();
    keys.into_iter()
        .filter(|k| !is_set(k.as_str()))
        .filter_map(|k| {
            dotenv
                .get(k)
                .or_else(|| xdg.get(k))
                .map(|v| (k.clone(), v.clone()))
        })
        .collect()
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` and the project `.env`, then
/// sets every key that is **not** already set in the process environment.
///
/// * `app_name`: e.g. `"baton"`, giving `~/.config/baton/config.toml`.
/// * `override_dir`: directory holding `.env`; defaults to the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    let apply = merge(dotenv_map, xdg_map, |k| std::env::var_os(k).is_some());
    for (key, value) in apply {
        std::env::set_var(key, value);
    }
    Ok(())
}
