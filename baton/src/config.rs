//! Team run configuration: turn and handoff budgets.
//!
//! Callers build this with [`TeamConfig::default`], from the environment with
//! [`TeamConfig::from_env`], or with [`TeamConfig::load`] which first applies `.env` and
//! the XDG `config.toml` `[env]` table. Builder setters on
//! [`TeamBuilder`](crate::team::TeamBuilder) override single fields.

use tracing::warn;

use crate::error::BuildError;

/// Tool-call cycles one agent loop may spend before failing.
pub const DEFAULT_MAX_TURNS: u32 = 10;
/// Agent switches one run may perform before failing.
pub const DEFAULT_MAX_HANDOFFS: u32 = 5;

pub const ENV_MAX_TURNS: &str = "BATON_MAX_TURNS";
pub const ENV_MAX_HANDOFFS: &str = "BATON_MAX_HANDOFFS";
pub const ENV_HANDOFF_PROMPT: &str = "BATON_HANDOFF_PROMPT";

/// App name used for `~/.config/<app>/config.toml`.
const APP_NAME: &str = "baton";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamConfig {
    /// Per-loop budget; every tool call (handoff calls included) consumes one unit.
    pub max_turns: u32,
    /// Per-run budget of agent switches.
    pub max_handoffs: u32,
    /// When true, agents with handoff tools get the multi-agent context prefix in their
    /// system prompt.
    pub handoff_prompt: bool,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            max_handoffs: DEFAULT_MAX_HANDOFFS,
            handoff_prompt: true,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(key = %key, value = %raw, "Ignoring unparseable config value");
                default
            }
        },
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        None => default,
        Some(s) => match s.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!(key = %key, value = %s, "Ignoring unparseable config value");
                default
            }
        },
    }
}

impl TeamConfig {
    /// Reads `BATON_MAX_TURNS`, `BATON_MAX_HANDOFFS` and `BATON_HANDOFF_PROMPT`. Unset or
    /// unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies `.env` and `~/.config/baton/config.toml` to the environment (existing env
    /// wins), then reads it with [`from_env`](Self::from_env).
    pub fn load() -> Result<Self, env_config::LoadError> {
        env_config::load_and_apply(APP_NAME, None)?;
        Ok(Self::from_env())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_turns: parse_var(ENV_MAX_TURNS, lookup(ENV_MAX_TURNS), defaults.max_turns),
            max_handoffs: parse_var(
                ENV_MAX_HANDOFFS,
                lookup(ENV_MAX_HANDOFFS),
                defaults.max_handoffs,
            ),
            handoff_prompt: parse_bool(
                ENV_HANDOFF_PROMPT,
                lookup(ENV_HANDOFF_PROMPT),
                defaults.handoff_prompt,
            ),
        }
    }

    /// Rejects a zero turn budget, which would fail every loop before the first model call.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_turns == 0 {
            return Err(BuildError::InvalidConfig(
                "max_turns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
