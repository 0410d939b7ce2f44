//! Command-line configuration loaded from TOML
//!
//! ```toml
//! [bindings]
//! N = 5
//! greeting = "hello"
//!
//! [repl]
//! prompt = "λ> "
//! history = ".milisp_history"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::interp::{Datum, Env};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "milisp.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Data bindings predefined in every environment the CLI builds
    pub bindings: IndexMap<String, Binding>,
    pub repl: ReplConfig,
}

/// A predefined datum
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Number(f64),
    Text(String),
}

impl From<&Binding> for Datum {
    fn from(binding: &Binding) -> Self {
        match binding {
            Binding::Number(n) => Datum::Number(*n),
            Binding::Text(s) => Datum::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    pub prompt: String,
    /// Line history file; none means history is kept in memory only
    pub history: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "milisp> ".to_owned(),
            history: None,
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    #[diagnostic(code(config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}")]
    #[diagnostic(code(config::invalid))]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parse configuration text; `origin` only names the source in errors
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Invalid {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `explicit` if given, else `milisp.toml` when it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Define every configured binding in `env`
    pub fn apply(&self, env: &mut Env<Datum>) {
        for (name, binding) in &self.bindings {
            tracing::debug!(%name, "predefining binding");
            env.define(name.as_str(), Datum::from(binding));
        }
    }
}
