//! Optional configuration for callers embedding the core.
//!
//! Nothing in the core reads files or the environment on its own. A front end
//! that wants configurable budgets, parallelism or logging loads a
//! [`Settings`] from defaults, an optional file and `LECTIC_`-prefixed
//! environment variables (`LECTIC_LATTICE__PARALLEL=false`), then hands the
//! pieces to [`LatticeBuilder::from_settings`](crate::lattice::LatticeBuilder::from_settings),
//! [`ConceptEnumerator::collect_within`](crate::enumerate::ConceptEnumerator::collect_within)
//! and [`init_tracing`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::enumerate::Budget;
use crate::error::{LecticError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub enumeration: EnumerationSettings,
    #[serde(default)]
    pub lattice: LatticeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Limits applied when materializing an enumeration. Unset means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumerationSettings {
    #[serde(default)]
    pub max_concepts: Option<usize>,
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}
impl EnumerationSettings {
    pub fn budget(&self) -> Budget {
        Budget {
            max_concepts: self.max_concepts,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeSettings {
    /// Fan the cover tests out over the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Concept count from which fanning out pays off
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}
impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub ansi: bool,
}
impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_parallel_threshold() -> usize {
    256
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Settings {
    /// Defaults, overridden by the file at `path` (if any, and if it exists),
    /// overridden by `LECTIC_` environment variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Settings::default())?);
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("LECTIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Ok(builder.build()?.try_deserialize()?)
    }
}

/// Installs a global fmt subscriber. `RUST_LOG` wins over the configured level.
/// Returns false when a subscriber was already installed.
pub fn init_tracing(logging: &LoggingSettings) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .map_err(|e| LecticError::Config(format!("log level '{}': {e}", logging.level)))?,
    };
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(logging.ansi)
        .try_init()
        .is_ok())
}
