//! Startup configuration: initial gradient, randomize policy, UI timings.
//!
//! User-level config: `~/.gradientcraft/config.yaml`
//! Project-level config: `.gradientcraft/config.yaml` (wins when present)
//!
//! Resolution: `--config` path → project config → user config → defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gradient::{ColorStop, GradientKind, GradientState, DEFAULT_ANGLE, DEFAULT_STOPS};

/// Name of the config directory (under `$HOME` or the working directory).
const CONFIG_DIR: &str = ".gradientcraft";
const CONFIG_FILE: &str = "config.yaml";

/// The gradient a session starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialGradient {
    #[serde(default = "default_stops")]
    pub stops: Vec<ColorStop>,
    #[serde(default)]
    pub kind: GradientKind,
    #[serde(default = "default_angle")]
    pub angle: i64,
}

fn default_stops() -> Vec<ColorStop> {
    DEFAULT_STOPS.to_vec()
}

fn default_angle() -> i64 {
    DEFAULT_ANGLE as i64
}

impl Default for InitialGradient {
    fn default() -> Self {
        Self {
            stops: default_stops(),
            kind: GradientKind::default(),
            angle: default_angle(),
        }
    }
}

/// How the randomize action behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizeConfig {
    /// Keep the current stop count (true) or redraw it in 2..=10 (false).
    #[serde(default = "default_true")]
    pub preserve_count: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RandomizeConfig {
    fn default() -> Self {
        Self {
            preserve_count: true,
        }
    }
}

/// Copy-to-clipboard feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// How long the "Copied!" / "Copy failed" label stays up.
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

fn default_feedback_ms() -> u64 {
    2000
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            feedback_ms: default_feedback_ms(),
        }
    }
}

/// Event loop timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_frame_rate_ms")]
    pub frame_rate_ms: u64,
}

fn default_tick_rate_ms() -> u64 {
    250 // 4Hz
}

fn default_frame_rate_ms() -> u64 {
    33 // ~30fps
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            frame_rate_ms: default_frame_rate_ms(),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GradientConfig {
    #[serde(default)]
    pub initial: InitialGradient,
    #[serde(default)]
    pub randomize: RandomizeConfig,
    #[serde(default)]
    pub copy: CopyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Path to `~/.gradientcraft/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(CONFIG_DIR))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(CONFIG_DIR))
    }
}

/// Path to the user-level config file.
pub fn user_config_path() -> Option<PathBuf> {
    dirs_path().map(|p| p.join(CONFIG_FILE))
}

/// Path to the project-level config file.
pub fn project_config_path() -> PathBuf {
    Path::new(CONFIG_DIR).join(CONFIG_FILE)
}

impl GradientConfig {
    /// Load from the standard locations, falling back to defaults.
    pub fn load() -> Self {
        Self::load_layered(&project_config_path(), user_config_path().as_deref())
    }

    /// First readable, parseable file wins; unreadable or broken files are
    /// skipped with a warning.
    pub fn load_layered(project: &Path, user: Option<&Path>) -> Self {
        for path in std::iter::once(project).chain(user) {
            if !path.exists() {
                continue;
            }
            match Self::load_from(path) {
                Ok(config) => return config,
                Err(e) => warn!("Ignoring config {}: {e:#}", path.display()),
            }
        }
        Self::default()
    }

    /// Load an explicit file. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save to `~/.gradientcraft/config.yaml`.
    pub fn save(&self) -> Result<PathBuf, String> {
        let Some(path) = user_config_path() else {
            return Err("Cannot determine home directory".into());
        };
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
            }
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| format!("YAML serialize error: {e}"))?;
        std::fs::write(path, yaml).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }

    /// The configured starting state, or the built-in default if the
    /// configured one breaks an invariant.
    pub fn initial_state(&self) -> GradientState {
        let init = &self.initial;
        match GradientState::new(init.stops.clone(), init.kind, init.angle) {
            Ok(state) => state,
            Err(e) => {
                warn!("Invalid initial gradient in config ({e}); using defaults");
                GradientState::default()
            }
        }
    }

    /// Record `state` as the starting gradient for future sessions.
    pub fn set_initial(&mut self, state: &GradientState) {
        self.initial = InitialGradient {
            stops: state.stops().to_vec(),
            kind: state.kind(),
            angle: state.angle() as i64,
        };
    }
}
