//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::DEFAULT_MAX_DELTA;
use crate::error::{LevitateError, LevitateResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Motion tuning shared by every animated object.
    pub motion: MotionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Motion tuning: the hover spring plus the constant self-rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub spring: SpringConfig,
    pub spin: SpinConfig,
}

/// Hover spring constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Downward acceleration applied while not hovered (units/s²).
    pub gravity: f64,

    /// Spring stiffness pulling the object toward its target height.
    pub spring_strength: f64,

    /// Damping ratio. 1.0 is critical damping.
    #[serde(rename = "damping")]
    pub damping_ratio: f64,

    /// Height gained above rest while hovered.
    pub lift_height: f64,

    /// Fraction of impact speed kept after hitting the rest plane.
    pub bounce_restitution: f64,

    /// Rebounds slower than this come to rest instead of bouncing. Must stay
    /// above `bounce_restitution * gravity * max_delta`, the rebound a resting
    /// object gets from gravity alone in one frame.
    pub settle_speed: f64,

    /// Largest delta (seconds) a single update will integrate.
    pub max_delta: f64,
}

/// Constant rotation about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Radians per second.
    pub angular_speed: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "levitate_motion_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            gravity: 15.0,
            spring_strength: 40.0,
            damping_ratio: 0.7,
            lift_height: 1.0,
            bounce_restitution: 0.3,
            settle_speed: 0.15,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self { angular_speed: 0.5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Apply command-line overrides: `verbose` forces the `debug` level and
    /// `json` switches JSON output on. Neither can turn a setting off.
    pub fn with_overrides(mut self, verbose: bool, json: bool) -> Self {
        if verbose {
            self.level = "debug".to_string();
        }
        self.json |= json;
        self
    }
}

impl SpringConfig {
    /// Per-second velocity damping derived from the damping ratio:
    /// `2 * ratio * sqrt(spring_strength)`.
    pub fn damping_coefficient(&self) -> f64 {
        2.0 * self.damping_ratio * self.spring_strength.sqrt()
    }

    /// Check that every constant is finite and in range, and that the
    /// damping step stays stable at `max_delta`.
    pub fn validate(&self) -> LevitateResult<()> {
        let fields = [
            ("gravity", self.gravity),
            ("spring_strength", self.spring_strength),
            ("damping", self.damping_ratio),
            ("lift_height", self.lift_height),
            ("bounce_restitution", self.bounce_restitution),
            ("settle_speed", self.settle_speed),
            ("max_delta", self.max_delta),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LevitateError::config(format!("{name} must be finite")));
            }
            if value < 0.0 {
                return Err(LevitateError::config(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }

        if self.spring_strength == 0.0 {
            return Err(LevitateError::config("spring_strength must be positive"));
        }
        if self.lift_height == 0.0 {
            return Err(LevitateError::config("lift_height must be positive"));
        }
        if self.max_delta == 0.0 {
            return Err(LevitateError::config("max_delta must be positive"));
        }
        if self.bounce_restitution > 1.0 {
            return Err(LevitateError::config(format!(
                "bounce_restitution must be at most 1.0 (got {})",
                self.bounce_restitution
            )));
        }

        let damping_step = self.damping_coefficient() * self.max_delta;
        if damping_step >= 1.0 {
            return Err(LevitateError::config(format!(
                "damping coefficient {:.3} times max_delta {:.4} is {:.3}; must stay below 1.0",
                self.damping_coefficient(),
                self.max_delta,
                damping_step
            )));
        }

        Ok(())
    }
}

impl SpinConfig {
    pub fn validate(&self) -> LevitateResult<()> {
        if !self.angular_speed.is_finite() {
            return Err(LevitateError::config("angular_speed must be finite"));
        }
        Ok(())
    }
}

impl MotionConfig {
    pub fn validate(&self) -> LevitateResult<()> {
        self.spring.validate()?;
        self.spin.validate()
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> LevitateResult<Self> {
        if !path.exists() {
            return Err(LevitateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.motion.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> LevitateResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> LevitateResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("levitate").join("config.json")
}
