//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navhud/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The file is read before the logger exists (it names the log file), so
//! loading reports a [`ConfigSource`] that the caller logs once it is up.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::DisplayMode;
use crate::core::engine::DEFAULT_TURN_LANE_MAX_DURATION_SECS;
use crate::core::format::{DEFAULT_ROUNDING_INCREMENT, UnitType};
use crate::core::snapshot::DEFAULT_THEN_STEP_MAX_UPCOMING_SECS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HudConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub display_mode: Option<DisplayMode>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UnitsConfig {
    pub unit_type: Option<UnitType>,
    pub rounding_increment: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThresholdsConfig {
    pub turn_lane_max_duration_secs: Option<f64>,
    pub then_step_max_upcoming_secs: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    pub speed: Option<f64>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub display_mode: Option<DisplayMode>,
    pub unit_type: Option<UnitType>,
    pub speed: Option<f64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "navhud.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_REPLAY_SPEED: f64 = 1.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub display_mode: DisplayMode,
    pub log_file: String,
    pub log_level: String,
    pub unit_type: UnitType,
    pub rounding_increment: u32,
    pub turn_lane_max_duration_secs: f64,
    pub then_step_max_upcoming_secs: f64,
    pub replay_speed: f64,
}

/// The logger's file and level, taken from the file layer only.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub file: String,
    pub level: String,
}

impl HudConfig {
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            file: self
                .general
                .log_file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            level: self
                .general
                .log_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

/// Parses a `log_level` value ("off", "error" … "trace", any case).
pub fn parse_log_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

// ============================================================================
// Load Report
// ============================================================================

/// Where the file layer came from.
#[derive(Debug, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed. `error` is set when writing the default failed.
    Generated { path: PathBuf, error: Option<String> },
    NoHome,
}

impl ConfigSource {
    pub fn log(&self, config: &HudConfig) {
        match self {
            ConfigSource::File(path) => {
                info!("Loaded config from {}", path.display());
                debug!("Config: {:?}", config);
            }
            ConfigSource::Generated { path, error: None } => {
                info!("No config file found, generated default at {}", path.display());
            }
            ConfigSource::Generated { path, error: Some(e) } => {
                warn!("No config file found, failed to write default at {}: {}", path.display(), e);
            }
            ConfigSource::NoHome => warn!("Could not determine home directory, using default config"),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navhud/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navhud").join("config.toml"))
}

/// Load config from `~/.navhud/config.toml`.
pub fn load_config() -> Result<(HudConfig, ConfigSource), ConfigError> {
    load_config_at(config_path())
}

/// Load config from the default location `path`, if there is one.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HudConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_at(path: Option<PathBuf>) -> Result<(HudConfig, ConfigSource), ConfigError> {
    let Some(path) = path else {
        return Ok((HudConfig::default(), ConfigSource::NoHome));
    };

    if !path.exists() {
        let error = generate_default_config(&path).err().map(|e| e.to_string());
        return Ok((HudConfig::default(), ConfigSource::Generated { path, error }));
    }

    load_config_from(&path)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<(HudConfig, ConfigSource), ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HudConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# navhud Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# display_mode = "portrait"          # "portrait" or "landscape" (or NAVHUD_DISPLAY_MODE)
# log_file = "navhud.log"
# log_level = "debug"                # "error", "warn", "info", "debug", "trace"

# [units]
# unit_type = "metric"               # "metric" or "imperial" (or NAVHUD_UNITS)
# rounding_increment = 50            # small distances snap to this many m / ft

# [thresholds]
# turn_lane_max_duration_secs = 70.0 # lanes show when the step ends within this
# then_step_max_upcoming_secs = 30.0 # "then" preview for upcoming steps this short

# [replay]
# speed = 1.0                        # trace playback multiplier (or NAVHUD_REPLAY_SPEED)
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HudConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Display mode: CLI → env → config → default
    let display_mode = cli
        .display_mode
        .or_else(|| env_parsed("NAVHUD_DISPLAY_MODE", DisplayMode::parse))
        .or(config.general.display_mode)
        .unwrap_or_default();

    // Units: CLI → env → config → default
    let unit_type = cli
        .unit_type
        .or_else(|| env_parsed("NAVHUD_UNITS", UnitType::parse))
        .or(config.units.unit_type)
        .unwrap_or_default();

    // Replay speed: CLI → env → config → default, non-positive rejected
    let replay_speed = cli
        .speed
        .or_else(|| env_parsed("NAVHUD_REPLAY_SPEED", |s| s.trim().parse().ok()))
        .or(config.replay.speed)
        .filter(|speed| speed.is_finite() && *speed > 0.0)
        .unwrap_or(DEFAULT_REPLAY_SPEED);

    let log = config.log_settings();

    ResolvedConfig {
        display_mode,
        log_file: log.file,
        log_level: log.level,
        unit_type,
        rounding_increment: config
            .units
            .rounding_increment
            .unwrap_or(DEFAULT_ROUNDING_INCREMENT),
        turn_lane_max_duration_secs: config
            .thresholds
            .turn_lane_max_duration_secs
            .unwrap_or(DEFAULT_TURN_LANE_MAX_DURATION_SECS),
        then_step_max_upcoming_secs: config
            .thresholds
            .then_step_max_upcoming_secs
            .unwrap_or(DEFAULT_THEN_STEP_MAX_UPCOMING_SECS),
        replay_speed,
    }
}

/// Reads an env var and parses it, warning on values that don't parse.
fn env_parsed<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warn!("Ignoring invalid {}={:?}", name, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = HudConfig::default();
        assert!(config.general.display_mode.is_none());
        assert!(config.units.unit_type.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = HudConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.rounding_increment, DEFAULT_ROUNDING_INCREMENT);
        assert_eq!(resolved.turn_lane_max_duration_secs, 70.0);
        assert_eq!(resolved.then_step_max_upcoming_secs, 30.0);
        assert_eq!(resolved.log_file, "navhud.log");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HudConfig {
            general: GeneralConfig {
                display_mode: Some(DisplayMode::Landscape),
                log_file: Some("/tmp/hud.log".to_string()),
                log_level: Some("info".to_string()),
            },
            units: UnitsConfig {
                unit_type: Some(UnitType::Imperial),
                rounding_increment: Some(25),
            },
            thresholds: ThresholdsConfig {
                turn_lane_max_duration_secs: Some(45.0),
                then_step_max_upcoming_secs: Some(20.0),
            },
            replay: ReplayConfig { speed: Some(4.0) },
        };
        let cli = CliOverrides::default();
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.log_file, "/tmp/hud.log");
        assert_eq!(resolved.log_level, "info");
        assert_eq!(resolved.rounding_increment, 25);
        assert_eq!(resolved.turn_lane_max_duration_secs, 45.0);
        assert_eq!(resolved.then_step_max_upcoming_secs, 20.0);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = HudConfig {
            general: GeneralConfig {
                display_mode: Some(DisplayMode::Landscape),
                ..Default::default()
            },
            replay: ReplayConfig { speed: Some(4.0) },
            ..Default::default()
        };
        let cli = CliOverrides {
            display_mode: Some(DisplayMode::Portrait),
            unit_type: Some(UnitType::Imperial),
            speed: Some(10.0),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.display_mode, DisplayMode::Portrait);
        assert_eq!(resolved.unit_type, UnitType::Imperial);
        assert_eq!(resolved.replay_speed, 10.0);
    }

    #[test]
    fn test_non_positive_speed_falls_back() {
        let cli = CliOverrides {
            speed: Some(0.0),
            ..Default::default()
        };
        let resolved = resolve(&HudConfig::default(), &cli);
        assert_eq!(resolved.replay_speed, DEFAULT_REPLAY_SPEED);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
display_mode = "landscape"
log_level = "trace"

[units]
unit_type = "imperial"
rounding_increment = 10

[thresholds]
turn_lane_max_duration_secs = 60.0

[replay]
speed = 2.5
"#;
        let config: HudConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.display_mode, Some(DisplayMode::Landscape));
        assert_eq!(config.general.log_level.as_deref(), Some("trace"));
        assert_eq!(config.units.unit_type, Some(UnitType::Imperial));
        assert_eq!(config.units.rounding_increment, Some(10));
        assert_eq!(config.thresholds.turn_lane_max_duration_secs, Some(60.0));
        assert!(config.thresholds.then_step_max_upcoming_secs.is_none());
        assert_eq!(config.replay.speed, Some(2.5));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[units]
rounding_increment = 25
"#;
        let config: HudConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.units.rounding_increment, Some(25));
        assert!(config.units.unit_type.is_none());
        assert!(config.general.display_mode.is_none());
        assert!(config.replay.speed.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = toml::from_str::<HudConfig>("[units]\nunit_type = 7\n").unwrap_err();
        let wrapped = ConfigError::Parse(err);
        assert!(wrapped.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_load_missing_explicit_path_is_io_error() {
        let result = load_config_from(Path::new("/nonexistent/navhud/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("navhud-config-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_default_file_is_generated_and_reported() {
        let dir = scratch_dir("generate");
        let path = dir.join(".navhud").join("config.toml");

        let (config, source) = load_config_at(Some(path.clone())).unwrap();
        assert!(config.general.log_level.is_none());
        assert_eq!(source, ConfigSource::Generated { path: path.clone(), error: None });

        // The generated file is all comments, so it loads as defaults
        let (reloaded, source) = load_config_at(Some(path.clone())).unwrap();
        assert!(reloaded.units.unit_type.is_none());
        assert_eq!(source, ConfigSource::File(path));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_no_home_reports_defaults() {
        let (config, source) = load_config_at(None).unwrap();
        assert_eq!(source, ConfigSource::NoHome);
        assert_eq!(config.log_settings().file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_log_settings_come_from_file_layer() {
        let config: HudConfig = toml::from_str("[general]\nlog_file = \"/tmp/x.log\"\n").unwrap();
        let settings = config.log_settings();
        assert_eq!(settings.file, "/tmp/x.log");
        assert_eq!(settings.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info"), Some(LevelFilter::Info));
        assert_eq!(parse_log_level(" TRACE "), Some(LevelFilter::Trace));
        assert_eq!(parse_log_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_log_level("verbose"), None);
        assert_eq!(parse_log_level(DEFAULT_LOG_LEVEL), Some(LevelFilter::Debug));
    }
}
