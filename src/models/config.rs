//! Configuration types for the dashboard.
//!
//! Configuration is merged from `/etc/gmon/config.toml`, the user config file,
//! and `GMON_*` environment variables, in that order. Command-line flags are
//! applied last by the caller.

use serde::{Deserialize, Serialize};

/// Dashboard configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TuiConfig {
    pub system: SystemConfig,

    pub refresh: RefreshConfig,

    pub display: DisplayConfig,

    pub source: SourceConfig,
}

/// System configuration for paths and environment
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Directory containing Slurm binaries (squeue).
    /// If not set, auto-detected via PATH
    pub slurm_bin_path: Option<std::path::PathBuf>,

    /// Full path to `nvidia-smi`. If not set, auto-detected via PATH
    pub nvidia_smi_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between automatic refreshes of the current view (0 = manual only)
    pub auto_refresh_secs: u64,
}

/// Minimum allowed auto-refresh interval in seconds (prevents tight polling loops)
const MIN_AUTO_REFRESH: u64 = 2;

impl RefreshConfig {
    /// Validate refresh configuration values.
    /// Returns warnings for values that were corrected to defaults.
    /// If `strict` is true, returns Err instead of correcting values.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        // 0 is valid (disabled); anything else has a floor
        if self.auto_refresh_secs != 0 && self.auto_refresh_secs < MIN_AUTO_REFRESH {
            let msg = format!(
                "refresh.auto_refresh_secs must be 0 or at least {MIN_AUTO_REFRESH}, got {}",
                self.auto_refresh_secs
            );
            if strict {
                return Err(msg);
            }
            warnings.push(format!("{msg} - auto-refresh disabled"));
            self.auto_refresh_secs = 0;
        }

        Ok(warnings)
    }
}

/// Minimum and maximum utilization bar widths
const MIN_BAR_WIDTH: usize = 5;
const MAX_BAR_WIDTH: usize = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,

    /// Width in segments of the cluster view memory bar
    pub bar_width: usize,

    /// Show every user's jobs instead of only the current user's
    pub show_all_jobs: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            bar_width: 20,
            show_all_jobs: true,
        }
    }
}

impl DisplayConfig {
    /// Validate display values, correcting out-of-range widths.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        if !(MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(&self.bar_width) {
            let default = Self::default().bar_width;
            let msg = format!(
                "display.bar_width must be between {MIN_BAR_WIDTH} and {MAX_BAR_WIDTH}, got {}",
                self.bar_width
            );
            if strict {
                return Err(msg);
            }
            warnings.push(format!("{msg} - using default ({default})"));
            self.bar_width = default;
        }

        Ok(warnings)
    }
}

/// Job source filters
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Only show jobs of this user (overrides `display.show_all_jobs`)
    pub user: Option<String>,
}

impl TuiConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/gmon/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/gmon/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/gmon/config.toml
    #[must_use]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(std::path::PathBuf::from(xdg_config).join("gmon/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(std::path::PathBuf::from(home).join(".config/gmon/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("gmon/config.toml"))
    }

    /// Load configuration from files and environment.
    ///
    /// Returns the config and any warnings encountered during loading. In
    /// strict mode (`GMON_STRICT_CONFIG=1`) the first problem is returned as
    /// an error instead.
    pub fn load() -> anyhow::Result<(Self, Vec<String>)> {
        let mut layered = toml::Table::new();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(
            &mut layered,
            std::path::Path::new("/etc/gmon/config.toml"),
            strict,
            &mut warnings,
        )?;

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut layered, &user_path, strict, &mut warnings)?;
        }

        let mut config = Self::from_layers(layered)?;
        config.apply_env_overrides(strict, &mut warnings)?;
        warnings.extend(config.validate(strict)?);

        Ok((config, warnings))
    }

    /// Validate all sections
    pub fn validate(&mut self, strict: bool) -> anyhow::Result<Vec<String>> {
        let mut warnings = self.refresh.validate(strict).map_err(anyhow::Error::msg)?;
        warnings.extend(self.display.validate(strict).map_err(anyhow::Error::msg)?);
        Ok(warnings)
    }

    /// Check if strict config mode is enabled via GMON_STRICT_CONFIG
    fn is_strict_mode() -> bool {
        std::env::var("GMON_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Load a config file and merge it over `layered`, collecting warnings on
    /// parse errors but not on missing files.
    fn load_config_file(
        layered: &mut toml::Table,
        path: &std::path::Path,
        strict: bool,
        warnings: &mut Vec<String>,
    ) -> anyhow::Result<()> {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse_layer(&content) {
                Ok(layer) => {
                    tracing::debug!(path = %path.display(), "loaded config file");
                    merge_tables(layered, layer);
                }
                Err(e) => {
                    let msg = format!("Config parse error in '{}': {}", path.display(), e);
                    if strict {
                        anyhow::bail!(msg);
                    }
                    warnings.push(msg);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let msg = format!("Could not read config '{}': {}", path.display(), e);
                if strict {
                    anyhow::bail!(msg);
                }
                warnings.push(msg);
            }
        }
        Ok(())
    }

    /// Parse a TOML config document
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse one config file as a layer holding only the keys it sets.
    /// The document is also checked against the full schema so a badly
    /// typed value is reported against its own file.
    pub fn parse_layer(content: &str) -> Result<toml::Table, toml::de::Error> {
        Self::parse(content)?;
        content.parse()
    }

    /// Build the config from merged layers; unset keys keep their defaults
    pub fn from_layers(layered: toml::Table) -> Result<Self, toml::de::Error> {
        toml::Value::Table(layered).try_into()
    }

    fn apply_env_overrides(
        &mut self,
        strict: bool,
        warnings: &mut Vec<String>,
    ) -> anyhow::Result<()> {
        if let Ok(val) = std::env::var("GMON_SLURM_PATH")
            && !val.is_empty()
        {
            let path = std::path::PathBuf::from(&val);
            if path.is_dir() {
                self.system.slurm_bin_path = Some(path);
            } else {
                Self::report_env_error(
                    strict,
                    "GMON_SLURM_PATH",
                    &val,
                    "not a valid directory",
                    warnings,
                )?;
            }
        }

        if let Ok(val) = std::env::var("GMON_NVIDIA_SMI")
            && !val.is_empty()
        {
            self.system.nvidia_smi_path = Some(std::path::PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("GMON_AUTO_REFRESH") {
            match val.parse::<u64>() {
                Ok(secs) => self.refresh.auto_refresh_secs = secs,
                Err(_) => Self::report_env_error(
                    strict,
                    "GMON_AUTO_REFRESH",
                    &val,
                    "expected a non-negative integer (seconds)",
                    warnings,
                )?,
            }
        }

        if let Ok(val) = std::env::var("GMON_THEME") {
            self.display.theme = val;
        }

        if let Ok(val) = std::env::var("GMON_USER")
            && !val.is_empty()
        {
            self.source.user = Some(val);
        }

        Ok(())
    }

    /// Report an environment variable error, failing if strict mode is enabled
    fn report_env_error(
        strict: bool,
        var_name: &str,
        value: &str,
        reason: &str,
        warnings: &mut Vec<String>,
    ) -> anyhow::Result<()> {
        if strict {
            anyhow::bail!("Invalid value '{}' for {}: {}", value, var_name, reason);
        }
        warnings.push(format!(
            "Invalid value '{}' for {}, {} - using default",
            value, var_name, reason
        ));
        Ok(())
    }

    /// The user whose jobs should be listed, if the listing is filtered
    #[must_use]
    pub fn job_user_filter(&self) -> Option<String> {
        if let Some(user) = &self.source.user {
            return Some(user.clone());
        }
        if self.display.show_all_jobs {
            None
        } else {
            std::env::var("USER").ok().filter(|u| !u.is_empty())
        }
    }
}

/// Merge `layer` into `base` key by key. Nested tables are merged
/// recursively; any other value in `layer` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    use toml::Value;

    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(nested)) => merge_tables(existing, nested),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
