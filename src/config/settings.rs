use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use firefox_session_core::default_profiles_root;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Print the open windows and tabs of every Firefox profile as JSON"
)]
pub struct Config {
    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the Firefox profiles (default: platform location)
    #[arg(short, long)]
    pub profiles_dir: Option<PathBuf>,

    /// Stop at the first profile whose session cannot be read
    #[arg(long)]
    pub strict: bool,

    /// Print the report on a single line
    #[arg(long)]
    pub compact: bool,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Profiles root override
    #[serde(default)]
    pub profiles_dir: Option<PathBuf>,

    /// Abort on the first unreadable profile instead of skipping it
    #[serde(default)]
    pub strict: bool,

    /// Indent the JSON report
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profiles_dir: None,
            strict: false,
            pretty: default_pretty(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults.
    ///
    /// An explicit `path` must exist. Without one, the default locations are
    /// tried in order and defaults are used if none exists.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(p) = path {
            return Self::read(p);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("firefox-session/config.toml")),
            dirs::home_dir().map(|p| p.join(".firefox-session.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::read(path);
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(dir) = &cli.profiles_dir {
            self.profiles_dir = Some(dir.clone());
        }
        if cli.strict {
            self.strict = true;
        }
        if cli.compact {
            self.pretty = false;
        }
    }

    /// Profiles root to scan: the configured one, else the platform default
    pub fn resolve_profiles_dir(&self) -> Option<PathBuf> {
        self.profiles_dir.clone().or_else(default_profiles_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.profiles_dir.is_none());
        assert!(!settings.strict);
        assert!(settings.pretty);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            profiles_dir = "/srv/firefox"
            strict = true
        "#;

        let settings: Settings = toml::from_str(toml).expect("Should parse TOML");
        assert_eq!(settings.profiles_dir, Some(PathBuf::from("/srv/firefox")));
        assert!(settings.strict);
        assert!(settings.pretty);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.profiles_dir.is_none());
        assert!(!settings.strict);
        assert!(settings.pretty);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pretty = false\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert!(!settings.pretty);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Config::try_parse_from([
            "firefox-session",
            "--profiles-dir",
            "/tmp/profiles",
            "--strict",
            "--compact",
        ])
        .unwrap();

        let mut settings: Settings = toml::from_str(r#"profiles_dir = "/srv/firefox""#).unwrap();
        settings.merge_cli(&cli);

        assert_eq!(settings.resolve_profiles_dir(), Some(PathBuf::from("/tmp/profiles")));
        assert!(settings.strict);
        assert!(!settings.pretty);
    }

    #[test]
    fn test_cli_without_flags_keeps_settings() {
        let cli = Config::try_parse_from(["firefox-session"]).unwrap();
        let mut settings: Settings = toml::from_str("strict = true").unwrap();
        settings.merge_cli(&cli);

        assert!(settings.strict);
        assert!(settings.pretty);
        assert!(settings.profiles_dir.is_none());
    }
}
