//! Runner configuration: command line flags plus an optional JSON file.
//!
//! Both sources produce a [`Settings`] where every field is optional. Flags
//! given on the command line win over the file, and anything still unset falls
//! back to [`GameConfig::default`] (except the seed, which the caller supplies).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::types::{GameConfig, GameOverPolicy, RotationPolicy};

pub const USAGE: &str = "\
usage: blockfall [options]

  --cols N              board width in cells (default 16)
  --rows N              board height in cells (default 24)
  --seed N              piece sequence seed (default random)
  --level-up-ticks N    ticks to leave level 1 (default 120)
  --rotation MODE       strict | permissive (default strict)
  --game-over MODE      never | blocked-spawn (default never)
  --config PATH         JSON file with any of the keys above
  -h, --help            show this help";

/// Partial game settings; `None` means the source did not set it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub cols: Option<u16>,
    pub rows: Option<u16>,
    pub seed: Option<u32>,
    pub level_up_ticks: Option<u32>,
    pub rotation: Option<String>,
    pub game_over: Option<String>,
}

impl Settings {
    /// Fill fields unset in `self` from `other`
    pub fn or(self, other: Settings) -> Settings {
        Settings {
            cols: self.cols.or(other.cols),
            rows: self.rows.or(other.rows),
            seed: self.seed.or(other.seed),
            level_up_ticks: self.level_up_ticks.or(other.level_up_ticks),
            rotation: self.rotation.or(other.rotation),
            game_over: self.game_over.or(other.game_over),
        }
    }

    /// Resolve into a validated engine configuration
    pub fn build(&self, default_seed: u32) -> Result<GameConfig> {
        let defaults = GameConfig::default();
        let rotation = match self.rotation.as_deref() {
            Some(s) => RotationPolicy::from_str(s)
                .ok_or_else(|| anyhow!("invalid rotation policy: {}", s))?,
            None => defaults.rotation,
        };
        let game_over = match self.game_over.as_deref() {
            Some(s) => GameOverPolicy::from_str(s)
                .ok_or_else(|| anyhow!("invalid game-over policy: {}", s))?,
            None => defaults.game_over,
        };

        let config = GameConfig::new(
            self.cols.unwrap_or(defaults.cols),
            self.rows.unwrap_or(defaults.rows),
        )
        .with_seed(self.seed.unwrap_or(default_seed))
        .with_level_up_ticks(self.level_up_ticks.unwrap_or(defaults.level_up_ticks))
        .with_rotation(rotation)
        .with_game_over(game_over);

        config.validate().context("invalid game configuration")?;
        Ok(config)
    }
}

/// What the command line asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub settings: Settings,
    pub config_path: Option<PathBuf>,
    pub help: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "-h" | "--help" => {
                out.help = true;
                i += 1;
                continue;
            }
            "--cols" => out.settings.cols = Some(parse_value(flag, value)?),
            "--rows" => out.settings.rows = Some(parse_value(flag, value)?),
            "--seed" => out.settings.seed = Some(parse_value(flag, value)?),
            "--level-up-ticks" => out.settings.level_up_ticks = Some(parse_value(flag, value)?),
            "--rotation" => out.settings.rotation = Some(parse_value(flag, value)?),
            "--game-over" => out.settings.game_over = Some(parse_value(flag, value)?),
            "--config" => out.config_path = Some(parse_value(flag, value)?),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 2;
    }
    Ok(out)
}

/// Read a JSON settings file
pub fn load_file(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    parse_file(&text).with_context(|| format!("parse config file {}", path.display()))
}

pub fn parse_file(text: &str) -> Result<Settings> {
    Ok(serde_json::from_str(text)?)
}

/// Full resolution: flags, then the file they point at, then defaults.
///
/// Returns `None` when help was requested.
pub fn resolve(args: &[String], default_seed: u32) -> Result<Option<GameConfig>> {
    let cli = parse_args(args)?;
    if cli.help {
        return Ok(None);
    }

    let settings = match &cli.config_path {
        Some(path) => cli.settings.or(load_file(path)?),
        None => cli.settings,
    };
    settings.build(default_seed).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_every_flag() {
        let cli = parse_args(&args(&[
            "--cols",
            "10",
            "--rows",
            "20",
            "--seed",
            "42",
            "--level-up-ticks",
            "60",
            "--rotation",
            "permissive",
            "--game-over",
            "blocked-spawn",
        ]))
        .unwrap();
        let config = cli.settings.build(7).unwrap();
        assert_eq!(config.cols, 10);
        assert_eq!(config.rows, 20);
        assert_eq!(config.seed, 42);
        assert_eq!(config.level_up_ticks, 60);
        assert_eq!(config.rotation, RotationPolicy::Permissive);
        assert_eq!(config.game_over, GameOverPolicy::BlockedSpawn);
    }

    #[test]
    fn defaults_use_supplied_seed() {
        let config = resolve(&[], 99).unwrap().unwrap();
        assert_eq!(config.cols, 16);
        assert_eq!(config.rows, 24);
        assert_eq!(config.seed, 99);
        assert_eq!(config.rotation, RotationPolicy::Strict);
        assert_eq!(config.game_over, GameOverPolicy::Never);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(resolve(&args(&["--help"]), 1).unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--cols"])).is_err());
        assert!(parse_args(&args(&["--cols", "wide"])).is_err());
        assert!(parse_args(&args(&["--hold"])).is_err());
        assert!(resolve(&args(&["--rotation", "srs"]), 1).is_err());
        assert!(resolve(&args(&["--cols", "2"]), 1).is_err());
    }

    #[test]
    fn file_keys_match_flags() {
        let file = parse_file(r#"{ "cols": 8, "level-up-ticks": 30, "game-over": "never" }"#).unwrap();
        assert_eq!(file.cols, Some(8));
        assert_eq!(file.level_up_ticks, Some(30));
        assert_eq!(file.game_over.as_deref(), Some("never"));
        assert!(parse_file(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn cli_wins_over_file() {
        let cli = Settings {
            cols: Some(12),
            ..Settings::default()
        };
        let file = Settings {
            cols: Some(8),
            rows: Some(30),
            ..Settings::default()
        };
        let merged = cli.or(file);
        assert_eq!(merged.cols, Some(12));
        assert_eq!(merged.rows, Some(30));
    }
}
