//! Board configuration, loaded from TOML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::Team;

/// Tile counts and starting teams for a dealt board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Red tiles before the starting team's extra tile
    #[serde(default = "default_team_tiles")]
    pub red: usize,

    /// Blue tiles before the starting team's extra tile
    #[serde(default = "default_team_tiles")]
    pub blue: usize,

    /// Blank tiles
    #[serde(default = "default_neutral")]
    pub neutral: usize,

    /// Black tiles
    #[serde(default = "default_assassin")]
    pub assassin: usize,

    /// Teams the starting team is picked from
    #[serde(default = "default_teams")]
    pub teams: Vec<Team>,

    /// Grid width when printing
    #[serde(default = "default_columns")]
    pub columns: usize,
}

fn default_team_tiles() -> usize { 8 }
fn default_neutral() -> usize { 7 }
fn default_assassin() -> usize { 1 }
fn default_teams() -> Vec<Team> { vec![Team::Red, Team::Blue] }
fn default_columns() -> usize { 5 }

impl Default for Config {
    fn default() -> Self {
        Self {
            red: default_team_tiles(),
            blue: default_team_tiles(),
            neutral: default_neutral(),
            assassin: default_assassin(),
            teams: default_teams(),
            columns: default_columns(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.teams.is_empty() {
            anyhow::bail!("teams must name at least one starting team");
        }

        if self.columns == 0 {
            anyhow::bail!("columns must be greater than 0");
        }

        Ok(())
    }

    /// Total tiles on a dealt board, including the starting team's extra tile.
    pub fn total_tiles(&self) -> usize {
        self.red + self.blue + self.neutral + self.assassin + 1
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_tiles(), 25);

        config.teams.clear();
        assert!(config.validate().is_err());

        config.teams = vec![Team::Blue];
        config.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tile_counts_accepted() {
        let config = Config {
            red: 0,
            blue: 0,
            neutral: 0,
            assassin: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.total_tiles(), 1);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.toml");
        std::fs::write(&path, "neutral = 3\nteams = [\"blue\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.neutral, 3);
        assert_eq!(config.red, 8);
        assert_eq!(config.teams, vec![Team::Blue]);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.toml");
        let config = Config {
            red: 9,
            blue: 4,
            neutral: 0,
            assassin: 2,
            teams: vec![Team::Blue, Team::Red],
            columns: 4,
        };

        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.toml");
        std::fs::write(&path, "teams = []\n").unwrap();
        assert!(Config::from_file(&path).is_err());

        std::fs::write(&path, "teams = [\"green\"]\n").unwrap();
        assert!(Config::from_file(&path).is_err());

        assert!(Config::from_file(dir.path().join("missing.toml")).is_err());
    }
}
