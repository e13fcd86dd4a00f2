use std::fmt;

use anyhow::Result;
use ranshuffle::Engine;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Team(Team),
    Neutral,
    Assassin,
}

impl Tile {
    pub fn label(self) -> &'static str {
        match self {
            Tile::Team(Team::Red) => "red",
            Tile::Team(Team::Blue) => "blue",
            Tile::Neutral => "",
            Tile::Assassin => "black",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Tile::Team(*self).label())
    }
}

/// A shuffled board and the team that moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub first: Team,
    pub tiles: Vec<Tile>,
}

impl Board {
    /// Deal a board: build the tile list, pick the starting team, give it
    /// one extra tile, then shuffle everything.
    pub fn deal(engine: &mut Engine, config: &Config) -> Result<Self> {
        let mut tiles = Vec::with_capacity(config.total_tiles());
        tiles.extend(std::iter::repeat(Tile::Team(Team::Red)).take(config.red));
        tiles.extend(std::iter::repeat(Tile::Team(Team::Blue)).take(config.blue));
        tiles.extend(std::iter::repeat(Tile::Neutral).take(config.neutral));
        tiles.extend(std::iter::repeat(Tile::Assassin).take(config.assassin));

        let first = *engine.pick(&config.teams)?;
        tiles.push(Tile::Team(first));
        engine.shuffle(&mut tiles);

        Ok(Self { first, tiles })
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Render as a grid, one row per line, blanks shown as `.`.
    pub fn render(&self, columns: usize) -> String {
        let columns = columns.max(1);
        let mut out = String::new();
        for row in self.tiles.chunks(columns) {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| match tile.label() {
                    "" => format!("{:<6}", "."),
                    label => format!("{label:<6}"),
                })
                .collect();
            out.push_str(cells.join("").trim_end());
            out.push('\n');
        }
        out
    }
}
