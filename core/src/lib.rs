#![no_std]

extern crate alloc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use levels::*;
pub use progress::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod levels;
mod progress;
mod tile;
mod types;

/// Which clauses the victory predicate requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Revealing every safe cell is enough.
    RevealOnly,
    /// Every safe cell revealed and every mine flagged.
    RevealAndFlag,
}

impl Default for WinRule {
    fn default() -> Self {
        Self::RevealAndFlag
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rings: u16,
    pub schedule: DensitySchedule,
    pub win_rule: WinRule,
}

impl GameConfig {
    /// Board radius plus opening mine density, the rest of the schedule at
    /// its defaults. Fails fast on out-of-range values.
    pub fn new(rings: u16, density: f64) -> Result<Self> {
        if rings < 2 {
            return Err(GameError::InvalidRings { rings });
        }
        Ok(Self {
            rings,
            schedule: DensitySchedule::starting_at(density)?,
            win_rule: WinRule::default(),
        })
    }

    pub const fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    pub fn with_schedule(mut self, schedule: DensitySchedule) -> Result<Self> {
        schedule.validate()?;
        self.schedule = schedule;
        Ok(self)
    }

    pub fn density_for(&self, level: u32) -> f64 {
        self.schedule.density_for(level)
    }
}

/// One generated mine placement over a board.
///
/// `safe_cells` is fixed at generation time as playable cells minus the
/// realized mine count, so a shortfall in placement never makes the level
/// unwinnable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: HashSet<Hex>,
    safe_cells: CellCount,
}

impl MineLayout {
    pub fn new(board: &HexBoard, mines: HashSet<Hex>) -> Self {
        let safe_cells = board.cell_count() - mines.len() as CellCount;
        Self { mines, safe_cells }
    }

    /// Validated constructor for preset placements.
    pub fn from_mine_coords(board: &HexBoard, coords: &[Hex]) -> Result<Self> {
        let mut mines = HashSet::with_capacity(coords.len());
        for &hex in coords {
            if !board.contains(hex) {
                return Err(GameError::MineOutsideBoard(hex));
            }
            mines.insert(hex);
        }
        Ok(Self::new(board, mines))
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.safe_cells
    }

    pub fn contains_mine(&self, hex: Hex) -> bool {
        self.mines.contains(&hex)
    }

    /// How many of the six neighbors hold a mine. Total over all coordinates;
    /// anything off the board simply never holds a mine.
    pub fn adjacent_mine_count(&self, hex: Hex) -> u8 {
        hex.neighbors()
            .iter()
            .filter(|neighbor| self.mines.contains(*neighbor))
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Hex> + '_ {
        self.mines.iter().copied()
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have changed what a renderer draws.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed what a renderer draws.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
