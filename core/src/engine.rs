use alloc::collections::VecDeque;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one level.
///
/// Transitions are monotone: Initial -> Playing -> {Victory | Defeat}. Only
/// `next_level`/`reset_level` return to Initial.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Initial,
    Playing,
    Victory,
    Defeat,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Initial
    }
}

/// One playthrough of the level ladder.
///
/// The session owns every coordinate set exclusively; commands mutate it
/// through the transition methods and renderers read it back through the
/// query methods. After any command a renderer should re-derive the view of
/// every cell, since a flood fill changes many cells at once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: HexBoard,
    layout: MineLayout,
    revealed: HashSet<Hex>,
    flagged: HashSet<Hex>,
    revealed_safe: CellCount,
    correct_flags: CellCount,
    first_click: bool,
    level: u32,
    state: GameState,
    seed: u64,
    generation: u64,
}

impl GameSession {
    /// Builds the session and deals the first board immediately, so queries
    /// answer consistently before the opening click.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut session = Self::bare(config, seed)?;
        session.generate(None);
        Ok(session)
    }

    /// Deterministic setup with a preset placement, used by hosts that
    /// replay recorded games and by tests. The seed still feeds any
    /// first-click regeneration.
    pub fn with_layout(config: GameConfig, layout: MineLayout, seed: u64) -> Result<Self> {
        let mut session = Self::bare(config, seed)?;
        for mine in layout.iter_mines() {
            if !session.board.contains(mine) {
                return Err(GameError::MineOutsideBoard(mine));
            }
        }
        // rebuild against this session's board so the safe-cell accounting
        // matches even when the layout came from a different radius
        session.layout = MineLayout::new(&session.board, layout.mines);
        Ok(session)
    }

    fn bare(config: GameConfig, seed: u64) -> Result<Self> {
        let board = HexBoard::new(config.rings)?;
        config.schedule.validate()?;
        Ok(Self {
            config,
            board,
            layout: MineLayout::new(&board, HashSet::new()),
            revealed: HashSet::new(),
            flagged: HashSet::new(),
            revealed_safe: 0,
            correct_flags: 0,
            first_click: true,
            level: 1,
            state: GameState::Initial,
            seed,
            generation: 0,
        })
    }

    /// Reveals a cell.
    ///
    /// The first reveal of a level regenerates the board with a safe zone
    /// around the click whenever the clicked cell is a mine or has a nonzero
    /// count, so the opening always lands on a zero-expansion. Terminal
    /// states, off-board coordinates, flagged cells and already-revealed
    /// cells are no-ops.
    pub fn reveal(&mut self, hex: Hex) -> RevealOutcome {
        if !self.board.contains(hex) || self.state.is_final() {
            return RevealOutcome::NoChange;
        }
        if self.flagged.contains(&hex) || self.revealed.contains(&hex) {
            return RevealOutcome::NoChange;
        }

        if self.first_click {
            self.first_click = false;
            if self.layout.contains_mine(hex) || self.layout.adjacent_mine_count(hex) != 0 {
                log::debug!("First reveal at {} is not a free opening, regenerating", hex);
                self.generate(Some(hex));
            }
        }

        self.mark_started();
        self.revealed.insert(hex);

        if self.layout.contains_mine(hex) {
            self.explode(hex);
            return RevealOutcome::HitMine;
        }

        self.revealed_safe += 1;
        if self.layout.adjacent_mine_count(hex) == 0 {
            self.flood_fill(hex);
        }

        if self.victory_met() {
            self.finish(GameState::Victory);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flips flag membership on a hidden cell. Flagging the last mine can
    /// finish the level by itself.
    pub fn toggle_flag(&mut self, hex: Hex) -> FlagOutcome {
        if !self.board.contains(hex) || self.state.is_final() || self.revealed.contains(&hex) {
            return FlagOutcome::NoChange;
        }

        if self.flagged.remove(&hex) {
            if self.layout.contains_mine(hex) {
                self.correct_flags -= 1;
            }
        } else {
            self.flagged.insert(hex);
            if self.layout.contains_mine(hex) {
                self.correct_flags += 1;
            }
        }

        if self.victory_met() {
            self.finish(GameState::Victory);
        }
        FlagOutcome::Changed
    }

    /// Advances the ladder and deals a fresh board at the new density.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.reset_level();
    }

    /// Restarts the current level from scratch.
    pub fn reset_level(&mut self) {
        self.revealed.clear();
        self.flagged.clear();
        self.revealed_safe = 0;
        self.correct_flags = 0;
        self.first_click = true;
        self.state = GameState::Initial;
        self.generate(None);
        log::debug!("Level {} ready at density {:.2}", self.level, self.density());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> HexBoard {
        self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Mine density in force for the current level.
    pub fn density(&self) -> f64 {
        self.config.density_for(self.level)
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.layout.safe_cell_count()
    }

    /// How many mines have not been flagged yet. Negative with surplus flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.layout.mine_count()) - self.flagged.len() as i64
    }

    pub fn is_mine(&self, hex: Hex) -> bool {
        self.layout.contains_mine(hex)
    }

    pub fn is_revealed(&self, hex: Hex) -> bool {
        self.revealed.contains(&hex)
    }

    pub fn is_flagged(&self, hex: Hex) -> bool {
        self.flagged.contains(&hex)
    }

    /// Neighboring-mine count. Mines report 0; renderers never draw it.
    pub fn number_at(&self, hex: Hex) -> u8 {
        if self.layout.contains_mine(hex) {
            0
        } else {
            self.layout.adjacent_mine_count(hex)
        }
    }

    /// Player-visible state of one cell. Off-board coordinates read as
    /// hidden so hit-testing near the rim stays total.
    pub fn cell_at(&self, hex: Hex) -> CellView {
        if !self.board.contains(hex) {
            return CellView::Hidden;
        }
        if self.revealed.contains(&hex) {
            if self.layout.contains_mine(hex) {
                CellView::ExposedMine
            } else {
                CellView::Revealed(self.layout.adjacent_mine_count(hex))
            }
        } else if self.flagged.contains(&hex) {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Every playable cell with its current view, for full-board restyling.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Hex, CellView)> + '_ {
        self.board.iter().map(move |hex| (hex, self.cell_at(hex)))
    }

    fn generate(&mut self, safe_zone: Option<Hex>) {
        let density = self.config.density_for(self.level);
        let target = (self.board.cell_count() as f64 * density) as CellCount;
        let mut generator = RandomMineGenerator::new(self.next_seed());
        if let Some(center) = safe_zone {
            generator = generator.with_safe_zone(center);
        }
        self.layout = generator.generate(&self.board, target);
        // flags survive regeneration, their correctness does not
        self.correct_flags = self
            .flagged
            .iter()
            .filter(|hex| self.layout.contains_mine(**hex))
            .count() as CellCount;
        log::debug!(
            "Level {} board: {} mines at density {:.2} over {} cells",
            self.level,
            self.layout.mine_count(),
            density,
            self.board.cell_count()
        );
    }

    fn next_seed(&mut self) -> u64 {
        self.generation += 1;
        self.seed
            .wrapping_add(self.generation.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Opens the contiguous zero region around `start` plus its numbered
    /// rim. Work-queue traversal, never recursion, bounded by the board
    /// size. Flagged cells are skipped and keep their flag.
    fn flood_fill(&mut self, start: Hex) {
        let mut visited: HashSet<Hex> = HashSet::new();
        visited.insert(start);
        let mut to_visit: VecDeque<Hex> = self
            .board
            .valid_neighbors(start)
            .into_iter()
            .filter(|hex| !self.revealed.contains(hex) && !self.flagged.contains(hex))
            .collect();

        while let Some(hex) = to_visit.pop_front() {
            if !visited.insert(hex) {
                continue;
            }
            if self.revealed.contains(&hex) || self.flagged.contains(&hex) {
                continue;
            }

            self.revealed.insert(hex);
            self.revealed_safe += 1;
            let count = self.layout.adjacent_mine_count(hex);
            log::trace!("Flood fill opened {} with count {}", hex, count);

            if count == 0 {
                to_visit.extend(
                    self.board
                        .valid_neighbors(hex)
                        .into_iter()
                        .filter(|next| {
                            !self.revealed.contains(next) && !self.flagged.contains(next)
                        })
                        .filter(|next| !visited.contains(next)),
                );
            }
        }
    }

    fn explode(&mut self, hex: Hex) {
        log::debug!("Mine hit at {}, exposing {} mines", hex, self.layout.mine_count());
        self.revealed.extend(self.layout.iter_mines());
        self.finish(GameState::Defeat);
    }

    fn victory_met(&self) -> bool {
        let all_safe_revealed = self.revealed_safe == self.layout.safe_cell_count();
        match self.config.win_rule {
            WinRule::RevealOnly => all_safe_revealed,
            WinRule::RevealAndFlag => {
                all_safe_revealed && self.correct_flags == self.layout.mine_count()
            }
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            self.state = GameState::Playing;
        }
    }

    fn finish(&mut self, terminal: GameState) {
        if self.state.is_final() {
            return;
        }
        log::debug!("Level {} finished: {:?}", self.level, terminal);
        self.state = terminal;
    }
}
