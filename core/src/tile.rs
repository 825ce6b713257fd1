use serde::{Deserialize, Serialize};

/// Player-visible state of one cell, derived on demand from the session.
///
/// `Revealed` carries the neighboring-mine count so renderers never touch the
/// mine set directly. `ExposedMine` only appears once a level is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    ExposedMine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
