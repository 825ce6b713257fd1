use hashbrown::HashSet;

use crate::*;
pub use random::*;

mod random;

/// Produces one mine placement over a board.
pub trait MineGenerator {
    fn generate(self, board: &HexBoard, mine_target: CellCount) -> MineLayout;
}

/// Rejection rule applied to every candidate before it becomes a mine, with
/// the candidate treated as a mine for the duration of the check.
///
/// A placement is unfair when the candidate itself would sit fully inside a
/// mine cluster, or when it would strand one of its neighbors by completing a
/// full ring of mines around it. A stranded cell is unreachable by flood fill
/// and carries no numeric hint, so no deduction can ever touch it. Keeping
/// every accepted placement fair keeps the whole board free of stranded
/// cells and of mine clusters without a numbered cell to anchor them.
/// Coordinates off the board never hold mines, so rim candidates pass
/// whenever an off-board neighbor is involved.
pub(crate) fn placement_is_fair(candidate: Hex, mines: &HashSet<Hex>) -> bool {
    let is_mine = |hex: Hex| hex == candidate || mines.contains(&hex);
    let surrounded = |hex: Hex| hex.neighbors().iter().all(|&neighbor| is_mine(neighbor));

    if surrounded(candidate) {
        return false;
    }
    !candidate
        .neighbors()
        .iter()
        .any(|&neighbor| surrounded(neighbor))
}
