use core::fmt;
use core::ops::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single axial coordinate axis.
pub type Axis = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Axial hex coordinate `(q, r)` on a cube-constrained lattice.
///
/// The implicit third axis `s = -q - r` only participates in distance math.
/// Equality and hashing are by the `(q, r)` pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: Axis,
    pub r: Axis,
}

impl Hex {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// The six axial unit offsets, clockwise from east.
    pub const DIRECTIONS: [Hex; 6] = [
        Hex::new(1, 0),
        Hex::new(1, -1),
        Hex::new(0, -1),
        Hex::new(-1, 0),
        Hex::new(-1, 1),
        Hex::new(0, 1),
    ];

    pub const fn new(q: Axis, r: Axis) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate.
    pub const fn s(self) -> Axis {
        -self.q - self.r
    }

    /// All six adjacent coordinates, valid or not.
    pub fn neighbors(self) -> [Hex; 6] {
        Self::DIRECTIONS.map(|dir| self + dir)
    }

    /// Hex distance, `max(|dq|, |dr|, |ds|)`.
    pub fn distance(self, other: Hex) -> u32 {
        let delta = self - other;
        delta
            .q
            .unsigned_abs()
            .max(delta.r.unsigned_abs())
            .max(delta.s().unsigned_abs())
    }

    /// Which ring around the origin this coordinate sits on.
    pub fn ring(self) -> u32 {
        self.distance(Self::ORIGIN)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// The playable coordinate set for a given ring radius.
///
/// A coordinate is playable when `max(|q|, |r|, |s|) <= rings - 1`. Renderers
/// may draw a decorative outer ring at exactly `rings`; those cells are never
/// part of play, and the same predicate is used for generation, flood fill
/// and victory counting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexBoard {
    rings: u16,
}

impl HexBoard {
    pub fn new(rings: u16) -> crate::Result<Self> {
        if rings < 2 {
            return Err(crate::GameError::InvalidRings { rings });
        }
        Ok(Self { rings })
    }

    pub const fn rings(&self) -> u16 {
        self.rings
    }

    pub fn contains(&self, hex: Hex) -> bool {
        hex.ring() < u32::from(self.rings)
    }

    /// Number of playable cells, `3R^2 + 3R + 1` for `R = rings - 1`.
    pub fn cell_count(&self) -> CellCount {
        let r = CellCount::from(self.rings) - 1;
        3 * r * r + 3 * r + 1
    }

    /// Every playable coordinate, in axial raster order.
    pub fn iter(&self) -> impl Iterator<Item = Hex> + '_ {
        let max = Axis::from(self.rings) - 1;
        (-max..=max)
            .flat_map(move |q| (-max..=max).map(move |r| Hex::new(q, r)))
            .filter(|hex| self.contains(*hex))
    }

    /// The adjacent coordinates that are actually on the board.
    pub fn valid_neighbors(&self, hex: Hex) -> SmallVec<[Hex; 6]> {
        hex.neighbors()
            .into_iter()
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_uses_all_three_axes() {
        assert_eq!(Hex::new(2, -1).distance(Hex::ORIGIN), 2);
        assert_eq!(Hex::new(1, 1).distance(Hex::ORIGIN), 2);
        assert_eq!(Hex::new(-3, 1).distance(Hex::new(-1, 0)), 2);
        assert_eq!(Hex::new(0, 0).distance(Hex::ORIGIN), 0);
    }

    #[test]
    fn neighbors_are_the_six_unit_rings() {
        let center = Hex::new(2, -2);
        for neighbor in center.neighbors() {
            assert_eq!(center.distance(neighbor), 1);
        }
    }

    #[test]
    fn board_rejects_degenerate_radius() {
        assert!(HexBoard::new(0).is_err());
        assert!(HexBoard::new(1).is_err());
        assert!(HexBoard::new(2).is_ok());
    }

    #[test]
    fn cell_count_matches_iteration() {
        for rings in 2..8 {
            let board = HexBoard::new(rings).unwrap();
            assert_eq!(board.iter().count() as CellCount, board.cell_count());
        }
    }

    #[test]
    fn outer_ring_is_not_playable() {
        let board = HexBoard::new(3).unwrap();
        assert!(board.contains(Hex::new(2, 0)));
        assert!(!board.contains(Hex::new(3, 0)));
        assert!(!board.contains(Hex::new(2, 1)));
    }

    #[test]
    fn valid_neighbors_trims_the_rim() {
        let board = HexBoard::new(2).unwrap();
        assert_eq!(board.valid_neighbors(Hex::ORIGIN).len(), 6);
        assert_eq!(board.valid_neighbors(Hex::new(1, 0)).len(), 3);
    }
}
