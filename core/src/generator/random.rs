use alloc::vec::Vec;
use hashbrown::HashSet;
use smallvec::SmallVec;

use super::*;

/// Seeded random placement with permanent discard of unfair candidates.
///
/// Candidates are drawn without replacement from a shuffled pool, so a run
/// makes at most one attempt per playable cell and always terminates. The
/// realized mine count can fall short of the target when rejections exhaust
/// the pool; the layout records the realized count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    safe_zone: Option<Hex>,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            safe_zone: None,
        }
    }

    /// Excludes `center` and its six neighbors from placement, so revealing
    /// `center` afterwards always opens a zero-expansion.
    pub fn with_safe_zone(mut self, center: Hex) -> Self {
        self.safe_zone = Some(center);
        self
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, board: &HexBoard, mine_target: CellCount) -> MineLayout {
        use rand::prelude::*;

        let excluded: SmallVec<[Hex; 7]> = match self.safe_zone {
            Some(center) => {
                let mut zone = SmallVec::from_slice(&center.neighbors());
                zone.push(center);
                zone
            }
            None => SmallVec::new(),
        };

        let mut pool: Vec<Hex> = board.iter().filter(|hex| !excluded.contains(hex)).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        pool.shuffle(&mut rng);

        let mut mines: HashSet<Hex> = HashSet::with_capacity(mine_target as usize);
        let mut rejected: u32 = 0;
        for candidate in pool {
            if mines.len() as CellCount >= mine_target {
                break;
            }
            if placement_is_fair(candidate, &mines) {
                mines.insert(candidate);
            } else {
                rejected += 1;
            }
        }

        let placed = mines.len() as CellCount;
        if placed < mine_target {
            log::warn!(
                "Placed {} of {} mines, pool exhausted after {} rejections",
                placed,
                mine_target,
                rejected
            );
        } else {
            log::debug!("Placed {} mines, rejected {} unfair candidates", placed, rejected);
        }

        MineLayout::new(board, mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_for(board: &HexBoard, density: f64) -> CellCount {
        (board.cell_count() as f64 * density) as CellCount
    }

    #[test]
    fn mines_stay_on_the_board() {
        let board = HexBoard::new(4).unwrap();
        for seed in 0..50 {
            let layout =
                RandomMineGenerator::new(seed).generate(&board, target_for(&board, 0.3));
            for mine in layout.iter_mines() {
                assert!(board.contains(mine), "mine {} off board (seed {})", mine, seed);
            }
        }
    }

    #[test]
    fn no_cell_ends_up_fully_surrounded() {
        for rings in [3u16, 5] {
            let board = HexBoard::new(rings).unwrap();
            for seed in 0..50 {
                let layout =
                    RandomMineGenerator::new(seed).generate(&board, target_for(&board, 0.4));
                for hex in board.iter() {
                    let surrounded = hex
                        .neighbors()
                        .iter()
                        .all(|neighbor| layout.contains_mine(*neighbor));
                    assert!(!surrounded, "cell {} is isolated (seed {})", hex, seed);
                }
            }
        }
    }

    #[test]
    fn no_mine_cluster_without_a_numbered_anchor() {
        let board = HexBoard::new(4).unwrap();
        for seed in 0..50 {
            let layout =
                RandomMineGenerator::new(seed).generate(&board, target_for(&board, 0.4));
            for mine in layout.iter_mines() {
                let clustered = mine.neighbors().iter().all(|&neighbor| {
                    layout.contains_mine(neighbor)
                        || neighbor
                            .neighbors()
                            .iter()
                            .all(|&far| layout.contains_mine(far))
                });
                assert!(!clustered, "mine {} anchors nothing (seed {})", mine, seed);
            }
        }
    }

    #[test]
    fn safe_zone_is_never_mined() {
        let board = HexBoard::new(4).unwrap();
        let center = Hex::new(1, -1);
        for seed in 0..50 {
            let layout = RandomMineGenerator::new(seed)
                .with_safe_zone(center)
                .generate(&board, target_for(&board, 0.4));
            assert!(!layout.contains_mine(center));
            assert_eq!(layout.adjacent_mine_count(center), 0);
        }
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let board = HexBoard::new(5).unwrap();
        let target = target_for(&board, 0.3);
        let first = RandomMineGenerator::new(99).generate(&board, target);
        let second = RandomMineGenerator::new(99).generate(&board, target);
        assert_eq!(first, second);
    }

    #[test]
    fn rejections_cap_the_realized_count() {
        let board = HexBoard::new(3).unwrap();
        let target = target_for(&board, 0.9);
        let layout = RandomMineGenerator::new(7).generate(&board, target);
        assert!(layout.mine_count() <= target);
        assert_eq!(
            layout.safe_cell_count(),
            board.cell_count() - layout.mine_count()
        );
    }
}
