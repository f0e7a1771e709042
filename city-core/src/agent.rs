use glam::IVec2;
use rand::Rng;

/// A mobile road-builder entity.
///
/// Agents deposit intensity into the grid while moving. `life == 0` is
/// the only "dead" marker: dead agents keep their pool slot and are
/// reused in place when respawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Agent {
    /// Current cell, kept inside `[1, W-2] × [1, H-2]` while alive.
    pub pos: IVec2,
    /// Unit step applied on every tick, always one of [`CARDINALS`].
    pub dir: IVec2,
    /// Remaining ticks before expiry; 0 means dead.
    pub life: u8,
}

impl Agent {
    pub fn new(pos: IVec2, dir: IVec2, life: u8) -> Self {
        Self { pos, dir, life }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// The four axis-aligned unit directions.
pub const CARDINALS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Rotates a direction 90° counter-clockwise (grid y pointing down).
#[inline]
pub fn turn_left(dir: IVec2) -> IVec2 {
    IVec2::new(-dir.y, dir.x)
}

/// Rotates a direction 90° clockwise.
#[inline]
pub fn turn_right(dir: IVec2) -> IVec2 {
    IVec2::new(dir.y, -dir.x)
}

/// Picks one of the four cardinal directions uniformly at random.
pub fn random_cardinal(rng: &mut impl Rng) -> IVec2 {
    CARDINALS[rng.random_range(0..4)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn turns_are_inverse_of_each_other() {
        for dir in CARDINALS {
            assert_eq!(turn_right(turn_left(dir)), dir);
            assert_eq!(turn_left(turn_right(dir)), dir);
        }
    }

    #[test]
    fn four_equal_turns_are_identity() {
        for dir in CARDINALS {
            let mut d = dir;
            for _ in 0..4 {
                d = turn_left(d);
            }
            assert_eq!(d, dir);

            let mut d = dir;
            for _ in 0..4 {
                d = turn_right(d);
            }
            assert_eq!(d, dir);
        }
    }

    #[test]
    fn two_turns_reverse_direction() {
        for dir in CARDINALS {
            assert_eq!(turn_left(turn_left(dir)), -dir);
            assert_eq!(turn_right(turn_right(dir)), -dir);
        }
    }

    #[test]
    fn turning_keeps_directions_cardinal() {
        for dir in CARDINALS {
            assert!(CARDINALS.contains(&turn_left(dir)));
            assert!(CARDINALS.contains(&turn_right(dir)));
        }
    }

    #[test]
    fn random_cardinal_only_yields_unit_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let d = random_cardinal(&mut rng);
            assert!(CARDINALS.contains(&d));
        }
    }

    #[test]
    fn dead_state_is_life_zero() {
        let a = Agent::new(IVec2::new(3, 4), IVec2::new(1, 0), 0);
        assert!(!a.is_alive());

        let a = Agent::new(IVec2::new(3, 4), IVec2::new(1, 0), 1);
        assert!(a.is_alive());
    }
}
