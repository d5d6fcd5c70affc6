use serde::{Deserialize, Serialize};

/// One of the two sides of a match record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A
        }
    }
}

/// Which sides of a single match an entity appears on. Derived kinds can
/// legitimately sit on both sides (a mirror loadout, a shared sub-part, the
/// venue of the match); such an entity has no exclusive side and records
/// neither a win nor a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideMembership {
    pub side_a: bool,
    pub side_b: bool
}

impl SideMembership {
    pub const NONE: SideMembership = SideMembership {
        side_a: false,
        side_b: false
    };

    pub const BOTH: SideMembership = SideMembership {
        side_a: true,
        side_b: true
    };

    pub fn participates(self) -> bool {
        self.side_a || self.side_b
    }

    /// The entity's side, if it appears on exactly one.
    pub fn exclusive_side(self) -> Option<Side> {
        match (self.side_a, self.side_b) {
            (true, false) => Some(Side::A),
            (false, true) => Some(Side::B),
            _ => None
        }
    }

    pub fn on(self, side: Side) -> bool {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::A.opposite(), Side::B);
        assert_eq!(Side::B.opposite(), Side::A);
    }

    #[test]
    fn test_exclusive_side() {
        let a_only = SideMembership {
            side_a: true,
            side_b: false
        };
        let b_only = SideMembership {
            side_a: false,
            side_b: true
        };

        assert_eq!(a_only.exclusive_side(), Some(Side::A));
        assert_eq!(b_only.exclusive_side(), Some(Side::B));
        assert_eq!(SideMembership::BOTH.exclusive_side(), None);
        assert_eq!(SideMembership::NONE.exclusive_side(), None);
    }

    #[test]
    fn test_participates() {
        assert!(SideMembership::BOTH.participates());
        assert!(!SideMembership::NONE.participates());
    }
}
