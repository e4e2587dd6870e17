//! Actions available to the janitor

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
    Pickup = 4,
}

impl Action {
    /// Every action, in digit order
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Up,
        Action::Right,
        Action::Down,
        Action::Pickup,
    ];

    /// Movement offset `(dx, dy)`, `None` for pickup
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Self::Left => Some((-1, 0)),
            Self::Up => Some((0, -1)),
            Self::Right => Some((1, 0)),
            Self::Down => Some((0, 1)),
            Self::Pickup => None,
        }
    }

    pub fn digit(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_digit_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.digit() as usize, i);
        }
    }

    #[test]
    fn test_deltas() {
        assert_eq!(Action::Left.delta(), Some((-1, 0)));
        assert_eq!(Action::Down.delta(), Some((0, 1)));
        assert_eq!(Action::Pickup.delta(), None);
    }
}
