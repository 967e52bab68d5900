//! Flip toggles and the spline slot each anchor is written to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// End of the two-point spline an endpoint lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplineSlot {
    /// Spline point 0.
    First,
    /// Spline point -1.
    Last,
}

impl SplineSlot {
    /// Host point index, negative counting from the end.
    #[must_use]
    pub const fn index(self) -> isize {
        match self {
            Self::First => 0,
            Self::Last => -1,
        }
    }

    /// The other end.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::First,
        }
    }
}

/// The two independent flip toggles.
///
/// `flip_u` changes which physical anchor is first and is consumed by
/// anchor extraction. `flip_v` only changes where each anchor is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    /// Reverse the anchor order.
    pub flip_u: bool,
    /// Swap the spline slots.
    pub flip_v: bool,
}

impl Orientation {
    /// Slot for anchor `0` and anchor `1`.
    #[must_use]
    pub const fn slots(self) -> [SplineSlot; 2] {
        if self.flip_v {
            [SplineSlot::Last, SplineSlot::First]
        } else {
            [SplineSlot::First, SplineSlot::Last]
        }
    }

    /// Reorder per-anchor values into spline order.
    #[must_use]
    pub fn to_spline_order<T>(self, [a, b]: [T; 2]) -> [T; 2] {
        if self.flip_v { [b, a] } else { [a, b] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slots() {
        let o = Orientation::default();
        assert_eq!(o.slots(), [SplineSlot::First, SplineSlot::Last]);
        assert_eq!(o.slots().map(SplineSlot::index), [0, -1]);
        assert_eq!(o.to_spline_order(["a", "b"]), ["a", "b"]);
    }

    #[test]
    fn flip_v_swaps_slots_only() {
        let o = Orientation {
            flip_u: false,
            flip_v: true,
        };
        assert_eq!(o.slots(), [SplineSlot::Last, SplineSlot::First]);
        assert_eq!(o.to_spline_order(["a", "b"]), ["b", "a"]);
        assert_eq!(SplineSlot::First.opposite(), SplineSlot::Last);

        let u_only = Orientation {
            flip_u: true,
            flip_v: false,
        };
        assert_eq!(u_only.slots(), Orientation::default().slots());
    }
}
