//! Display-sequence padding and slot arithmetic.
//!
//! Everything here is pure index math; the model owns position and timing.

/// Slot of the first real item in any non-empty display sequence.
pub const FIRST_REAL_SLOT: usize = 1;

/// Direction of a discrete scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl Direction {
    /// Maps a wheel or swipe delta to a direction. Positive is forward, a zero
    /// delta carries no direction.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Forward)
        } else if delta < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    fn signum(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Pads `items` with boundary duplicates.
///
/// ```rust
/// use complex_journal::carousel::display_sequence;
///
/// assert!(display_sequence::<char>(&[]).is_empty());
/// assert_eq!(display_sequence(&['a']), vec!['a', 'a', 'a']);
/// assert_eq!(display_sequence(&['a', 'b', 'c']), vec!['c', 'a', 'b', 'c', 'a']);
/// ```
pub fn display_sequence<I: Clone>(items: &[I]) -> Vec<I> {
    match items {
        [] => Vec::new(),
        [only] => vec![only.clone(), only.clone(), only.clone()],
        [first, .., last] => {
            let mut out = Vec::with_capacity(items.len() + 2);
            out.push(last.clone());
            out.extend_from_slice(items);
            out.push(first.clone());
            out
        }
    }
}

/// Maps a display slot back to an index into the original items, if the slot
/// holds a real (non-duplicate) item.
pub fn real_index(slot: usize, len: usize) -> Option<usize> {
    match len {
        0 => None,
        1 => Some(0),
        _ if (FIRST_REAL_SLOT..=len).contains(&slot) => Some(slot - FIRST_REAL_SLOT),
        _ => None,
    }
}

/// What a discrete step resolves to, before any animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Nothing to do.
    Stay,
    /// Single item drifted off centre: jump back without animation.
    Recenter,
    /// Plain move inside the real range.
    Step { slot: usize, index: usize },
    /// Animate onto a boundary duplicate, then jump to `snap_slot`.
    Wrap {
        boundary: usize,
        snap_slot: usize,
        index: usize,
    },
}

/// Resolves a step from `current` slot over `len` real items.
pub(crate) fn resolve(current: usize, direction: Direction, len: usize, loop_around: bool) -> Target {
    match len {
        0 => return Target::Stay,
        1 if current == FIRST_REAL_SLOT => return Target::Stay,
        1 => return Target::Recenter,
        _ => {}
    }

    let last_real = len as isize;
    let target = current as isize + direction.signum();

    if !loop_around {
        let clamped = target.clamp(FIRST_REAL_SLOT as isize, last_real) as usize;
        if clamped == current {
            return Target::Stay;
        }
        return Target::Step {
            slot: clamped,
            index: clamped - FIRST_REAL_SLOT,
        };
    }

    if target <= 0 {
        Target::Wrap {
            boundary: 0,
            snap_slot: len,
            index: len - 1,
        }
    } else if target > last_real {
        Target::Wrap {
            boundary: len + 1,
            snap_slot: FIRST_REAL_SLOT,
            index: 0,
        }
    } else {
        let slot = target as usize;
        Target::Step {
            slot,
            index: slot - FIRST_REAL_SLOT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_sequence_pads_both_ends() {
        let display = display_sequence(&[1, 2, 3, 4]);
        assert_eq!(display, vec![4, 1, 2, 3, 4, 1]);
        assert_eq!(display.len(), 6);
    }

    #[test]
    fn test_display_sequence_two_items() {
        assert_eq!(display_sequence(&["a", "b"]), vec!["b", "a", "b", "a"]);
    }

    #[test]
    fn test_real_index() {
        assert_eq!(real_index(0, 3), None);
        assert_eq!(real_index(1, 3), Some(0));
        assert_eq!(real_index(3, 3), Some(2));
        assert_eq!(real_index(4, 3), None);
        assert_eq!(real_index(2, 1), Some(0));
        assert_eq!(real_index(0, 0), None);
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(3.0), Some(Direction::Forward));
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(0.0), None);
    }

    #[test]
    fn test_resolve_inside_range() {
        assert_eq!(
            resolve(1, Direction::Forward, 3, true),
            Target::Step { slot: 2, index: 1 }
        );
        assert_eq!(
            resolve(3, Direction::Backward, 3, true),
            Target::Step { slot: 2, index: 1 }
        );
    }

    #[test]
    fn test_resolve_wraps_at_both_ends() {
        assert_eq!(
            resolve(3, Direction::Forward, 3, true),
            Target::Wrap {
                boundary: 4,
                snap_slot: 1,
                index: 0
            }
        );
        assert_eq!(
            resolve(1, Direction::Backward, 3, true),
            Target::Wrap {
                boundary: 0,
                snap_slot: 3,
                index: 2
            }
        );
    }

    #[test]
    fn test_resolve_from_stale_boundary_slot() {
        // Left on the leading duplicate by an interrupted wrap.
        assert_eq!(
            resolve(0, Direction::Forward, 3, true),
            Target::Step { slot: 1, index: 0 }
        );
        assert_eq!(
            resolve(4, Direction::Forward, 3, true),
            Target::Wrap {
                boundary: 4,
                snap_slot: 1,
                index: 0
            }
        );
    }

    #[test]
    fn test_resolve_without_loop_clamps() {
        assert_eq!(resolve(3, Direction::Forward, 3, false), Target::Stay);
        assert_eq!(resolve(1, Direction::Backward, 3, false), Target::Stay);
        assert_eq!(
            resolve(0, Direction::Backward, 3, false),
            Target::Step { slot: 1, index: 0 }
        );
    }

    #[test]
    fn test_resolve_single_and_empty() {
        assert_eq!(resolve(1, Direction::Forward, 1, true), Target::Stay);
        assert_eq!(resolve(2, Direction::Backward, 1, true), Target::Recenter);
        assert_eq!(resolve(0, Direction::Forward, 0, true), Target::Stay);
    }
}
