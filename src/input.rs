//! Input-side gesture tracking.
//!
//! This is adapter code, not part of the engine: it turns a press on one cell and a
//! drag onto another into a swap request, and keeps further input out while the
//! engine is resolving. Pixel hit testing is the host's job; this works on cells.
use crate::board::{are_neighbors, Coord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A cell is held; waiting to see where the drag goes.
    Swiping { from: Coord },
    /// A swap was emitted and the engine is busy with it.
    Updating,
}

/// Press/drag state machine producing swap requests.
///
/// # Examples
/// ```
/// use cascade_grid::input::{GestureState, GestureTracker};
///
/// let mut tracker = GestureTracker::new();
/// tracker.press((3, 3));
/// assert_eq!(tracker.drag((3, 4)), Some(((3, 3), (3, 4))));
/// assert_eq!(tracker.state(), GestureState::Updating);
/// tracker.finish_update();
/// assert_eq!(tracker.state(), GestureState::Idle);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    state: GestureState,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Starts a swipe on `coord`. Ignored unless idle.
    pub fn press(&mut self, coord: Coord) {
        if self.state == GestureState::Idle {
            self.state = GestureState::Swiping { from: coord };
        }
    }

    /// The pointer moved over `coord` while held.
    ///
    /// Returns the swap to attempt when `coord` is an orthogonal neighbour of the
    /// pressed cell. Moving onto any other cell cancels the swipe.
    pub fn drag(&mut self, coord: Coord) -> Option<(Coord, Coord)> {
        let GestureState::Swiping { from } = self.state else {
            return None;
        };
        if coord == from {
            return None;
        }
        if are_neighbors(from, coord) {
            self.state = GestureState::Updating;
            Some((from, coord))
        } else {
            self.state = GestureState::Idle;
            None
        }
    }

    /// The pointer was released without a swap.
    pub fn release(&mut self) {
        if let GestureState::Swiping { .. } = self.state {
            self.state = GestureState::Idle;
        }
    }

    /// The engine has finished with the emitted swap; accept input again.
    pub fn finish_update(&mut self) {
        if self.state == GestureState::Updating {
            self.state = GestureState::Idle;
        }
    }
}
