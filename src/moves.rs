//! Search for swaps that would form a match.
//!
//! Used for hints, for automated play, and to notice a board with no moves left.
use crate::board::{Board, Coord};

/// Every orthogonal swap on `board` that would produce a run of at least `min_run`.
///
/// Each pair is listed once, as `(cell, right or lower neighbour)`, in row-major order.
/// The board itself is not modified; the search works on a scratch copy.
///
/// # Examples
/// ```
/// use cascade_grid::moves::find_legal_swaps;
/// use cascade_grid::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RRG", "BYR"], 3).unwrap();
/// assert_eq!(find_legal_swaps(&board), vec![((0, 2), (1, 2))]);
/// ```
pub fn find_legal_swaps(board: &Board) -> Vec<(Coord, Coord)> {
    let mut scratch = board.clone();
    let mut swaps = Vec::new();
    for (a, b) in candidate_pairs(board) {
        if swap_forms_match(&mut scratch, a, b) {
            swaps.push((a, b));
        }
    }
    swaps
}

/// `true` if at least one swap on `board` would form a match.
pub fn has_legal_swap(board: &Board) -> bool {
    let mut scratch = board.clone();
    candidate_pairs(board).any(|(a, b)| swap_forms_match(&mut scratch, a, b))
}

fn candidate_pairs(board: &Board) -> impl Iterator<Item = (Coord, Coord)> {
    let rows = board.rows();
    let columns = board.columns();
    board.coords().flat_map(move |(r, c)| {
        let right = (c + 1 < columns).then_some(((r, c), (r, c + 1)));
        let down = (r + 1 < rows).then_some(((r, c), (r + 1, c)));
        right.into_iter().chain(down)
    })
}

// Swaps, checks both endpoints, then swaps back so `scratch` is left unchanged.
fn swap_forms_match(scratch: &mut Board, a: Coord, b: Coord) -> bool {
    if scratch.token_at(a) == scratch.token_at(b) {
        return false;
    }
    scratch.swap(a, b);
    let mut matches = scratch.match_at(a);
    matches.union_with(&scratch.match_at(b));
    scratch.swap(a, b);
    matches.len() >= scratch.min_run()
}
