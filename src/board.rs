//! The grid of cells and every operation that mutates it.
//!
//! This module defines:
//! - `Cell`: one fixed grid slot holding at most one `Token`.
//! - `Board`: the rows × columns grid. It is the only mutator of cell contents and
//!   provides swap/undo, run detection, gravity collapse and refill.
//!
//! Row `0` is the top of the board; gravity pulls tokens toward row `rows - 1`.
use crate::error::EngineError;
use crate::matches::{CollapseResult, MatchSet, Refill};
use crate::source::TokenSource;
use crate::token::Token;
use std::fmt;
use tracing::warn;

/// A `(row, column)` position on the board.
pub type Coord = (usize, usize);

/// Returns `true` if `a` and `b` differ by exactly one step along exactly one axis.
///
/// # Examples
/// ```
/// use cascade_grid::board::are_neighbors;
/// assert!(are_neighbors((2, 3), (2, 4)));
/// assert!(are_neighbors((2, 3), (1, 3)));
/// assert!(!are_neighbors((2, 3), (3, 4))); // diagonal
/// assert!(!are_neighbors((2, 3), (2, 3)));
/// ```
pub fn are_neighbors(a: Coord, b: Coord) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    dr + dc == 1
}

/// One grid slot. Its coordinate is fixed at construction; only the token changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    token: Option<Token>,
}

impl Cell {
    fn new(row: usize, column: usize) -> Self {
        Cell {
            row,
            column,
            token: None,
        }
    }

    /// Row index, fixed for the cell's lifetime. Row `0` is the top.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index, fixed for the cell's lifetime.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The `(row, column)` pair of this cell.
    pub fn coord(&self) -> Coord {
        (self.row, self.column)
    }

    /// The token currently held, or `None` if the cell is empty.
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    /// Returns `true` if the cell holds no token.
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    /// Two cells match when both hold a token and the tokens share a type.
    /// An empty cell never matches anything, including another empty cell.
    pub fn is_matched(&self, other: &Cell) -> bool {
        match (self.token, other.token) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// The rows × columns grid of cells.
///
/// Cells are stored row-major. Accessors taking a `Coord` panic when it is out of
/// range, since that is a programmer error; use [`Board::get`] or [`Board::check`]
/// at API boundaries where coordinates come from outside.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    min_run: usize,
    cells: Vec<Cell>,
    last_swap: Option<(Coord, Coord)>,
    // Number of `match_at` calls, for callers measuring rescan cost.
    scans: std::cell::Cell<usize>,
}

impl Board {
    /// Creates a board with every cell empty.
    ///
    /// # Examples
    /// ```
    /// use cascade_grid::board::Board;
    /// let board = Board::new(12, 8, 3);
    /// assert_eq!(board.token_at((0, 0)), None);
    /// assert_eq!(board.rows(), 12);
    /// ```
    pub fn new(rows: usize, columns: usize, min_run: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::new(row, column));
            }
        }
        Board {
            rows,
            columns,
            min_run,
            cells,
            last_swap: None,
            scans: std::cell::Cell::new(0),
        }
    }

    /// Number of rows. Gravity pulls toward row `rows() - 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Minimum run length that counts as a match.
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Returns `true` if `coord` lies on the board.
    pub fn contains(&self, (row, column): Coord) -> bool {
        row < self.rows && column < self.columns
    }

    /// Fails with `InvalidCoordinate` if `coord` is off the board.
    pub fn check(&self, coord: Coord) -> Result<(), EngineError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(EngineError::invalid_coordinate(coord))
        }
    }

    fn index(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate {:?} outside {}x{} board",
            coord,
            self.rows,
            self.columns
        );
        coord.0 * self.columns + coord.1
    }

    /// Returns the cell at `coord`.
    ///
    /// # Panics
    /// Panics if `coord` is off the board.
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    /// Returns the token at `coord`, or `None` if the cell is empty.
    ///
    /// # Panics
    /// Panics if `coord` is off the board.
    pub fn token_at(&self, coord: Coord) -> Option<Token> {
        self.cell(coord).token
    }

    /// Checked variant of [`Board::token_at`].
    pub fn get(&self, coord: Coord) -> Result<Option<Token>, EngineError> {
        self.check(coord)?;
        Ok(self.token_at(coord))
    }

    /// Places `token` (or clears the cell with `None`).
    ///
    /// # Panics
    /// Panics if `coord` is off the board.
    pub fn set_token(&mut self, coord: Coord, token: Option<Token>) {
        let idx = self.index(coord);
        self.cells[idx].token = token;
    }

    fn take_token(&mut self, coord: Coord) -> Option<Token> {
        let idx = self.index(coord);
        self.cells[idx].token.take()
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |r| (0..columns).map(move |c| (r, c)))
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.token = None;
        }
        self.last_swap = None;
    }

    /// Exchanges the tokens in `a` and `b` (either may be empty) and remembers the pair
    /// for [`Board::undo_last_swap`].
    ///
    /// Adjacency is not checked here. Swapping a cell with itself is a no-op.
    ///
    /// # Panics
    /// Panics if either coordinate is off the board.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let ia = self.index(a);
        let ib = self.index(b);
        if ia != ib {
            let ta = self.cells[ia].token;
            self.cells[ia].token = self.cells[ib].token;
            self.cells[ib].token = ta;
        }
        self.last_swap = Some((a, b));
    }

    /// Re-applies the last swap, restoring the tokens to where they were before it.
    ///
    /// The pair is kept, so a second call swaps them back again.
    pub fn undo_last_swap(&mut self) -> Result<(), EngineError> {
        let (a, b) = self.last_swap.ok_or(EngineError::NoPriorSwap)?;
        self.swap(a, b);
        Ok(())
    }

    /// The pair passed to the most recent [`Board::swap`], if any.
    ///
    /// # Returns
    /// * `Some((a, b))` after any swap, including a swap that was later undone.
    /// * `None` for a new or cleared board.
    pub fn last_swap(&self) -> Option<(Coord, Coord)> {
        self.last_swap
    }

    /// Finds the runs through `origin`.
    ///
    /// The row and the column through `origin` are scanned independently, each
    /// extending outward from `origin` until an edge, an empty cell or a different
    /// token. A scan shorter than `min_run` contributes nothing, not even `origin`.
    /// The two scans are unioned. An empty origin yields an empty set.
    ///
    /// # Panics
    /// Panics if `origin` is off the board.
    pub fn match_at(&self, origin: Coord) -> MatchSet {
        self.scans.set(self.scans.get() + 1);

        let mut matches = MatchSet::new();
        let origin_cell = self.cell(origin);
        if origin_cell.is_empty() {
            return matches;
        }

        for (dr, dc) in [(0, 1), (1, 0)] {
            let mut run = vec![origin];
            self.extend_run(origin_cell, -dr, -dc, &mut run);
            self.extend_run(origin_cell, dr, dc, &mut run);
            if run.len() >= self.min_run {
                matches.extend(run);
            }
        }
        matches
    }

    // Walks from `origin` in direction (dr, dc), pushing every matching cell until the
    // first mismatch or the board edge.
    fn extend_run(&self, origin: &Cell, dr: isize, dc: isize, run: &mut Vec<Coord>) {
        let mut r = origin.row as isize + dr;
        let mut c = origin.column as isize + dc;
        while r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.columns {
            let coord = (r as usize, c as usize);
            if !self.cell(coord).is_matched(origin) {
                break;
            }
            run.push(coord);
            r += dr;
            c += dc;
        }
    }

    /// Unions [`Board::match_at`] over every origin.
    pub fn match_many<I>(&self, origins: I) -> MatchSet
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut matches = MatchSet::new();
        for origin in origins {
            matches.union_with(&self.match_at(origin));
        }
        matches
    }

    /// Number of `match_at` scans performed since construction or the last reset.
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    /// Sets the scan counter back to zero.
    pub fn reset_scan_count(&self) {
        self.scans.set(0);
    }

    /// Returns `true` if putting `token` at `coord` would complete a run of at least
    /// `min_run` with the tokens already around it. The current content of `coord` is ignored.
    pub fn would_complete_run(&self, coord: Coord, token: Token) -> bool {
        let count_dir = |dr: isize, dc: isize| {
            let mut n = 0;
            let mut r = coord.0 as isize + dr;
            let mut c = coord.1 as isize + dc;
            while r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.columns {
                if self.token_at((r as usize, c as usize)) != Some(token) {
                    break;
                }
                n += 1;
                r += dr;
                c += dc;
            }
            n
        };
        let horizontal = 1 + count_dir(0, -1) + count_dir(0, 1);
        let vertical = 1 + count_dir(-1, 0) + count_dir(1, 0);
        horizontal >= self.min_run || vertical >= self.min_run
    }

    /// Removes the tokens of every matched cell, returning what was removed.
    /// Cells that were already empty are skipped.
    pub fn clear_cells(&mut self, matches: &MatchSet) -> Vec<(Coord, Token)> {
        let mut removed = Vec::with_capacity(matches.len());
        for coord in matches.iter() {
            if let Some(token) = self.take_token(coord) {
                removed.push((coord, token));
            }
        }
        removed
    }

    /// Applies gravity to the named columns.
    ///
    /// Each column is scanned from the bottom row upward. At every empty cell the
    /// nearest token above it is pulled down into it. The result lists the cells that
    /// received a token and the largest distance any token fell across all columns.
    /// Slots with nothing above them stay empty for [`Board::refill`].
    ///
    /// # Panics
    /// Panics if a column is off the board.
    pub fn collapse<I>(&mut self, columns: I) -> CollapseResult
    where
        I: IntoIterator<Item = usize>,
    {
        let mut result = CollapseResult::new();
        for column in columns {
            assert!(
                column < self.columns,
                "column {} outside {}-column board",
                column,
                self.columns
            );
            for row in (0..self.rows).rev() {
                if !self.cell((row, column)).is_empty() {
                    continue;
                }
                // Nearest token strictly above the hole.
                let source_row = (0..row).rev().find(|&r| !self.cell((r, column)).is_empty());
                match source_row {
                    Some(src) => {
                        let token = self.take_token((src, column));
                        self.set_token((row, column), token);
                        result.record((row, column), row - src);
                    }
                    // Nothing left above; every remaining hole in this column is above `row`.
                    None => break,
                }
            }
        }
        result
    }

    /// Empty cells of `column`, top to bottom.
    ///
    /// # Panics
    /// Panics if `column` is off the board.
    pub fn empty_cells_in_column(&self, column: usize) -> Vec<Coord> {
        (0..self.rows)
            .map(|row| (row, column))
            .filter(|&coord| self.cell(coord).is_empty())
            .collect()
    }

    /// Fills the empty cells of the named columns from `source`.
    ///
    /// A new token enters from above the top edge, so its travel distance is `row + 1`.
    /// When the source fails for a cell, that cell is left empty and listed in
    /// [`Refill::unfilled`]; the remaining cells are still offered to the source.
    pub fn refill<I>(&mut self, columns: I, source: &mut dyn TokenSource) -> Refill
    where
        I: IntoIterator<Item = usize>,
    {
        let mut refill = Refill::default();
        for column in columns {
            for coord in self.empty_cells_in_column(column) {
                match source.next_token(self, coord) {
                    Ok(token) => {
                        self.set_token(coord, Some(token));
                        refill.filled.record(coord, coord.0 + 1);
                    }
                    Err(err) => {
                        warn!(row = coord.0, column = coord.1, %err, "refill left cell empty");
                        refill.unfilled.push(coord);
                    }
                }
            }
        }
        refill
    }

    /// Plain text form: one string per row, `.` for empty cells.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| self.token_at((row, col)).map_or('.', |t| t.to_char()))
                    .collect()
            })
            .collect()
    }

    /// Renders the board with row/column numbers and ANSI colours for a terminal.
    ///
    /// Cells in `highlight` are drawn with `..` instead of blank space.
    pub fn to_string_with_highlight(&self, highlight: &[Coord]) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.columns {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..self.columns {
                let coord = (r_idx, c_idx);
                let content = if highlight.contains(&coord) { ".." } else { "  " };
                match self.token_at(coord) {
                    Some(token) => output.push_str(&format!(
                        "\x1b[1;{};m{}\x1b[m",
                        token.to_ansi_color_code(),
                        content
                    )),
                    None => output.push_str(&format!("\x1b[1;40;m{}\x1b[m", content)),
                }
            }
            if r_idx + 1 < self.rows {
                output.push('\n');
            }
        }

        output
    }
}

impl PartialEq for Board {
    /// Boards are equal when their shape, `min_run` and every cell's token agree.
    /// The remembered swap and the scan counter are not part of the state.
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.min_run == other.min_run
            && self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_new_board_is_empty_and_cells_know_their_coords() {
        let board = Board::new(4, 3, 3);
        assert_eq!(board.cells().count(), 12);
        for cell in board.cells() {
            assert!(cell.is_empty());
            assert_eq!(board.cell(cell.coord()).coord(), (cell.row(), cell.column()));
        }
    }

    #[test]
    fn test_get_rejects_out_of_range() {
        let board = Board::new(3, 3, 3);
        assert!(matches!(
            board.get((3, 0)),
            Err(EngineError::InvalidCoordinate { row: 3, column: 0 })
        ));
        assert!(board.get((2, 2)).unwrap().is_none());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_token_at_panics_out_of_range() {
        let board = Board::new(3, 3, 3);
        board.token_at((0, 3));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let board = board_from_str_array(&["R.", ".."], 3).unwrap();
        assert!(!board.cell((0, 1)).is_matched(board.cell((1, 1))));
        assert!(!board.cell((0, 0)).is_matched(board.cell((0, 1))));
        assert!(board.cell((0, 0)).is_matched(board.cell((0, 0))));
    }

    #[test]
    fn test_swap_then_undo_restores_board() {
        let original = board_from_str_array(&["RGB", "YP.", "OBR"], 3).unwrap();
        let pairs = [((0, 0), (0, 1)), ((0, 0), (2, 2)), ((1, 2), (1, 1)), ((2, 0), (2, 0))];
        for (a, b) in pairs {
            let mut board = original.clone();
            board.swap(a, b);
            assert_eq!(board.last_swap(), Some((a, b)));
            board.undo_last_swap().unwrap();
            assert_eq!(board, original, "swap/undo of {:?}<->{:?} changed the board", a, b);
        }
    }

    #[test]
    fn test_swap_moves_tokens_including_empty() {
        let mut board = board_from_str_array(&["R.", "GB"], 3).unwrap();
        board.swap((0, 0), (0, 1));
        assert_eq!(board.to_rows(), vec![".R", "GB"]);
    }

    #[test]
    fn test_undo_without_swap_is_reported() {
        let mut board = Board::new(3, 3, 3);
        assert!(matches!(board.undo_last_swap(), Err(EngineError::NoPriorSwap)));
    }

    #[test]
    fn test_match_at_horizontal_run() {
        let board = board_from_str_array(&["GRRRB", "BGYPO"], 3).unwrap();
        let expected: MatchSet = [(0, 1), (0, 2), (0, 3)].into_iter().collect();
        assert_eq!(board.match_at((0, 2)), expected);
        assert_eq!(board.match_at((0, 1)), expected);
        assert!(board.match_at((0, 0)).is_empty());
    }

    #[test]
    fn test_match_at_short_run_is_empty() {
        let board = board_from_str_array(&["RRG", "GBY", "BYR"], 3).unwrap();
        assert!(board.match_at((0, 0)).is_empty());
        assert!(board.match_at((0, 1)).is_empty());
    }

    #[test]
    fn test_match_at_empty_origin_is_empty() {
        let board = board_from_str_array(&["R.R", "RRR", "R.R"], 3).unwrap();
        assert!(board.match_at((0, 1)).is_empty());
    }

    #[test]
    fn test_match_at_stops_at_empty_cell() {
        let board = board_from_str_array(&["RR.RR"], 3).unwrap();
        assert!(board.match_at((0, 0)).is_empty());
        assert!(board.match_at((0, 4)).is_empty());
    }

    #[test]
    fn test_match_at_short_axis_does_not_leak_cells() {
        // Vertical run of three through (2,1); horizontal neighbour (2,0) alone is too short.
        let board = board_from_str_array(&["GRB", "YRG", "RRB", "BGY"], 3).unwrap();
        let expected: MatchSet = [(0, 1), (1, 1), (2, 1)].into_iter().collect();
        assert_eq!(board.match_at((2, 1)), expected);
        assert!(!board.match_at((2, 1)).contains((2, 0)));
    }

    #[test]
    fn test_match_at_l_shape_counts_corner_once() {
        let board =
            board_from_str_array(&["GBYGB", "BYGYG", "RRRBY", "YGRGB", "GBRYP"], 3).unwrap();
        let matches = board.match_at((2, 2));
        assert_eq!(matches.len(), 5);
        for coord in [(2, 0), (2, 1), (2, 2), (3, 2), (4, 2)] {
            assert!(matches.contains(coord), "{:?} missing", coord);
        }
    }

    #[test]
    fn test_match_at_members_share_axis_and_type_with_origin() {
        let board = board_from_str_array(
            &["RRRRG", "GBBYG", "YBOBG", "YBRRR", "YPPOP"],
            3,
        )
        .unwrap();
        for origin in board.coords() {
            let matches = board.match_at(origin);
            if matches.is_empty() {
                continue;
            }
            assert!(matches.len() >= board.min_run());
            assert!(matches.contains(origin));
            let token = board.token_at(origin);
            for coord in matches.iter() {
                assert!(coord.0 == origin.0 || coord.1 == origin.1);
                assert_eq!(board.token_at(coord), token);
            }
        }
    }

    #[test]
    fn test_match_many_deduplicates() {
        let board = board_from_str_array(&["RRRG", "GBYP"], 3).unwrap();
        let matches = board.match_many([(0, 0), (0, 1), (0, 2), (1, 3)]);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_scan_count_tracks_match_at_calls() {
        let board = board_from_str_array(&["RGB", "GBR"], 3).unwrap();
        board.reset_scan_count();
        board.match_many([(0, 0), (1, 2)]);
        board.match_at((0, 1));
        assert_eq!(board.scan_count(), 3);
        board.reset_scan_count();
        assert_eq!(board.scan_count(), 0);
    }

    #[test]
    fn test_collapse_full_column_is_noop() {
        let mut board = board_from_str_array(&["R.", "G.", "B."], 3).unwrap();
        let before = board.clone();
        let result = board.collapse([0]);
        assert!(result.is_empty());
        assert_eq!(result.max_distance, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_collapse_preserves_vertical_order() {
        let mut board = board_from_str_array(&["R", ".", "B", ".", "G", "."], 3).unwrap();
        let result = board.collapse([0]);
        assert_eq!(board.to_rows(), vec![".", ".", ".", "R", "B", "G"]);
        assert_eq!(result.max_distance, 3); // R from row 0 to row 3
        let affected: Vec<Coord> = result.affected.iter().copied().collect();
        assert_eq!(affected, vec![(3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn test_collapse_distance_equals_destroyed_rows_below() {
        let mut board = board_from_str_array(&["GB", "YP", "RO", "RB", "RY"], 3).unwrap();
        let run = board.match_at((4, 0));
        assert_eq!(run.len(), 3);
        board.clear_cells(&run);

        let result = board.collapse(run.columns());
        assert_eq!(result.max_distance, 3);
        assert_eq!(board.to_rows(), vec![".B", ".P", ".O", "GB", "YY"]);
    }

    #[test]
    fn test_collapse_max_distance_spans_columns() {
        let mut board = board_from_str_array(&["RG", "..", ".B", ".."], 3).unwrap();
        let result = board.collapse([0, 1]);
        assert_eq!(result.max_distance, 3);
        assert_eq!(board.to_rows(), vec!["..", "..", ".G", "RB"]);
    }

    #[test]
    fn test_collapse_leaves_no_gaps_below_tokens() {
        let mut board = board_from_str_array(
            &["R.G.", ".B..", "Y.R.", "..OP", "G..."],
            3,
        )
        .unwrap();
        board.collapse(0..4);
        for col in 0..board.columns() {
            let mut seen_token = false;
            for row in 0..board.rows() {
                let empty = board.cell((row, col)).is_empty();
                assert!(!(seen_token && empty), "gap at ({}, {})", row, col);
                seen_token |= !empty;
            }
        }
    }

    #[test]
    fn test_collapse_only_touches_named_columns() {
        let mut board = board_from_str_array(&["RG", ".."], 3).unwrap();
        board.collapse([1]);
        assert_eq!(board.to_rows(), vec!["R.", ".G"]);
    }

    #[test]
    fn test_empty_cells_in_column_top_to_bottom() {
        let board = board_from_str_array(&[".", "R", ".", "."], 3).unwrap();
        assert_eq!(board.empty_cells_in_column(0), vec![(0, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_refill_distance_is_row_plus_one() {
        let mut board = board_from_str_array(&["..", ".R", "GB"], 3).unwrap();
        let mut source = ScriptedSource::from_chars("YPO").unwrap();
        let refill = board.refill([0, 1], &mut source);
        assert_eq!(board.to_rows(), vec!["YO", "PR", "GB"]);
        assert_eq!(refill.filled.max_distance, 2);
        assert_eq!(refill.filled.affected.len(), 3);
        assert!(refill.unfilled.is_empty());
    }

    #[test]
    fn test_refill_with_exhausted_source_leaves_cells_empty() {
        let mut board = board_from_str_array(&["..", "GB"], 3).unwrap();
        let mut source = ScriptedSource::from_chars("Y").unwrap();
        let refill = board.refill([0, 1], &mut source);
        assert_eq!(board.to_rows(), vec!["Y.", "GB"]);
        assert_eq!(refill.unfilled, vec![(0, 1)]);
        assert!(board.match_at((0, 1)).is_empty());
    }

    #[test]
    fn test_would_complete_run() {
        let board = board_from_str_array(&["RR.G", "...G", "BB.Y"], 3).unwrap();
        assert!(board.would_complete_run((0, 2), Token::Red));
        assert!(!board.would_complete_run((0, 2), Token::Blue));
        assert!(board.would_complete_run((2, 3), Token::Green));
        assert!(board.would_complete_run((2, 2), Token::Blue));
    }

    #[test]
    fn test_clear_cells_returns_removed_tokens() {
        let mut board = board_from_str_array(&["RRR."], 3).unwrap();
        let set: MatchSet = [(0, 0), (0, 1), (0, 3)].into_iter().collect();
        let removed = board.clear_cells(&set);
        assert_eq!(removed, vec![((0, 0), Token::Red), ((0, 1), Token::Red)]);
        assert_eq!(board.to_rows(), vec!["..R."]);
    }

    #[test]
    fn test_display_has_headers_and_one_line_per_row() {
        let board = board_from_str_array(&["RG", "B."], 3).unwrap();
        let display = format!("{}", board);
        assert!(display.starts_with("  0 1 "));
        assert_eq!(display.lines().count(), 3);
    }

    #[test]
    fn test_equality_ignores_last_swap() {
        let a = board_from_str_array(&["RG"], 3).unwrap();
        let mut b = a.clone();
        b.swap((0, 0), (0, 0));
        assert_eq!(a, b);
    }
}
