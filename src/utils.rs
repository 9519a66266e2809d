use crate::board::Board;
use crate::error::EngineError;
use crate::token::Token;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0 (the top). All rows must have
/// the same, non-zero length; the board takes its dimensions from the input.
///
/// Valid characters are the token letters `R G B Y P O` and `.` for an empty cell.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(EngineError::Parse)` if the input is empty, ragged, or contains an
///   unrecognised character.
///
/// # Examples
/// ```
/// use cascade_grid::utils::board_from_str_array;
/// use cascade_grid::token::Token;
///
/// let board = board_from_str_array(&["RGY", "B.P"], 3).unwrap();
/// assert_eq!((board.rows(), board.columns()), (2, 3));
/// assert_eq!(board.token_at((0, 0)), Some(Token::Red));
/// assert_eq!(board.token_at((1, 1)), None);
///
/// assert!(board_from_str_array(&["RXB"], 3).is_err());
/// assert!(board_from_str_array(&["RGB", "RG"], 3).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], min_run: usize) -> Result<Board, EngineError> {
    let columns = match s.first() {
        Some(row) => row.chars().count(),
        None => return Err(EngineError::Parse("board has no rows".to_string())),
    };
    if columns == 0 {
        return Err(EngineError::Parse("board has no columns".to_string()));
    }

    let mut board = Board::new(s.len(), columns, min_run);
    for (r, row_str) in s.iter().enumerate() {
        let len = row_str.chars().count();
        if len != columns {
            return Err(EngineError::Parse(format!(
                "Row {} has {} characters, expected {}",
                r, len, columns
            )));
        }

        for (c, ch) in row_str.chars().enumerate() {
            let token = match ch {
                '.' => None,
                _ => Some(Token::from_char(ch).ok_or_else(|| {
                    EngineError::Parse(format!(
                        "Unrecognized character '{}' in row {} col {}",
                        ch, r, c
                    ))
                })?),
            };
            board.set_token((r, c), token);
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["RGYBPO", "......"], 3).unwrap();
        assert_eq!(board.token_at((0, 5)), Some(Token::Orange));
        assert_eq!(board.token_at((1, 0)), None);
        assert_eq!(board.min_run(), 3);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let err = board_from_str_array(&["RGYBX"], 3).unwrap_err();
        assert!(err.to_string().contains("Unrecognized character 'X'"));
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        let err = board_from_str_array(&["R G"], 3).unwrap_err();
        assert!(err.to_string().contains("Unrecognized character ' '"));
    }

    #[test]
    fn test_board_from_str_array_ragged_rows() {
        let err = board_from_str_array(&["RGB", "RGBY"], 3).unwrap_err();
        assert!(err.to_string().contains("Row 1 has 4 characters"));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(board_from_str_array(&rows, 3).is_err());
        assert!(board_from_str_array(&[""], 3).is_err());
    }

    #[test]
    fn test_to_rows_round_trip() {
        let rows = ["R.G", "BYP", "..O"];
        let board = board_from_str_array(&rows, 3).unwrap();
        assert_eq!(board.to_rows(), rows);
    }
}
