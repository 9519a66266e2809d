//! Token types that occupy board cells.

use rand::Rng;

/// The type of a token sitting in a cell.
///
/// Tokens carry no identity beyond their type: two tokens match iff their
/// variants are equal. An empty cell is modelled as `None` at the cell level,
/// so there is no `Empty` variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl Token {
    /// Every token type in a fixed order. Palettes of size `n` use the first `n`.
    pub const PALETTE: [Token; 6] = [
        Token::Red,
        Token::Green,
        Token::Blue,
        Token::Yellow,
        Token::Purple,
        Token::Orange,
    ];

    /// Returns the first `size` token types of [`Token::PALETTE`].
    ///
    /// `size` is clamped to the palette length.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_grid::token::Token;
    /// assert_eq!(Token::palette(2), &[Token::Red, Token::Green]);
    /// assert_eq!(Token::palette(99).len(), 6);
    /// ```
    pub fn palette(size: usize) -> &'static [Token] {
        &Self::PALETTE[..size.min(Self::PALETTE.len())]
    }

    /// Picks a token uniformly from `palette`.
    ///
    /// # Panics
    /// Panics if `palette` is empty.
    pub fn random_from(palette: &[Token], rng: &mut impl Rng) -> Token {
        palette[rng.gen_range(0..palette.len())]
    }

    /// Converts the token to its one-letter text form.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_grid::token::Token;
    /// assert_eq!(Token::Red.to_char(), 'R');
    /// assert_eq!(Token::Orange.to_char(), 'O');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Token::Red => 'R',
            Token::Green => 'G',
            Token::Blue => 'B',
            Token::Yellow => 'Y',
            Token::Purple => 'P',
            Token::Orange => 'O',
        }
    }

    /// Parses the one-letter text form. Returns `None` for anything else,
    /// including the `.` used for empty cells.
    pub fn from_char(ch: char) -> Option<Token> {
        match ch {
            'R' => Some(Token::Red),
            'G' => Some(Token::Green),
            'B' => Some(Token::Blue),
            'Y' => Some(Token::Yellow),
            'P' => Some(Token::Purple),
            'O' => Some(Token::Orange),
            _ => None,
        }
    }

    /// ANSI background colour used by the terminal renderer.
    pub(crate) fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Token::Red => "41",
            Token::Green => "42",
            Token::Yellow => "43",
            Token::Blue => "44",
            Token::Purple => "45",
            Token::Orange => "46",
        }
    }
}
