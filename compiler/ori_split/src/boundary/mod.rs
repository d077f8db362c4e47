//! Boundary Tokens
//!
//! A boundary is the join between two adjacent tokens. The search reads only
//! the tokens' literal text and source end positions; it never looks at the
//! grammar that produced them.

/// A source token as seen by the search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// Literal text, emitted verbatim.
    pub text: String,
    /// Source offset one past the token's last byte.
    pub end: usize,
}

impl Token {
    /// Create a token.
    pub fn new(text: impl Into<String>, end: usize) -> Self {
        Token {
            text: text.into(),
            end,
        }
    }

    /// Width measurements of this token's literal.
    #[inline]
    pub fn metrics(&self) -> TokenMetrics {
        TokenMetrics::measure(&self.text)
    }
}

/// The join between two adjacent tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Boundary {
    /// Token ending the previous fragment.
    pub left: Token,
    /// Token starting the next fragment.
    pub right: Token,
}

impl Boundary {
    /// Create a boundary.
    pub fn new(left: Token, right: Token) -> Self {
        Boundary { left, right }
    }

    /// Whether the tokens are in source order.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.left.end <= self.right.end
    }

    /// Build the boundary stream for a token sequence.
    ///
    /// The first boundary joins an empty start-of-input token to the first
    /// token, so every token is the right side of exactly one boundary.
    /// Token end offsets assume the tokens are laid out back to back.
    pub fn chain<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<Boundary> {
        let mut boundaries = Vec::new();
        let mut left = Token::new("", 0);
        for text in texts {
            let right = Token::new(text, left.end + text.len());
            boundaries.push(Boundary::new(left, right.clone()));
            left = right;
        }
        boundaries
    }
}

/// Width measurements of a token literal, in `char`s.
///
/// For a single-line literal all three widths are equal. For a literal with
/// embedded line breaks, `first_line` extends the current line and
/// `last_line` is where the cursor sits once the token is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenMetrics {
    /// Width of the whole literal.
    pub width: u32,
    /// Width up to the first embedded line break.
    pub first_line: u32,
    /// Width after the last embedded line break.
    pub last_line: u32,
}

impl TokenMetrics {
    /// Measure a literal.
    pub fn measure(text: &str) -> Self {
        let width = char_width(text);
        match (text.find('\n'), text.rfind('\n')) {
            (Some(first), Some(last)) => TokenMetrics {
                width,
                first_line: char_width(&text[..first]),
                last_line: char_width(&text[last + 1..]),
            },
            _ => TokenMetrics {
                width,
                first_line: width,
                last_line: width,
            },
        }
    }

    /// Whether the literal spans more than one line.
    #[inline]
    pub fn is_multiline(self) -> bool {
        self.first_line != self.width
    }
}

/// Column width of a string, saturating at `u32::MAX`.
pub(crate) fn char_width(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}
