//! Token model for the query language.

use std::fmt;

/// The lexical category of a [`Token`].
///
/// This is the closed set of categories the lexer can produce. Lexical
/// problems are represented as tokens too ([`TokenKind::Illegal`],
/// [`TokenKind::Unexpected`]) so the lexer itself never fails; the parser
/// turns them into diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ==================== Comparison Operators ====================
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `=`
    Eq,
    /// `!=` (or `^=`)
    Ne,
    /// `~` (or `^`) - substring match
    Like,
    /// `!~` - negated substring match
    NotLike,

    // ==================== Boolean Connectives ====================
    /// `and` / `AND`
    And,
    /// `or` / `OR`
    Or,

    // ==================== Grouping ====================
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    /// End of input. Repeated calls to the lexer keep returning this.
    Eof,

    // ==================== Literal Classes ====================
    /// A bareword or quoted string.
    String,
    /// A numeric literal, parsed as f64 by the parser.
    Number,
    /// A date literal such as `2018-01-02`.
    Date,
    /// `true` / `false` in any case.
    Boolean,

    // ==================== Error Markers ====================
    /// A character the lexer does not recognize.
    Illegal,
    /// A malformed construct, currently only an unterminated quoted string.
    Unexpected,
}

impl TokenKind {
    /// Returns true for the eight comparison operators.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Gt
                | TokenKind::Lt
                | TokenKind::Gte
                | TokenKind::Lte
                | TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Like
                | TokenKind::NotLike
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Gte => ">=",
            TokenKind::Lte => "<=",
            TokenKind::Eq => "=",
            TokenKind::Ne => "!=",
            TokenKind::Like => "~",
            TokenKind::NotLike => "!~",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Eof => "EOF",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Date => "DATE",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Unexpected => "UNEXPECTED",
        };
        f.write_str(s)
    }
}

/// Classifies a bareword, returning the keyword kind if it is one and
/// [`TokenKind::String`] otherwise.
///
/// `and`/`AND` and `or`/`OR` are the only connective spellings; booleans
/// match in any case. A bareword escaped with a leading `-` never reaches
/// this function (see the lexer).
pub fn lookup_keyword(word: &str) -> TokenKind {
    match word {
        "and" | "AND" => TokenKind::And,
        "or" | "OR" => TokenKind::Or,
        _ if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") => {
            TokenKind::Boolean
        }
        _ => TokenKind::String,
    }
}

/// Classifies a digit-led run as a date or a number.
///
/// A run containing `-` is a date, anything else is a number. This makes a
/// negative number literal indistinguishable from a date, so negative
/// numbers are not expressible; no task field is meaningfully negative.
pub fn date_or_number(literal: &str) -> TokenKind {
    if literal.contains('-') {
        TokenKind::Date
    } else {
        TokenKind::Number
    }
}

/// A lexical token: its category plus the raw source text backing it.
///
/// The literal is kept for diagnostics and for round-tripping a parsed
/// query back to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical category.
    pub kind: TokenKind,
    /// The raw source text this token was scanned from.
    pub literal: String,
}

impl Token {
    /// Creates a token from a kind and its source text.
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    /// The end-of-input token, with an empty literal.
    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, \"{}\")", self.kind, self.literal)
    }
}
