//! Lexer (tokenizer) for query expressions.

use crate::token::{self, Token, TokenKind};

/// Lexer for tokenizing query expressions.
///
/// The lexer is a single forward-only byte cursor with one character of
/// lookahead. Tokens are pulled one at a time with [`Lexer::next_token`];
/// once the input is exhausted it returns [`TokenKind::Eof`] forever.
///
/// Lexical problems never abort scanning: an unrecognized character becomes
/// an [`TokenKind::Illegal`] token and an unterminated quoted string becomes
/// [`TokenKind::Unexpected`], both carrying the offending character for the
/// parser to report.
pub struct Lexer<'a> {
    input: &'a [u8],
    /// Byte offset of the character under the cursor.
    position: usize,
    /// Byte offset of the next character to read.
    read_position: usize,
    /// The character under the cursor; 0 at end of input.
    ch: u8,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given query string.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    /// The character currently under the cursor, for error reporting.
    pub fn current_char(&self) -> char {
        char::from(self.ch)
    }

    /// The current cursor position (byte offset), for error reporting.
    pub fn position(&self) -> usize {
        self.position
    }

    fn read_char(&mut self) {
        if self.read_position >= self.input.len() {
            self.ch = 0;
        } else {
            self.ch = self.input[self.read_position];
        }
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    /// Consumes characters while `valid` holds and returns the run.
    fn read(&mut self, valid: impl Fn(u8) -> bool) -> String {
        let start = self.position;
        while valid(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.ch) {
            self.read_char();
        }
    }

    /// Scans a digit-led run of digits, `-`, `.` and `:`, classifying it as
    /// a date or a number.
    fn number(&mut self) -> Token {
        let literal = self.read(|ch| is_digit(ch) || ch == b'-' || ch == b'.' || ch == b':');
        let kind = token::date_or_number(&literal);
        Token::new(kind, literal)
    }

    /// Scans a bareword of letters and digits.
    fn bareword(&mut self) -> Token {
        let literal = self.read(|ch| is_letter(ch) || is_digit(ch));
        Token::new(TokenKind::String, literal)
    }

    /// Scans a quoted string. The cursor is left on the closing quote (or
    /// the offending character), which the caller advances past.
    fn quoted_string(&mut self) -> Token {
        // Skip the opening quote.
        self.read_char();

        let literal = self.read(|ch| is_letter(ch) || is_digit(ch) || ch == b' ');

        if self.ch != b'"' {
            return Token::new(TokenKind::Unexpected, self.current_char().to_string());
        }

        Token::new(TokenKind::String, literal)
    }

    /// Returns the next token found in the input.
    ///
    /// Run-scanned tokens (barewords, numbers) stop on their terminator
    /// without consuming it, so a `)` directly after a word survives.
    /// `^` is the LIKE operator whenever no `=` or `~` follows, even with
    /// no space before the operand, so `title ^trash` reads as a
    /// comparison; only a bare `!` is illegal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            0 => return Token::eof(),
            b'=' => Token::new(TokenKind::Eq, "="),
            b'<' | b'>' => {
                let lt = self.ch == b'<';
                if self.peek_char() == b'=' {
                    self.read_char();
                    if lt {
                        Token::new(TokenKind::Lte, "<=")
                    } else {
                        Token::new(TokenKind::Gte, ">=")
                    }
                } else if lt {
                    Token::new(TokenKind::Lt, "<")
                } else {
                    Token::new(TokenKind::Gt, ">")
                }
            }
            b'!' | b'^' => match self.peek_char() {
                b'=' => {
                    self.read_char();
                    Token::new(TokenKind::Ne, "!=")
                }
                b'~' => {
                    self.read_char();
                    Token::new(TokenKind::NotLike, "!~")
                }
                // A bare `^` is the LIKE operator; a bare `!` is not valid.
                _ if self.ch == b'^' => Token::new(TokenKind::Like, "^"),
                _ => Token::new(TokenKind::Illegal, "!"),
            },
            b'~' => Token::new(TokenKind::Like, "~"),
            b'(' => Token::new(TokenKind::OpenParen, "("),
            b')' => Token::new(TokenKind::CloseParen, ")"),
            b'"' => self.quoted_string(),
            b'0'..=b'9' => return self.number(),
            b'-' => {
                // Keyword escape: skip the `-` and force the following
                // bareword to be a plain string, letting users search for
                // the words "and" and "or" literally.
                self.read_char();
                return self.bareword();
            }
            ch if is_letter(ch) => {
                let mut tok = self.bareword();
                tok.kind = token::lookup_keyword(&tok.literal);
                return tok;
            }
            ch => Token::new(TokenKind::Illegal, char::from(ch).to_string()),
        };

        self.read_char();
        tok
    }
}

fn is_whitespace(ch: u8) -> bool {
    ch == b' ' || ch == b'\n' || ch == b'\t'
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'-' || ch == b','
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}
