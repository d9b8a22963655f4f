//! Lexer (tokenizer) for arithmetic expressions
//!
//! Converts a raw expression string into a flat [`TokenStream`] consumed by
//! the parser through a read cursor. The token language is deliberately
//! small: decimal integer literals, `+`, `-`, and a terminating
//! [`TokenKind::EndOfInput`] marker. Blank space is skipped, never
//! tokenized.

use std::fmt;

use crate::parser::observe::Observer;

/// Longest lexeme the scanner will accept before giving up.
///
/// Digit runs are bounded so the token table keeps a fixed footprint;
/// exceeding the bound is a reported [`LexError`], not a truncation.
pub const MAX_LEXEME_LEN: usize = 32;

/// Upper bound on the number of tokens in one scan, EndOfInput included.
pub const MAX_TOKENS: usize = 256;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of decimal digits.
    IntLiteral,
    /// The `+` operator.
    Plus,
    /// The `-` operator.
    Minus,
    /// Terminator appended to every stream exactly once.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLiteral => write!(f, "integer literal"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// One lexical unit: a kind plus the exact matched lexeme.
///
/// `column` is the 1-based offset of the lexeme's first character in the
/// input, carried so that errors can point back into the expression.
/// EndOfInput has an empty `text` and points one past the last character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, column: usize) -> Self {
        Token { kind, text: text.into(), column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::IntLiteral => write!(f, "integer literal {}", self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that does not start any token.
    UnexpectedChar { ch: char, column: usize },
    /// A digit run longer than [`MAX_LEXEME_LEN`].
    LexemeTooLong { column: usize },
    /// The input produced more than [`MAX_TOKENS`] tokens.
    TooManyTokens,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, column } => {
                write!(f, "Lex error at column {}: unexpected character '{}'", column, ch)
            }
            LexError::LexemeTooLong { column } => {
                write!(
                    f,
                    "Lex error at column {}: literal exceeds {} characters",
                    column, MAX_LEXEME_LEN
                )
            }
            LexError::TooManyTokens => {
                write!(f, "Lex error: expression exceeds {} tokens", MAX_TOKENS)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// An ordered, append-only token sequence plus a read cursor.
///
/// The stream is built once by the lexer and is read-only afterwards; the
/// parser moves only the cursor. The final token is always EndOfInput and
/// the cursor never advances past it under correct grammar use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, cursor: 0 }
    }

    /// Look at the token at `cursor + offset` without moving the cursor.
    ///
    /// Offset 0 is the current token; negative offsets reach tokens that
    /// were already consumed (`peek(-1)` is the token just accepted).
    /// An out-of-range offset is a programming error and panics; the
    /// grammar never requests one because EndOfInput is never consumed.
    pub fn peek(&self, offset: isize) -> &Token {
        let index = self.cursor as isize + offset;
        &self.tokens[index as usize]
    }

    /// Consume the current token if it has the expected kind.
    ///
    /// On a match the cursor advances by one and `true` is returned;
    /// otherwise the cursor is left where it was.
    pub fn accept(&mut self, expected: TokenKind) -> bool {
        if self.tokens[self.cursor].kind == expected {
            self.cursor += 1;
            return true;
        }
        false
    }

    /// Unconditionally consume and return the current token.
    ///
    /// Used after the caller has already inspected the token via [`peek`]
    /// and decided to take it whatever it is.
    ///
    /// [`peek`]: TokenStream::peek
    pub fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.cursor];
        self.cursor += 1;
        token
    }

    /// Position of the next token to be consumed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All tokens in scan order, EndOfInput last.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Lexer for arithmetic expression strings
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given expression string.
    pub fn new(input: &str) -> Self {
        Self { input: input.chars().collect(), position: 0 }
    }

    /// Tokenize the entire input.
    ///
    /// Total and deterministic: either every character is consumed and the
    /// returned stream ends in exactly one EndOfInput token, or a
    /// [`LexError`] is returned and no partial stream escapes.
    pub fn tokenize(self) -> Result<TokenStream, LexError> {
        self.tokenize_observed(&mut ())
    }

    /// Tokenize, reporting each appended token to `observer`.
    pub fn tokenize_observed(
        mut self,
        observer: &mut impl Observer,
    ) -> Result<TokenStream, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if tokens.len() >= MAX_TOKENS {
                return Err(LexError::TooManyTokens);
            }

            let token = if self.is_at_end() {
                Token::new(TokenKind::EndOfInput, "", self.position + 1)
            } else {
                self.next_token()?
            };

            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            observer.token_scanned(&tokens, self.position);

            if done {
                break;
            }
        }

        Ok(TokenStream::new(tokens))
    }

    /// Scan one token starting at the current position.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let column = self.position + 1;
        let ch = self.input[self.position];

        match ch {
            '0'..='9' => self.int_literal(),
            '+' => {
                self.position += 1;
                Ok(Token::new(TokenKind::Plus, "+", column))
            }
            '-' => {
                self.position += 1;
                Ok(Token::new(TokenKind::Minus, "-", column))
            }
            _ => Err(LexError::UnexpectedChar { ch, column }),
        }
    }

    /// Scan a maximal run of decimal digits.
    fn int_literal(&mut self) -> Result<Token, LexError> {
        let column = self.position + 1;
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            if text.len() >= MAX_LEXEME_LEN {
                return Err(LexError::LexemeTooLong { column });
            }
            text.push(ch);
            self.position += 1;
        }

        Ok(Token::new(TokenKind::IntLiteral, text, column))
    }

    /// Skip a maximal run of space and tab characters.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.tokens().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let stream = Lexer::new("1 + 23 - 4").tokenize().unwrap();

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Plus,
                TokenKind::IntLiteral,
                TokenKind::Minus,
                TokenKind::IntLiteral,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(stream.tokens()[2].text, "23");
    }

    #[test]
    fn test_lexeme_is_exact_match() {
        let stream = Lexer::new("007").tokenize().unwrap();
        assert_eq!(stream.tokens()[0].text, "007");
    }

    #[test]
    fn test_whitespace_insensitive() {
        let tight = Lexer::new("1+2").tokenize().unwrap();
        let loose = Lexer::new(" 1 \t+ 2 ").tokenize().unwrap();

        let pairs = |s: &TokenStream| {
            s.tokens().iter().map(|t| (t.kind, t.text.clone())).collect::<Vec<_>>()
        };
        assert_eq!(pairs(&tight), pairs(&loose));
    }

    #[test]
    fn test_empty_input() {
        let stream = Lexer::new("").tokenize().unwrap();
        assert_eq!(kinds(&stream), vec![TokenKind::EndOfInput]);
        assert_eq!(stream.tokens()[0].text, "");
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("1+@").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnexpectedChar { ch: '@', column: 3 });
    }

    #[test]
    fn test_lexeme_too_long() {
        let input = "9".repeat(MAX_LEXEME_LEN + 1);
        let err = Lexer::new(&input).tokenize().unwrap_err();
        assert!(matches!(err, LexError::LexemeTooLong { column: 1 }));
    }

    #[test]
    fn test_cursor_protocol() {
        let mut stream = Lexer::new("1 + 2").tokenize().unwrap();

        assert_eq!(stream.peek(0).kind, TokenKind::IntLiteral);
        assert!(stream.accept(TokenKind::IntLiteral));
        assert_eq!(stream.peek(-1).text, "1");

        // Wrong kind leaves the cursor in place.
        assert!(!stream.accept(TokenKind::Minus));
        assert_eq!(stream.cursor(), 1);

        let op = stream.advance();
        assert_eq!(op.kind, TokenKind::Plus);
        assert!(stream.accept(TokenKind::IntLiteral));
        assert_eq!(stream.peek(0).kind, TokenKind::EndOfInput);
    }
}
