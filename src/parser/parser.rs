use std::fmt;

use crate::parser::ast::{Arena, ArenaFull, BinaryOperator, Node, NodeId};
use crate::parser::lexer::{LexError, TokenKind, TokenStream};
use crate::parser::observe::Observer;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at column {}: {}", self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let column = match err {
            LexError::UnexpectedChar { column, .. } => column,
            LexError::LexemeTooLong { column } => column,
            LexError::TooManyTokens => 0,
        };
        ParseError { message: err.to_string(), column }
    }
}

impl From<ArenaFull> for ParseError {
    fn from(err: ArenaFull) -> Self {
        ParseError { message: err.to_string(), column: 0 }
    }
}

/// A completed parse: the arena that owns every node, plus the root.
///
/// The root id is only meaningful against this arena, so the two travel
/// together; resolving any node borrows the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub arena: Arena,
    pub root: NodeId,
}

/// Recursive descent parser for the expression grammar
///
/// ```text
/// program    := expression EndOfInput
/// expression := operand { (Plus | Minus) operand }
/// operand    := IntLiteral
/// ```
///
/// LL(1): one token of lookahead, no backtracking, and exactly one node
/// allocated per accepted operand or operator. Nothing is allocated
/// speculatively, so a parse error never leaves half-linked nodes behind.
pub struct Parser {
    stream: TokenStream,
    arena: Arena,
}

impl Parser {
    /// Create a parser over a scanned token stream.
    pub fn new(stream: TokenStream) -> Self {
        Self { stream, arena: Arena::new() }
    }

    /// Create a parser with a caller-chosen arena capacity.
    pub fn with_arena_capacity(stream: TokenStream, capacity: usize) -> Self {
        Self { stream, arena: Arena::with_capacity(capacity) }
    }

    /// Parse the whole program: one expression, then end of input.
    pub fn parse_program(self) -> Result<ParseTree, ParseError> {
        self.parse_program_observed(&mut ())
    }

    /// Parse, reporting each rule entry/exit, consumed token, and node
    /// allocation to `observer`.
    pub fn parse_program_observed(
        mut self,
        observer: &mut impl Observer,
    ) -> Result<ParseTree, ParseError> {
        observer.rule_entered("program", self.stream.cursor());

        let root = self.parse_expression(observer)?;

        if !self.stream.accept(TokenKind::EndOfInput) {
            return Err(self.error_at_cursor("expecting end of input"));
        }

        observer.rule_exited("program", &self.arena, root);
        Ok(ParseTree { arena: self.arena, root })
    }

    /// expression := operand { (Plus | Minus) operand }
    ///
    /// Left-associative fold: each operator node takes the whole prior
    /// subtree as its left child, so "1 + 2 - 3" parses as (1 + 2) - 3.
    fn parse_expression(&mut self, observer: &mut impl Observer) -> Result<NodeId, ParseError> {
        observer.rule_entered("expression", self.stream.cursor());

        let mut subtree = self.parse_operand(observer)?;

        loop {
            let op = match self.stream.peek(0).kind {
                TokenKind::Plus => BinaryOperator::Plus,
                TokenKind::Minus => BinaryOperator::Minus,
                _ => break,
            };

            let token = self.stream.advance().clone();
            observer.token_consumed(&token, self.stream.cursor());

            // Both children exist before the operator node is allocated,
            // so children always have strictly smaller ids than parents.
            let right = self.parse_operand(observer)?;
            let id = self.arena.alloc(Node::BinaryOp { op, left: subtree, right })?;
            observer.node_allocated(&self.arena, id);

            subtree = id;
        }

        observer.rule_exited("expression", &self.arena, subtree);
        Ok(subtree)
    }

    /// operand := IntLiteral
    fn parse_operand(&mut self, observer: &mut impl Observer) -> Result<NodeId, ParseError> {
        observer.rule_entered("operand", self.stream.cursor());

        if !self.stream.accept(TokenKind::IntLiteral) {
            return Err(self.error_at_cursor("expecting operand"));
        }

        let token = self.stream.peek(-1).clone();
        observer.token_consumed(&token, self.stream.cursor());

        let value: i32 = token.text.parse().map_err(|_| ParseError {
            message: "integer overflow".to_string(),
            column: token.column,
        })?;

        let id = self.arena.alloc(Node::IntValue { value })?;
        observer.node_allocated(&self.arena, id);

        observer.rule_exited("operand", &self.arena, id);
        Ok(id)
    }

    fn error_at_cursor(&self, message: &str) -> ParseError {
        let token = self.stream.peek(0);
        ParseError {
            message: format!("{}, found {}", message, token),
            column: token.column,
        }
    }
}
