//! Observation hooks for the scan and parse phases.
//!
//! Tracing is threaded through as a parameter rather than kept in global
//! state: callers that want a step-by-step record pass an [`Observer`]
//! (the [`trace`](crate::trace) recorder implements it), and everyone else
//! gets the no-op `()` implementation for free.

use crate::parser::ast::{Arena, Node, NodeId};
use crate::parser::lexer::Token;

/// Callbacks fired at each observable step of scanning and parsing.
///
/// Every method has an empty default body, so implementors override only
/// what they care about. The borrowed state is a point-in-time view;
/// observers that keep history must clone what they need.
pub trait Observer {
    /// A token was appended to the scan table.
    ///
    /// `tokens` is the table so far (the new token last); `scan_position`
    /// is the character offset the scanner has consumed up to.
    fn token_scanned(&mut self, tokens: &[Token], scan_position: usize) {
        let _ = (tokens, scan_position);
    }

    /// A grammar rule was entered. `cursor` is the token about to be read.
    fn rule_entered(&mut self, rule: &'static str, cursor: usize) {
        let _ = (rule, cursor);
    }

    /// A grammar rule returned `subtree` as its result.
    fn rule_exited(&mut self, rule: &'static str, arena: &Arena, subtree: NodeId) {
        let _ = (rule, arena, subtree);
    }

    /// The parser consumed one token and moved the cursor to `cursor`.
    fn token_consumed(&mut self, token: &Token, cursor: usize) {
        let _ = (token, cursor);
    }

    /// A node was allocated; `id` indexes `arena`.
    fn node_allocated(&mut self, arena: &Arena, id: NodeId) {
        let _ = (arena, id);
    }
}

/// The silent observer.
impl Observer for () {}

/// Shape summary used by observers when describing a node.
pub fn describe_node(node: &Node) -> String {
    match node {
        Node::IntValue { value } => format!("IntValue {}", value),
        Node::BinaryOp { op, left, right } => {
            format!("BinaryOp {} left=[{}] right=[{}]", op, left, right)
        }
        Node::UnaryOp { op, operand } => format!("UnaryOp {} operand=[{}]", op, operand),
    }
}
