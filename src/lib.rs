//! # Introduction
//!
//! exprtty scans and parses a small arithmetic expression language —
//! integer literals folded left-to-right over `+` and `-` — capturing a
//! snapshot of the full scanner/parser state at each step. The snapshot
//! history can then be navigated forward and backward through a terminal
//! UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Expression → Lexer → TokenStream → Parser → Arena AST → render
//!                  └──── observer events ────┘
//!                            Snapshots → TUI
//! ```
//!
//! 1. [`parser`] — tokenises the expression and builds an AST in a
//!    fixed-capacity, index-addressed node arena.
//! 2. [`trace`] — records a [`trace::Snapshot`] at each scan/parse step
//!    through the observer hooks.
//! 3. [`ui`] — ratatui-based TUI for stepping through a recorded session;
//!    not part of the stable library API.
//!
//! ## Supported expressions
//!
//! Decimal integer literals, `+`, `-`, spaces and tabs. No precedence, no
//! parentheses, no unary minus: the grammar is intentionally the smallest
//! thing that still produces interesting trees.

pub mod parser;
pub mod trace;
pub mod ui;
