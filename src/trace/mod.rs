// Snapshot recording for step-through playback of scan and parse

use std::fmt;

use crate::parser::ast::{Arena, NodeId};
use crate::parser::lexer::{Lexer, Token};
use crate::parser::observe::{describe_node, Observer};
use crate::parser::parser::{ParseError, ParseTree, Parser};

/// Which pipeline phase a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scan,
    Parse,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scan => write!(f, "scan"),
            Phase::Parse => write!(f, "parse"),
        }
    }
}

/// One frozen view of the pipeline, captured after a single step.
///
/// Snapshots clone the visible state outright so that playback can jump
/// to any step without re-running the scanner or parser.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    /// Human-readable description of the step that produced this state.
    pub description: String,
    /// Token table as of this step.
    pub tokens: Vec<Token>,
    /// Index of the next token the parser will read (0 during scanning).
    pub cursor: usize,
    /// Characters of input consumed by the scanner so far.
    pub scan_position: usize,
    /// Node arena as of this step (empty during scanning).
    pub arena: Arena,
    /// Root of the subtree most recently completed, if any.
    pub subtree: Option<NodeId>,
    /// Recursion depth of the grammar rule that produced this step.
    pub depth: usize,
}

/// A recorded scan + parse run: every snapshot, in order.
#[derive(Debug, Clone, Default)]
pub struct Session {
    snapshots: Vec<Snapshot>,
}

impl Session {
    /// Run the full pipeline over `input` with a recorder attached.
    ///
    /// On success returns the session and the finished tree. On failure
    /// the snapshots accumulated up to the error are returned alongside
    /// it, so a failed run can still be replayed step by step.
    pub fn record(input: &str) -> (Session, Result<ParseTree, ParseError>) {
        let mut recorder = Recorder::new();

        let stream = match Lexer::new(input).tokenize_observed(&mut recorder) {
            Ok(stream) => stream,
            Err(err) => return (recorder.into_session(), Err(err.into())),
        };

        let result = Parser::new(stream).parse_program_observed(&mut recorder);
        (recorder.into_session(), result)
    }

    /// Get a snapshot by step index.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}

/// An [`Observer`] that captures a [`Snapshot`] at every step.
#[derive(Debug, Default)]
pub struct Recorder {
    session: Session,
    // Carried between events so each snapshot is complete on its own.
    tokens: Vec<Token>,
    cursor: usize,
    scan_position: usize,
    arena: Arena,
    subtree: Option<NodeId>,
    depth: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish recording and hand over the session.
    pub fn into_session(self) -> Session {
        self.session
    }

    fn capture(&mut self, phase: Phase, description: String) {
        self.session.push(Snapshot {
            phase,
            description,
            tokens: self.tokens.clone(),
            cursor: self.cursor,
            scan_position: self.scan_position,
            arena: self.arena.clone(),
            subtree: self.subtree,
            depth: self.depth,
        });
    }
}

impl Observer for Recorder {
    fn token_scanned(&mut self, tokens: &[Token], scan_position: usize) {
        self.tokens = tokens.to_vec();
        self.scan_position = scan_position;

        let description = match tokens.last() {
            Some(token) => format!("scanned {:?} \"{}\"", token.kind, token.text),
            None => String::from("scan started"),
        };
        self.capture(Phase::Scan, description);
    }

    fn rule_entered(&mut self, rule: &'static str, cursor: usize) {
        self.cursor = cursor;
        self.capture(Phase::Parse, format!("enter {}", rule));
        self.depth += 1;
    }

    fn rule_exited(&mut self, rule: &'static str, arena: &Arena, subtree: NodeId) {
        self.depth = self.depth.saturating_sub(1);
        self.arena = arena.clone();
        self.subtree = Some(subtree);
        self.capture(Phase::Parse, format!("exit {} => node[{}]", rule, subtree));
    }

    fn token_consumed(&mut self, token: &Token, cursor: usize) {
        self.cursor = cursor;
        self.capture(Phase::Parse, format!("consumed {}", token));
    }

    fn node_allocated(&mut self, arena: &Arena, id: NodeId) {
        self.arena = arena.clone();
        self.subtree = Some(id);
        let description = format!("alloc node[{}]: {}", id, describe_node(arena.node(id)));
        self.capture(Phase::Parse, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_run_records_both_phases() {
        let (session, result) = Session::record("1 + 2");
        result.unwrap();

        assert!(!session.is_empty());
        assert!(session.get(0).is_some_and(|s| s.phase == Phase::Scan));
        let last = session.get(session.len() - 1).unwrap();
        assert_eq!(last.phase, Phase::Parse);
        // The final snapshot carries the finished arena: 1, 2, plus.
        assert_eq!(last.arena.len(), 3);
    }

    #[test]
    fn test_token_count_monotonic_during_scan() {
        let (session, _) = Session::record("1 + 2 - 3");

        let mut prev = 0;
        for snapshot in (0..session.len()).filter_map(|i| session.get(i)) {
            if snapshot.phase == Phase::Scan {
                assert!(snapshot.tokens.len() >= prev);
                prev = snapshot.tokens.len();
            }
        }
        // "1 + 2 - 3" scans to five tokens plus EndOfInput.
        assert_eq!(prev, 6);
    }

    #[test]
    fn test_node_count_monotonic_during_parse() {
        let (session, _) = Session::record("1 + 2 - 3");

        let mut prev = 0;
        for snapshot in (0..session.len()).filter_map(|i| session.get(i)) {
            if snapshot.phase == Phase::Parse {
                assert!(snapshot.arena.len() >= prev);
                prev = snapshot.arena.len();
            }
        }
        assert_eq!(prev, 5);
    }

    #[test]
    fn test_failed_scan_keeps_partial_session() {
        let (session, result) = Session::record("12 @");
        assert!(result.is_err());

        // The literal was scanned and recorded before the bad character.
        assert!(!session.is_empty());
        assert!(session
            .get(session.len() - 1)
            .is_some_and(|s| s.phase == Phase::Scan && s.tokens.len() == 1));
    }

    #[test]
    fn test_failed_parse_keeps_partial_session() {
        let (session, result) = Session::record("1 +");
        assert!(result.is_err());
        assert!(session.get(session.len() - 1).is_some_and(|s| s.phase == Phase::Parse));
    }
}
