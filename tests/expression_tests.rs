use exprtty::parser::ast::{BinaryOperator, Node};
use exprtty::parser::lexer::{Lexer, TokenKind};
use exprtty::parser::parser::{ParseTree, Parser};
use exprtty::parser::render::{fold, render_tree};
use exprtty::trace::{Phase, Session};

fn parse(input: &str) -> ParseTree {
    let stream = Lexer::new(input).tokenize().expect("tokenize failed");
    Parser::new(stream).parse_program().expect("parse failed")
}

/// Collect leaf values and operators in left-to-right source order.
fn flatten(tree: &ParseTree) -> (Vec<i32>, Vec<BinaryOperator>) {
    let mut leaves = Vec::new();
    let mut ops = Vec::new();
    // For a left-deep tree the bottom-up fold visits leaves
    // left-to-right and operators innermost-first, which is exactly
    // source order for this grammar.
    fold(
        &tree.arena,
        tree.root,
        &mut |v| leaves.push(v),
        &mut |_, _| (),
        &mut |op, _, _| ops.push(op),
    );
    (leaves, ops)
}

#[test]
fn test_round_trip_preserves_source_order() {
    let tree = parse("10 + 2 - 30 + 4 - 5");

    let (leaves, ops) = flatten(&tree);
    assert_eq!(leaves, vec![10, 2, 30, 4, 5]);
    assert_eq!(
        ops,
        vec![
            BinaryOperator::Plus,
            BinaryOperator::Minus,
            BinaryOperator::Plus,
            BinaryOperator::Minus,
        ]
    );
}

#[test]
fn test_left_associativity() {
    // "1 + 2 - 3" must parse as (1 + 2) - 3, never 1 + (2 - 3).
    let tree = parse("1 + 2 - 3");

    let &Node::BinaryOp { op, left, right } = tree.arena.node(tree.root) else {
        panic!("expected a binary root");
    };
    assert_eq!(op, BinaryOperator::Minus);
    assert_eq!(*tree.arena.node(right), Node::IntValue { value: 3 });

    let &Node::BinaryOp { op: left_op, left: a, right: b } = tree.arena.node(left) else {
        panic!("expected the left child to be the (1 + 2) subtree");
    };
    assert_eq!(left_op, BinaryOperator::Plus);
    assert_eq!(*tree.arena.node(a), Node::IntValue { value: 1 });
    assert_eq!(*tree.arena.node(b), Node::IntValue { value: 2 });
}

#[test]
fn test_whitespace_insensitivity() {
    let tight = Lexer::new("1+2").tokenize().unwrap();
    let loose = Lexer::new(" 1 + 2 ").tokenize().unwrap();

    let pairs = |s: &exprtty::parser::lexer::TokenStream| {
        s.tokens()
            .iter()
            .map(|t| (t.kind, t.text.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(pairs(&tight), pairs(&loose));
}

#[test]
fn test_empty_input_fails_cleanly() {
    let stream = Lexer::new("").tokenize().unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.tokens()[0].kind, TokenKind::EndOfInput);

    let err = Parser::new(stream).parse_program().unwrap_err();
    assert!(err.message.contains("expecting operand"));
}

#[test]
fn test_bad_character_fails_the_scan() {
    let err = Lexer::new("1+@").tokenize().unwrap_err();
    assert!(err.to_string().contains('@'));
}

#[test]
fn test_trailing_garbage_rejected() {
    let stream = Lexer::new("1 2").tokenize().unwrap();
    let err = Parser::new(stream).parse_program().unwrap_err();
    assert!(err.message.contains("expecting end of input"));
}

#[test]
fn test_arena_has_no_forward_references() {
    let tree = parse("1 - 2 + 3 - 4 + 5");

    for (id, node) in tree.arena.nodes().iter().enumerate() {
        match node {
            Node::BinaryOp { left, right, .. } => {
                assert!(*left < id);
                assert!(*right < id);
            }
            Node::UnaryOp { operand, .. } => assert!(*operand < id),
            Node::IntValue { .. } => {}
        }
    }
}

#[test]
fn test_render_shape() {
    let tree = parse("1 + 2 - 3");
    let dump = render_tree(&tree);

    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(
        lines,
        vec![
            "BinaryOp Minus",
            "  BinaryOp Plus",
            "    IntValue 1",
            "    IntValue 2",
            "  IntValue 3",
        ]
    );
}

#[test]
fn test_recorded_session_covers_both_phases() {
    let (session, result) = Session::record("1 + 2 - 3");
    let tree = result.unwrap();
    assert_eq!(tree.arena.len(), 5);

    let phases: Vec<Phase> = (0..session.len())
        .filter_map(|i| session.get(i))
        .map(|s| s.phase)
        .collect();
    assert!(phases.contains(&Phase::Scan));
    assert!(phases.contains(&Phase::Parse));

    // Scan snapshots come before parse snapshots.
    let first_parse = phases.iter().position(|p| *p == Phase::Parse).unwrap();
    assert!(phases[..first_parse].iter().all(|p| *p == Phase::Scan));
    assert!(phases[first_parse..].iter().all(|p| *p == Phase::Parse));
}

#[test]
fn test_session_replay_matches_final_tree() {
    let (session, result) = Session::record("7 - 5");
    let tree = result.unwrap();

    let last = session.get(session.len() - 1).unwrap();
    assert_eq!(last.arena, tree.arena);
    assert_eq!(last.subtree, Some(tree.root));
}
