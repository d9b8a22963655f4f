//! Tree walking: a generic bottom-up fold and the indented tree dump.

use crate::parser::ast::{Arena, BinaryOperator, Node, NodeId, UnaryOperator};
use crate::parser::parser::ParseTree;

/// Fold the subtree rooted at `id` into a single value.
///
/// `leaf` maps a literal, `unary` and `binary` combine already-folded
/// children with their operator. Children are folded left before right.
/// The same walk backs the renderer and any future evaluation pass; only
/// the closures change.
pub fn fold<R>(
    arena: &Arena,
    id: NodeId,
    leaf: &mut impl FnMut(i32) -> R,
    unary: &mut impl FnMut(UnaryOperator, R) -> R,
    binary: &mut impl FnMut(BinaryOperator, R, R) -> R,
) -> R {
    match *arena.node(id) {
        Node::IntValue { value } => leaf(value),
        Node::UnaryOp { op, operand } => {
            let inner = fold(arena, operand, leaf, unary, binary);
            unary(op, inner)
        }
        Node::BinaryOp { op, left, right } => {
            let l = fold(arena, left, leaf, unary, binary);
            let r = fold(arena, right, leaf, unary, binary);
            binary(op, l, r)
        }
    }
}

/// Render the subtree rooted at `root` as a depth-indented dump.
///
/// One line per node, two spaces of indent per level, children below
/// their parent with the left child first:
///
/// ```text
/// Minus
///   Plus
///     IntValue 1
///     IntValue 2
///   IntValue 3
/// ```
pub fn render(arena: &Arena, root: NodeId) -> String {
    let mut out = String::new();
    render_node(arena, root, 0, &mut out);
    out
}

/// Convenience over [`render`] for a completed parse.
pub fn render_tree(tree: &ParseTree) -> String {
    render(&tree.arena, tree.root)
}

fn render_node(arena: &Arena, id: NodeId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }

    match *arena.node(id) {
        Node::IntValue { value } => {
            out.push_str(&format!("IntValue {}\n", value));
        }
        Node::UnaryOp { op, operand } => {
            out.push_str(&format!("UnaryOp {}\n", op));
            render_node(arena, operand, depth + 1, out);
        }
        Node::BinaryOp { op, left, right } => {
            out.push_str(&format!("BinaryOp {}\n", op));
            render_node(arena, left, depth + 1, out);
            render_node(arena, right, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;
    use crate::parser::parser::Parser;

    fn parse(input: &str) -> ParseTree {
        let stream = Lexer::new(input).tokenize().unwrap();
        Parser::new(stream).parse_program().unwrap()
    }

    #[test]
    fn test_render_leaf() {
        let tree = parse("7");
        assert_eq!(render_tree(&tree), "IntValue 7\n");
    }

    #[test]
    fn test_render_nested() {
        let tree = parse("1 + 2 - 3");
        let expected = "\
BinaryOp Minus
  BinaryOp Plus
    IntValue 1
    IntValue 2
  IntValue 3
";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_fold_as_evaluator() {
        let tree = parse("10 + 2 - 30 + 5");

        let value = fold(
            &tree.arena,
            tree.root,
            &mut |v| v as i64,
            &mut |op, x| match op {
                UnaryOperator::Neg => -x,
            },
            &mut |op, l, r| match op {
                BinaryOperator::Plus => l + r,
                BinaryOperator::Minus => l - r,
                BinaryOperator::Mult => l * r,
                BinaryOperator::Div => l / r,
            },
        );

        assert_eq!(value, -13);
    }

    #[test]
    fn test_fold_leaf_order_matches_input() {
        let tree = parse("4 - 5 + 6");

        let mut leaves = Vec::new();
        let mut ops = Vec::new();
        fold(
            &tree.arena,
            tree.root,
            &mut |v| leaves.push(v),
            &mut |_, _| (),
            &mut |op, _, _| ops.push(op),
        );

        assert_eq!(leaves, vec![4, 5, 6]);
        // Operators combine bottom-up, so the first-seen operator is the
        // innermost (leftmost) one.
        assert_eq!(ops, vec![BinaryOperator::Minus, BinaryOperator::Plus]);
    }
}
