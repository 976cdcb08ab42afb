//! Pre-order traversal over the constructs that can hold a decorator helper
//! call or its assignment target.
//!
//! Children are only followed for:
//!
//! - a program's statements
//! - an import declaration's specifiers
//! - the declaration of an `export <decl>`
//! - the expression of an expression statement
//! - a call's arguments
//! - an array literal's elements (holes skipped)
//! - the right-hand side of an assignment
//!
//! Every other node is a leaf, even when it has children.

use std::ops::ControlFlow;

use swc_core::ecma::ast::Program;

use super::Node;

/// Walks `node` with a fresh ancestor stack.
///
/// `visit` receives each node together with the chain of its ancestors, root
/// first. Returning [`ControlFlow::Break`] halts the whole traversal and the
/// node it was returned for becomes the result.
pub fn walk<'a, F>(node: Node<'a>, visit: &mut F) -> Option<Node<'a>>
where
    F: FnMut(Node<'a>, &[Node<'a>]) -> ControlFlow<()>,
{
    walk_with_ancestors(node, visit, &mut Vec::new())
}

/// Like [`walk`], threading a caller-owned ancestor stack.
///
/// The stack is shared by the whole traversal: a visitor that wants to keep a
/// chain has to copy it out.
pub fn walk_with_ancestors<'a, F>(
    node: Node<'a>,
    visit: &mut F,
    ancestors: &mut Vec<Node<'a>>,
) -> Option<Node<'a>>
where
    F: FnMut(Node<'a>, &[Node<'a>]) -> ControlFlow<()>,
{
    if visit(node, ancestors).is_break() {
        return Some(node);
    }

    ancestors.push(node);
    let found = walk_children(node, visit, ancestors);
    ancestors.pop();
    found
}

fn walk_children<'a, F>(
    node: Node<'a>,
    visit: &mut F,
    ancestors: &mut Vec<Node<'a>>,
) -> Option<Node<'a>>
where
    F: FnMut(Node<'a>, &[Node<'a>]) -> ControlFlow<()>,
{
    match node {
        Node::Program(Program::Module(module)) => walk_all(
            module.body.iter().map(Node::from_module_item),
            visit,
            ancestors,
        ),
        Node::Program(Program::Script(script)) => {
            walk_all(script.body.iter().map(Node::from_stmt), visit, ancestors)
        }
        Node::Import(import) => walk_all(
            import.specifiers.iter().map(Node::ImportSpecifier),
            visit,
            ancestors,
        ),
        Node::ExportDecl(export) => {
            walk_with_ancestors(Node::from_decl(&export.decl), visit, ancestors)
        }
        Node::ExprStmt(stmt) => walk_with_ancestors(Node::from_expr(&stmt.expr), visit, ancestors),
        Node::Call(call) => walk_all(call.args.iter().map(Node::from_arg), visit, ancestors),
        Node::Array(array) => walk_all(
            array.elems.iter().flatten().map(Node::from_arg),
            visit,
            ancestors,
        ),
        Node::Assign(assign) => {
            walk_with_ancestors(Node::from_expr(&assign.right), visit, ancestors)
        }
        _ => None,
    }
}

fn walk_all<'a, F>(
    children: impl IntoIterator<Item = Node<'a>>,
    visit: &mut F,
    ancestors: &mut Vec<Node<'a>>,
) -> Option<Node<'a>>
where
    F: FnMut(Node<'a>, &[Node<'a>]) -> ControlFlow<()>,
{
    children
        .into_iter()
        .find_map(|child| walk_with_ancestors(child, visit, ancestors))
}

/// Returns the chain of ancestors of `target` below `root`, root first.
///
/// Nodes are matched by identity. An empty chain means `target` is either
/// `root` itself or not reachable from it.
pub fn ancestors_of<'a>(target: Node<'_>, root: Node<'a>) -> Vec<Node<'a>> {
    let mut chain = Vec::new();
    walk(root, &mut |candidate, ancestors| {
        if candidate.is(&target) {
            chain = ancestors.to_vec();
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::NodeKind,
        parse::{SourceSyntax, parse},
    };

    fn kinds(nodes: &[Node<'_>]) -> Vec<NodeKind> {
        nodes.iter().map(Node::kind).collect()
    }

    #[test]
    fn visits_in_pre_order() {
        let file = parse("a(b(), [c(), , d()]);", "test.js", SourceSyntax::Ecmascript).unwrap();
        let mut names = vec![];
        walk(file.root(), &mut |node, _| {
            names.extend(node.callee_name());
            ControlFlow::Continue(())
        });
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn ancestors_track_the_current_path() {
        let file = parse(
            "Foo = __decorate([dec], Foo);",
            "test.js",
            SourceSyntax::Ecmascript,
        )
        .unwrap();
        let mut seen = vec![];
        walk(file.root(), &mut |node, ancestors| {
            if node.callee_name() == Some("__decorate") {
                seen = kinds(ancestors);
            }
            ControlFlow::Continue(())
        });
        assert_eq!(
            seen,
            vec![
                NodeKind::Program,
                NodeKind::ExpressionStatement,
                NodeKind::AssignmentExpression
            ]
        );
    }

    #[test]
    fn variable_declarations_are_leaves() {
        let file = parse("const a = f(); g();", "test.js", SourceSyntax::Ecmascript).unwrap();
        let mut names = vec![];
        walk(file.root(), &mut |node, _| {
            names.extend(node.callee_name());
            ControlFlow::Continue(())
        });
        assert_eq!(names, vec!["g"]);
    }

    #[test]
    fn break_halts_the_whole_traversal() {
        let file = parse("a(b()); c();", "test.js", SourceSyntax::Ecmascript).unwrap();
        let mut visited = vec![];
        let found = walk(file.root(), &mut |node, _| {
            visited.extend(node.callee_name());
            if node.callee_name() == Some("b") {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(found.and_then(|node| node.callee_name()), Some("b"));
        assert_eq!(visited, vec!["a", "b"]);
    }

    #[test]
    fn ancestors_of_matches_by_identity() {
        let file = parse("f(); x = f();", "test.js", SourceSyntax::Ecmascript).unwrap();
        let mut calls = vec![];
        walk(file.root(), &mut |node, _| {
            if node.kind() == NodeKind::CallExpression {
                calls.push(node);
            }
            ControlFlow::Continue(())
        });
        assert_eq!(calls.len(), 2);

        assert_eq!(
            kinds(&ancestors_of(calls[0], file.root())),
            vec![NodeKind::Program, NodeKind::ExpressionStatement]
        );
        assert_eq!(
            kinds(&ancestors_of(calls[1], file.root())),
            vec![
                NodeKind::Program,
                NodeKind::ExpressionStatement,
                NodeKind::AssignmentExpression
            ]
        );
    }

    #[test]
    fn ancestors_of_unreachable_node_is_empty() {
        let file = parse("const a = f();", "test.js", SourceSyntax::Ecmascript).unwrap();
        let other = parse("f();", "other.js", SourceSyntax::Ecmascript).unwrap();
        assert!(ancestors_of(other.root(), file.root()).is_empty());
    }
}
