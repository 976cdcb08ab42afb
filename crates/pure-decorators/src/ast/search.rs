use std::{fmt, ops::ControlFlow};

use serde_json::Value;

use super::{Node, NodeKind, walk::walk};
use crate::equality::are_equal;

type Accessor<'f> = Box<dyn Fn(&Node<'_>) -> Option<Value> + 'f>;

/// Attribute constraints a node has to satisfy to be returned by [`search`].
///
/// Each constraint pairs an accessor with the expected value. A node is
/// rejected when an accessor yields `None` (the attribute is absent), or when
/// the value it yields is not structurally equal to the expected one.
#[derive(Default)]
pub struct Filter<'f> {
    attributes: Vec<(Accessor<'f>, Value)>,
}

impl<'f> Filter<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr<A>(mut self, accessor: A, expected: impl Into<Value>) -> Self
    where
        A: Fn(&Node<'_>) -> Option<Value> + 'f,
    {
        self.attributes.push((Box::new(accessor), expected.into()));
        self
    }

    pub fn matches(&self, node: &Node<'_>) -> bool {
        self.attributes.iter().all(|(accessor, expected)| {
            accessor(node).is_some_and(|value| are_equal(&value, expected))
        })
    }
}

impl fmt::Debug for Filter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field(
                "expected",
                &self.attributes.iter().map(|(_, v)| v).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Collects every node of `kind` reachable from `root` that satisfies
/// `filter`, in traversal order.
pub fn search<'a>(root: Node<'a>, kind: NodeKind, filter: &Filter<'_>) -> Vec<Node<'a>> {
    let mut results = Vec::new();
    walk(root, &mut |node, _| {
        if node.kind() == kind && filter.matches(&node) {
            results.push(node);
        }
        ControlFlow::Continue(())
    });
    results
}
