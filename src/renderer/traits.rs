use anyhow::Result;

use crate::doc::{CompoundNode, DocNode, LeafNode};

/// The protocol every output backend implements.
///
/// `visit` consumes a leaf, `visit_pre`/`visit_post` bracket a compound
/// node's children. Implementations dispatch with an exhaustive `match`
/// over the kind enums, so adding a node kind breaks every backend at
/// compile time instead of silently dropping content.
///
/// Visiting must not mutate the tree. All side effects stay inside the
/// backend: its output buffer and its own render state. Two backends may
/// therefore walk the same tree from parallel threads without locking.
pub trait DocVisitor {
    fn visit(&mut self, leaf: &LeafNode) -> Result<()>;
    fn visit_pre(&mut self, node: &CompoundNode) -> Result<()>;
    fn visit_post(&mut self, node: &CompoundNode) -> Result<()>;
}

/// Depth-first traversal: pre, children in stored order, post.
///
/// List numbering, indent depth and link scoping in the backends are only
/// correct under this bracketing, so all of them walk through here. A
/// structural defect reported by the visitor aborts the pass immediately.
pub fn walk(node: &DocNode, visitor: &mut dyn DocVisitor) -> Result<()> {
    match node {
        DocNode::Leaf(leaf) => visitor.visit(leaf),
        DocNode::Compound(compound) => {
            visitor.visit_pre(compound)?;
            for child in compound.children() {
                walk(child, visitor)?;
            }
            visitor.visit_post(compound)
        }
    }
}
