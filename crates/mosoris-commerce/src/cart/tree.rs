//! Parent/child structure of bundle lines.
//!
//! The backend expresses bundles two ways: a flat list where components
//! point at their bundle through `parentRelationship`, or a bundle line that
//! embeds its components under `lineComponents`. Both are flattened into a
//! single-level `parent id -> children` map, recomputed on every render.

use crate::cart::CartLine;
use crate::ids::CartLineId;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Children of each parent line, in the order they were encountered.
pub type ChildrenMap<'a> = HashMap<CartLineId, Vec<&'a CartLine>>;

/// Build the `parent id -> children` map for a cart's lines.
///
/// For each line, in order: a declared parent gets the line appended, then
/// any embedded components are expanded into the same map. The two steps
/// are independent, so a line that both declares a parent and embeds
/// components contributes to both. Embedded components without their own
/// back-reference are keyed under the line that embeds them.
///
/// A parent id need not belong to any line in the snapshot; such children
/// are kept in the map but never rendered.
pub fn build_children_map(lines: &[CartLine]) -> ChildrenMap<'_> {
    let mut children = ChildrenMap::new();
    collect_children(lines, None, &mut children);
    children
}

fn collect_children<'a>(
    lines: &'a [CartLine],
    embedding_parent: Option<&CartLineId>,
    children: &mut ChildrenMap<'a>,
) {
    for line in lines {
        if let Some(parent_id) = line.parent_id().or(embedding_parent) {
            children.entry(parent_id.clone()).or_default().push(line);
        }

        if let Some(components) = &line.line_components {
            // Recursion only follows embedded sub-lists, never ids, so
            // malformed parent references cannot loop here.
            collect_children(components, Some(&line.id), children);
        }
    }
}

/// Lines shown at the top level: those declaring no parent, in input order.
pub fn root_lines(lines: &[CartLine]) -> Vec<&CartLine> {
    lines.iter().filter(|line| line.is_root()).collect()
}

/// Render-ready view of a cart's lines.
#[derive(Debug, Clone)]
pub struct LineTree<'a> {
    roots: Vec<&'a CartLine>,
    children: ChildrenMap<'a>,
}

impl<'a> LineTree<'a> {
    /// Build the tree for one render pass.
    pub fn build(lines: &'a [CartLine]) -> Self {
        let tree = Self {
            roots: root_lines(lines),
            children: build_children_map(lines),
        };

        debug!(
            lines = lines.len(),
            roots = tree.roots.len(),
            parents = tree.children.len(),
            "built cart line tree"
        );

        let orphaned = tree.orphaned_parent_ids();
        if !orphaned.is_empty() {
            debug!(?orphaned, "cart lines reference parents that are never rendered");
        }

        tree
    }

    /// Top-level lines.
    pub fn roots(&self) -> &[&'a CartLine] {
        &self.roots
    }

    /// The full children map.
    pub fn children(&self) -> &ChildrenMap<'a> {
        &self.children
    }

    /// Direct children of a line, empty when it has none.
    pub fn children_of(&self, id: &CartLineId) -> &[&'a CartLine] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the line has children to show beneath it.
    pub fn has_children(&self, id: &CartLineId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Lines in render order with their nesting depth (roots are depth 0).
    ///
    /// Each line id is emitted at most once, so duplicate ids or cyclic
    /// references in a malformed snapshot cannot recurse forever.
    pub fn walk(&self) -> Vec<(usize, &'a CartLine)> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for root in &self.roots {
            self.walk_from(root, 0, &mut seen, &mut out);
        }
        out
    }

    fn walk_from(
        &self,
        line: &'a CartLine,
        depth: usize,
        seen: &mut HashSet<&'a CartLineId>,
        out: &mut Vec<(usize, &'a CartLine)>,
    ) {
        if !seen.insert(&line.id) {
            return;
        }
        out.push((depth, line));
        for child in self.children_of(&line.id) {
            self.walk_from(child, depth + 1, seen, out);
        }
    }

    /// Parent ids whose children no rendered line reaches.
    pub fn orphaned_parent_ids(&self) -> Vec<&CartLineId> {
        let rendered: HashSet<&CartLineId> = self.walk().into_iter().map(|(_, l)| &l.id).collect();
        let mut orphaned: Vec<&CartLineId> = self
            .children
            .keys()
            .filter(|id| !rendered.contains(id))
            .collect();
        orphaned.sort();
        orphaned
    }
}
