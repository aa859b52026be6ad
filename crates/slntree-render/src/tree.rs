//! Per-root ASCII tree rendering.
//!
//! Each root is walked depth-first. A child is expanded only at the
//! occurrence whose depth equals its shallowest depth from the root and only
//! the first time that occurrence is met; every other occurrence is emitted
//! with an [`Annotation`] and not descended into.

use std::collections::HashSet;

use tracing::debug;

use slntree_core::{
    DependencyGraph, DepthTable, GraphKind, Node, NodeId, NodeKind, compare_display,
    shallowest_depths,
};

use crate::options::RenderOptions;

const BRANCH: &str = "|-- ";
const LAST_BRANCH: &str = "+-- ";
const PIPE_INDENT: &str = "|   ";
const BLANK_INDENT: &str = "    ";

/// Marker appended to a line whose node is not expanded there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// The node is already on the path from the root.
    Circular,
    /// The node was expanded earlier in this tree.
    BackReference,
    /// The node's shallowest occurrence is elsewhere in this tree.
    Deferred,
    /// The node sits at the depth limit and has children.
    MaxDepth,
}

impl Annotation {
    pub fn marker(&self) -> &'static str {
        match self {
            Annotation::Circular => "[*CIRCULAR*]",
            Annotation::BackReference => "*",
            Annotation::Deferred => "...",
            Annotation::MaxDepth => "[MAX DEPTH REACHED]",
        }
    }
}

/// Counters collected while rendering one tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes whose line was emitted as the expanded occurrence (roots included).
    pub expanded: usize,
    pub back_references: usize,
    pub deferred: usize,
    pub circular: usize,
    pub truncated: usize,
    /// Edge endpoints absent from the catalog that were skipped.
    pub missing_references: usize,
    /// Assembly sub-trees nested under projects.
    pub assembly_subtrees: usize,
}

impl TreeStats {
    pub fn merge(&mut self, other: &TreeStats) {
        self.expanded += other.expanded;
        self.back_references += other.back_references;
        self.deferred += other.deferred;
        self.circular += other.circular;
        self.truncated += other.truncated;
        self.missing_references += other.missing_references;
        self.assembly_subtrees += other.assembly_subtrees;
    }
}

/// The rendered tree of one root.
#[derive(Debug, Clone)]
pub struct RenderedTree {
    pub root: NodeId,
    pub root_name: String,
    pub root_path: String,
    pub lines: Vec<String>,
    pub stats: TreeStats,
    /// Every project-graph node reachable from the root, at any depth.
    pub reached: HashSet<NodeId>,
}

impl RenderedTree {
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Mutable state of one walk over one graph.
struct Walk<'g> {
    depths: DepthTable,
    /// Ids on the current root-to-node path.
    path: HashSet<&'g str>,
    /// Ids already expanded anywhere in this walk.
    shown: HashSet<&'g str>,
}

/// A node whose children are still being emitted.
struct Frame<'g> {
    node: &'g Node,
    depth: usize,
    /// Prefix of the children's lines.
    prefix: String,
    children: std::vec::IntoIter<&'g Node>,
}

#[derive(Default)]
struct Sink {
    lines: Vec<String>,
    stats: TreeStats,
}

impl Sink {
    fn emit(&mut self, head: &str, label: &str, annotation: Option<Annotation>) {
        let line = match annotation {
            Some(annotation) => format!("{head}{label} {}", annotation.marker()),
            None => format!("{head}{label}"),
        };
        self.lines.push(line);
        match annotation {
            None => self.stats.expanded += 1,
            Some(Annotation::Circular) => self.stats.circular += 1,
            Some(Annotation::BackReference) => self.stats.back_references += 1,
            Some(Annotation::Deferred) => self.stats.deferred += 1,
            Some(Annotation::MaxDepth) => {
                self.stats.expanded += 1;
                self.stats.truncated += 1;
            }
        }
    }
}

fn branch(last: bool) -> &'static str {
    if last { LAST_BRANCH } else { BRANCH }
}

fn indent(last: bool) -> &'static str {
    if last { BLANK_INDENT } else { PIPE_INDENT }
}

/// Renders trees over one graph snapshot with fixed options.
///
/// Holds no per-walk state, so one renderer can serve several roots at once.
pub struct TreeRenderer<'g> {
    graph: &'g DependencyGraph,
    options: &'g RenderOptions,
}

impl<'g> TreeRenderer<'g> {
    pub fn new(graph: &'g DependencyGraph, options: &'g RenderOptions) -> Self {
        Self { graph, options }
    }

    /// Render the project-level tree rooted at `root`. Returns `None` when the
    /// root is not in the catalog.
    pub fn render(&self, root: &str) -> Option<RenderedTree> {
        let node = self.graph.node(root)?;
        let mut sink = Sink::default();
        let depths =
            self.render_subtree(node, node.name(), GraphKind::Project, "", "", &mut sink);
        let reached = depths.iter().map(|(id, _)| id.clone()).collect();

        debug!(
            root = node.name(),
            lines = sink.lines.len(),
            expanded = sink.stats.expanded,
            "tree rendered"
        );

        Some(RenderedTree {
            root: node.id().clone(),
            root_name: node.name().to_string(),
            root_path: node.path().to_string(),
            lines: sink.lines,
            stats: sink.stats,
            reached,
        })
    }

    /// Emit `label` after `head`, then `root`'s children under `prefix`, with
    /// path, dedup and depth state private to this sub-tree. Returns the depth
    /// table the walk used.
    ///
    /// The walk keeps an explicit stack of frames, so chain length is bounded
    /// by memory rather than by the thread stack.
    fn render_subtree(
        &self,
        root: &'g Node,
        label: &str,
        graph: GraphKind,
        head: &str,
        prefix: &str,
        sink: &mut Sink,
    ) -> DepthTable {
        let id = root.id().as_str();
        let mut walk = Walk {
            depths: shallowest_depths(self.graph.edges(), root.id(), graph),
            path: HashSet::from([id]),
            shown: HashSet::from([id]),
        };

        sink.emit(head, label, self.truncation(root, 0, graph));
        let mut stack = vec![self.open(root, 0, prefix.to_string(), graph, sink)];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.next() else {
                if let Some(done) = stack.pop() {
                    walk.path.remove(done.node.id().as_str());
                }
                continue;
            };
            let last = frame.children.len() == 0;
            let depth = frame.depth + 1;
            let head = format!("{}{}", frame.prefix, branch(last));
            let child_prefix = format!("{}{}", frame.prefix, indent(last));
            let id = child.id().as_str();

            let seen = if walk.path.contains(id) {
                Some(Annotation::Circular)
            } else if walk.shown.contains(id) {
                Some(Annotation::BackReference)
            } else if walk.depths.get(id) != Some(depth) {
                Some(Annotation::Deferred)
            } else {
                None
            };
            if seen.is_some() {
                sink.emit(&head, child.name(), seen);
                continue;
            }

            walk.shown.insert(id);
            sink.emit(&head, child.name(), self.truncation(child, depth, graph));
            walk.path.insert(id);
            stack.push(self.open(child, depth, child_prefix, graph, sink));
        }

        walk.depths
    }

    /// Emit `node`'s nested assembly block, if any, and return the frame over
    /// its own children. A node at the depth limit gets neither.
    fn open(
        &self,
        node: &'g Node,
        depth: usize,
        prefix: String,
        graph: GraphKind,
        sink: &mut Sink,
    ) -> Frame<'g> {
        if depth >= self.options.max_depth {
            return Frame {
                node,
                depth,
                prefix,
                children: Vec::new().into_iter(),
            };
        }

        let children = self.children(node, graph, sink);
        if let Some(assembly) = self.nested_assembly(node, graph) {
            let last = children.is_empty();
            let label = format!(
                "[assembly] {}",
                assembly.output_file().unwrap_or(assembly.name())
            );
            sink.stats.assembly_subtrees += 1;
            self.render_subtree(
                assembly,
                &label,
                GraphKind::Assembly,
                &format!("{prefix}{}", branch(last)),
                &format!("{prefix}{}", indent(last)),
                sink,
            );
        }

        Frame {
            node,
            depth,
            prefix,
            children: children.into_iter(),
        }
    }

    /// Resolved direct successors in display order. Ids missing from the
    /// catalog are skipped.
    fn children(&self, node: &Node, graph: GraphKind, sink: &mut Sink) -> Vec<&'g Node> {
        let mut children = Vec::new();
        for id in self.graph.edges().adjacency(node.id().as_str(), graph) {
            match self.graph.node(id.as_str()) {
                Some(child) => children.push(child),
                None => {
                    debug!(from = node.name(), missing = %id, "skipping unknown reference");
                    sink.stats.missing_references += 1;
                }
            }
        }
        children.sort_by(|a, b| compare_display(a, b));
        children
    }

    /// `MaxDepth` when `node` sits at the limit and would otherwise show
    /// children, its nested assembly block included.
    fn truncation(&self, node: &Node, depth: usize, graph: GraphKind) -> Option<Annotation> {
        if depth < self.options.max_depth {
            return None;
        }
        let has_children = self
            .graph
            .edges()
            .adjacency(node.id().as_str(), graph)
            .iter()
            .any(|id| self.graph.catalog().contains(id.as_str()))
            || self.nested_assembly(node, graph).is_some();
        has_children.then_some(Annotation::MaxDepth)
    }

    fn nested_assembly(&self, node: &Node, graph: GraphKind) -> Option<&'g Node> {
        if !self.options.include_assembly_dependencies
            || graph != GraphKind::Project
            || !node.is_kind(NodeKind::Project)
        {
            return None;
        }
        self.graph.assembly_of(node.id().as_str())
    }
}
