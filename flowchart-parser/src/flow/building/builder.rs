//! Graph Builder
//!
//!     Consumes classified lines in order and grows the graph. All parse state lives in one
//!     [FlowState] value and every line is a single transition from the old state to the new
//!     one, so the cursor, the open condition and the nesting stack can never disagree.
//!
//! States
//!
//!     Empty           nothing emitted yet; the next node gets no incoming edge
//!     Sequential      `last` is the cursor on the main line, `depth` its indentation
//!     AwaitingMerge   a condition is open; its branch heads pile up until the next
//!                     non-branch line, which receives an edge from every one of them
//!     Nested          indented groups hang off `root` (indented `root_depth`); each frame
//!                     remembers its entry node
//!                     and the tails that must feed the group's join node
//!
//! Nested Groups
//!
//!     A run of deeper lines under a step is a group of parallel sub-steps. Each child gets an
//!     edge from the group's entry node and an id scoped under it (`2.1`, `2.2`). When
//!     indentation comes back out, a join node (`2.3`) is synthesized and every tail of the
//!     group is wired into it. The join then takes the place of the entry: on the main line it
//!     becomes the cursor, inside an outer group it becomes one of that group's tails.

use super::graph::{Edge, Graph, Node, Shape};
use super::ids::NodeId;
use crate::flow::error::{ConvertError, MalformedReason};
use crate::flow::lexing::{ClassifiedLine, ClassifyContext, LineKind};
use tracing::debug;

/// Default label of synthesized join nodes (renders as an empty box)
pub const DEFAULT_JOIN_LABEL: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Branch {
    node: NodeId,
    label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    entry: NodeId,
    depth: usize,
    tails: Vec<NodeId>,
    last_child: Option<NodeId>,
    next_ordinal: usize,
}

impl Frame {
    fn new(entry: NodeId, depth: usize) -> Self {
        Frame {
            entry,
            depth,
            tails: Vec::new(),
            last_child: None,
            next_ordinal: 1,
        }
    }

    fn next_child_id(&mut self) -> NodeId {
        let id = self.entry.child(self.next_ordinal);
        self.next_ordinal += 1;
        id
    }

    /// Node a deeper group opened inside this frame hangs from
    fn anchor(&self) -> NodeId {
        self.last_child.clone().unwrap_or_else(|| self.entry.clone())
    }

    /// Replace a closed inner group's entry by that group's join
    fn adopt(&mut self, entry: &NodeId, join: NodeId) {
        match self.tails.iter_mut().find(|t| *t == entry) {
            Some(tail) => *tail = join.clone(),
            None => self.tails.push(join.clone()),
        }
        self.last_child = Some(join);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    Empty,
    Sequential {
        last: NodeId,
        depth: usize,
    },
    AwaitingMerge {
        condition: NodeId,
        depth: usize,
        branches: Vec<Branch>,
    },
    Nested {
        root: NodeId,
        root_depth: usize,
        frames: Vec<Frame>,
    },
}

/// Where the next main-line node gets its incoming edges from
enum Predecessor {
    None,
    Node(NodeId),
    Branches(Vec<Branch>),
}

/// The build context of one conversion: id counter, graph and parse state.
///
/// Nothing is shared between builders, so independent conversions can run in parallel.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    graph: Graph,
    counter: usize,
    state: FlowState,
    join_label: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            graph: Graph::new(),
            counter: 0,
            state: FlowState::Empty,
            join_label: DEFAULT_JOIN_LABEL.to_string(),
        }
    }

    pub fn with_join_label(mut self, label: impl Into<String>) -> Self {
        self.join_label = label.into();
        self
    }

    /// The parse state the classifier needs for the next line
    pub fn classify_context(&self) -> ClassifyContext {
        match &self.state {
            FlowState::AwaitingMerge { depth, .. } => ClassifyContext {
                open_condition: Some(*depth),
            },
            _ => ClassifyContext::default(),
        }
    }

    /// Apply one classified line.
    pub fn process(&mut self, line: ClassifiedLine) -> Result<(), ConvertError> {
        let state = std::mem::replace(&mut self.state, FlowState::Empty);

        self.state = match (state, line.kind) {
            (state, LineKind::Condition { text }) => {
                let id = self.main_line_node(state, Shape::Decision, text);
                debug!(line = line.number, node = %id, "condition opened");
                FlowState::AwaitingMerge {
                    condition: id,
                    depth: line.depth,
                    branches: Vec::new(),
                }
            }
            (
                FlowState::AwaitingMerge {
                    condition,
                    depth,
                    mut branches,
                },
                LineKind::Branch { label, text },
            ) => {
                let id = self.next_top();
                self.graph.push_node(Node::process(id.clone(), text));
                self.graph
                    .push_edge(Edge::new(condition.clone(), id.clone()).with_label(label.clone()));
                debug!(line = line.number, node = %id, %label, "branch added");
                branches.push(Branch { node: id, label });
                FlowState::AwaitingMerge {
                    condition,
                    depth,
                    branches,
                }
            }
            (state, LineKind::Branch { label, text }) => {
                self.state = state;
                return Err(ConvertError::malformed(
                    line.number,
                    format!("{} {}", label, text),
                    MalformedReason::BranchWithoutCondition,
                ));
            }
            // A group opens only when indentation increases past the main-line node.
            (
                FlowState::Sequential { last, depth: base },
                LineKind::NestedStep { text, depth },
            ) if depth > base => self.nest(last, base, Vec::new(), text, depth),
            (
                FlowState::Nested {
                    root,
                    root_depth,
                    frames,
                },
                LineKind::NestedStep { text, depth },
            ) if depth > root_depth => self.nest(root, root_depth, frames, text, depth),
            // A nested line with nothing to hang from, at the main line's own indentation or
            // under an unresolved condition is an ordinary main-line step.
            (state, LineKind::NestedStep { text, .. } | LineKind::Step { text }) => {
                let id = self.main_line_node(state, Shape::Process, text);
                debug!(line = line.number, node = %id, "step added");
                FlowState::Sequential {
                    last: id,
                    depth: line.depth,
                }
            }
        };

        Ok(())
    }

    /// Close whatever is still open and hand over the graph.
    ///
    /// Open nested groups get their join node. Open branches stay as leaves.
    pub fn finish(mut self) -> Graph {
        let state = std::mem::replace(&mut self.state, FlowState::Empty);
        if let FlowState::Nested { root, frames, .. } = state {
            self.close_groups(root, frames);
        }
        self.graph
    }

    fn next_top(&mut self) -> NodeId {
        self.counter += 1;
        NodeId::top(self.counter)
    }

    /// Settle the previous state, then append a node to the main line and link it.
    fn main_line_node(&mut self, state: FlowState, shape: Shape, text: String) -> NodeId {
        // Join nodes must exist before the node they feed.
        let predecessor = self.settle(state);
        let id = self.next_top();
        self.graph.push_node(Node {
            id: id.clone(),
            label: text,
            shape,
        });

        match predecessor {
            Predecessor::None => {}
            Predecessor::Node(from) => self.graph.push_edge(Edge::new(from, id.clone())),
            Predecessor::Branches(branches) => {
                for branch in branches {
                    self.graph.push_edge(
                        Edge::new(branch.node, id.clone()).with_guard(branch.label),
                    );
                }
            }
        }
        id
    }

    fn settle(&mut self, state: FlowState) -> Predecessor {
        match state {
            FlowState::Empty => Predecessor::None,
            FlowState::Sequential { last, .. } => Predecessor::Node(last),
            FlowState::AwaitingMerge {
                condition,
                branches,
                ..
            } => {
                if branches.is_empty() {
                    Predecessor::Node(condition)
                } else {
                    Predecessor::Branches(branches)
                }
            }
            FlowState::Nested { root, frames, .. } => {
                Predecessor::Node(self.close_groups(root, frames))
            }
        }
    }

    fn nest(
        &mut self,
        root: NodeId,
        root_depth: usize,
        mut frames: Vec<Frame>,
        text: String,
        depth: usize,
    ) -> FlowState {
        let keep = frames.iter().take_while(|f| f.depth <= depth).count();
        let root = self.close_frames(&mut frames, keep).unwrap_or(root);

        let opens_group = frames.last().map_or(true, |top| top.depth < depth);
        if opens_group {
            let entry = frames.last().map_or_else(|| root.clone(), Frame::anchor);
            debug!(entry = %entry, depth, "nested group opened");
            frames.push(Frame::new(entry, depth));
        }

        let top = frames.len() - 1;
        let id = frames[top].next_child_id();
        self.graph.push_node(Node::process(id.clone(), text));
        self.graph
            .push_edge(Edge::new(frames[top].entry.clone(), id.clone()));
        frames[top].tails.push(id.clone());
        frames[top].last_child = Some(id);

        FlowState::Nested {
            root,
            root_depth,
            frames,
        }
    }

    /// Close every group and return the node the main line continues from.
    fn close_groups(&mut self, root: NodeId, mut frames: Vec<Frame>) -> NodeId {
        self.close_frames(&mut frames, 0).unwrap_or(root)
    }

    /// Close groups until `keep` remain. Returns the outermost join if every group closed.
    fn close_frames(&mut self, frames: &mut Vec<Frame>, keep: usize) -> Option<NodeId> {
        let mut outer_join = None;
        while frames.len() > keep {
            let Some(mut frame) = frames.pop() else {
                break;
            };
            let join = frame.next_child_id();
            self.graph
                .push_node(Node::process(join.clone(), self.join_label.clone()));
            for tail in &frame.tails {
                self.graph.push_edge(Edge::new(tail.clone(), join.clone()));
            }
            debug!(entry = %frame.entry, join = %join, "nested group closed");

            match frames.last_mut() {
                Some(parent) => parent.adopt(&frame.entry, join),
                None => outer_join = Some(join),
            }
        }
        outer_join
    }
}
