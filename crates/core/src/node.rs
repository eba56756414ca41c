//! Chain nodes and borrowed views over them.
//!
//! The chain is a `Vec<Node>` owned by the [`Tracer`](crate::Tracer). Links
//! between nodes are positions into that vector:
//!
//! - `next`/`prev` are the neighbouring positions, fixed at append time
//! - an Enter points at the Enter it was entered from (`parent`)
//! - an Exit points at the Enter it closes
//! - a Message points at the innermost open Enter when it was recorded
//!
//! Because every link points backwards into the same vector, the chain has
//! no cycles of ownership. Anything that needs to follow links (rendering,
//! lineage) goes through a [`NodeRef`] or [`MessageRef`], which pair a node
//! with the chain it lives in.

use std::fmt;

/// Name of the implicit root scope's Enter node.
pub const START_NODE: &str = "<START>";

/// Name of the Exit node that closes the root scope.
pub const END_NODE: &str = "<END>";

/// Position of a node in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the root Enter in every chain.
    pub const ROOT: NodeId = NodeId(0);

    /// Chain position as a plain index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entry into a named scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enter {
    pub(crate) name: String,
    /// Where we are entering from. `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}

impl Enter {
    /// Scope name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Enter this scope was entered from.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Exit from a named scope, paired with its Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub(crate) name: String,
    pub(crate) enter: NodeId,
}

impl Exit {
    /// Scope name, identical to the paired Enter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Enter this exit closes.
    pub fn enter(&self) -> NodeId {
        self.enter
    }
}

/// Free-text message recorded inside a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub(crate) text: String,
    pub(crate) parent: NodeId,
}

impl Message {
    /// Message payload.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The innermost open Enter at the time the message was recorded.
    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

/// A chain node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Scope entry
    Enter(Enter),
    /// Scope exit
    Exit(Exit),
    /// Message
    Message(Message),
}

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Scope entry
    Enter,
    /// Scope exit
    Exit,
    /// Message
    Message,
}

impl Node {
    /// Get the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Enter(_) => NodeKind::Enter,
            Node::Exit(_) => NodeKind::Exit,
            Node::Message(_) => NodeKind::Message,
        }
    }

    /// Scope name for Enter and Exit nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Enter(n) => Some(n.name()),
            Node::Exit(n) => Some(n.name()),
            Node::Message(_) => None,
        }
    }
}

/// A node borrowed together with the chain it belongs to.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    chain: &'a [Node],
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(chain: &'a [Node], id: NodeId) -> Self {
        debug_assert!(id.0 < chain.len());
        Self { chain, id }
    }

    /// Position of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The underlying node.
    pub fn node(&self) -> &'a Node {
        &self.chain[self.id.0]
    }

    /// Kind of the underlying node.
    pub fn kind(&self) -> NodeKind {
        self.node().kind()
    }

    /// Scope name for Enter and Exit nodes.
    pub fn name(&self) -> Option<&'a str> {
        self.node().name()
    }

    /// Following node in append order.
    pub fn next(&self) -> Option<NodeRef<'a>> {
        let next = self.id.0 + 1;
        (next < self.chain.len()).then(|| NodeRef::new(self.chain, NodeId(next)))
    }

    /// Preceding node in append order.
    pub fn prev(&self) -> Option<NodeRef<'a>> {
        self.id
            .0
            .checked_sub(1)
            .map(|prev| NodeRef::new(self.chain, NodeId(prev)))
    }

    /// Is this the implicit root Enter?
    pub fn is_root_enter(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Is this the Exit that closes the root scope?
    pub fn is_root_exit(&self) -> bool {
        matches!(self.node(), Node::Exit(exit) if exit.enter == NodeId::ROOT)
    }

    /// View this node as a message, if it is one.
    pub fn as_message(&self) -> Option<MessageRef<'a>> {
        match self.node() {
            Node::Message(message) => Some(MessageRef {
                chain: self.chain,
                message,
            }),
            _ => None,
        }
    }

    fn enter_at(&self, id: NodeId) -> &'a Enter {
        enter_at(self.chain, id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", self.node())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Enter(enter) => {
                if let Some(parent) = enter.parent {
                    write!(f, "{} -> ", self.enter_at(parent).name)?;
                }
                f.write_str(&enter.name)
            }
            Node::Exit(exit) => {
                // we return to the scope the closed Enter was entered from
                if let Some(outer) = self.enter_at(exit.enter).parent {
                    write!(f, "{} <- ", self.enter_at(outer).name)?;
                }
                f.write_str(&exit.name)
            }
            Node::Message(_) => match self.as_message() {
                Some(message) => fmt::Display::fmt(&message, f),
                None => Ok(()),
            },
        }
    }
}

/// A message borrowed together with its chain, so its lineage can be walked.
#[derive(Clone, Copy)]
pub struct MessageRef<'a> {
    chain: &'a [Node],
    message: &'a Message,
}

impl<'a> MessageRef<'a> {
    /// Message payload.
    pub fn text(&self) -> &'a str {
        &self.message.text
    }

    /// The innermost open Enter at the time the message was recorded.
    pub fn parent(&self) -> NodeId {
        self.message.parent
    }

    /// Enclosing scope names, innermost first, excluding the root.
    ///
    /// Uninstrumented intermediate calls do not appear here: a message
    /// recorded from a helper that never entered a scope shares the lineage
    /// of its nearest instrumented caller.
    pub fn stack(&self) -> Vec<&'a str> {
        let mut stack = Vec::new();
        let mut cursor = Some(self.message.parent);
        while let Some(id) = cursor {
            if id == NodeId::ROOT {
                break;
            }
            let enter = enter_at(self.chain, id);
            stack.push(enter.name.as_str());
            cursor = enter.parent;
        }
        stack
    }
}

impl fmt::Debug for MessageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageRef")
            .field("text", &self.message.text)
            .field("stack", &self.stack())
            .finish()
    }
}

impl fmt::Display for MessageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.stack().iter().rev() {
            write!(f, "{}:", name)?;
        }
        write!(f, " {}", self.message.text)
    }
}

// Parent links are only ever created by the tracer and always point at an
// earlier Enter, so a miss here means the chain was built by something else.
fn enter_at(chain: &[Node], id: NodeId) -> &Enter {
    match &chain[id.0] {
        Node::Enter(enter) => enter,
        other => panic!("chain corrupted: {} is a {:?}, not an enter", id, other.kind()),
    }
}
