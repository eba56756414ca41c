//! The trace engine.
//!
//! A [`Tracer`] owns an append-only chain that starts with the implicit root
//! Enter. Callers bracket scopes with [`Tracer::enter`] / [`Tracer::exit`]
//! (or the [`Scope`] guard), record messages in between, and seal the chain
//! with [`Tracer::finalize`]. Only a sealed, balanced chain can be traversed.
//!
//! ## Lifecycle
//!
//! ```text
//! new()  ->  enter/exit/message ...  ->  finalize()  ->  as_traversable()/messages()
//! ```
//!
//! ## Thread Safety
//!
//! A tracer follows one logical call sequence. It has no internal
//! synchronization; callers must not drive the same tracer from several
//! threads of control.

use std::fmt::Display;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::node::{Enter, Exit, Message, MessageRef, Node, NodeId, NodeRef, END_NODE, START_NODE};
use crate::payload::render_parts;
use crate::traverse::Traversable;

/// Source of per-engine ids, used to reject tokens from other tracers.
static NEXT_TRACER_ID: AtomicU64 = AtomicU64::new(1);

/// Capability for closing a scope, returned by [`Tracer::enter`].
///
/// Not `Clone`: a token is redeemed at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an exit token must be passed back to Tracer::exit to close its scope"]
pub struct ExitToken {
    tracer: u64,
    enter: NodeId,
}

impl ExitToken {
    /// Position of the Enter this token closes.
    pub fn enter(&self) -> NodeId {
        self.enter
    }
}

/// Builder for [`Tracer`].
///
/// ```
/// use calltrace_core::Tracer;
///
/// let tracer = Tracer::builder().capacity(64).log_events(true).build();
/// assert_eq!(tracer.depth(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TracerBuilder {
    capacity: usize,
    log_events: bool,
}

impl TracerBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the chain for this many nodes.
    pub fn capacity(mut self, nodes: usize) -> Self {
        self.capacity = nodes;
        self
    }

    /// Emit a `tracing` event for every enter, exit and message.
    ///
    /// Off by default.
    pub fn log_events(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    /// Build the tracer. Its chain holds only the root Enter.
    pub fn build(self) -> Tracer {
        let mut chain = Vec::with_capacity(self.capacity.max(2));
        chain.push(Node::Enter(Enter {
            name: START_NODE.to_string(),
            parent: None,
        }));
        Tracer {
            id: NEXT_TRACER_ID.fetch_add(1, Ordering::Relaxed),
            chain,
            current: NodeId::ROOT,
            open: 0,
            unclosed: None,
            finalized: false,
            log_events: self.log_events,
        }
    }
}

/// Manual call-stack tracer.
#[derive(Debug)]
pub struct Tracer {
    id: u64,
    chain: Vec<Node>,
    /// Innermost open Enter
    current: NodeId,
    /// Scopes entered but not yet exited
    open: usize,
    /// Innermost scope still open when the root was closed
    unclosed: Option<NodeId>,
    finalized: bool,
    log_events: bool,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer {
    /// Create a tracer with default settings.
    pub fn new() -> Self {
        TracerBuilder::new().build()
    }

    /// Create a builder for tracer configuration.
    pub fn builder() -> TracerBuilder {
        TracerBuilder::new()
    }

    /// Process-unique id of this tracer.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Enter a named scope.
    ///
    /// The new scope's parent is the current scope, and the new scope
    /// becomes current. The returned token must be handed back to
    /// [`exit`](Self::exit) to close it.
    ///
    /// # Panics
    ///
    /// If the tracer has been finalized.
    pub fn enter(&mut self, name: impl Into<String>) -> ExitToken {
        self.assert_open("enter");
        let name = name.into();
        if self.log_events {
            debug!(tracer = self.id, scope = %name, depth = self.open + 1, "> entering");
        }
        let id = self.push(Node::Enter(Enter {
            name,
            parent: Some(self.current),
        }));
        self.current = id;
        self.open += 1;
        ExitToken {
            tracer: self.id,
            enter: id,
        }
    }

    /// Close the scope `token` was issued for.
    ///
    /// The current scope goes back to the one the closed scope was entered
    /// from.
    ///
    /// # Panics
    ///
    /// If the token was issued by another tracer, if its scope is not the
    /// innermost open scope, or if the tracer has been finalized.
    pub fn exit(&mut self, token: ExitToken) {
        self.assert_open("exit");
        assert_eq!(
            token.tracer, self.id,
            "exit token from tracer {} presented to tracer {}",
            token.tracer, self.id
        );
        assert_eq!(
            token.enter,
            self.current,
            "exit out of order: token closes {} but the innermost open scope is {}",
            self.display(token.enter),
            self.display(self.current),
        );
        let (name, parent) = match &self.chain[token.enter.0] {
            Node::Enter(enter) => (enter.name.clone(), enter.parent),
            other => panic!("exit token points at a {:?} node", other.kind()),
        };
        if self.log_events {
            debug!(tracer = self.id, scope = %name, depth = self.open, "< exiting");
        }
        self.push(Node::Exit(Exit {
            name,
            enter: token.enter,
        }));
        self.current = parent.unwrap_or(NodeId::ROOT);
        self.open -= 1;
    }

    /// Enter a scope and close it when the returned guard drops.
    ///
    /// The guard dereferences to the tracer, so messages and nested scopes
    /// are recorded through it.
    ///
    /// ```
    /// use calltrace_core::Tracer;
    ///
    /// let mut tracer = Tracer::new();
    /// {
    ///     let mut outer = tracer.scope("outer");
    ///     outer.message("hello");
    ///     let _inner = outer.scope("inner");
    /// }
    /// tracer.finalize();
    /// assert_eq!(tracer.depth(), 7);
    /// ```
    pub fn scope(&mut self, name: impl Into<String>) -> Scope<'_> {
        let token = self.enter(name);
        Scope {
            tracer: self,
            token: Some(token),
        }
    }

    /// Record a message in the current scope.
    ///
    /// # Panics
    ///
    /// If the tracer has been finalized.
    pub fn message(&mut self, payload: impl Display) {
        self.record(payload.to_string());
    }

    /// Record a message produced by `payload`, evaluated now.
    pub fn message_with<F>(&mut self, payload: F)
    where
        F: FnOnce() -> String,
    {
        self.record(payload());
    }

    /// Record a message built from several parts.
    ///
    /// See [`render_parts`](crate::payload::render_parts) for the joining
    /// rules. The [`message!`](crate::message!) macro calls this.
    pub fn message_parts(&mut self, parts: &[&dyn Display]) {
        self.record(render_parts(parts));
    }

    /// Close the root scope, sealing the chain.
    ///
    /// Scopes still open at this point make the chain unbalanced: it is
    /// sealed anyway, but [`as_traversable`](Self::as_traversable) will
    /// report [`Error::NotRootExit`].
    ///
    /// # Panics
    ///
    /// If called more than once.
    pub fn finalize(&mut self) {
        assert!(!self.finalized, "tracer {} finalized twice", self.id);
        if self.open > 0 {
            warn!(
                tracer = self.id,
                open = self.open,
                innermost = %self.display(self.current),
                "finalizing with open scopes"
            );
            self.unclosed = Some(self.current);
        } else if self.log_events {
            debug!(tracer = self.id, nodes = self.chain.len() + 1, "finalized");
        }
        self.push(Node::Exit(Exit {
            name: END_NODE.to_string(),
            enter: NodeId::ROOT,
        }));
        self.current = NodeId::ROOT;
        self.finalized = true;
    }

    /// Has [`finalize`](Self::finalize) been called?
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of nodes in the chain, including the root Enter.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// Number of scopes entered but not yet exited.
    pub fn open_scopes(&self) -> usize {
        self.open
    }

    /// Name of the innermost open scope (the root sentinel when none).
    pub fn current_scope(&self) -> &str {
        match &self.chain[self.current.0] {
            Node::Enter(enter) => &enter.name,
            _ => START_NODE,
        }
    }

    /// Read-only traversal over the sealed chain.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFinalized`] before [`finalize`](Self::finalize)
    /// - [`Error::NotRootExit`] if the chain is not closed by the root exit,
    ///   or scopes were left open when it was
    pub fn as_traversable(&self) -> Result<Traversable<'_>> {
        let last = NodeRef::new(&self.chain, NodeId(self.chain.len() - 1));
        if !self.finalized {
            return Err(Error::NotFinalized {
                last: last.to_string(),
            });
        }
        match last.node() {
            Node::Exit(_) if last.is_root_exit() => match self.unclosed {
                Some(open) => Err(Error::NotRootExit {
                    name: self.name_of(open).to_string(),
                }),
                None => Ok(Traversable::new(&self.chain)),
            },
            Node::Exit(exit) => Err(Error::NotRootExit {
                name: exit.name.clone(),
            }),
            _ => Err(Error::NotFinalized {
                last: last.to_string(),
            }),
        }
    }

    /// Every message in chain order.
    ///
    /// # Errors
    ///
    /// The same errors as [`as_traversable`](Self::as_traversable).
    pub fn messages(&self) -> Result<Vec<MessageRef<'_>>> {
        Ok(self.as_traversable()?.messages())
    }

    fn record(&mut self, text: String) {
        self.assert_open("message");
        if self.log_events {
            trace!(tracer = self.id, scope = %self.current_scope(), "messaging");
        }
        self.push(Node::Message(Message {
            text,
            parent: self.current,
        }));
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.chain.len());
        self.chain.push(node);
        id
    }

    fn assert_open(&self, op: &str) {
        assert!(
            !self.finalized,
            "{} on tracer {} after finalize",
            op, self.id
        );
    }

    fn name_of(&self, id: NodeId) -> &str {
        self.chain[id.0].name().unwrap_or_default()
    }

    fn display(&self, id: NodeId) -> String {
        NodeRef::new(&self.chain, id).to_string()
    }
}

/// Guard returned by [`Tracer::scope`]; exits its scope on drop.
#[derive(Debug)]
pub struct Scope<'t> {
    tracer: &'t mut Tracer,
    token: Option<ExitToken>,
}

impl Scope<'_> {
    /// Close the scope now instead of at the end of the block.
    pub fn close(mut self) {
        if let Some(token) = self.token.take() {
            self.tracer.exit(token);
        }
    }
}

impl Deref for Scope<'_> {
    type Target = Tracer;

    fn deref(&self) -> &Tracer {
        self.tracer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Tracer {
        self.tracer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        // don't turn an unwind into an abort
        if std::thread::panicking() {
            return;
        }
        if let Some(token) = self.token.take() {
            self.tracer.exit(token);
        }
    }
}
