//! Read-only traversal over a sealed chain.

use crate::error::{Error, Result, VisitError};
use crate::node::{MessageRef, Node, NodeId, NodeRef};

/// Read-only view of a finalized, balanced chain.
///
/// Obtained from [`Tracer::as_traversable`](crate::Tracer::as_traversable).
#[derive(Debug, Clone, Copy)]
pub struct Traversable<'a> {
    chain: &'a [Node],
}

impl<'a> Traversable<'a> {
    pub(crate) fn new(chain: &'a [Node]) -> Self {
        Self { chain }
    }

    /// Number of nodes, root Enter and Exit included.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// A sealed chain always holds at least the root Enter and Exit.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Nodes in append order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let chain = self.chain;
        (0..chain.len()).map(move |at| NodeRef::new(chain, NodeId(at)))
    }

    /// Visit every node in append order.
    ///
    /// The first visitor error stops the walk and is returned wrapped in
    /// [`Error::Walk`] with the position of the failing node.
    ///
    /// ```
    /// use calltrace_core::Tracer;
    ///
    /// let mut tracer = Tracer::new();
    /// tracer.message("hi");
    /// tracer.finalize();
    ///
    /// let mut names = Vec::new();
    /// tracer
    ///     .as_traversable()
    ///     .unwrap()
    ///     .for_each(|node| {
    ///         names.push(node.to_string());
    ///         Ok::<(), std::convert::Infallible>(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(names, vec!["<START>", " hi", "<END>"]);
    /// ```
    pub fn for_each<F, E>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeRef<'a>) -> std::result::Result<(), E>,
        E: Into<VisitError>,
    {
        for node in self.iter() {
            visit(node).map_err(|e| Error::Walk {
                position: node.id().index(),
                source: e.into(),
            })?;
        }
        Ok(())
    }

    /// Every message in chain order.
    pub fn messages(&self) -> Vec<MessageRef<'a>> {
        self.iter().filter_map(|node| node.as_message()).collect()
    }
}
