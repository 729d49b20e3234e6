//! Freeze-and-index: the one-way transition from builder to frozen tree.
//!
//! Link resolution walks depth-first from every socket through pass-through
//! nodes. Walks keep a three-state mark per socket: `Active` for sockets on
//! the current walk stack, `Done` for sockets already visited. Reaching a
//! pass-through node whose forwarded side is still `Active` means the chain
//! loops back on itself; any other revisit means two routes lead to the same
//! producer, which is reported once.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::arena::{Arena, Span};
use crate::error::GraphError;
use crate::multimap::MultiMap;
use crate::options::{CyclePolicy, FreezeOptions};

use super::builder::{PendingSocket, TreeBuilder};
use super::link::LinkData;
use super::node::{NodeData, NodeId};
use super::snapshot::VirtualTree;
use super::socket::{SocketData, SocketDirection, SocketHandle, SocketId};

impl<'a> TreeBuilder<'a> {
    /// Freezes the tree with [`FreezeOptions::default()`].
    ///
    /// See [`freeze_and_index_with()`](Self::freeze_and_index_with).
    pub fn freeze_and_index(self) -> Result<VirtualTree<'a>, GraphError> {
        self.freeze_and_index_with(&FreezeOptions::default())
    }

    /// Consumes the builder and computes every index of the frozen tree.
    ///
    /// Assigns dense socket ids (node order, inputs before outputs), records
    /// direct links, resolves links through pass-through nodes, collects the
    /// linked inputs and builds the idname multimap.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::PassThroughCycle`] if resolution meets a cycle of
    /// pass-through nodes and `options.cycle_policy` is
    /// [`CyclePolicy::Reject`]. With [`CyclePolicy::Truncate`] this never
    /// fails.
    pub fn freeze_and_index_with(
        self,
        options: &FreezeOptions,
    ) -> Result<VirtualTree<'a>, GraphError> {
        let TreeBuilder {
            nodes: pending_nodes,
            sockets: pending_sockets,
            links: pending_links,
        } = self;

        // Dense socket ids, node by node.
        let mut nodes: Arena<NodeId, NodeData<'a>> = Arena::with_capacity(pending_nodes.len());
        let mut sockets: Arena<SocketId, SocketData<'a>> =
            Arena::with_capacity(pending_sockets.len());
        let mut remap = vec![SocketId(u32::MAX); pending_sockets.len()];
        for pending in pending_nodes.iter() {
            let inputs = assign_ids(&mut sockets, &pending_sockets, pending.inputs, &mut remap);
            let outputs = assign_ids(&mut sockets, &pending_sockets, pending.outputs, &mut remap);
            let pass_through =
                inputs.len() == 1 && options.is_pass_through_idname(&pending.authoring.idname);
            nodes.alloc(NodeData {
                authoring: pending.authoring,
                inputs,
                outputs,
                pass_through,
            });
        }
        debug_assert_eq!(sockets.len(), pending_sockets.len());

        // Direct links in both directions.
        let mut links = Arena::with_capacity(pending_links.len());
        let mut direct: Vec<Vec<SocketId>> = vec![Vec::new(); sockets.len()];
        for link in pending_links.iter() {
            let from = remap[link.from.index()];
            let to = remap[link.to.index()];
            links.alloc(LinkData { from, to });
            direct[to.index()].push(from);
            direct[from.index()].push(to);
        }

        // Resolved links.
        let mut resolver = Resolver::new(
            &direct,
            sockets.as_slice(),
            nodes.as_slice(),
            options.cycle_policy,
        );
        let mut resolved = Vec::with_capacity(sockets.len());
        for index in 0..sockets.len() {
            resolved.push(resolver.resolve(SocketId(index as u32))?);
        }
        let truncated = resolver.into_truncated();

        let direct_pool = flatten(direct, |id, span| sockets[id].direct = span);
        let resolved_pool = flatten(resolved, |id, span| sockets[id].resolved = span);

        let inputs_with_links: Vec<SocketId> = sockets
            .iter_with_ids()
            .filter(|(_, s)| s.direction == SocketDirection::Input && !s.direct.is_empty())
            .map(|(id, _)| id)
            .collect();

        let mut nodes_by_idname = MultiMap::new();
        for (id, node) in nodes.iter_with_ids() {
            let authoring = node.authoring;
            nodes_by_idname.add(authoring.idname.as_str(), id);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "tree_freeze: {} nodes, {} sockets, {} links, {} linked inputs, {} idnames",
            nodes.len(),
            sockets.len(),
            links.len(),
            inputs_with_links.len(),
            nodes_by_idname.key_count()
        );

        Ok(VirtualTree {
            nodes,
            sockets,
            links,
            direct_pool,
            resolved_pool,
            inputs_with_links,
            nodes_by_idname,
            truncated,
        })
    }
}

/// Moves the pending sockets in `handles` into the frozen arena, in order.
fn assign_ids<'a>(
    sockets: &mut Arena<SocketId, SocketData<'a>>,
    pending: &Arena<SocketHandle, PendingSocket<'a>>,
    handles: Span,
    remap: &mut [SocketId],
) -> Span {
    let start = sockets.next_id().0;
    for raw in handles.positions() {
        let handle = SocketHandle(raw);
        let socket = &pending[handle];
        let id = sockets.alloc(SocketData {
            node: socket.node,
            direction: socket.direction,
            index: socket.index,
            authoring: socket.authoring,
            direct: Span::EMPTY,
            resolved: Span::EMPTY,
        });
        remap[handle.index()] = id;
    }
    Span::new(start, handles.len() as u32)
}

/// Concatenates per-socket lists into one pool, reporting each socket's span.
fn flatten(lists: Vec<Vec<SocketId>>, mut assign: impl FnMut(SocketId, Span)) -> Vec<SocketId> {
    let total = lists.iter().map(Vec::len).sum();
    let mut pool = Vec::with_capacity(total);
    for (index, list) in lists.into_iter().enumerate() {
        let span = Span::new(pool.len() as u32, list.len() as u32);
        pool.extend(list);
        assign(SocketId(index as u32), span);
    }
    pool
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Clear,
    Active,
    Done,
}

/// Reusable state for resolution walks; marks are reset after every walk.
struct Resolver<'r, 'a> {
    direct: &'r [Vec<SocketId>],
    sockets: &'r [SocketData<'a>],
    nodes: &'r [NodeData<'a>],
    policy: CyclePolicy,
    marks: Vec<Mark>,
    touched: Vec<SocketId>,
    /// `(socket, next neighbor to visit)` frames.
    stack: Vec<(SocketId, usize)>,
    truncated: Vec<SocketId>,
}

impl<'r, 'a> Resolver<'r, 'a> {
    fn new(
        direct: &'r [Vec<SocketId>],
        sockets: &'r [SocketData<'a>],
        nodes: &'r [NodeData<'a>],
        policy: CyclePolicy,
    ) -> Self {
        Self {
            direct,
            sockets,
            nodes,
            policy,
            marks: vec![Mark::Clear; sockets.len()],
            touched: Vec::new(),
            stack: Vec::new(),
            truncated: Vec::new(),
        }
    }

    /// Effective neighbors of `start`: producers for an input, consumers for
    /// an output, with pass-through nodes skipped. Discovery order, no
    /// duplicates.
    fn resolve(&mut self, start: SocketId) -> Result<Vec<SocketId>, GraphError> {
        let direct = self.direct;
        let sockets = self.sockets;
        let nodes = self.nodes;

        let mut found = Vec::new();
        let mut hit_cycle = false;
        self.mark(start, Mark::Active);
        self.stack.push((start, 0));

        while let Some(top) = self.stack.len().checked_sub(1) {
            let (socket, cursor) = self.stack[top];
            let neighbors = &direct[socket.index()];
            if cursor == neighbors.len() {
                self.marks[socket.index()] = Mark::Done;
                self.stack.pop();
                continue;
            }
            self.stack[top].1 += 1;

            let next = neighbors[cursor];
            if self.marks[next.index()] != Mark::Clear {
                if self.loops_back(next) {
                    self.on_cycle(start)?;
                    hit_cycle = true;
                }
                continue;
            }
            self.mark(next, Mark::Done);

            let next_data = &sockets[next.index()];
            let node = &nodes[next_data.node.index()];
            if !node.pass_through {
                found.push(next);
                continue;
            }

            // A producer output forwards the node's input; a consumer input
            // forwards to all of the node's outputs.
            let forwards = match next_data.direction {
                SocketDirection::Output => node.inputs,
                SocketDirection::Input => node.outputs,
            };
            for raw in forwards.positions().rev() {
                let forward = SocketId(raw);
                match self.marks[forward.index()] {
                    Mark::Clear => {
                        self.mark(forward, Mark::Active);
                        self.stack.push((forward, 0));
                    }
                    Mark::Active => {
                        self.on_cycle(start)?;
                        hit_cycle = true;
                    }
                    Mark::Done => {}
                }
            }
        }

        self.reset();
        if hit_cycle {
            #[cfg(feature = "tracing")]
            tracing::warn!("tree_resolve: pass-through cycle truncated at {start}");
            self.truncated.push(start);
        }
        Ok(found)
    }

    /// Returns true if `socket` sits on a pass-through node whose forwarded
    /// side is still on the walk stack.
    fn loops_back(&self, socket: SocketId) -> bool {
        let data = &self.sockets[socket.index()];
        let node = &self.nodes[data.node.index()];
        if !node.pass_through {
            return false;
        }
        let forwards = match data.direction {
            SocketDirection::Output => node.inputs,
            SocketDirection::Input => node.outputs,
        };
        forwards
            .positions()
            .any(|raw| self.marks[raw as usize] == Mark::Active)
    }

    fn on_cycle(&mut self, start: SocketId) -> Result<(), GraphError> {
        if self.policy == CyclePolicy::Reject {
            self.reset();
            return Err(GraphError::PassThroughCycle { socket: start });
        }
        Ok(())
    }

    fn mark(&mut self, socket: SocketId, mark: Mark) {
        if self.marks[socket.index()] == Mark::Clear {
            self.touched.push(socket);
        }
        self.marks[socket.index()] = mark;
    }

    fn reset(&mut self) {
        for socket in self.touched.drain(..) {
            self.marks[socket.index()] = Mark::Clear;
        }
        self.stack.clear();
    }

    fn into_truncated(self) -> Vec<SocketId> {
        self.truncated
    }
}
