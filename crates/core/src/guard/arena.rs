use super::tracker::{AllocationTracker, LeakReport};
use crate::error::LifecycleError;
use scopemux_api::{AstNode, AstView, NodeId, NodeKind};
use std::sync::atomic::{AtomicU32, Ordering};

const CANARY_LIVE: u64 = 0x5C0F_E11A_CA7A_0001;
const CANARY_FREED: u64 = 0x0000_0000_DEAD_BEEF;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Default, Clone)]
struct Links {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    references: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    canary: u64,
    tag: &'static str,
    bytes: usize,
    node: Option<AstNode>,
    links: Links,
}

impl Slot {
    fn is_live(&self) -> bool {
        self.node.is_some()
    }
}

/// Session-owned registry of every AST node allocated during a parse.
///
/// Nodes are referenced by [`NodeId`]; `children`/`parent`/`references`
/// are handle edges kept here, not in the nodes. Every slot carries a
/// canary checked before destruction, and destroyed slots stay in place
/// so a second destruction is detected instead of touching reused memory.
#[derive(Debug)]
pub struct NodeArena {
    id: u32,
    epoch: u32,
    slots: Vec<Slot>,
    tracker: AllocationTracker,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
            slots: Vec::new(),
            tracker: AllocationTracker::new(),
        }
    }

    /// Registers `node` and returns its handle. The node starts unparented.
    pub fn alloc(&mut self, node: AstNode) -> NodeId {
        let tag = node.kind.as_str();
        let bytes = std::mem::size_of::<AstNode>() + node.heap_size();
        self.tracker.record_alloc(tag, bytes);
        let id = NodeId::new(self.id, self.epoch, self.slots.len() as u32);
        self.slots.push(Slot {
            canary: CANARY_LIVE,
            tag,
            bytes,
            node: Some(node),
            links: Links::default(),
        });
        tracing::trace!(node = %id, kind = tag, "registered AST node");
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot, LifecycleError> {
        if id.arena() != self.id {
            return Err(LifecycleError::ForeignHandle(id));
        }
        if id.epoch() != self.epoch {
            return Err(LifecycleError::StaleHandle(id));
        }
        self.slots
            .get(id.slot())
            .ok_or(LifecycleError::ForeignHandle(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, LifecycleError> {
        self.slot(id)?;
        Ok(&mut self.slots[id.slot()])
    }

    fn live_slot(&self, id: NodeId) -> Result<&Slot, LifecycleError> {
        let slot = self.slot(id)?;
        if !slot.is_live() {
            return Err(LifecycleError::StaleHandle(id));
        }
        Ok(slot)
    }

    /// O(1) liveness check.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.live_slot(id).is_ok()
    }

    pub fn get(&self, id: NodeId) -> Result<&AstNode, LifecycleError> {
        self.live_slot(id)?
            .node
            .as_ref()
            .ok_or(LifecycleError::StaleHandle(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut AstNode, LifecycleError> {
        self.live_slot(id)?;
        self.slots[id.slot()]
            .node
            .as_mut()
            .ok_or(LifecycleError::StaleHandle(id))
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LifecycleError> {
        Ok(self.live_slot(id)?.links.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], LifecycleError> {
        Ok(&self.live_slot(id)?.links.children)
    }

    pub fn references(&self, id: NodeId) -> Result<&[NodeId], LifecycleError> {
        Ok(&self.live_slot(id)?.links.references)
    }

    /// Attaches `child` under `parent`.
    ///
    /// Rejects self-parenting, re-parenting an already-parented node and
    /// attachments that would close a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LifecycleError> {
        self.live_slot(parent)?;
        let child_slot = self.live_slot(child)?;
        if parent == child {
            return Err(LifecycleError::SelfParent(child));
        }
        if let Some(existing) = child_slot.links.parent {
            return Err(LifecycleError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if self.ancestors(parent)?.contains(&child) {
            return Err(LifecycleError::WouldCycle { child, parent });
        }
        self.slots[parent.slot()].links.children.push(child);
        self.slots[child.slot()].links.parent = Some(parent);
        Ok(())
    }

    /// Registers `node` under `parent`. A node that cannot be linked is
    /// released again before the error is returned.
    pub fn alloc_child(&mut self, parent: NodeId, node: AstNode) -> Result<NodeId, LifecycleError> {
        let id = self.alloc(node);
        if let Err(e) = self.add_child(parent, id) {
            if let Err(cleanup) = self.destroy(id) {
                tracing::warn!(node = %id, "unlinked node could not be released: {}", cleanup);
            }
            return Err(e);
        }
        Ok(id)
    }

    /// Records a non-owning edge; references never affect teardown.
    pub fn add_reference(&mut self, from: NodeId, to: NodeId) -> Result<(), LifecycleError> {
        self.live_slot(to)?;
        self.live_slot(from)?;
        self.slots[from.slot()].links.references.push(to);
        Ok(())
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<NodeId>, LifecycleError> {
        let mut out = Vec::new();
        let mut current = self.live_slot(id)?.links.parent;
        while let Some(p) = current {
            out.push(p);
            current = self.live_slot(p)?.links.parent;
        }
        Ok(out)
    }

    /// Unlinks `id` from its parent, leaving it a live detached subtree root.
    pub fn detach(&mut self, id: NodeId) -> Result<(), LifecycleError> {
        let Some(parent) = self.live_slot(id)?.links.parent else {
            return Ok(());
        };
        if let Ok(slot) = self.slot_mut(parent) {
            slot.links.children.retain(|c| *c != id);
        }
        self.slots[id.slot()].links.parent = None;
        Ok(())
    }

    /// Reorders the children of `parent` with a stable sort.
    pub fn sort_children_by_key<K: Ord>(
        &mut self,
        parent: NodeId,
        mut key: impl FnMut(&AstNode) -> K,
    ) -> Result<(), LifecycleError> {
        let children = self.children(parent)?.to_vec();
        let mut keyed = Vec::with_capacity(children.len());
        for child in children {
            keyed.push((key(self.get(child)?), child));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        self.slots[parent.slot()].links.children = keyed.into_iter().map(|(_, c)| c).collect();
        Ok(())
    }

    /// Destroys `id` and its subtree depth-first, after detaching it.
    ///
    /// A second destruction reports [`LifecycleError::DoubleFree`] and
    /// touches nothing. A descendant with a corrupted canary is skipped
    /// together with its own subtree; its siblings are still destroyed.
    /// Returns the number of nodes freed.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize, LifecycleError> {
        let slot = self.slot(id)?;
        if slot.canary == CANARY_FREED || !slot.is_live() {
            tracing::error!(node = %id, "double destroy detected; skipping");
            return Err(LifecycleError::DoubleFree(id));
        }
        if slot.canary != CANARY_LIVE {
            tracing::error!(node = %id, canary = slot.canary, "corrupted canary; destruction aborted");
            return Err(LifecycleError::CanaryCorrupted(id));
        }
        self.detach(id)?;

        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.slot()];
            if slot.canary != CANARY_LIVE {
                tracing::error!(node = %current, canary = slot.canary, "corrupted canary; subtree skipped");
                continue;
            }
            let links = std::mem::take(&mut slot.links);
            slot.node = None;
            slot.canary = CANARY_FREED;
            let (tag, bytes) = (slot.tag, slot.bytes);
            if let Err(untracked) = self.tracker.record_free(tag, bytes) {
                tracing::error!(node = %current, tag = untracked.tag, "free of untracked allocation");
            }
            freed += 1;
            // Push in reverse so children are destroyed in declaration order.
            stack.extend(links.children.into_iter().rev());
        }
        Ok(freed)
    }

    /// Frees every live node through the registry and invalidates all
    /// outstanding handles. Returns the number of nodes freed; slots with a
    /// corrupted canary are logged and dropped without counting as freed.
    pub fn clear(&mut self) -> usize {
        let mut freed = 0;
        let mut corrupted = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_live() {
                if slot.canary != CANARY_LIVE {
                    tracing::error!(
                        slot = index,
                        tag = slot.tag,
                        canary = slot.canary,
                        "corrupted canary during clear; node not freed"
                    );
                    corrupted += 1;
                    continue;
                }
                if self.tracker.record_free(slot.tag, slot.bytes).is_err() {
                    tracing::error!(tag = slot.tag, "free of untracked allocation during clear");
                }
                slot.node = None;
                slot.canary = CANARY_FREED;
                freed += 1;
            }
        }
        let report = self.tracker.report();
        if !report.is_clean() {
            tracing::warn!(
                outstanding = report.outstanding,
                corrupted,
                "allocations outstanding after clear"
            );
        }
        self.slots.clear();
        self.tracker.reset();
        self.epoch = self.epoch.wrapping_add(1);
        freed
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_live()).count()
    }

    /// Number of slots ever handed out since the last clear.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AstNode)> {
        let (arena, epoch) = (self.id, self.epoch);
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId::new(arena, epoch, i as u32), node))
        })
    }

    pub fn find_by_qualified_name(&self, qualified_name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.qualified_name == qualified_name)
            .map(|(id, _)| id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Owned serializable snapshot of the subtree under `id`.
    pub fn view(&self, id: NodeId) -> Result<AstView, LifecycleError> {
        let node = self.get(id)?;
        let children = self
            .children(id)?
            .iter()
            .map(|c| self.view(*c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AstView::from_node(node, children))
    }

    pub fn leak_report(&self) -> LeakReport {
        self.tracker.report()
    }

    #[cfg(test)]
    pub(crate) fn corrupt_canary(&mut self, id: NodeId) {
        self.slots[id.slot()].canary ^= 0xFF;
    }
}
