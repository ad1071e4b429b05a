//! Binary tree nodes stored in an arena.
//!
//! Every node lives in a slot of a [`Nodes`] arena owned by a single tree. Links between nodes
//! (`parent`, `left` and `right`) are [`NodeId`]s into that arena rather than pointers, so moving
//! a subtree around is a matter of rewriting a few indices. A node owns its children: clearing a
//! child slot with [`Nodes::set_child`] frees the whole subtree that hung there, while
//! [`Nodes::release_child`] hands the detached subtree back to the caller.
//!
//! Each node caches its height. Whenever a child link changes the height is recomputed for the
//! node and every one of its ancestors, so heights are always consistent between calls.

use std::ops::{Index, IndexMut};

/// A non-owning handle to a node in a tree.
///
/// Handles stay valid while the node is in the tree, including across rotations. Once the node
/// is removed the handle is stale: the slot's generation is bumped, so the handle will never
/// resolve to whatever node reuses that slot later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left child, holding values less than (or equal to) the parent.
    Left,
    /// The right child, holding values greater than (or equal to) the parent.
    Right,
}

impl Side {
    /// The mirrored side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A pre-built tree of values that a tree can adopt wholesale, see
/// [`SearchTree::from_subtree`][crate::SearchTree::from_subtree].
///
/// Nothing checks that the values are ordered when the subtree is built. Adopting an unordered
/// subtree produces a tree whose [`check_invariants`][crate::SearchTree::check_invariants]
/// reports the problem.
///
/// # Examples
///
/// ```
/// use avl_tree::{SearchTree, Subtree};
///
/// let subtree = Subtree::new(2)
///     .with_left(Subtree::new(1))
///     .with_right(Subtree::new(3));
/// let tree = SearchTree::from_subtree(subtree);
///
/// assert_eq!(tree.root().get(), Some(&2));
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtree<T> {
    value: T,
    left: Option<Box<Subtree<T>>>,
    right: Option<Box<Subtree<T>>>,
}

impl<T> Subtree<T> {
    /// A subtree with a single node holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Replaces the left child of the subtree root.
    pub fn with_left(mut self, left: Subtree<T>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    /// Replaces the right child of the subtree root.
    pub fn with_right(mut self, right: Subtree<T>) -> Self {
        self.right = Some(Box::new(right));
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            parent: None,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// The arena owning every node of a tree.
#[derive(Clone, Debug)]
pub(crate) struct Nodes<T> {
    slots: Vec<Slot<T>>,
    vacant: Vec<usize>,
    len: usize,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Nodes<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id)
            .expect("node handle is stale or belongs to another tree")
    }
}

impl<T> IndexMut<NodeId> for Nodes<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id)
            .expect("node handle is stale or belongs to another tree")
    }
}

impl<T> Nodes<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes, attached or not.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Creates a detached leaf holding `value`.
    pub(crate) fn allocate(&mut self, value: T) -> NodeId {
        let node = Some(Node::new(value));
        self.len += 1;
        match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = node;
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: 0,
                    node,
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Moves a pre-built subtree into the arena and returns its detached root.
    pub(crate) fn adopt(&mut self, subtree: Subtree<T>) -> NodeId {
        let Subtree { value, left, right } = subtree;
        let root = self.allocate(value);

        let mut pending = Vec::new();
        pending.extend(left.map(|left| (root, Side::Left, left)));
        pending.extend(right.map(|right| (root, Side::Right, right)));
        while let Some((parent, side, subtree)) = pending.pop() {
            let Subtree { value, left, right } = *subtree;
            let id = self.allocate(value);
            self.set_child(parent, side, Some(id));
            pending.extend(left.map(|left| (id, Side::Left, left)));
            pending.extend(right.map(|right| (id, Side::Right, right)));
        }

        root
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Handles of every live node, in arena order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|_| NodeId {
                index,
                generation: slot.generation,
            })
        })
    }

    /// Empties the slot of `id` without looking at its links.
    fn vacate(&mut self, id: NodeId) -> Option<Node<T>> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        self.len -= 1;
        Some(node)
    }

    /// Frees a detached, childless node and returns its value.
    pub(crate) fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let node = self.vacate(id)?;
        debug_assert!(
            node.parent.is_none() && node.left.is_none() && node.right.is_none(),
            "deallocating a node that is still linked"
        );
        Some(node.value)
    }

    /// Frees the subtree rooted at `id`, which must already be detached from its parent.
    pub(crate) fn deallocate_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.vacate(id) {
                pending.extend(node.left);
                pending.extend(node.right);
            }
        }
    }

    /// Frees every node. Outstanding handles all become stale.
    pub(crate) fn clear(&mut self) {
        let ids: Vec<_> = self.ids().collect();
        for id in ids {
            self.vacate(id);
        }
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self[id].child(side)
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self[id].left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self[id].right
    }

    pub(crate) fn has_left(&self, id: NodeId) -> bool {
        self[id].left.is_some()
    }

    pub(crate) fn has_right(&self, id: NodeId) -> bool {
        self[id].right.is_some()
    }

    pub(crate) fn height(&self, id: NodeId) -> usize {
        self[id].height
    }

    /// Height of a possibly empty subtree. Empty subtrees have a height of 0.
    pub(crate) fn subtree_height(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self[id].height)
    }

    /// The difference in height between the right and left subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub(crate) fn balance_factor(&self, id: NodeId) -> isize {
        let right_height = self.subtree_height(self.right(id));
        let left_height = self.subtree_height(self.left(id));
        right_height as isize - left_height as isize
    }

    /// The parent of `id` and the slot `id` occupies in it, or `None` for a detached node.
    pub(crate) fn slot_of(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self.parent(id)?;
        let side = if self.left(parent) == Some(id) {
            Side::Left
        } else {
            debug_assert_eq!(self.right(parent), Some(id), "parent does not own its child");
            Side::Right
        };
        Some((parent, side))
    }

    /// Puts `child` in the `side` slot of `id`, or clears the slot if `child` is `None`.
    ///
    /// `child` must be detached. Whatever subtree previously occupied the slot is destroyed.
    pub(crate) fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let previous = self[id].child(side);
        if previous != child {
            if let Some(child) = child {
                debug_assert!(
                    self[child].parent.is_none(),
                    "attaching a node that is still owned by another parent"
                );
                self[child].parent = Some(id);
            }
            *self[id].child_mut(side) = child;
            if let Some(previous) = previous {
                self[previous].parent = None;
                self.deallocate_subtree(previous);
            }
        }
        self.update_height_on_path(id);
    }

    pub(crate) fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Side::Left, child);
    }

    pub(crate) fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Side::Right, child);
    }

    /// Detaches and returns the child in the `side` slot of `id`. The child is not destroyed.
    pub(crate) fn release_child(&mut self, id: NodeId, side: Side) -> Option<NodeId> {
        let child = self[id].child_mut(side).take();
        if let Some(child) = child {
            self[child].parent = None;
        }
        self.update_height_on_path(id);
        child
    }

    pub(crate) fn release_left(&mut self, id: NodeId) -> Option<NodeId> {
        self.release_child(id, Side::Left)
    }

    pub(crate) fn release_right(&mut self, id: NodeId) -> Option<NodeId> {
        self.release_child(id, Side::Right)
    }

    /// Reports whether `descendant` lives in the left or the right subtree of `ancestor`. O(h).
    ///
    /// Returns `None` if `descendant` is `ancestor` itself or isn't below it at all.
    pub(crate) fn is_on_left_or_right(&self, ancestor: NodeId, descendant: NodeId) -> Option<Side> {
        let mut x = descendant;
        loop {
            let (parent, side) = self.slot_of(x)?;
            if parent == ancestor {
                return Some(side);
            }
            x = parent;
        }
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    fn update_height(&mut self, id: NodeId) {
        let node = &self[id];
        let height = self.subtree_height(node.left).max(self.subtree_height(node.right)) + 1;
        self[id].height = height;
    }

    /// Recomputes the height of `id` and of every ancestor up to the root.
    pub(crate) fn update_height_on_path(&mut self, id: NodeId) {
        let mut next = Some(id);
        while let Some(x) = next {
            self.update_height(x);
            next = self.parent(x);
        }
    }
}
