//! Nodes of the skiplist and the arena which owns them.
//!
//! Rather than linking nodes through raw pointers, every node lives in a slot
//! of an [`Arena`] and links refer to slots by index. Slot [`HEAD`] always
//! holds the head node.

use std::{iter, mem, ops};

/// Slot of the head node.
pub const HEAD: usize = 0;

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the SkipList. The head node (which has no value) is owned
/// by the list like every other node and sits in slot [`HEAD`].
///
/// The node has a `level` which corresponds to how 'high' the node reaches. A
/// node of level `n` participates in the level-0 chain through `prev` and
/// `next`, and in `n - 1` further chains through `links`.
#[derive(Clone, Debug)]
pub struct SkipNode<V> {
    // value should never be None, with the sole exception being the head node.
    pub value: Option<V>,
    // how high the node reaches, in [1, max_level].
    pub level: usize,
    // The immediately previous node. Only the head node has none.
    pub prev: Option<usize>,
    // The immediately next node.
    pub next: Option<usize>,
    // Skip links; `links[i]` is the next node reaching level `i + 2`. This
    // vector *must* be of length `self.level - 1`.
    pub links: Vec<Option<usize>>,
}

impl<V> SkipNode<V> {
    /// Create a new head node.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            level: total_levels,
            prev: None,
            next: None,
            links: iter::repeat_n(None, total_levels - 1).collect(),
        }
    }

    /// Create a new SkipNode with the given value. All links default to none.
    pub fn new(value: V, level: usize) -> Self {
        SkipNode {
            value: Some(value),
            level,
            prev: None,
            next: None,
            links: iter::repeat_n(None, level - 1).collect(),
        }
    }

    /// Returns `true` if the node is a head-node.
    pub fn is_head(&self) -> bool {
        self.value.is_none()
    }

    /// The value held by the node.
    ///
    /// # Panics
    ///
    /// Panics when called on the head node.
    #[expect(clippy::expect_used, reason = "Only the head node has no value")]
    pub fn value(&self) -> &V {
        self.value.as_ref().expect("The head node holds no value.")
    }

    /// Consumes the node returning the value it contains.
    pub fn into_inner(self) -> Option<V> {
        self.value
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Arena
// ////////////////////////////////////////////////////////////////////////////

/// A slot of the arena. The generation is bumped every time the slot is
/// vacated so that stale references to it can be detected.
#[derive(Clone, Debug)]
struct Slot<V> {
    generation: u32,
    node: Option<SkipNode<V>>,
}

/// Storage for the nodes of a single skiplist.
///
/// Vacated slots are recycled, so indices stay small as long as the list does.
#[derive(Clone, Debug)]
pub struct Arena<V> {
    slots: Vec<Slot<V>>,
    free: Vec<usize>,
}

impl<V> Arena<V> {
    /// Create an arena holding only a head node of the given height.
    pub fn new(total_levels: usize) -> Self {
        Arena {
            slots: vec![Slot {
                generation: 0,
                node: Some(SkipNode::head(total_levels)),
            }],
            free: Vec::new(),
        }
    }

    /// Store a node, returning its slot and the slot's current generation.
    pub fn insert(&mut self, node: SkipNode<V>) -> (usize, u32) {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            debug_assert!(slot.node.is_none());
            slot.node = Some(node);
            (index, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            (self.slots.len() - 1, 0)
        }
    }

    /// Take the node out of its slot, vacating it.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacant or holds the head node.
    pub fn remove(&mut self, index: usize) -> SkipNode<V> {
        assert_ne!(index, HEAD, "The head node cannot be removed.");
        let slot = &mut self.slots[index];
        let Some(node) = slot.node.take() else {
            panic!("Slot {index} is vacant.");
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        node
    }

    /// Returns `true` if `index` holds a node of the given generation.
    pub fn is_live(&self, index: usize, generation: u32) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.generation == generation && slot.node.is_some())
    }

    /// The generation of an occupied slot.
    pub fn generation(&self, index: usize) -> u32 {
        self.slots[index].generation
    }

    /// Drop every node except the head, which is replaced by a fresh one.
    ///
    /// Generations keep increasing so that handles from before the reset
    /// remain detectably stale.
    pub fn reset(&mut self, total_levels: usize) {
        let slots = mem::take(&mut self.slots);
        self.free.clear();
        for (index, mut slot) in slots.into_iter().enumerate() {
            if index == HEAD {
                slot.node = Some(SkipNode::head(total_levels));
            } else {
                if slot.node.take().is_some() {
                    slot.generation = slot.generation.wrapping_add(1);
                }
                self.free.push(index);
            }
            self.slots.push(slot);
        }
    }
}

impl<V> ops::Index<usize> for Arena<V> {
    type Output = SkipNode<V>;

    fn index(&self, index: usize) -> &SkipNode<V> {
        match self.slots[index].node {
            Some(ref node) => node,
            None => panic!("Link to vacant slot {index}."),
        }
    }
}

impl<V> ops::IndexMut<usize> for Arena<V> {
    fn index_mut(&mut self, index: usize) -> &mut SkipNode<V> {
        match self.slots[index].node {
            Some(ref mut node) => node,
            None => panic!("Link to vacant slot {index}."),
        }
    }
}
