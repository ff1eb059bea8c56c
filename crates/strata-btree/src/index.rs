//! Arena-based B-Tree index.

use log::debug;
use std::fmt::Write as _;

use strata_common::{BTreeConfig, NullSink, Result, TraceEvent, TraceSink};

use crate::arena::NodeArena;
use crate::iter::BreadthFirst;
use crate::node::{BTreeNode, NodeId};

/// Balanced multi-way search tree over `i64` keys.
///
/// Supports incremental insertion and point search. Duplicate keys are kept
/// (multiset semantics). All operations are synchronous and run to
/// completion; nothing blocks or suspends.
///
/// `insert` takes `&mut self`: a split restructures nodes in place, so
/// callers sharing a tree across threads must hold exclusive access around
/// every insert and exclude readers while one runs. Searches through
/// `&self` are safe to share once no writer is active.
pub struct BTreeIndex {
    arena: NodeArena,
    root: NodeId,
    order: usize,
    depth: usize,
    key_count: usize,
}

impl BTreeIndex {
    /// Creates an empty tree with minimum degree `order`.
    ///
    /// Rejects `order < 2` with [`StrataError::InvalidParameter`]; a tree of
    /// smaller degree cannot split.
    ///
    /// [`StrataError::InvalidParameter`]: strata_common::StrataError::InvalidParameter
    pub fn new(order: usize) -> Result<Self> {
        Self::with_config(BTreeConfig { order })
    }

    /// Creates an empty tree from a configuration.
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        let mut arena = NodeArena::new();
        let root = arena.allocate();
        Ok(Self {
            arena,
            root,
            order: config.order,
            depth: 1,
            key_count: 0,
        })
    }

    /// Minimum degree `t`.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of keys stored, duplicates counted.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of levels (1 = the root is a leaf).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Id of the current root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &BTreeNode {
        self.arena.get(id)
    }

    /// Visits every node breadth-first, starting at the root.
    ///
    /// Read-only introspection for size estimation and rendering; not part
    /// of the algorithmic contract.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(self)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Searches for `key`, returning the node that holds it and the key's
    /// position within that node. Never mutates the tree.
    pub fn search(&self, key: i64) -> Option<(NodeId, usize)> {
        let mut current = self.root;
        loop {
            let node = self.arena.get(current);
            let idx = node.lower_bound(key);
            if idx < node.keys.len() && node.keys[idx] == key {
                return Some((current, idx));
            }
            if node.is_leaf() {
                return None;
            }
            // The child at the lower bound brackets `key`.
            current = node.children[idx];
        }
    }

    /// Returns true if `key` is present.
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.search(key).is_some()
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Inserts `key`, keeping the tree balanced. Duplicates are kept.
    pub fn insert(&mut self, key: i64) {
        self.insert_with(key, &mut NullSink);
    }

    /// Inserts `key`, reporting splits to `sink`.
    pub fn insert_with(&mut self, key: i64, sink: &mut dyn TraceSink) {
        // A full root is split before the descent, so every node on the way
        // down has room for a key promoted from below and the walk never
        // re-ascends.
        if self.arena.get(self.root).is_full(self.order) {
            self.grow_root(sink);
        }
        self.insert_non_full(self.root, key, sink);
        self.key_count += 1;
    }

    /// Splits a full root: the old root becomes the sole child of a fresh
    /// root, which then splits it, and the tree gains a level.
    fn grow_root(&mut self, sink: &mut dyn TraceSink) {
        let old_root = self.root;
        let new_root = self.arena.allocate();
        self.arena.get_mut(new_root).children.push(old_root);
        self.root = new_root;
        self.depth += 1;
        self.split_child(new_root, 0, sink);
        sink.record(TraceEvent::RootSplit {
            new_depth: self.depth,
        });
        debug!("root split, tree depth now {}", self.depth);
    }

    /// Descends from `start` (known non-full) to a leaf, splitting any full
    /// child before stepping into it, and inserts `key` at its sorted leaf
    /// position.
    fn insert_non_full(&mut self, start: NodeId, key: i64, sink: &mut dyn TraceSink) {
        let mut current = start;
        loop {
            if self.arena.get(current).is_leaf() {
                let node = self.arena.get_mut(current);
                let pos = node.upper_bound(key);
                node.keys.insert(pos, key);
                return;
            }

            let mut idx = self.arena.get(current).upper_bound(key);
            let child = self.arena.get(current).children[idx];
            if self.arena.get(child).is_full(self.order) {
                self.split_child(current, idx, sink);
                // The promoted median may route `key` to the new right
                // sibling instead of the original child.
                if key > self.arena.get(current).keys[idx] {
                    idx += 1;
                }
            }
            current = self.arena.get(current).children[idx];
        }
    }

    /// Splits the full child at `child_index` of `parent`.
    ///
    /// The median key (index `t - 1`) moves up into the parent at
    /// `child_index`; a new right sibling takes the upper `t - 1` keys and,
    /// for internal nodes, the upper `t` children. The parent must not be
    /// full.
    fn split_child(&mut self, parent: NodeId, child_index: usize, sink: &mut dyn TraceSink) {
        let t = self.order;
        let sibling = self.arena.allocate();
        let child_id = self.arena.get(parent).children[child_index];

        let (median, right_keys, right_children) = {
            let child = self.arena.get_mut(child_id);
            debug_assert_eq!(child.keys.len(), 2 * t - 1, "split requires a full child");

            let right_keys = child.keys.split_off(t);
            let median = child.keys.remove(t - 1);
            let right_children = if child.is_leaf() {
                Vec::new()
            } else {
                child.children.split_off(t)
            };
            (median, right_keys, right_children)
        };

        {
            let sib = self.arena.get_mut(sibling);
            sib.keys = right_keys;
            sib.children = right_children;
        }

        let parent_node = self.arena.get_mut(parent);
        parent_node.keys.insert(child_index, median);
        parent_node.children.insert(child_index + 1, sibling);

        sink.record(TraceEvent::NodeSplit { median });
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Rough size of the tree in abstract units: one unit per stored key
    /// plus `order` units of link overhead per node. The benchmark report
    /// compares this against the learned index's parameter units.
    pub fn memory_estimate(&self) -> usize {
        self.key_count + self.node_count() * self.order
    }

    /// Renders the tree structure as indented text, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, level: usize, out: &mut String) {
        let node = self.arena.get(id);
        let kind = if node.is_leaf() { "leaf" } else { "internal" };
        let _ = writeln!(
            out,
            "{:indent$}level {level} ({kind}): {:?}",
            "",
            node.keys(),
            indent = level * 2,
        );
        for &child in node.children() {
            self.render_node(child, level + 1, out);
        }
    }

    /// Checks the structural invariants, returning a description of the
    /// first violation. Recursion is bounded by tree height. Test support;
    /// production paths never call it.
    pub fn verify_invariants(&self) -> std::result::Result<(), String> {
        let mut leaf_depth = None;
        self.verify_node(self.root, 0, true, i64::MIN, i64::MAX, &mut leaf_depth)?;
        let expected = self.depth - 1;
        if leaf_depth != Some(expected) {
            return Err(format!(
                "leaf level {:?} does not match tree depth {}",
                leaf_depth, self.depth
            ));
        }
        Ok(())
    }

    fn verify_node(
        &self,
        id: NodeId,
        level: usize,
        is_root: bool,
        lo: i64,
        hi: i64,
        leaf_depth: &mut Option<usize>,
    ) -> std::result::Result<(), String> {
        let node = self.arena.get(id);

        if node.keys.windows(2).any(|w| w[0] > w[1]) {
            return Err(format!("{id}: keys out of order: {:?}", node.keys));
        }
        if node.keys.len() > 2 * self.order - 1 {
            return Err(format!("{id}: overfull ({} keys)", node.keys.len()));
        }
        if !is_root && node.keys.len() < self.order - 1 {
            return Err(format!("{id}: underfull ({} keys)", node.keys.len()));
        }
        // Duplicates may sit on either side of an equal separator, so the
        // subtree bounds are inclusive.
        if node.keys.first().is_some_and(|&k| k < lo) || node.keys.last().is_some_and(|&k| k > hi) {
            return Err(format!(
                "{id}: keys {:?} escape subtree range [{lo}, {hi}]",
                node.keys
            ));
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(level),
                Some(expected) if expected != level => {
                    return Err(format!("{id}: leaf at level {level}, expected {expected}"));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children.len() != node.keys.len() + 1 {
            return Err(format!(
                "{id}: {} keys but {} children",
                node.keys.len(),
                node.children.len()
            ));
        }
        for (i, &child) in node.children.iter().enumerate() {
            let child_lo = if i == 0 { lo } else { node.keys[i - 1] };
            let child_hi = if i == node.keys.len() { hi } else { node.keys[i] };
            self.verify_node(child, level + 1, false, child_lo, child_hi, leaf_depth)?;
        }
        Ok(())
    }
}
