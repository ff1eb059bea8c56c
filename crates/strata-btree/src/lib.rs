//! B-Tree index over integer keys.
//!
//! A classical balanced multi-way search tree built by incremental
//! node-splitting insertion:
//!
//! ```text
//! insert → [descent from root, splitting any full node on the path]
//!                                   │
//!                                   ▼
//!                  leaf insert at sorted position (never full)
//! ```
//!
//! Nodes live in a growable arena and are addressed by stable [`NodeId`]
//! indices, so the tree owns its nodes exclusively: one parent per node, no
//! reference counting, no back-links.
//!
//! ## Node layout
//!
//! For minimum degree `t`, every node holds between `t - 1` and `2t - 1`
//! sorted keys (the root may hold fewer), and internal nodes hold exactly
//! `keys + 1` children:
//!
//! ```text
//! internal:  child_0 | key_0 | child_1 | key_1 | ... | key_n-1 | child_n
//! leaf:      key_0 | key_1 | ... | key_n-1
//! ```
//!
//! The subtree under `child_i` holds keys between `key_i-1` and `key_i`
//! (boundary keys omitted at the ends). All leaves sit at the same depth.
//!
//! Duplicate keys are kept (multiset semantics); `insert` never
//! deduplicates.

mod arena;
pub mod index;
pub mod iter;
pub mod node;

pub use index::BTreeIndex;
pub use iter::BreadthFirst;
pub use node::{BTreeNode, NodeId};
