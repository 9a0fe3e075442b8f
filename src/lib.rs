//! Red-black ordered set for Rust.
//!
//! This crate provides [`RedBlackTree`], an in-memory ordered set whose
//! height stays within `2·log2(n + 1)` under any sequence of insertions and
//! removals, along with nearest-neighbor queries:
//!
//! - [`closest_less`](RedBlackTree::closest_less) - Largest element below a value
//! - [`closest_greater`](RedBlackTree::closest_greater) - Smallest element above a value
//! - [`search_range`](RedBlackTree::search_range) - Every element between two bounds
//!
//! # Example
//!
//! ```
//! use crimson_tree::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for value in [-44, -10, 0, 4, 36, 78, 92] {
//!     tree.insert(value);
//! }
//!
//! assert_eq!(tree.len(), 7);
//! assert!(tree.contains(&36));
//!
//! assert_eq!(tree.closest_less(&-9), Some(&-10));
//! assert_eq!(tree.closest_greater(&44), Some(&78));
//! assert_eq!(tree.search_range(&50, &0), [0, 4, 36]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No `unsafe`** - Nodes live in an arena and link to each other by index
//! - **Deep copies** - `clone` rebuilds an independent tree of identical shape
//!
//! # Implementation
//!
//! Nodes carry a color and links to their parent and both children.
//! Insertion attaches a red node and repairs red-red violations by
//! recoloring and rotating; removal splices out the node (or its in-order
//! predecessor) and repairs any black-height deficit the same way. Both
//! repair passes are written once against a left/right side and mirrored
//! through it.
//!
//! The [`statistics`] module builds a small numeric report on top of the
//! set.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod red_black_tree;
pub mod statistics;

pub use red_black_tree::RedBlackTree;
pub use statistics::Summary;
