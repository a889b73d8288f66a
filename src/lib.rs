//! # kdvoronoi
//!
//! `kdvoronoi` is a Rust library for nearest-neighbour search over 2D points, designed to be
//! used in Rust as well as compiled to WebAssembly (WASM). It builds a k-d tree by median splits
//! on alternating axes and answers single and k-nearest queries with branch-and-bound pruning.
//!
//! ## Features
//!
//! - **Balanced k-d tree**: arena-allocated nodes with generic payloads, parent links and
//!   per-node split ranges for plotting the partition.
//! - **Metrics**: squared Euclidean, Manhattan and Chebyshev distance proxies, chosen per query.
//! - **Voronoi rasterizer**: colors every pixel of a grid by its nearest site, in parallel with `rayon`.
//! - **WASM-first**: `wasm-bindgen` wrappers for the tree and the rasterizer.
//!
//! ## Example
//!
//! ```
//! use kdvoronoi::{DistanceMetric, KdTree};
//!
//! let tree: KdTree = KdTree::build(&[[2.0, 3.0], [5.0, 4.0], [9.0, 6.0], [4.0, 7.0], [8.0, 1.0], [7.0, 2.0]]);
//! let hit = tree.nearest([6.0, 2.0], DistanceMetric::Euclidean).unwrap();
//! assert_eq!(hit.point, [7.0, 2.0]);
//! ```
//!
//! See the `demos/` directory for PNG and SVG output with `plotters`.
//!
//! ## Main Interface
//!
//! The primary entry points are [`KdTree`] for queries and [`render`] for Voronoi images.

mod bounds;
mod error;
mod kdtree;
mod metric;
mod search;
mod voronoi;
pub mod wasm;

pub use bounds::BoundingBox;
pub use error::{Result, VoronoiError};
pub use kdtree::{KdNode, KdTree, NodeId, Point, TraversalOrder};
pub use metric::DistanceMetric;
pub use search::Neighbor;
pub use voronoi::{build_sites, render, Site, VoronoiImage, VoronoiOptions};

/// Re-exported color type used by [`VoronoiImage`].
pub use ecolor::Color32;
