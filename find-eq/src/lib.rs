#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/**
 * This is the equilibrium-finding routine itself.
 */
mod solver;
pub use solver::*;

/**
 * These are the core data types the solver operates on.
 */
mod types;
pub use types::*;

/// Data-transfer types for reading auctions from, and writing outcomes to, JSON.
#[cfg(feature = "io")]
pub mod io;

// We use non-std collections here for their ordering semantics and performance
#[cfg(feature = "io")]
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
