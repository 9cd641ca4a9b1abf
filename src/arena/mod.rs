//! The arena and its chunk list.
//!
//! - [`Arena`] - First-fit allocation with split and coalescing release
//! - [`Chunks`] - Address-ordered view of the chunk list

mod engine;
mod iter;

pub use engine::Arena;
pub use iter::Chunks;
