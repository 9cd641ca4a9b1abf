//! Chunk types.
//!
//! - [`Allocation`] - A region handed out by [`Arena::alloc`](crate::Arena::alloc)
//! - [`ChunkInfo`] - Snapshot of one chunk in the arena's chunk list

mod data;

pub use data::{Allocation, ChunkInfo};
