//! arenars
//!
//! Fixed-capacity memory arena over a single caller-owned buffer.
//!
//! `arenars` hands out and reclaims sub-regions of one byte buffer without
//! ever going back to a general-purpose allocator. It is meant for:
//!
//! - embedded targets with one static memory region
//! - pooled I/O buffers
//! - custom memory pools inside a larger program
//!
//! The crate intentionally:
//! - does NOT provision the buffer (any `&mut [u8]` will do)
//! - does NOT synchronize (wrap the arena in a lock to share it)
//! - does NOT allocate, not even for its own bookkeeping
//!
//! Allocation is first-fit in address order. A free chunk is split only when
//! the remainder is at least the minimum chunk size, and released chunks are
//! merged with free neighbours immediately, so the chunk list never holds two
//! adjacent free chunks.
//!
//! # Example
//!
//! ```
//! use arenars::{Arena, ArenaError};
//!
//! fn main() -> Result<(), ArenaError> {
//!     let mut buf = [0u8; 4096];
//!     let mut arena = Arena::new(&mut buf)?;
//!
//!     let header = arena.alloc(64)?;
//!     let body = arena.alloc(1024)?;
//!
//!     arena.get_mut(&body).unwrap().fill(0x2A);
//!
//!     arena.release(header.offset())?;
//!     arena.release(body.offset())?;
//!     assert_eq!(arena.used_size(), 0);
//!     Ok(())
//! }
//! ```
//!
//! # Fixed descriptor table
//!
//! ```
//! use arenars::{Arena, ArenaConfig};
//!
//! let mut buf = [0u8; 4096];
//! let mut arena = Arena::with_config(&mut buf, ArenaConfig::fixed_for(4096))?;
//! let a = arena.alloc(100)?;
//! assert!(a.size() >= 100);
//! # Ok::<(), arenars::ArenaError>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod arena;
mod chunk;
mod config;
mod error;

mod descriptor; // internal slot table
mod util; // internal LE field access

//
// Public surface (intentionally tiny)
//

pub use arena::{Arena, Chunks};
pub use chunk::{Allocation, ChunkInfo};
pub use config::{ArenaConfig, DEFAULT_MIN_CHUNK_SIZE, PoolMode};
pub use descriptor::DESCRIPTOR_SIZE;
pub use error::ArenaError;
