//! Descriptor storage for the chunk list.
//!
//! Chunk metadata is kept at the front of the managed buffer as fixed-size
//! records, linked by slot index rather than by address.
//!
//! - [`Descriptor`] - One chunk record and its byte encoding
//! - [`DescriptorPool`] - Slot allocation, growth and shrink against the head chunk

mod pool;
mod slot;

pub(crate) use pool::DescriptorPool;
pub(crate) use slot::{Descriptor, MAX_SLOTS, SlotId};

pub use slot::DESCRIPTOR_SIZE;
