//! Core allocation engine - Arena over a caller-owned buffer.
//!
//! The buffer is split into two regions:
//!
//! ```text
//! 0                pool_bytes                                    len
//! ┌────────────────┬──────────────────────────────────────────────┐
//! │ descriptor     │ payload: chunks in address order             │
//! │ slots          │ head ─► chunk ─► chunk ─► ...                │
//! └────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! The first chunk (the head) always starts where the slots end, so the
//! descriptor pool grows by taking bytes off the front of a free head chunk
//! and shrinks by giving them back.
//!
//! # Example
//!
//! ```
//! use arenars::Arena;
//!
//! let mut buf = [0u8; 1024];
//! let mut arena = Arena::new(&mut buf)?;
//!
//! let a = arena.alloc(100)?;
//! arena.get_mut(&a).unwrap()[..5].copy_from_slice(b"hello");
//! assert_eq!(&arena.get(&a).unwrap()[..5], b"hello");
//!
//! arena.release(a.offset())?;
//! # Ok::<(), arenars::ArenaError>(())
//! ```

use core::fmt;

use super::iter::Chunks;
use crate::chunk::Allocation;
use crate::config::ArenaConfig;
use crate::descriptor::{Descriptor, DescriptorPool, SlotId};
use crate::error::ArenaError;

/// A fixed-capacity arena bound to one caller-owned buffer.
///
/// `Arena` hands out sub-regions of the buffer with a first-fit policy,
/// splitting free chunks when the remainder is at least the minimum chunk
/// size, and coalesces neighbours on release so that no two adjacent chunks
/// are ever both free.
///
/// # Bookkeeping
///
/// Chunk descriptors are stored in the buffer itself, ahead of the payload.
/// In the default growable mode the table starts with one slot and grows
/// into the first chunk on demand, so bookkeeping costs payload bytes but
/// never a heap allocation.
///
/// # Addresses
///
/// Allocations are identified by their byte offset within the buffer.
/// Payload bytes are reached through [`Arena::get`] and [`Arena::get_mut`],
/// which only answer for live allocations.
///
/// # Threading
///
/// All mutation goes through `&mut self`. Sharing an arena between threads
/// needs an external lock such as `Mutex<Arena>`.
pub struct Arena<'buf> {
    buf: &'buf mut [u8],
    pool: DescriptorPool,
    config: ArenaConfig,
    free_size: usize,
}

impl<'buf> Arena<'buf> {
    /// Creates an arena over `buf` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::BufferTooSmall`] if `buf` cannot hold one
    /// descriptor slot plus a minimum-size chunk.
    ///
    /// # Example
    ///
    /// ```
    /// use arenars::{Arena, ArenaError};
    ///
    /// let mut tiny = [0u8; 8];
    /// assert!(matches!(Arena::new(&mut tiny), Err(ArenaError::BufferTooSmall { .. })));
    /// ```
    pub fn new(buf: &'buf mut [u8]) -> Result<Self, ArenaError> {
        Self::with_config(buf, ArenaConfig::default())
    }

    /// Creates an arena over `buf` with the given configuration.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidConfig`] if `config` does not validate
    /// - [`ArenaError::BufferTooSmall`] if `buf` is shorter than
    ///   [`ArenaConfig::required_len`]
    pub fn with_config(buf: &'buf mut [u8], config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let required = config.required_len();
        if buf.len() < required {
            tracing::debug!(len = buf.len(), required, "buffer too small for arena");
            return Err(ArenaError::BufferTooSmall {
                len: buf.len(),
                required,
            });
        }

        let pool = DescriptorPool::format(buf, &config);
        let mut arena = Self {
            buf,
            pool,
            config,
            free_size: 0,
        };
        arena.lay_out_head();

        tracing::debug!(
            len = arena.buf.len(),
            slots = arena.pool.slots(),
            free = arena.free_size,
            "arena created"
        );
        Ok(arena)
    }

    /// Allocates at least `size` bytes.
    ///
    /// Requests below the minimum chunk size are rounded up to it. The first
    /// free chunk in address order that is large enough is used; if it is
    /// larger than `size + min_chunk_size`, its trailing `size` bytes are
    /// split off and returned, otherwise the whole chunk is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfSpace`] when:
    /// - the total free space is smaller than the request
    /// - no single free chunk is large enough
    /// - a split needs a descriptor and the pool cannot provide one
    pub fn alloc(&mut self, size: usize) -> Result<Allocation, ArenaError> {
        let size = size.max(self.config.min_chunk_size());
        if size > self.free_size {
            tracing::debug!(size, free = self.free_size, "allocation exceeds free space");
            return Err(ArenaError::OutOfSpace { requested: size });
        }

        let Some(found) = self.first_fit(size) else {
            tracing::debug!(size, free = self.free_size, "no free chunk large enough");
            return Err(ArenaError::OutOfSpace { requested: size });
        };

        let slot = self.try_split(found, size)?;

        let mut chunk = self.load(slot);
        chunk.used = true;
        self.store(slot, &chunk);
        self.free_size -= chunk.size;

        Ok(Allocation::new(chunk.start, chunk.size))
    }

    /// Releases the allocation starting at `offset`.
    ///
    /// The chunk is marked free and merged with free neighbours on both
    /// sides before this returns.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::UnknownAddress`] if no chunk starts at `offset`
    /// - [`ArenaError::AlreadyFree`] if the chunk at `offset` is free
    ///   (double release)
    ///
    /// The arena is left untouched in both cases.
    pub fn release(&mut self, offset: usize) -> Result<(), ArenaError> {
        let Some(slot) = self.find(offset) else {
            tracing::debug!(offset, "release of unknown address");
            return Err(ArenaError::UnknownAddress { offset });
        };

        let mut chunk = self.load(slot);
        if !chunk.used {
            tracing::debug!(offset, "release of free chunk");
            return Err(ArenaError::AlreadyFree { offset });
        }

        self.free_size += chunk.size;
        chunk.used = false;
        self.store(slot, &chunk);

        let mut current = slot;
        while let Some(prev) = self.load(current).prev.get() {
            if self.load(prev).used {
                break;
            }
            current = self.merge(prev, current);
        }
        while let Some(next) = self.load(current).next.get() {
            if self.load(next).used {
                break;
            }
            current = self.merge(current, next);
        }

        // A free head can take back slots left stranded while it was in use.
        if current == SlotId::HEAD {
            self.free_size += self.pool.trim(self.buf);
        }

        Ok(())
    }

    /// Returns every chunk to the free state.
    ///
    /// Outstanding [`Allocation`]s become invalid. The descriptor table is
    /// rebuilt as if the arena had just been created.
    pub fn reset(&mut self) {
        self.pool = DescriptorPool::format(self.buf, &self.config);
        self.lay_out_head();
        tracing::debug!(free = self.free_size, "arena reset");
    }

    /// Payload bytes of a live allocation.
    ///
    /// Returns `None` if `alloc` has been released or does not belong to this arena.
    pub fn get(&self, alloc: &Allocation) -> Option<&[u8]> {
        self.live_range(alloc).map(|range| &self.buf[range])
    }

    /// Mutable payload bytes of a live allocation.
    ///
    /// Returns `None` if `alloc` has been released or does not belong to this arena.
    pub fn get_mut(&mut self, alloc: &Allocation) -> Option<&mut [u8]> {
        let range = self.live_range(alloc)?;
        Some(&mut self.buf[range])
    }

    /// Iterates over all chunks in address order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self.buf, SlotId::HEAD)
    }

    /// Total length of the managed buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Sum of the sizes of all free chunks.
    pub fn free_size(&self) -> usize {
        self.free_size
    }

    /// Sum of the sizes of all chunks handed out.
    pub fn used_size(&self) -> usize {
        self.buf.len() - self.pool.bytes() - self.free_size
    }

    /// Bytes at the front of the buffer taken by descriptor slots.
    pub fn pool_bytes(&self) -> usize {
        self.pool.bytes()
    }

    /// Number of descriptor slots in storage, live or not.
    pub fn descriptor_slots(&self) -> usize {
        self.pool.slots()
    }

    /// Number of live descriptors, which equals the number of chunks.
    pub fn live_descriptors(&self) -> usize {
        self.pool.live()
    }

    /// Returns the configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Tears the arena down and hands the buffer back.
    pub fn into_inner(self) -> &'buf mut [u8] {
        self.buf
    }

    /// Points the head descriptor at the whole payload region as one free chunk.
    fn lay_out_head(&mut self) {
        let start = self.pool.bytes();
        let head = Descriptor {
            start,
            size: self.buf.len() - start,
            ..Descriptor::CLAIMED
        };
        self.store(SlotId::HEAD, &head);
        self.free_size = head.size;
    }

    fn load(&self, slot: SlotId) -> Descriptor {
        Descriptor::read(self.buf, slot)
    }

    fn store(&mut self, slot: SlotId, desc: &Descriptor) {
        desc.write(self.buf, slot);
    }

    /// First free chunk in address order holding at least `size` bytes.
    fn first_fit(&self, size: usize) -> Option<SlotId> {
        let mut cursor = SlotId::HEAD.get();
        while let Some(slot) = cursor {
            let chunk = self.load(slot);
            if !chunk.used && chunk.size >= size {
                return Some(slot);
            }
            cursor = chunk.next.get();
        }
        None
    }

    /// Chunk starting exactly at `offset`.
    fn find(&self, offset: usize) -> Option<SlotId> {
        let mut cursor = SlotId::HEAD.get();
        while let Some(slot) = cursor {
            let chunk = self.load(slot);
            if chunk.start == offset {
                return Some(slot);
            }
            if chunk.start > offset {
                return None;
            }
            cursor = chunk.next.get();
        }
        None
    }

    fn live_range(&self, alloc: &Allocation) -> Option<core::ops::Range<usize>> {
        let chunk = self.load(self.find(alloc.offset())?);
        (chunk.used && chunk.size == alloc.size()).then_some(chunk.start..chunk.start + chunk.size)
    }

    /// Splits `slot` when the remainder would be worth keeping.
    ///
    /// Returns the slot to hand out: `slot` itself when used whole, or the
    /// new trailing chunk.
    fn try_split(&mut self, slot: SlotId, size: usize) -> Result<SlotId, ArenaError> {
        let min = self.config.min_chunk_size();
        if self.load(slot).size < size + min {
            return Ok(slot);
        }

        let Some(acquired) = self.pool.acquire(self.buf) else {
            tracing::debug!(size, slots = self.pool.slots(), "descriptor pool exhausted");
            return Err(ArenaError::OutOfSpace { requested: size });
        };
        self.free_size -= acquired.stolen;

        // Growth shrinks the head chunk, which may be the one being split.
        let mut chunk = self.load(slot);
        if chunk.size < size + min {
            self.free_size += self.pool.release(self.buf, acquired.slot);
            return Ok(slot);
        }

        let carved = Descriptor {
            start: chunk.start + chunk.size - size,
            size,
            prev: slot,
            next: chunk.next,
            ..Descriptor::CLAIMED
        };
        if let Some(next) = chunk.next.get() {
            let mut after = self.load(next);
            after.prev = acquired.slot;
            self.store(next, &after);
        }
        chunk.next = acquired.slot;
        chunk.size -= size;

        self.store(slot, &chunk);
        self.store(acquired.slot, &carved);

        tracing::trace!(
            start = carved.start,
            size,
            remainder = chunk.size,
            "split chunk"
        );
        Ok(acquired.slot)
    }

    /// Folds `rhs` into `lhs`, its predecessor, and releases `rhs`'s descriptor.
    fn merge(&mut self, lhs: SlotId, rhs: SlotId) -> SlotId {
        let absorbed = self.load(rhs);
        let mut survivor = self.load(lhs);
        debug_assert_eq!(survivor.next, rhs);
        debug_assert_eq!(survivor.start + survivor.size, absorbed.start);

        survivor.size += absorbed.size;
        survivor.next = absorbed.next;
        self.store(lhs, &survivor);

        if let Some(next) = absorbed.next.get() {
            let mut after = self.load(next);
            after.prev = lhs;
            self.store(next, &after);
        }

        tracing::trace!(start = survivor.start, size = survivor.size, "merged chunks");

        // Releasing may shrink the pool into the head chunk; both regions stay free.
        self.free_size += self.pool.release(self.buf, rhs);
        lhs
    }
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("free_size", &self.free_size)
            .field("pool_bytes", &self.pool.bytes())
            .field("live_descriptors", &self.pool.live())
            .field("config", &self.config)
            .finish()
    }
}
