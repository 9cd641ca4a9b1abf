//! Descriptor slot allocation over the front of the managed buffer.
//!
//! Slots occupy `buf[..slots * DESCRIPTOR_SIZE]`. The head chunk always
//! starts exactly where the slots end, which is what lets the pool grow and
//! shrink by moving the head chunk's start.

use super::slot::{DESCRIPTOR_SIZE, Descriptor, MAX_SLOTS, SlotId};
use crate::config::{ArenaConfig, PoolMode};

/// Result of a successful [`DescriptorPool::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Acquired {
    /// The claimed slot.
    pub slot: SlotId,
    /// Bytes taken from the head chunk to make room for the slot.
    pub stolen: usize,
}

/// Bookkeeping for the descriptor table. The table contents live in the buffer.
#[derive(Debug, Clone)]
pub(crate) struct DescriptorPool {
    slots: usize,
    live: usize,
    cursor: usize,
    growable: bool,
    min_chunk_size: usize,
}

impl DescriptorPool {
    /// Writes a fresh table into `buf` and claims [`SlotId::HEAD`].
    ///
    /// The caller has checked that `buf` holds at least `config.required_len()` bytes.
    pub fn format(buf: &mut [u8], config: &ArenaConfig) -> Self {
        let slots = config.initial_slots();
        for index in 0..slots {
            Descriptor::VACANT.write(buf, SlotId::new(index));
        }

        let mut pool = Self {
            slots,
            live: 0,
            cursor: 0,
            growable: matches!(config.pool_mode(), PoolMode::Growable),
            min_chunk_size: config.min_chunk_size(),
        };
        pool.claim(buf, SlotId::HEAD);
        pool.cursor = 1;
        pool
    }

    /// Number of slots in storage.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Number of live descriptors.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Bytes of the buffer occupied by slot storage.
    pub fn bytes(&self) -> usize {
        self.slots * DESCRIPTOR_SIZE
    }

    /// Claims a free slot, growing the table into the head chunk if needed.
    ///
    /// Order: reuse cursor, full scan, growth. Returns `None` when every slot
    /// is live and the head chunk cannot spare a slot.
    pub fn acquire(&mut self, buf: &mut [u8]) -> Option<Acquired> {
        if self.cursor < self.slots {
            let slot = SlotId::new(self.cursor);
            if !Descriptor::is_allocated(buf, slot) {
                self.claim(buf, slot);
                self.cursor += 1;
                return Some(Acquired { slot, stolen: 0 });
            }
        }

        let vacant = (0..self.slots).find(|&i| !Descriptor::is_allocated(buf, SlotId::new(i)));
        if let Some(index) = vacant {
            let slot = SlotId::new(index);
            self.claim(buf, slot);
            self.cursor = index + 1;
            return Some(Acquired { slot, stolen: 0 });
        }

        let slot = self.grow(buf)?;
        self.cursor = self.slots;
        Some(Acquired {
            slot,
            stolen: DESCRIPTOR_SIZE,
        })
    }

    /// Returns `slot` to the pool.
    ///
    /// Returns the number of bytes handed back to the head chunk by the
    /// shrink that may follow.
    pub fn release(&mut self, buf: &mut [u8], slot: SlotId) -> usize {
        debug_assert_ne!(slot, SlotId::HEAD);
        let mut desc = Descriptor::read(buf, slot);
        debug_assert!(desc.allocated);
        desc.allocated = false;
        desc.write(buf, slot);

        self.live -= 1;
        self.cursor = slot.index();

        self.trim(buf)
    }

    /// Gives trailing free slots back to the head chunk while it is free.
    ///
    /// Returns the number of bytes the head chunk gained.
    pub fn trim(&mut self, buf: &mut [u8]) -> usize {
        if !self.growable {
            return 0;
        }

        let mut returned = 0;
        while self.slots > 1 {
            let last = SlotId::new(self.slots - 1);
            if Descriptor::is_allocated(buf, last) {
                break;
            }
            let mut head = Descriptor::read(buf, SlotId::HEAD);
            if head.used {
                break;
            }

            head.start -= DESCRIPTOR_SIZE;
            head.size += DESCRIPTOR_SIZE;
            head.write(buf, SlotId::HEAD);
            self.slots -= 1;
            returned += DESCRIPTOR_SIZE;
        }

        if returned > 0 {
            tracing::trace!(slots = self.slots, returned, "descriptor pool shrank");
        }
        returned
    }

    /// Appends one slot carved from the front of the head chunk.
    fn grow(&mut self, buf: &mut [u8]) -> Option<SlotId> {
        if !self.growable || self.slots >= MAX_SLOTS {
            return None;
        }

        let mut head = Descriptor::read(buf, SlotId::HEAD);
        if head.used || head.size < DESCRIPTOR_SIZE + self.min_chunk_size {
            return None;
        }
        debug_assert_eq!(head.start, self.bytes());

        head.start += DESCRIPTOR_SIZE;
        head.size -= DESCRIPTOR_SIZE;
        head.write(buf, SlotId::HEAD);

        let slot = SlotId::new(self.slots);
        self.slots += 1;
        self.claim(buf, slot);

        tracing::trace!(slots = self.slots, head_size = head.size, "descriptor pool grew");
        Some(slot)
    }

    fn claim(&mut self, buf: &mut [u8], slot: SlotId) {
        Descriptor::CLAIMED.write(buf, slot);
        self.live += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growable(buf: &mut [u8]) -> DescriptorPool {
        let pool = DescriptorPool::format(buf, &ArenaConfig::default());
        let head = Descriptor {
            start: pool.bytes(),
            size: buf.len() - pool.bytes(),
            ..Descriptor::CLAIMED
        };
        head.write(buf, SlotId::HEAD);
        pool
    }

    #[test]
    fn test_format_claims_head() {
        let mut buf = [0u8; 256];
        let pool = DescriptorPool::format(&mut buf, &ArenaConfig::fixed_for(256));

        assert_eq!(pool.slots(), 5);
        assert_eq!(pool.live(), 1);
        assert!(Descriptor::is_allocated(&buf, SlotId::HEAD));
        assert!(!Descriptor::is_allocated(&buf, SlotId::new(4)));
    }

    #[test]
    fn test_acquire_grows_from_head() {
        let mut buf = [0u8; 256];
        let mut pool = growable(&mut buf);

        let acquired = pool.acquire(&mut buf).unwrap();
        assert_eq!(acquired.slot, SlotId::new(1));
        assert_eq!(acquired.stolen, DESCRIPTOR_SIZE);
        assert_eq!(pool.bytes(), 2 * DESCRIPTOR_SIZE);

        let head = Descriptor::read(&buf, SlotId::HEAD);
        assert_eq!(head.start, 2 * DESCRIPTOR_SIZE);
        assert_eq!(head.size, 256 - 2 * DESCRIPTOR_SIZE);
    }

    #[test]
    fn test_release_shrinks_back_into_head() {
        let mut buf = [0u8; 256];
        let mut pool = growable(&mut buf);

        let a = pool.acquire(&mut buf).unwrap().slot;
        let b = pool.acquire(&mut buf).unwrap().slot;
        assert_eq!(pool.slots(), 3);

        // Not the last slot: nothing to give back yet.
        assert_eq!(pool.release(&mut buf, a), 0);
        assert_eq!(pool.slots(), 3);

        // Releasing the last slot also sweeps the free one behind it.
        assert_eq!(pool.release(&mut buf, b), 2 * DESCRIPTOR_SIZE);
        assert_eq!(pool.slots(), 1);
        assert_eq!(pool.live(), 1);

        let head = Descriptor::read(&buf, SlotId::HEAD);
        assert_eq!(head.start, DESCRIPTOR_SIZE);
        assert_eq!(head.size, 256 - DESCRIPTOR_SIZE);
    }

    #[test]
    fn test_released_slot_is_reused_first() {
        let mut buf = [0u8; 512];
        let mut pool = growable(&mut buf);

        let a = pool.acquire(&mut buf).unwrap().slot;
        let _b = pool.acquire(&mut buf).unwrap().slot;
        pool.release(&mut buf, a);

        let again = pool.acquire(&mut buf).unwrap();
        assert_eq!(again.slot, a);
        assert_eq!(again.stolen, 0);
    }

    #[test]
    fn test_growth_refused_when_head_used() {
        let mut buf = [0u8; 256];
        let mut pool = growable(&mut buf);

        let mut head = Descriptor::read(&buf, SlotId::HEAD);
        head.used = true;
        head.write(&mut buf, SlotId::HEAD);

        assert_eq!(pool.acquire(&mut buf), None);
        assert_eq!(pool.slots(), 1);
    }

    #[test]
    fn test_growth_refused_when_head_too_small() {
        let mut buf = [0u8; DESCRIPTOR_SIZE * 2 + 15];
        let mut pool = growable(&mut buf);

        assert_eq!(pool.acquire(&mut buf), None);
    }

    #[test]
    fn test_fixed_pool_never_grows() {
        let mut buf = [0u8; 256];
        let config = ArenaConfig::default().with_pool_mode(PoolMode::Fixed(2));
        let mut pool = DescriptorPool::format(&mut buf, &config);

        let slot = pool.acquire(&mut buf).unwrap();
        assert_eq!(slot.slot, SlotId::new(1));
        assert_eq!(pool.acquire(&mut buf), None);

        assert_eq!(pool.release(&mut buf, slot.slot), 0);
        assert_eq!(pool.slots(), 2);
    }
}
