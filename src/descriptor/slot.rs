//! Descriptor records and their in-buffer encoding.

use crate::util::{read_u32, read_u64, write_u32, write_u64};

/// Size in bytes of one descriptor slot in the managed buffer.
///
/// Layout (little-endian):
///
/// ```text
/// 0..8    start
/// 8..16   size
/// 16..20  prev slot (u32::MAX = none)
/// 20..24  next slot (u32::MAX = none)
/// 24      flags: bit 0 used, bit 1 allocated
/// 25..32  reserved
/// ```
pub const DESCRIPTOR_SIZE: usize = 32;

/// Largest number of slots a pool can hold; `u32::MAX` is reserved for [`SlotId::NIL`].
pub(crate) const MAX_SLOTS: usize = u32::MAX as usize;

const START: usize = 0;
const SIZE: usize = 8;
const PREV: usize = 16;
const NEXT: usize = 20;
const FLAGS: usize = 24;

const FLAG_USED: u8 = 0b01;
const FLAG_ALLOCATED: u8 = 0b10;

/// Index of a descriptor slot in pool storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(u32);

impl SlotId {
    /// Absent link.
    pub const NIL: SlotId = SlotId(u32::MAX);

    /// Slot describing the head chunk. It is claimed at creation and never released.
    pub const HEAD: SlotId = SlotId(0);

    /// Slot at `index`. Callers keep `index < MAX_SLOTS`.
    pub fn new(index: usize) -> Self {
        debug_assert!(index < MAX_SLOTS);
        SlotId(index as u32)
    }

    /// Position in pool storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `None` for [`SlotId::NIL`].
    pub fn get(self) -> Option<SlotId> {
        if self == Self::NIL { None } else { Some(self) }
    }

    fn byte_offset(self) -> usize {
        self.index() * DESCRIPTOR_SIZE
    }
}

/// Metadata for one chunk of the payload region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Descriptor {
    /// Byte offset of the chunk within the buffer.
    pub start: usize,
    /// Chunk length in bytes.
    pub size: usize,
    /// Previous chunk by address.
    pub prev: SlotId,
    /// Next chunk by address.
    pub next: SlotId,
    /// Chunk is handed out to a caller.
    pub used: bool,
    /// Slot itself is live.
    pub allocated: bool,
}

impl Descriptor {
    /// State of a freshly claimed slot.
    pub const CLAIMED: Descriptor = Descriptor {
        start: 0,
        size: 0,
        prev: SlotId::NIL,
        next: SlotId::NIL,
        used: false,
        allocated: true,
    };

    /// State of a slot that is available for reuse.
    pub const VACANT: Descriptor = Descriptor {
        allocated: false,
        ..Self::CLAIMED
    };

    /// Decodes the record stored in `slot`.
    pub fn read(buf: &[u8], slot: SlotId) -> Self {
        let rec = &buf[slot.byte_offset()..slot.byte_offset() + DESCRIPTOR_SIZE];
        let flags = rec[FLAGS];
        Self {
            start: read_u64(rec, START) as usize,
            size: read_u64(rec, SIZE) as usize,
            prev: SlotId(read_u32(rec, PREV)),
            next: SlotId(read_u32(rec, NEXT)),
            used: flags & FLAG_USED != 0,
            allocated: flags & FLAG_ALLOCATED != 0,
        }
    }

    /// Encodes this record into `slot`.
    pub fn write(&self, buf: &mut [u8], slot: SlotId) {
        let at = slot.byte_offset();
        let rec = &mut buf[at..at + DESCRIPTOR_SIZE];
        write_u64(rec, START, self.start as u64);
        write_u64(rec, SIZE, self.size as u64);
        write_u32(rec, PREV, self.prev.0);
        write_u32(rec, NEXT, self.next.0);

        let mut flags = 0;
        if self.used {
            flags |= FLAG_USED;
        }
        if self.allocated {
            flags |= FLAG_ALLOCATED;
        }
        rec[FLAGS] = flags;
        rec[FLAGS + 1..].fill(0);
    }

    /// Reads only the `allocated` flag of `slot`.
    pub fn is_allocated(buf: &[u8], slot: SlotId) -> bool {
        buf[slot.byte_offset() + FLAGS] & FLAG_ALLOCATED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_survives_encoding() {
        let mut buf = [0xFFu8; DESCRIPTOR_SIZE * 3];
        let desc = Descriptor {
            start: 4096,
            size: 512,
            prev: SlotId::new(0),
            next: SlotId::NIL,
            used: true,
            allocated: true,
        };

        desc.write(&mut buf, SlotId::new(2));

        assert_eq!(Descriptor::read(&buf, SlotId::new(2)), desc);
        // Neighbouring slots are untouched.
        assert!(buf[..DESCRIPTOR_SIZE * 2].iter().all(|&b| b == 0xFF));
        // Reserved tail is zeroed.
        assert!(buf[DESCRIPTOR_SIZE * 2 + 25..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocated_flag_probe() {
        let mut buf = [0u8; DESCRIPTOR_SIZE * 2];
        Descriptor::CLAIMED.write(&mut buf, SlotId::new(0));
        Descriptor::VACANT.write(&mut buf, SlotId::new(1));

        assert!(Descriptor::is_allocated(&buf, SlotId::new(0)));
        assert!(!Descriptor::is_allocated(&buf, SlotId::new(1)));
    }

    #[test]
    fn test_nil_link() {
        assert_eq!(SlotId::NIL.get(), None);
        assert_eq!(SlotId::HEAD.get(), Some(SlotId::new(0)));
    }
}
