//! Address-ordered iteration over an arena's chunk list.

use core::iter::FusedIterator;

use crate::chunk::ChunkInfo;
use crate::descriptor::{Descriptor, SlotId};

/// Iterator over the chunks of an [`Arena`](crate::Arena), in address order.
///
/// Created by [`Arena::chunks`](crate::Arena::chunks).
///
/// # Example
///
/// ```
/// use arenars::Arena;
///
/// let mut buf = [0u8; 512];
/// let mut arena = Arena::new(&mut buf)?;
/// arena.alloc(64)?;
///
/// let used: usize = arena.chunks().filter(|c| c.used).map(|c| c.size).sum();
/// assert_eq!(used, 64);
/// # Ok::<(), arenars::ArenaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    buf: &'a [u8],
    next: Option<SlotId>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(buf: &'a [u8], head: SlotId) -> Self {
        Self {
            buf,
            next: head.get(),
        }
    }
}

impl Iterator for Chunks<'_> {
    type Item = ChunkInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let desc = Descriptor::read(self.buf, slot);
        self.next = desc.next.get();

        Some(ChunkInfo {
            offset: desc.start,
            size: desc.size,
            used: desc.used,
        })
    }
}

impl FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DESCRIPTOR_SIZE;

    #[test]
    fn test_follows_next_links() {
        let mut buf = [0u8; DESCRIPTOR_SIZE * 3];
        Descriptor {
            start: 96,
            size: 10,
            next: SlotId::new(2),
            ..Descriptor::CLAIMED
        }
        .write(&mut buf, SlotId::new(0));
        Descriptor {
            start: 106,
            size: 20,
            prev: SlotId::new(0),
            used: true,
            ..Descriptor::CLAIMED
        }
        .write(&mut buf, SlotId::new(2));

        let chunks: Vec<_> = Chunks::new(&buf, SlotId::HEAD).collect();
        assert_eq!(
            chunks,
            vec![
                ChunkInfo {
                    offset: 96,
                    size: 10,
                    used: false
                },
                ChunkInfo {
                    offset: 106,
                    size: 20,
                    used: true
                },
            ]
        );
    }
}
