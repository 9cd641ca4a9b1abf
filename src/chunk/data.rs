//! Allocation handles and chunk snapshots.

use core::fmt;
use core::ops::Range;

/// A region of the arena's buffer handed out to the caller.
///
/// The offset is the "address" of the allocation: it is what
/// [`Arena::release`](crate::Arena::release) takes back. The size is the
/// size of the chunk that was reserved, which may exceed the request by less
/// than the minimum chunk size.
///
/// # Example
///
/// ```
/// use arenars::Arena;
///
/// let mut buf = [0u8; 1024];
/// let mut arena = Arena::new(&mut buf)?;
///
/// let a = arena.alloc(10)?;
/// assert!(a.size() >= 10);
/// assert_eq!(a.range(), a.offset()..a.offset() + a.size());
/// # Ok::<(), arenars::ArenaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Allocation {
    offset: usize,
    size: usize,
}

impl Allocation {
    pub(crate) fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// Byte offset of the allocation within the arena's buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of usable bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Returns the allocation as a range of buffer offsets.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Allocation({} bytes @ {})", self.size, self.offset)
    }
}

/// One chunk of the arena as seen by [`Arena::chunks`](crate::Arena::chunks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkInfo {
    /// Byte offset of the chunk within the buffer.
    pub offset: usize,

    /// Chunk length in bytes.
    pub size: usize,

    /// Whether the chunk is currently handed out.
    pub used: bool,
}

impl ChunkInfo {
    /// Returns the end offset (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Returns the chunk as a range of buffer offsets.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Display for ChunkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.used { "used" } else { "free" };
        write!(f, "Chunk({} bytes @ {}, {})", self.size, self.offset, state)
    }
}
