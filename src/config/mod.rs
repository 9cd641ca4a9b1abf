//! Configuration for arena behavior.
//!
//! This module provides types to configure how an arena manages its buffer:
//!
//! - [`ArenaConfig`] - Minimum chunk size and descriptor pool sizing
//! - [`PoolMode`] - Whether the descriptor pool grows on demand or is reserved up front
//!
//! # Example
//!
//! ```
//! use arenars::{ArenaConfig, PoolMode};
//!
//! // Larger minimum chunk, growable pool
//! let config = ArenaConfig::new(64, PoolMode::Growable)?;
//!
//! // Classic fixed table sized for a 4 KiB buffer
//! let config = ArenaConfig::fixed_for(4096);
//! assert!(matches!(config.pool_mode(), PoolMode::Fixed(_)));
//!
//! # Ok::<(), arenars::ArenaError>(())
//! ```

use crate::descriptor::{DESCRIPTOR_SIZE, MAX_SLOTS};
use crate::error::ArenaError;

/// Default minimum chunk size (16 bytes).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 16;

/// How the descriptor pool obtains its slots.
///
/// Both modes keep the slots at the front of the managed buffer; they differ
/// in when those bytes are taken away from the payload region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolMode {
    /// Start with a single slot and steal more from the head chunk on demand.
    ///
    /// Slots are given back to the head chunk when the last one is released.
    #[default]
    Growable,

    /// Reserve exactly this many slots at creation. Growth and shrink are disabled.
    Fixed(usize),
}

/// Configuration for an [`Arena`](crate::Arena).
///
/// # Minimum chunk size
///
/// Requests smaller than `min_chunk_size` are rounded up to it, and a free
/// chunk is only split when the remainder would be at least this large. It
/// bounds internal fragmentation per allocation and caps the number of live
/// chunks at `buffer_len / min_chunk_size`.
///
/// # Example
///
/// ```
/// use arenars::{ArenaConfig, PoolMode};
///
/// let config = ArenaConfig::default()
///     .with_min_chunk_size(32)
///     .with_pool_mode(PoolMode::Fixed(8));
///
/// assert_eq!(config.min_chunk_size(), 32);
/// assert_eq!(config.initial_slots(), 8);
/// # Ok::<(), arenars::ArenaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaConfig {
    /// Smallest chunk the arena will create, in bytes.
    min_chunk_size: usize,

    /// Descriptor pool sizing.
    pool_mode: PoolMode,
}

impl ArenaConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if:
    /// - `min_chunk_size` is zero
    /// - a fixed pool has zero slots or more slots than a descriptor index can address
    pub fn new(min_chunk_size: usize, pool_mode: PoolMode) -> Result<Self, ArenaError> {
        if min_chunk_size == 0 {
            return Err(ArenaError::InvalidConfig {
                message: "min_chunk_size must be non-zero",
            });
        }

        if let PoolMode::Fixed(slots) = pool_mode {
            if slots == 0 {
                return Err(ArenaError::InvalidConfig {
                    message: "fixed pool needs at least one slot",
                });
            }
            if slots > MAX_SLOTS {
                return Err(ArenaError::InvalidConfig {
                    message: "fixed pool slot count exceeds descriptor index range",
                });
            }
        }

        Ok(Self {
            min_chunk_size,
            pool_mode,
        })
    }

    /// Fixed-pool configuration sized for a buffer of `len` bytes.
    ///
    /// Reserves one slot per `DESCRIPTOR_SIZE + min_chunk_size` bytes, which is
    /// enough to describe every chunk the buffer could ever be split into.
    ///
    /// ```
    /// use arenars::{ArenaConfig, PoolMode, DESCRIPTOR_SIZE, DEFAULT_MIN_CHUNK_SIZE};
    ///
    /// let config = ArenaConfig::fixed_for(480);
    /// assert_eq!(config.pool_mode(), PoolMode::Fixed(480 / (DESCRIPTOR_SIZE + DEFAULT_MIN_CHUNK_SIZE)));
    /// ```
    pub fn fixed_for(len: usize) -> Self {
        let slots = (len / (DESCRIPTOR_SIZE + DEFAULT_MIN_CHUNK_SIZE)).clamp(1, MAX_SLOTS);
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            pool_mode: PoolMode::Fixed(slots),
        }
    }

    /// Sets the minimum chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`ArenaConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_min_chunk_size(mut self, size: usize) -> Self {
        self.min_chunk_size = size;
        self
    }

    /// Sets the descriptor pool mode.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_pool_mode(mut self, mode: PoolMode) -> Self {
        self.pool_mode = mode;
        self
    }

    /// Returns the minimum chunk size.
    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    /// Returns the descriptor pool mode.
    pub fn pool_mode(&self) -> PoolMode {
        self.pool_mode
    }

    /// Number of descriptor slots reserved when the arena is created.
    pub fn initial_slots(&self) -> usize {
        match self.pool_mode {
            PoolMode::Growable => 1,
            PoolMode::Fixed(slots) => slots,
        }
    }

    /// Smallest buffer an arena with this configuration accepts.
    pub fn required_len(&self) -> usize {
        self.initial_slots()
            .saturating_mul(DESCRIPTOR_SIZE)
            .saturating_add(self.min_chunk_size)
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use arenars::ArenaConfig;
    ///
    /// let config = ArenaConfig::default().with_min_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ArenaError> {
        Self::new(self.min_chunk_size, self.pool_mode).map(|_| ())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            pool_mode: PoolMode::Growable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArenaConfig::default();
        assert_eq!(config.min_chunk_size(), DEFAULT_MIN_CHUNK_SIZE);
        assert_eq!(config.pool_mode(), PoolMode::Growable);
        assert_eq!(config.initial_slots(), 1);
        assert_eq!(config.required_len(), DESCRIPTOR_SIZE + DEFAULT_MIN_CHUNK_SIZE);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArenaConfig::default()
            .with_min_chunk_size(64)
            .with_pool_mode(PoolMode::Fixed(4));

        assert_eq!(config.min_chunk_size(), 64);
        assert_eq!(config.initial_slots(), 4);
        assert_eq!(config.required_len(), 4 * DESCRIPTOR_SIZE + 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_zero_min() {
        assert!(ArenaConfig::new(0, PoolMode::Growable).is_err());
    }

    #[test]
    fn test_invalid_config_empty_fixed_pool() {
        let result = ArenaConfig::new(16, PoolMode::Fixed(0));
        assert!(matches!(result, Err(ArenaError::InvalidConfig { .. })));
    }

    #[test]
    fn test_fixed_for_sizing() {
        let config = ArenaConfig::fixed_for(48 * 10 + 7);
        assert_eq!(config.pool_mode(), PoolMode::Fixed(10));

        // Never zero slots, so a tiny buffer fails at init instead of at validation.
        let config = ArenaConfig::fixed_for(3);
        assert_eq!(config.pool_mode(), PoolMode::Fixed(1));
        assert!(config.validate().is_ok());
    }
}
