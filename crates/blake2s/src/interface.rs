//! Interface for streaming hash engines.
use std::vec::Vec;

/// Generic streaming hash capability.
///
/// Writes never fail and always accept the whole input. [`StreamingHash::sum`]
/// does not finalize the engine: callers may keep writing and ask for the
/// digest of the longer stream later.
pub trait StreamingHash {
    /// Absorbs `bytes`. Returns the number of bytes accepted, always `bytes.len()`.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Appends the digest of everything written so far to `prefix` and
    /// returns the result. The engine state is unchanged.
    fn sum(&self, prefix: &[u8]) -> Vec<u8>;

    /// Returns the engine to its freshly constructed state.
    fn reset(&mut self);

    /// Digest length in bytes.
    fn size(&self) -> usize;

    /// Block size of the underlying compression function in bytes.
    fn block_size(&self) -> usize;
}
