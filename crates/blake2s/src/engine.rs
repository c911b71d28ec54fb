//! BLAKE2s hash engine. Public streaming surface over [`StreamingState`].
use crate::{
    compress::{Block, BLOCK_BYTES},
    interface::StreamingHash,
    param::{Config, ParameterBlock, MAX_DIGEST_BYTES},
    state::StreamingState,
    ConfigError,
};
use core::fmt;
use digest::{
    HashMarker, InvalidBufferSize, InvalidOutputSize, Reset, Update, VariableOutput,
    VariableOutputReset,
};
use std::vec::Vec;

/// BLAKE2s engine with a configured digest length, key, salt,
/// personalization and tree position.
///
/// # Examples
///
/// ```
/// use blake2s::{Blake2s, Config};
///
/// let mut hasher = Blake2s::new(&Config::new().with_size(16).with_personal(&b"app v1"[..]))?;
/// hasher.write(b"hello ");
/// let partial = hasher.sum(&[]);
/// hasher.write(b"world");
/// let full = hasher.sum(&[]);
///
/// assert_eq!(partial.len(), 16);
/// assert_ne!(partial, full);
/// # Ok::<(), blake2s::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct Blake2s {
    param: ParameterBlock,
    /// Zero padded key, queued as the first block on every reset.
    key: Option<Block>,
    state: StreamingState,
}

impl fmt::Debug for Blake2s {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake2s")
            .field("param", &self.param)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for Blake2s {
    fn default() -> Self {
        Self::new_256()
    }
}

impl Blake2s {
    /// Block size in bytes.
    pub const BLOCK_SIZE: usize = BLOCK_BYTES;

    /// Builds an engine from `config`.
    ///
    /// Fails if any field is out of range. Nothing is hashed before the
    /// configuration is validated.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let param = ParameterBlock::build(config)?;
        let key = param.key_present().then(|| {
            let mut block = [0u8; BLOCK_BYTES];
            block[..config.key.len()].copy_from_slice(&config.key);
            block
        });
        let state = StreamingState::new(&param, key.as_ref());
        Ok(Self { param, key, state })
    }

    /// Keyed engine with a 32-byte digest. An empty key gives the unkeyed hash.
    pub fn new_keyed(key: &[u8]) -> Result<Self, ConfigError> {
        Self::new(&Config::new().with_key(key))
    }

    /// Unkeyed engine with a 32-byte digest.
    pub fn new_256() -> Self {
        let param = ParameterBlock::default();
        Self {
            state: StreamingState::new(&param, None),
            param,
            key: None,
        }
    }

    /// Absorbs `bytes` and returns `bytes.len()`.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.state.update(bytes);
        bytes.len()
    }

    /// Always 64.
    pub fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }

    /// Configured digest length in bytes.
    pub fn size(&self) -> usize {
        self.param.digest_length()
    }

    /// Parameter block the engine was built from.
    pub fn param(&self) -> &ParameterBlock {
        &self.param
    }

    /// Returns `prefix` followed by the digest of everything written so far.
    ///
    /// The engine is not finalized: more data can be written and summed again.
    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(prefix.len() + self.size());
        out.extend_from_slice(prefix);
        out.extend_from_slice(&self.digest_full()[..self.size()]);
        out
    }

    /// Digest of everything written so far. Same as `sum(&[])`.
    pub fn finalize(&self) -> Vec<u8> {
        self.sum(&[])
    }

    /// Writes the digest into `out`, which must be exactly [`Self::size`] bytes.
    pub fn finalize_into(&self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
        if out.len() != self.size() {
            return Err(InvalidBufferSize);
        }
        out.copy_from_slice(&self.digest_full()[..self.size()]);
        Ok(())
    }

    /// Returns the engine to its freshly constructed state, key block included.
    pub fn reset(&mut self) {
        self.state.reset(&self.param, self.key.as_ref());
    }

    #[inline]
    fn digest_full(&self) -> [u8; MAX_DIGEST_BYTES] {
        self.state.finalize(self.param.last_node())
    }
}

impl StreamingHash for Blake2s {
    fn write(&mut self, bytes: &[u8]) -> usize {
        Blake2s::write(self, bytes)
    }

    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        Blake2s::sum(self, prefix)
    }

    fn reset(&mut self) {
        Blake2s::reset(self)
    }

    fn size(&self) -> usize {
        Blake2s::size(self)
    }

    fn block_size(&self) -> usize {
        Blake2s::block_size(self)
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Blake2s {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Blake2s::write(self, buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl HashMarker for Blake2s {}

impl Update for Blake2s {
    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }
}

impl Reset for Blake2s {
    fn reset(&mut self) {
        Blake2s::reset(self)
    }
}

impl VariableOutput for Blake2s {
    const MAX_OUTPUT_SIZE: usize = MAX_DIGEST_BYTES;

    fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
        if output_size == 0 || output_size > MAX_DIGEST_BYTES {
            return Err(InvalidOutputSize);
        }
        Blake2s::new(&Config::new().with_size(output_size as u8)).map_err(|_| InvalidOutputSize)
    }

    fn output_size(&self) -> usize {
        self.size()
    }

    fn finalize_variable(self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
        self.finalize_into(out)
    }
}

impl VariableOutputReset for Blake2s {
    fn finalize_variable_reset(&mut self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
        self.finalize_into(out)?;
        Blake2s::reset(self);
        Ok(())
    }
}

impl Config {
    /// One-shot digest of `data` under this configuration.
    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>, ConfigError> {
        let mut hasher = Blake2s::new(self)?;
        hasher.write(data);
        Ok(hasher.finalize())
    }
}

/// Unkeyed 32-byte BLAKE2s digest of `data`.
pub fn blake2s(data: &[u8]) -> [u8; MAX_DIGEST_BYTES] {
    let mut hasher = Blake2s::new_256();
    hasher.write(data);
    hasher.digest_full()
}
