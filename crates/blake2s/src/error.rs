//! Configuration errors raised while building a [`ParameterBlock`](crate::ParameterBlock).
use thiserror::Error;

/// Engine construction error.
///
/// Every variant is reported before any hashing starts; no partially
/// initialized engine is ever handed out.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// Digest size is outside `1..=32`.
    #[error("digest size {0} is out of range 1..=32")]
    InvalidDigestSize(usize),
    /// Key is longer than 32 bytes.
    #[error("key length {0} exceeds 32 bytes")]
    KeyTooLong(usize),
    /// Salt is longer than 8 bytes.
    #[error("salt length {0} exceeds 8 bytes")]
    SaltTooLong(usize),
    /// Personalization is longer than 8 bytes.
    #[error("personalization length {0} exceeds 8 bytes")]
    PersonalTooLong(usize),
    /// Tree inner hash size is larger than 32 bytes.
    #[error("inner hash size {0} exceeds 32 bytes")]
    InvalidInnerHashSize(u8),
    /// Tree maximal depth is zero.
    #[error("tree maximal depth must be at least 1")]
    InvalidMaxDepth,
}

impl ConfigError {
    /// Returns `true` if the error concerns tree hashing parameters.
    pub fn is_tree_error(&self) -> bool {
        matches!(self, Self::InvalidInnerHashSize(_) | Self::InvalidMaxDepth)
    }
}
