//! # blake2s
//!
//! BLAKE2s ([RFC 7693](https://datatracker.ietf.org/doc/html/rfc7693)) with a
//! streaming interface, 1 to 32 byte digests, keyed mode, salt,
//! personalization and tree hashing parameters.
//!
//! ```
//! use blake2s::{blake2s, Blake2s};
//!
//! let mut hasher = Blake2s::default();
//! hasher.write(b"a");
//! hasher.write(b"bc");
//! assert_eq!(hasher.sum(&[]), blake2s(b"abc"));
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod compress;
pub mod engine;
pub mod error;
pub mod interface;
pub mod param;
pub mod state;

pub use compress::{compress, Block, ChainingValue, BLOCK_BYTES};
pub use engine::{blake2s, Blake2s};
pub use error::ConfigError;
pub use interface::StreamingHash;
pub use param::{Config, ParameterBlock, Tree, MAX_DIGEST_BYTES, MAX_KEY_BYTES};
pub use state::StreamingState;

/// Re-export of the RustCrypto traits implemented by [`Blake2s`].
pub use digest;
