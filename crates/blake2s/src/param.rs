//! Engine configuration and the 32-byte BLAKE2s parameter block.
//!
//! [`Config`] is what callers fill in. [`ParameterBlock::build`] validates it
//! and produces the fixed-layout record that is XORed into the IV to form the
//! initial chaining value.
use crate::{
    compress::{ChainingValue, IV},
    ConfigError,
};
use std::vec::Vec;

/// Largest digest, and default digest, in bytes.
pub const MAX_DIGEST_BYTES: usize = 32;
/// Largest secret key in bytes.
pub const MAX_KEY_BYTES: usize = 32;
/// Salt field size in bytes.
pub const SALT_BYTES: usize = 8;
/// Personalization field size in bytes.
pub const PERSONAL_BYTES: usize = 8;
/// Serialized parameter block size in bytes.
pub const PARAM_BYTES: usize = 32;

/// Tree hashing parameters.
///
/// Each node of the tree is hashed by its own engine; the parent hashes the
/// concatenated child digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    /// How many children each node has. 0 for unlimited, 1 for sequential mode.
    pub fanout: u8,
    /// Maximal depth of the tree. 255 for unlimited, 1 for sequential mode.
    pub max_depth: u8,
    /// Maximal byte length of a leaf. 0 for unlimited or sequential mode.
    pub leaf_size: u32,
    /// Depth of this node. 0 for leaves or sequential mode.
    pub node_depth: u8,
    /// Offset of this node within its level. 0 for the leftmost node.
    pub node_offset: u32,
    /// Inner hash byte length in `0..=32`. 0 for sequential mode.
    pub inner_hash_size: u8,
    /// This node is the last, rightmost, node of its level.
    pub is_last_node: bool,
}

impl Default for Tree {
    /// Sequential mode.
    fn default() -> Self {
        Self {
            fanout: 1,
            max_depth: 1,
            leaf_size: 0,
            node_depth: 0,
            node_offset: 0,
            inner_hash_size: 0,
            is_last_node: false,
        }
    }
}

/// Parameters that affect the hash output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Digest byte length in `1..=32`. 0 selects the default of 32 bytes.
    pub size: u8,
    /// Secret key of up to 32 bytes for keyed hashing. Empty for unkeyed mode.
    pub key: Vec<u8>,
    /// Salt of up to 8 bytes, zero padded.
    pub salt: Vec<u8>,
    /// Personalization of up to 8 bytes, zero padded.
    pub personal: Vec<u8>,
    /// Tree hashing parameters. `None` for sequential mode.
    pub tree: Option<Tree>,
}

impl Config {
    /// Returns the default configuration: unkeyed, sequential, 32-byte digest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the digest size.
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Sets the secret key.
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the salt.
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Sets the personalization string.
    pub fn with_personal(mut self, personal: impl Into<Vec<u8>>) -> Self {
        self.personal = personal.into();
        self
    }

    /// Sets tree hashing parameters.
    pub fn with_tree(mut self, tree: Tree) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Digest size after applying the default.
    pub fn digest_size(&self) -> usize {
        match self.size {
            0 => MAX_DIGEST_BYTES,
            size => size as usize,
        }
    }
}

/// BLAKE2s parameter block.
///
/// Immutable once built. See [`ParameterBlock::to_bytes`] for the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParameterBlock {
    digest_length: u8,
    key_length: u8,
    fanout: u8,
    depth: u8,
    leaf_length: u32,
    node_offset: u32,
    node_depth: u8,
    inner_length: u8,
    salt: [u8; SALT_BYTES],
    personal: [u8; PERSONAL_BYTES],
    last_node: bool,
}

impl Default for ParameterBlock {
    fn default() -> Self {
        Self {
            digest_length: MAX_DIGEST_BYTES as u8,
            key_length: 0,
            fanout: 1,
            depth: 1,
            leaf_length: 0,
            node_offset: 0,
            node_depth: 0,
            inner_length: 0,
            salt: [0; SALT_BYTES],
            personal: [0; PERSONAL_BYTES],
            last_node: false,
        }
    }
}

impl ParameterBlock {
    /// Validates `config` and builds the parameter block.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        let digest_length = config.digest_size();
        if digest_length > MAX_DIGEST_BYTES {
            return Err(ConfigError::InvalidDigestSize(digest_length));
        }
        if config.key.len() > MAX_KEY_BYTES {
            return Err(ConfigError::KeyTooLong(config.key.len()));
        }
        if config.salt.len() > SALT_BYTES {
            return Err(ConfigError::SaltTooLong(config.salt.len()));
        }
        if config.personal.len() > PERSONAL_BYTES {
            return Err(ConfigError::PersonalTooLong(config.personal.len()));
        }

        let mut param = Self {
            digest_length: digest_length as u8,
            key_length: config.key.len() as u8,
            ..Default::default()
        };
        param.salt[..config.salt.len()].copy_from_slice(&config.salt);
        param.personal[..config.personal.len()].copy_from_slice(&config.personal);

        if let Some(tree) = &config.tree {
            if tree.inner_hash_size as usize > MAX_DIGEST_BYTES {
                return Err(ConfigError::InvalidInnerHashSize(tree.inner_hash_size));
            }
            if tree.max_depth == 0 {
                return Err(ConfigError::InvalidMaxDepth);
            }
            param.fanout = tree.fanout;
            param.depth = tree.max_depth;
            param.leaf_length = tree.leaf_size;
            param.node_offset = tree.node_offset;
            param.node_depth = tree.node_depth;
            param.inner_length = tree.inner_hash_size;
            param.last_node = tree.is_last_node;
        }

        Ok(param)
    }

    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        self.digest_length as usize
    }

    /// Key length in bytes. 0 when unkeyed.
    pub fn key_length(&self) -> usize {
        self.key_length as usize
    }

    /// Returns `true` if a key block precedes the message.
    pub fn key_present(&self) -> bool {
        self.key_length > 0
    }

    /// Tree fanout.
    pub fn fanout(&self) -> u8 {
        self.fanout
    }

    /// Tree maximal depth.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Tree leaf maximal byte length.
    pub fn leaf_length(&self) -> u32 {
        self.leaf_length
    }

    /// Offset of the node within its level.
    pub fn node_offset(&self) -> u32 {
        self.node_offset
    }

    /// Depth of the node.
    pub fn node_depth(&self) -> u8 {
        self.node_depth
    }

    /// Tree inner hash length.
    pub fn inner_length(&self) -> u8 {
        self.inner_length
    }

    /// Zero padded salt.
    pub fn salt(&self) -> &[u8; SALT_BYTES] {
        &self.salt
    }

    /// Zero padded personalization.
    pub fn personal(&self) -> &[u8; PERSONAL_BYTES] {
        &self.personal
    }

    /// Returns `true` if the node is the last one of its level.
    ///
    /// Not part of the serialized block, it only sets the last-node flag of
    /// the final compression.
    pub fn last_node(&self) -> bool {
        self.last_node
    }

    /// Serializes the block in RFC 7693 order:
    ///
    /// ```text
    /// [1 digest length][1 key length][1 fanout][1 depth]
    /// [4 leaf length][4 node offset][2 reserved]
    /// [1 node depth][1 inner length][8 salt][8 personalization]
    /// ```
    ///
    /// All integers are little-endian.
    pub fn to_bytes(&self) -> [u8; PARAM_BYTES] {
        let mut out = [0u8; PARAM_BYTES];
        out[0] = self.digest_length;
        out[1] = self.key_length;
        out[2] = self.fanout;
        out[3] = self.depth;
        out[4..8].copy_from_slice(&self.leaf_length.to_le_bytes());
        out[8..12].copy_from_slice(&self.node_offset.to_le_bytes());
        // 12..14 stays zero
        out[14] = self.node_depth;
        out[15] = self.inner_length;
        out[16..24].copy_from_slice(&self.salt);
        out[24..32].copy_from_slice(&self.personal);
        out
    }

    /// Serialized block as eight little-endian words.
    pub fn to_words(&self) -> [u32; 8] {
        let bytes = self.to_bytes();
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        words
    }

    /// Initial chaining value: IV XOR the parameter words.
    pub fn initial_chaining_value(&self) -> ChainingValue {
        let mut h = IV;
        for (h, p) in h.iter_mut().zip(self.to_words()) {
            *h ^= p;
        }
        h
    }
}
