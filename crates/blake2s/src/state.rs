//! Incremental hashing state: chaining value, byte counter and block buffer.
use crate::{
    compress::{compress, Block, ChainingValue, BLOCK_BYTES},
    param::{ParameterBlock, MAX_DIGEST_BYTES},
};
use core::fmt;

/// Streaming state driving the compression function.
///
/// The last block of input, even a complete one, is kept in the buffer until
/// more input shows it is not the last. Only [`StreamingState::finalize`]
/// compresses it, with the last-block flag set.
///
/// All fields are fixed-size arrays, so [`Clone`] is a deep copy.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamingState {
    h: ChainingValue,
    /// Bytes compressed so far. Split into `[t0, t1]` words for [`compress`].
    t: u64,
    buf: Block,
    buflen: usize,
}

impl fmt::Debug for StreamingState {
    // The buffer can hold the key block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingState")
            .field("counter", &self.t)
            .field("buffered", &self.buflen)
            .finish_non_exhaustive()
    }
}

impl StreamingState {
    /// Returns a state seeded from `param`, with the zero padded `key` block
    /// queued as the first block of input.
    pub fn new(param: &ParameterBlock, key: Option<&Block>) -> Self {
        let mut state = Self {
            h: [0; 8],
            t: 0,
            buf: [0; BLOCK_BYTES],
            buflen: 0,
        };
        state.reset(param, key);
        state
    }

    /// Re-derives the initial chaining value from `param` and clears the
    /// counter and the buffer. A `key` block is queued again.
    pub fn reset(&mut self, param: &ParameterBlock, key: Option<&Block>) {
        self.h = param.initial_chaining_value();
        self.t = 0;
        match key {
            Some(key) => {
                self.buf = *key;
                self.buflen = BLOCK_BYTES;
            }
            None => {
                self.buf = [0; BLOCK_BYTES];
                self.buflen = 0;
            }
        }
    }

    /// Absorbs `input`.
    pub fn update(&mut self, mut input: &[u8]) {
        if input.is_empty() {
            return;
        }

        let fill = BLOCK_BYTES - self.buflen;
        if input.len() > fill {
            // More input follows, so the buffered block is not the last one.
            self.buf[self.buflen..].copy_from_slice(&input[..fill]);
            let block = self.buf;
            self.compress_block(&block);
            self.buflen = 0;
            input = &input[fill..];

            while let Some((block, rest)) = input.split_first_chunk::<BLOCK_BYTES>() {
                if rest.is_empty() {
                    break;
                }
                self.compress_block(block);
                input = rest;
            }
        }

        self.buf[self.buflen..self.buflen + input.len()].copy_from_slice(input);
        self.buflen += input.len();
    }

    /// Pads the buffered bytes, compresses them as the last block and returns
    /// the full little-endian chaining value. Callers truncate it to the
    /// digest length.
    ///
    /// Works on copies of the state, `self` can keep absorbing input.
    pub fn finalize(&self, last_node: bool) -> [u8; MAX_DIGEST_BYTES] {
        let mut block = self.buf;
        block[self.buflen..].fill(0);
        let t = self.t.wrapping_add(self.buflen as u64);

        let h = compress(&self.h, &block, split_counter(t), true, last_node);

        let mut out = [0u8; MAX_DIGEST_BYTES];
        for (chunk, word) in out.chunks_exact_mut(size_of::<u32>()).zip(h) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Current chaining value.
    pub fn chaining_value(&self) -> &ChainingValue {
        &self.h
    }

    /// Bytes compressed so far, excluding buffered bytes.
    pub fn counter(&self) -> u64 {
        self.t
    }

    /// Number of bytes waiting in the buffer.
    pub fn buffered(&self) -> usize {
        self.buflen
    }

    #[inline]
    fn compress_block(&mut self, block: &Block) {
        self.t = self.t.wrapping_add(BLOCK_BYTES as u64);
        self.h = compress(&self.h, block, split_counter(self.t), false, false);
    }
}

#[inline]
fn split_counter(t: u64) -> [u32; 2] {
    [t as u32, (t >> 32) as u32]
}
