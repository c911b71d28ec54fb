//! BLAKE2s compression function. More details in [`compress`]

/// Number of message bytes consumed by one call to [`compress`].
pub const BLOCK_BYTES: usize = 16 * size_of::<u32>();

/// Number of rounds of the BLAKE2s F function.
pub const ROUNDS: usize = 10;

/// Running 8-word hash state carried between compressions.
pub type ChainingValue = [u32; 8];

/// One message block.
pub type Block = [u8; BLOCK_BYTES];

/// Message schedule, RFC 7693 section 2.7: <https://datatracker.ietf.org/doc/html/rfc7693#section-2.7>
pub const SIGMA: [[usize; 16]; ROUNDS] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// BLAKE2s IV, the SHA-256 IV: <https://datatracker.ietf.org/doc/html/rfc7693#section-2.6>
pub const IV: ChainingValue = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

#[inline(always)]
#[allow(clippy::many_single_char_names)]
/// G function: <https://tools.ietf.org/html/rfc7693#section-3.1>
pub fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
    v[a] = v[a].wrapping_add(v[b]);
    v[a] = v[a].wrapping_add(x);
    v[d] ^= v[a];
    v[d] = v[d].rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] ^= v[c];
    v[b] = v[b].rotate_right(12);

    v[a] = v[a].wrapping_add(v[b]);
    v[a] = v[a].wrapping_add(y);
    v[d] ^= v[a];
    v[d] = v[d].rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] ^= v[c];
    v[b] = v[b].rotate_right(7);
}

/// Compression function F takes the chaining value `h`, one message block
/// (the last block is padded with zeros to full block size), the byte
/// counter `t` as two 32-bit words `[t0, t1]`, and the finalization flags.
/// `last_block` inverts `v[14]`, `last_node` inverts `v[15]` and is only set
/// for the final block of the last node of a tree level.
///
/// Returns the new chaining value; `h` itself is left untouched.
#[allow(clippy::many_single_char_names)]
pub fn compress(
    h: &ChainingValue,
    block: &Block,
    t: [u32; 2],
    last_block: bool,
    last_node: bool,
) -> ChainingValue {
    let mut m = [0u32; 16];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(size_of::<u32>())) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let mut v = [0u32; 16];
    v[..h.len()].copy_from_slice(h); // First half from state.
    v[h.len()..].copy_from_slice(&IV); // Second half from IV.

    v[12] ^= t[0];
    v[13] ^= t[1];

    if last_block {
        v[14] = !v[14];
    }
    if last_node {
        v[15] = !v[15];
    }

    for r in 0..ROUNDS {
        round(&mut v, &m, r);
    }

    let mut out = *h;
    for (i, word) in out.iter_mut().enumerate() {
        *word ^= v[i] ^ v[i + 8];
    }
    out
}

#[inline(always)]
fn round(v: &mut [u32; 16], m: &[u32; 16], r: usize) {
    // Message word selection permutation for this round.
    let s = &SIGMA[r];
    // columns
    g(v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

    // diagonals
    g(v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
}
