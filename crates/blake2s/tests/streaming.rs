//! Streaming contract: chunking, non-destructive sum, reset, configuration sensitivity.
use blake2s::{Blake2s, Config, ConfigError, StreamingHash, Tree, BLOCK_BYTES};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rstest::rstest;

fn message(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

fn digest(config: &Config, data: &[u8]) -> Vec<u8> {
    config.digest(data).unwrap()
}

fn keyed_config() -> Config {
    Config::new().with_key(&b"Squeamish Ossifrage"[..])
}

#[test]
fn deterministic() {
    let data = message(300);
    for config in [Config::new(), keyed_config()] {
        assert_eq!(digest(&config, &data), digest(&config, &data));
    }
}

#[rstest]
#[case::empty(0)]
#[case::one(1)]
#[case::below_block(63)]
#[case::block(64)]
#[case::above_block(65)]
#[case::two_blocks(128)]
#[case::odd(1000)]
fn random_splits(#[case] len: usize) {
    let data = message(len);
    let mut rng = StdRng::seed_from_u64(0xb1a4e2 ^ len as u64);

    for config in [Config::new(), keyed_config(), Config::new().with_size(13)] {
        let expected = digest(&config, &data);

        for _ in 0..32 {
            let mut hasher = Blake2s::new(&config).unwrap();
            let mut rest = &data[..];
            while !rest.is_empty() {
                // zero-length chunks included
                let n = rng.random_range(0..=rest.len().min(2 * BLOCK_BYTES + 1));
                let (chunk, tail) = rest.split_at(n);
                assert_eq!(hasher.write(chunk), n);
                rest = tail;
            }
            hasher.write(&[]);
            assert_eq!(hasher.sum(&[]), expected);
        }
    }
}

#[test]
fn block_aligned_splits() {
    let data = message(4 * BLOCK_BYTES);
    let expected = digest(&Config::new(), &data);

    for split in [0, BLOCK_BYTES, 2 * BLOCK_BYTES, 3 * BLOCK_BYTES, 4 * BLOCK_BYTES] {
        let mut hasher = Blake2s::default();
        hasher.write(&data[..split]);
        hasher.write(&data[split..]);
        assert_eq!(hasher.sum(&[]), expected, "split at {split}");
    }

    let mut hasher = Blake2s::default();
    for block in data.chunks(BLOCK_BYTES) {
        hasher.write(block);
    }
    assert_eq!(hasher.sum(&[]), expected);
}

#[test]
fn sum_is_not_destructive() {
    let data = message(200);
    for config in [Config::new(), keyed_config()] {
        let mut hasher = Blake2s::new(&config).unwrap();
        hasher.write(&data[..70]);

        let first = hasher.sum(&[]);
        assert_eq!(hasher.sum(&[]), first);
        assert_eq!(first, digest(&config, &data[..70]));

        hasher.write(&data[70..]);
        assert_eq!(hasher.sum(&[]), digest(&config, &data));
    }
}

#[test]
fn sum_on_exact_block_boundary() {
    let data = message(2 * BLOCK_BYTES);
    let mut hasher = Blake2s::default();
    hasher.write(&data[..BLOCK_BYTES]);
    assert_eq!(hasher.sum(&[]), digest(&Config::new(), &data[..BLOCK_BYTES]));
    hasher.write(&data[BLOCK_BYTES..]);
    assert_eq!(hasher.sum(&[]), digest(&Config::new(), &data));
}

#[test]
fn clone_is_independent() {
    let mut hasher = Blake2s::default();
    hasher.write(b"shared prefix");
    let mut fork = hasher.clone();

    fork.write(b" and more");
    assert_eq!(hasher.sum(&[]), digest(&Config::new(), b"shared prefix"));
    assert_eq!(
        fork.sum(&[]),
        digest(&Config::new(), b"shared prefix and more")
    );
}

#[test]
fn digest_length_control() {
    let data = message(100);
    for size in 1..=32u8 {
        let hasher = Blake2s::new(&Config::new().with_size(size)).unwrap();
        assert_eq!(hasher.size(), size as usize);
        assert_eq!(hasher.sum(&[]).len(), size as usize);
        assert_eq!(digest(&Config::new().with_size(size), &data).len(), size as usize);
    }
    assert_eq!(Blake2s::new(&Config::new()).unwrap().size(), 32);

    // digest length is a parameter, not a truncation
    let short = digest(&Config::new().with_size(16), &data);
    let long = digest(&Config::new(), &data);
    assert_ne!(short[..], long[..16]);
}

#[test]
fn keyed_sensitivity() {
    let k1 = Blake2s::new_keyed(b"key one").unwrap();
    let k2 = Blake2s::new_keyed(b"key two").unwrap();
    let unkeyed = Blake2s::default();

    let sums: Vec<_> = [k1, k2, unkeyed]
        .into_iter()
        .map(|mut hasher| {
            hasher.write(b"foo");
            hasher.sum(&[])
        })
        .collect();

    assert_ne!(sums[0], sums[1]);
    assert_ne!(sums[0], sums[2]);
    assert_ne!(sums[1], sums[2]);
}

#[test]
fn salt_and_personal_sensitivity() {
    let base = keyed_config().with_personal(&b"Shaftoe"[..]);

    let other_personal = keyed_config().with_personal(&b"Waterhou"[..]);
    assert_ne!(digest(&base, b"foo"), digest(&other_personal, b"foo"));

    let salted = base.clone().with_salt(&b"salt1"[..]);
    let other_salt = base.clone().with_salt(&b"salt2"[..]);
    assert_ne!(digest(&salted, b"foo"), digest(&other_salt, b"foo"));
    assert_ne!(digest(&salted, b"foo"), digest(&base, b"foo"));

    // short values are zero padded
    let padded = keyed_config().with_personal(&b"Shaftoe\0"[..]);
    assert_eq!(digest(&base, b"foo"), digest(&padded, b"foo"));
}

#[test]
fn reset_equivalence() {
    for config in [Config::new(), keyed_config(), Config::new().with_size(20)] {
        let mut hasher = Blake2s::new(&config).unwrap();
        hasher.write(&message(150));
        hasher.reset();
        hasher.write(b"b");

        let mut fresh = Blake2s::new(&config).unwrap();
        fresh.write(b"b");
        assert_eq!(hasher.sum(&[]), fresh.sum(&[]));
    }
}

#[test]
fn tree_parameters() {
    let leaf = Tree {
        fanout: 2,
        max_depth: 2,
        leaf_size: 4096,
        inner_hash_size: 32,
        ..Default::default()
    };
    let data = message(100);

    let sequential = digest(&Config::new(), &data);
    let left = digest(&Config::new().with_tree(leaf), &data);
    let right = digest(
        &Config::new().with_tree(Tree {
            node_offset: 1,
            is_last_node: true,
            ..leaf
        }),
        &data,
    );
    let right_not_last = digest(
        &Config::new().with_tree(Tree {
            node_offset: 1,
            ..leaf
        }),
        &data,
    );
    assert_ne!(sequential, left);
    assert_ne!(left, right_not_last);
    assert_ne!(right, right_not_last);

    // default tree is sequential mode
    assert_eq!(digest(&Config::new().with_tree(Tree::default()), &data), sequential);

    // root node hashes the child digests
    let root = Tree {
        node_depth: 1,
        is_last_node: true,
        ..leaf
    };
    let mut parent = Blake2s::new(&Config::new().with_tree(root)).unwrap();
    parent.write(&left);
    parent.write(&right);
    assert_eq!(parent.size(), 32);
    assert_ne!(parent.sum(&[]), sequential);
}

#[test]
fn last_node_survives_reset() {
    let tree = Tree {
        is_last_node: true,
        ..Default::default()
    };
    let config = Config::new().with_tree(tree);
    let expected = digest(&config, b"node");

    let mut hasher = Blake2s::new(&config).unwrap();
    hasher.write(b"junk");
    hasher.reset();
    hasher.write(b"node");
    assert_eq!(hasher.sum(&[]), expected);
    assert_ne!(expected, digest(&Config::new(), b"node"));
}

#[test]
fn construction_errors() {
    assert_eq!(
        Blake2s::new_keyed(&[0u8; 33]).unwrap_err(),
        ConfigError::KeyTooLong(33)
    );
    assert_eq!(
        Blake2s::new(&Config::new().with_size(33)).unwrap_err(),
        ConfigError::InvalidDigestSize(33)
    );
    assert_eq!(
        Blake2s::new(&Config::new().with_salt(vec![0u8; 9])).unwrap_err(),
        ConfigError::SaltTooLong(9)
    );
    assert_eq!(
        Blake2s::new(&Config::new().with_personal(vec![0u8; 16])).unwrap_err(),
        ConfigError::PersonalTooLong(16)
    );
    let err = Blake2s::new(&Config::new().with_tree(Tree {
        inner_hash_size: 64,
        ..Default::default()
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidInnerHashSize(64));
    assert!(err.is_tree_error());
}

#[test]
fn generic_streaming_hash() {
    fn digest_of<H: StreamingHash>(hasher: &mut H, parts: &[&[u8]]) -> Vec<u8> {
        hasher.reset();
        for part in parts {
            assert_eq!(hasher.write(part), part.len());
        }
        assert_eq!(hasher.block_size(), 64);
        hasher.sum(b"")
    }

    let mut hasher = Blake2s::default();
    assert_eq!(
        digest_of(&mut hasher, &[&b"ab"[..], &b""[..], &b"c"[..]]),
        blake2s::blake2s(b"abc")
    );
}

#[cfg(feature = "serde")]
#[test]
fn config_serde() {
    let config = keyed_config().with_salt(&b"s"[..]).with_tree(Tree::default());
    let json = serde_json::to_string(&config).unwrap();
    let decoded: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);

    let partial: Config = serde_json::from_str(r#"{"size": 16}"#).unwrap();
    assert_eq!(partial, Config::new().with_size(16));
}
