// Common routines for SHA-2 based hashes.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use sha2::digest::{Digest, FixedOutputReset};
use zeroize::Zeroize;

use crate::hash64::hash64_encode;
use crate::salt::Rounds;

/// Minimum number of rounds.
pub const ROUNDS_MIN: u32 = 1000;
/// Maximum number of rounds.
pub const ROUNDS_MAX: u32 = 999_999_999;
/// Default number of rounds.
pub const ROUNDS_DEFAULT: u32 = 5000;
/// Minimum salt length.
pub const SALT_LEN_MIN: usize = 1;
/// Maximum (and default) salt length.
pub const SALT_LEN_MAX: usize = 16;

pub(crate) const ROUNDS: Rounds = Rounds {
    min: ROUNDS_MIN,
    max: ROUNDS_MAX,
    default: ROUNDS_DEFAULT,
};

/// The SHA-crypt schedule, generic over the digest.
///
/// Identical for SHA-256 and SHA-512 up to the digest width and the
/// finalization permutation supplied by the caller. The working buffers
/// are sized for the wider digest and used up to `D::output_size()`.
pub(crate) fn sha2_crypt<D: Digest + FixedOutputReset>(
    pass: &[u8],
    salt: &str,
    rounds: u32,
    rounds_present: bool,
    transpose: &[u8],
    magic: &str,
) -> String {
    let dsize = <D as Digest>::output_size();

    let mut dgst_b = D::new();
    Digest::update(&mut dgst_b, pass);
    Digest::update(&mut dgst_b, salt);
    Digest::update(&mut dgst_b, pass);
    let mut hash_b = [0u8; 64];
    hash_b[..dsize].copy_from_slice(&dgst_b.finalize_reset());

    let mut dgst_a = D::new();
    Digest::update(&mut dgst_a, pass);
    Digest::update(&mut dgst_a, salt);

    let mut p = pass.len();
    while p > dsize {
        Digest::update(&mut dgst_a, &hash_b[..dsize]);
        p -= dsize;
    }
    Digest::update(&mut dgst_a, &hash_b[..p]);

    // A one bit selects the digest and a zero bit the password; note
    // that MD5-crypt does it the other way around.
    p = pass.len();
    while p > 0 {
        if p & 1 == 1 {
            Digest::update(&mut dgst_a, &hash_b[..dsize]);
        } else {
            Digest::update(&mut dgst_a, pass);
        }
        p >>= 1;
    }

    let mut hash_a = [0u8; 64];
    hash_a[..dsize].copy_from_slice(&dgst_a.finalize_reset());

    // Byte sequence P: a digest of the password repeated once per
    // password byte, tiled out to the password length.
    for _ in 0..pass.len() {
        Digest::update(&mut dgst_b, pass);
    }
    let mut hash_p = [0u8; 64];
    hash_p[..dsize].copy_from_slice(&dgst_b.finalize_reset());

    let mut seq_p = Vec::with_capacity(pass.len());
    p = pass.len();
    while p > dsize {
        seq_p.extend_from_slice(&hash_p[..dsize]);
        p -= dsize;
    }
    seq_p.extend_from_slice(&hash_p[..p]);

    // Byte sequence S: likewise for the salt, with a repetition count
    // taken from the first byte of digest A.
    for _ in 0..16 + hash_a[0] as usize {
        Digest::update(&mut dgst_b, salt);
    }
    let mut hash_s = [0u8; 64];
    hash_s[..dsize].copy_from_slice(&dgst_b.finalize_reset());

    let mut seq_s = Vec::with_capacity(salt.len());
    p = salt.len();
    while p > dsize {
        seq_s.extend_from_slice(&hash_s[..dsize]);
        p -= dsize;
    }
    seq_s.extend_from_slice(&hash_s[..p]);

    for r in 0..rounds {
        if r % 2 == 1 {
            Digest::update(&mut dgst_a, &seq_p);
        } else {
            Digest::update(&mut dgst_a, &hash_a[..dsize]);
        }
        if r % 3 > 0 {
            Digest::update(&mut dgst_a, &seq_s);
        }
        if r % 7 > 0 {
            Digest::update(&mut dgst_a, &seq_p);
        }
        if r % 2 == 1 {
            Digest::update(&mut dgst_a, &hash_a[..dsize]);
        } else {
            Digest::update(&mut dgst_a, &seq_p);
        }
        hash_a[..dsize].copy_from_slice(&dgst_a.finalize_reset());
    }

    let mut perm = [0u8; 64];
    for (i, &ti) in transpose.iter().enumerate() {
        perm[i] = hash_a[ti as usize];
    }
    let checksum = hash64_encode(&perm[..dsize]);

    let hash = if rounds_present {
        format!("{}rounds={}${}${}", magic, rounds, salt, checksum)
    } else {
        format!("{}{}${}", magic, salt, checksum)
    };

    hash_a.zeroize();
    hash_b.zeroize();
    hash_p.zeroize();
    hash_s.zeroize();
    seq_p.zeroize();
    seq_s.zeroize();
    perm.zeroize();
    hash
}
