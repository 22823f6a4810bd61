//! MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed by Poul-Henning Kamp for FreeBSD to
//! replace the aging DES crypt. It was adopted in various Linux
//! distributions and saw wide use. Presently, it's considered insecure
//! and shouldn't be used for new passwords.
//!
//! # Example
//!
//! ```
//! use crypt3::md5_crypt;
//!
//! assert_eq!(md5_crypt::generate("password", "$1$deadbeef$").unwrap(),
//!     "$1$deadbeef$Q7g0UO4hRC0mgQUQ/qkjZ0");
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt length__: 0 to 8 characters. Default is 8.
//!
//! * __Rounds__: 1000 (fixed.)
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Hash64 encoding of the checksum.

use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::hash64::hash64_encode;
use crate::salt::{ParsedSalt, SaltSpec};
use crate::{generate_with, verify_with, Result};

/// The magic prefix of this scheme.
pub const MAGIC: &str = "$1$";
/// Minimum salt length.
pub const SALT_LEN_MIN: usize = 1;
/// Maximum salt length.
pub const SALT_LEN_MAX: usize = 8;
/// Number of rounds, fixed for the MD5-crypt family.
pub const ROUNDS: u32 = 1000;

const MD5_TRANSPOSE: &[u8; 16] = &[12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11];

static SALT: SaltSpec = SaltSpec {
    magic: MAGIC,
    salt_len_min: SALT_LEN_MIN,
    salt_len_max: SALT_LEN_MAX,
    rounds: None,
};

/// The keyed mixing schedule shared by MD5-crypt and APR1.
///
/// The magic prefix is mixed into the initial digest and re-emitted in
/// the output; it is the only difference between the two schemes.
pub(crate) fn md5_crypt(pass: &[u8], salt: &str, magic: &str) -> String {
    let mut dgst_b = Md5::new();
    dgst_b.update(pass);
    dgst_b.update(salt);
    dgst_b.update(pass);
    let mut hash_b = dgst_b.finalize();

    let mut dgst_a = Md5::new();
    dgst_a.update(pass);
    dgst_a.update(magic);
    dgst_a.update(salt);

    let mut plen = pass.len();
    while plen > 16 {
        dgst_a.update(&hash_b);
        plen -= 16;
    }
    dgst_a.update(&hash_b[..plen]);

    // A zero bit selects the first password byte and a one bit the NUL,
    // the reverse of SHA-crypt. Historical behavior; interop depends
    // on it.
    plen = pass.len();
    while plen > 0 {
        if plen & 1 == 0 {
            dgst_a.update(&pass[..1]);
        } else {
            dgst_a.update([0u8]);
        }
        plen >>= 1;
    }

    let mut hash_a = dgst_a.finalize_reset();
    for r in 0..ROUNDS {
        if r % 2 == 1 {
            dgst_a.update(pass);
        } else {
            dgst_a.update(&hash_a);
        }
        if r % 3 > 0 {
            dgst_a.update(salt);
        }
        if r % 7 > 0 {
            dgst_a.update(pass);
        }
        if r % 2 == 0 {
            dgst_a.update(pass);
        } else {
            dgst_a.update(&hash_a);
        }
        hash_a = dgst_a.finalize_reset();
    }

    let mut perm = [0u8; 16];
    for (i, &ti) in MD5_TRANSPOSE.iter().enumerate() {
        perm[i] = hash_a[ti as usize];
    }
    let hash = format!("{}{}${}", magic, salt, hash64_encode(&perm));

    hash_a.as_mut_slice().zeroize();
    hash_b.as_mut_slice().zeroize();
    perm.zeroize();
    hash
}

fn do_md5_crypt(pass: &[u8], salt: &ParsedSalt) -> String {
    md5_crypt(pass, salt.salt, MAGIC)
}

/// Hash a password with the given salt string.
///
/// The salt string must begin with `$1$` and may be a previously stored
/// hash, whose checksum is then ignored. An overlong salt is truncated
/// to maximum length. If `salt` is empty, a random salt of maximum
/// length is generated and hashing cannot fail.
pub fn generate<B: AsRef<[u8]>>(pass: B, salt: &str) -> Result<String> {
    generate_with(&SALT, pass.as_ref(), salt, do_md5_crypt)
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> Result<()> {
    verify_with(&SALT, pass.as_ref(), hash, do_md5_crypt)
}

/// The work factor of a hash string: always 1000 for this scheme.
///
/// The string is still parsed, so a malformed input is reported.
pub fn cost(hash: &str) -> Result<u32> {
    SALT.parse(hash)?;
    Ok(ROUNDS)
}

/// Generate a random salt parameter string of a given length, clamped
/// into `[SALT_LEN_MIN, SALT_LEN_MAX]`, including the magic prefix.
pub fn generate_salt(length: usize) -> String {
    SALT.generate(length)
}

#[cfg(test)]
mod tests {
    use super::{generate, generate_salt, verify, MAGIC, SALT_LEN_MAX};

    #[test]
    fn reference_vectors() {
        let data = [
            ("$1$$", &b"abcdefghijk"[..], "$1$$pL/BYSxMXs.jVuSV1lynn1"),
            (
                "$1$an overlong salt$",
                b"abcdfgh",
                "$1$an overl$ZYftmJDIw8sG5s4gG6r.70",
            ),
            (
                "$1$12345678$",
                b"Lorem ipsum dolor sit amet",
                "$1$12345678$Suzx8CrBlkNJwVHHHv5tZ.",
            ),
            (
                "$1$deadbeef$",
                b"password",
                "$1$deadbeef$Q7g0UO4hRC0mgQUQ/qkjZ0",
            ),
            ("$1$$", b"missing salt", "$1$$Lv61fbMiEGprscPkdE9Iw/"),
            (
                "$1$holy-moly-batman$",
                b"1234567",
                "$1$holy-mol$WKomB0dWknSxdW/e8WYHG0",
            ),
            (
                "$1$asdfjkl;$",
                b"A really long password. Longer than a password has any right to be\
                 . Hey bub, don't mess with this password.",
                "$1$asdfjkl;$DUqPhKwbK4smV0aEMyDdx/",
            ),
        ];
        for (salt, pass, expected) in data {
            assert_eq!(generate(pass, salt).unwrap(), expected);
        }
    }

    #[test]
    fn random_salt_round_trip() {
        let hash = generate("password", "").unwrap();
        assert!(verify("password", &hash).is_ok());
        assert!(verify("bassword", &hash).is_err());
    }

    #[test]
    fn generated_salt_lengths() {
        assert_eq!(generate_salt(0).len(), MAGIC.len() + 1);
        for len in 1..=SALT_LEN_MAX {
            assert_eq!(generate_salt(len).len(), MAGIC.len() + len);
        }
        assert_eq!(generate_salt(9).len(), MAGIC.len() + SALT_LEN_MAX);
    }
}
