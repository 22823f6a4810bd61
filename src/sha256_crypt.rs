//! SHA-256 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm, designed by Ulrich Drepper, was developed as an
//! alternative to bcrypt with NIST-approved hashing functions. It is
//! similar to MD5-crypt, but has a variable number of rounds and a
//! larger salt.
//!
//! # Example
//!
//! ```
//! use crypt3::sha256_crypt;
//!
//! assert_eq!(sha256_crypt::generate("Hello world!", "$5$saltstring").unwrap(),
//!     "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5");
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt length__: 0 to 16 characters. Default is 16.
//!
//! * __Rounds__: 1000 to 999999999. Default is 5000. A value outside
//!   of the range is coerced to the nearest limit.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$5$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 43-character Hash64 encoding of the checksum.
//!
//! The format __`$5$`__*`{salt}`*__$__*`{checksum}`* is used if the
//! number of rounds was not specified in the input salt.

use sha2::Sha256;

use crate::salt::{ParsedSalt, SaltSpec};
use crate::sha2_crypt::sha2_crypt;
use crate::{generate_with, verify_with, Result};

pub use crate::sha2_crypt::ROUNDS_DEFAULT;
pub use crate::sha2_crypt::ROUNDS_MAX;
pub use crate::sha2_crypt::ROUNDS_MIN;
pub use crate::sha2_crypt::SALT_LEN_MAX;
pub use crate::sha2_crypt::SALT_LEN_MIN;

/// The magic prefix of this scheme.
pub const MAGIC: &str = "$5$";

#[rustfmt::skip]
const SHA256_TRANSPOSE: &[u8; 32] = &[
    20, 10,  0, 11,  1, 21,  2, 22, 12, 23, 13,  3, 14,  4, 24,  5,
    25, 15, 26, 16,  6, 17,  7, 27,  8, 28, 18, 29, 19,  9, 30, 31,
];

static SALT: SaltSpec = SaltSpec {
    magic: MAGIC,
    salt_len_min: SALT_LEN_MIN,
    salt_len_max: SALT_LEN_MAX,
    rounds: Some(crate::sha2_crypt::ROUNDS),
};

fn do_sha256_crypt(pass: &[u8], salt: &ParsedSalt) -> String {
    sha2_crypt::<Sha256>(
        pass,
        salt.salt,
        salt.rounds.unwrap_or(ROUNDS_DEFAULT),
        salt.rounds_present,
        SHA256_TRANSPOSE,
        MAGIC,
    )
}

/// Hash a password with the given salt string.
///
/// The salt string must begin with `$5$` and may be a previously stored
/// hash, whose checksum is then ignored. An overlong salt is truncated
/// to maximum length, and an out-of-range rounds value is coerced into
/// the allowed range. If `salt` is empty, a random salt of maximum
/// length is generated and hashing cannot fail.
pub fn generate<B: AsRef<[u8]>>(pass: B, salt: &str) -> Result<String> {
    generate_with(&SALT, pass.as_ref(), salt, do_sha256_crypt)
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> Result<()> {
    verify_with(&SALT, pass.as_ref(), hash, do_sha256_crypt)
}

/// The work factor of a hash string: the value of its `rounds=` field,
/// clamped into the allowed range, or the default when absent.
pub fn cost(hash: &str) -> Result<u32> {
    Ok(SALT.parse(hash)?.rounds.unwrap_or(ROUNDS_DEFAULT))
}

/// Generate a random salt parameter string with the given length and
/// rounds value.
///
/// The length is clamped into `[SALT_LEN_MIN, SALT_LEN_MAX]` and the
/// rounds value into `[ROUNDS_MIN, ROUNDS_MAX]`; the `rounds=` field is
/// elided when the clamped value equals `ROUNDS_DEFAULT`.
pub fn generate_salt(length: usize, rounds: u32) -> String {
    SALT.generate_rounds(length, rounds)
}

#[cfg(test)]
mod tests {
    use super::{generate, generate_salt, verify, MAGIC, ROUNDS_DEFAULT, SALT_LEN_MAX};

    #[test]
    fn reference_vectors() {
        let data = [
            (
                "$5$saltstring",
                "Hello world!",
                "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5",
            ),
            (
                "$5$rounds=10000$saltstringsaltstring",
                "Hello world!",
                "$5$rounds=10000$saltstringsaltst$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA",
            ),
            (
                "$5$rounds=5000$toolongsaltstring",
                "This is just a test",
                "$5$rounds=5000$toolongsaltstrin$Un/5jzAHMgOGZ5.mWJpuVolil07guHPvOW8mGRcvxa5",
            ),
            (
                "$5$rounds=1400$anotherlongsaltstring",
                "a very much longer text to encrypt.  This one even stretches over more\
                 than one line.",
                "$5$rounds=1400$anotherlongsalts$Rx.j8H.h8HjEDGomFU8bDkXm3XIUnzyxf12oP84Bnq1",
            ),
            (
                "$5$rounds=77777$short",
                "we have a short salt string but not a short password",
                "$5$rounds=77777$short$JiO1O3ZpDAxGJeaDIuqCoEFysAe1mZNJRs3pw0KQRd/",
            ),
            (
                "$5$rounds=123456$asaltof16chars..",
                "a short string",
                "$5$rounds=123456$asaltof16chars..$gP3VQ/6X7UUEW3HkBn2w1/Ptq2jxPyzV/cZKmF/wJvD",
            ),
            (
                "$5$rounds=10$roundstoolow",
                "the minimum number is still observed",
                "$5$rounds=1000$roundstoolow$yfvwcWrQ8l/K0DAWyuPMDNHpIVlTQebY9l/gL972bIC",
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
        assert_eq!(
            generate_salt(0, ROUNDS_DEFAULT).len(),
            MAGIC.len() + 1
        );
        for len in 1..=SALT_LEN_MAX {
            assert_eq!(generate_salt(len, ROUNDS_DEFAULT).len(), MAGIC.len() + len);
        }
        assert_eq!(
            generate_salt(17, ROUNDS_DEFAULT).len(),
            MAGIC.len() + SALT_LEN_MAX
        );
    }
}
