//! SHA-512 based hash.
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
//! use crypt3::sha512_crypt;
//!
//! assert_eq!(sha512_crypt::generate("Hello world!", "$6$saltstring").unwrap(),
//!     "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uB\
//!      nIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1");
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
//! __`$6$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is an 86-character Hash64 encoding of the checksum.
//!
//! The format __`$6$`__*`{salt}`*__$__*`{checksum}`* is used if the
//! number of rounds was not specified in the input salt.

use sha2::Sha512;

use crate::salt::{ParsedSalt, SaltSpec};
use crate::sha2_crypt::sha2_crypt;
use crate::{generate_with, verify_with, Result};

pub use crate::sha2_crypt::ROUNDS_DEFAULT;
pub use crate::sha2_crypt::ROUNDS_MAX;
pub use crate::sha2_crypt::ROUNDS_MIN;
pub use crate::sha2_crypt::SALT_LEN_MAX;
pub use crate::sha2_crypt::SALT_LEN_MIN;

/// The magic prefix of this scheme.
pub const MAGIC: &str = "$6$";

#[rustfmt::skip]
const SHA512_TRANSPOSE: &[u8; 64] = &[
    42, 21,  0,  1, 43, 22, 23,  2, 44, 45, 24,  3,  4, 46, 25, 26,
     5, 47, 48, 27,  6,  7, 49, 28, 29,  8, 50, 51, 30,  9, 10, 52,
    31, 32, 11, 53, 54, 33, 12, 13, 55, 34, 35, 14, 56, 57, 36, 15,
    16, 58, 37, 38, 17, 59, 60, 39, 18, 19, 61, 40, 41, 20, 62, 63,
];

static SALT: SaltSpec = SaltSpec {
    magic: MAGIC,
    salt_len_min: SALT_LEN_MIN,
    salt_len_max: SALT_LEN_MAX,
    rounds: Some(crate::sha2_crypt::ROUNDS),
};

fn do_sha512_crypt(pass: &[u8], salt: &ParsedSalt) -> String {
    sha2_crypt::<Sha512>(
        pass,
        salt.salt,
        salt.rounds.unwrap_or(ROUNDS_DEFAULT),
        salt.rounds_present,
        SHA512_TRANSPOSE,
        MAGIC,
    )
}

/// Hash a password with the given salt string.
///
/// The salt string must begin with `$6$` and may be a previously stored
/// hash, whose checksum is then ignored. An overlong salt is truncated
/// to maximum length, and an out-of-range rounds value is coerced into
/// the allowed range. If `salt` is empty, a random salt of maximum
/// length is generated and hashing cannot fail.
pub fn generate<B: AsRef<[u8]>>(pass: B, salt: &str) -> Result<String> {
    generate_with(&SALT, pass.as_ref(), salt, do_sha512_crypt)
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> Result<()> {
    verify_with(&SALT, pass.as_ref(), hash, do_sha512_crypt)
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
                "$6$saltstring",
                "Hello world!",
                "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uB\
                 nIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1",
            ),
            (
                "$6$rounds=10000$saltstringsaltstring",
                "Hello world!",
                "$6$rounds=10000$saltstringsaltst$OW1/O6BYHV6BcXZu8QVeXbDWra3Oeqh0sbHbbMCVNSnC\
                 M/UrjmM0Dp8vOuZeHBy/YTBmSK6H9qs/y3RnOaw5v.",
            ),
            (
                "$6$rounds=5000$toolongsaltstring",
                "This is just a test",
                "$6$rounds=5000$toolongsaltstrin$lQ8jolhgVRVhY4b5pZKaysCLi0QBxGoNeKQzQ3glMhwl\
                 lF7oGDZxUhx1yxdYcz/e1JSbq3y6JMxxl8audkUEm0",
            ),
            (
                "$6$rounds=1400$anotherlongsaltstring",
                "a very much longer text to encrypt.  This one even stretches over more\
                 than one line.",
                "$6$rounds=1400$anotherlongsalts$POfYwTEok97VWcjxIiSOjiykti.o/pQs.wPvMxQ6Fm7I\
                 6IoYN3CmLs66x9t0oSwbtEW7o7UmJEiDwGqd8p4ur1",
            ),
            (
                "$6$rounds=77777$short",
                "we have a short salt string but not a short password",
                "$6$rounds=77777$short$WuQyW2YR.hBNpjjRhpYD/ifIw05xdfeEyQoMxIXbkvr0gge1a1x3yR\
                 ULJ5CCaUeOxFmtlcGZelFl5CxtgfiAc0",
            ),
            (
                "$6$rounds=123456$asaltof16chars..",
                "a short string",
                "$6$rounds=123456$asaltof16chars..$BtCwjqMJGx5hrJhZywWvt0RLE8uZ4oPwcelCjmw2kSY\
                 u.Ec6ycULevoBK25fs2xXgMNrCzIMVcgEJAstJeonj1",
            ),
            (
                "$6$rounds=10$roundstoolow",
                "the minimum number is still observed",
                "$6$rounds=1000$roundstoolow$kUMsbe306n21p9R.FRkW3IGn.S9NPN0x50YhH1xhLsPuWGsU\
                 SklZt58jaTfF4ZEQpyUNGc0dqbpBYYBaHHrsX.",
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
