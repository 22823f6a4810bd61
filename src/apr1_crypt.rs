//! Apache APR1 hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This is the variant of MD5-crypt used by the Apache HTTP server for
//! `htpasswd` files. The only change from MD5-crypt is the magic prefix
//! `$apr1$` instead of `$1$`; the mixing schedule is otherwise
//! identical, and so is the security advice: don't use it for new
//! passwords.
//!
//! # Example
//!
//! ```
//! use crypt3::apr1_crypt;
//!
//! assert_eq!(apr1_crypt::generate("password", "$apr1$deadbeef$").unwrap(),
//!     "$apr1$deadbeef$NWLhx1Ai4ScyoaAboTFco.");
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
//! __`$apr1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Hash64 encoding of the checksum.

use crate::md5_crypt::md5_crypt;
use crate::salt::{ParsedSalt, SaltSpec};
use crate::{generate_with, verify_with, Result};

/// The magic prefix of this scheme.
pub const MAGIC: &str = "$apr1$";
/// Minimum salt length.
pub const SALT_LEN_MIN: usize = 1;
/// Maximum salt length.
pub const SALT_LEN_MAX: usize = 8;

pub use crate::md5_crypt::ROUNDS;

static SALT: SaltSpec = SaltSpec {
    magic: MAGIC,
    salt_len_min: SALT_LEN_MIN,
    salt_len_max: SALT_LEN_MAX,
    rounds: None,
};

fn do_apr1_crypt(pass: &[u8], salt: &ParsedSalt) -> String {
    md5_crypt(pass, salt.salt, MAGIC)
}

/// Hash a password with the given salt string.
///
/// The salt string must begin with `$apr1$` and may be a previously
/// stored hash, whose checksum is then ignored. An overlong salt is
/// truncated to maximum length. If `salt` is empty, a random salt of
/// maximum length is generated and hashing cannot fail.
pub fn generate<B: AsRef<[u8]>>(pass: B, salt: &str) -> Result<String> {
    generate_with(&SALT, pass.as_ref(), salt, do_apr1_crypt)
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> Result<()> {
    verify_with(&SALT, pass.as_ref(), hash, do_apr1_crypt)
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
