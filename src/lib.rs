//! A library of Unix crypt(3)-compatible password hashing schemes.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The crate implements the four modular-crypt-format schemes of the
//! traditional crypt(3) family: [MD5](md5_crypt), its Apache variant
//! [APR1](apr1_crypt), [SHA-256](sha256_crypt) and [SHA-512](sha512_crypt).
//! The output is byte-for-byte compatible with the reference
//! implementations (GNU libc `crypt`, Apache `htpasswd`). Every scheme
//! has its own module; the crate root recognizes a scheme by its magic
//! prefix and dispatches to it.
//!
//! # Getting Started
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! crypt3 = "0.1"
//! ```
//!
//! # Examples
//!
//! To verify a password against a stored hash of any supported scheme:
//!
//! ```
//! let h = "$6$G/gkPn17kHYo0gTF$xhDFU0QYExdMH2ghOWKrrVtu1BuTpNMSJ\
//!          URCXk43.EYekmK8iwV6RNqftUUC8mqDel1J7m3JEbUkbu4YyqSyv/";
//! assert!(crypt3::verify("test", h).is_ok());
//! ```
//!
//! To hash a password with a freshly generated salt:
//!
//! ```
//! use crypt3::Scheme;
//!
//! let h = crypt3::generate(Scheme::Sha512, "password", "").unwrap();
//! assert!(crypt3::verify("password", &h).is_ok());
//! ```
//!
//! # Summary
//!
//! All four schemes predate modern password hashing; none of them is a
//! good choice for new passwords, with the SHA-2 pair being the least
//! bad. The crate exists for interoperability with system password
//! databases and `htpasswd` files, not as a contemporary KDF.
//!
//! Each scheme module offers the same surface:
//!
//! * `generate` hashes a password, taking the salt, and for the SHA-2
//!   schemes the number of rounds, from a salt string or a previously
//!   stored hash. With an empty salt string, a random maximum-length
//!   salt is generated.
//!
//! * `verify` recomputes the hash from the password and the stored
//!   hash and compares the two.
//!
//! * `cost` reports the number of rounds of a hash string.
//!
//! * `generate_salt` produces a random salt parameter string.
//!
//! The same operations, dispatched on the magic prefix, are available
//! at the crate root.

#![warn(missing_docs)]

mod hash64;
mod salt;

pub mod apr1_crypt;
pub mod error;
pub mod md5_crypt;
mod sha2_crypt;
pub mod sha256_crypt;
pub mod sha512_crypt;

use crate::error::Error;
use crate::salt::{ParsedSalt, SaltSpec};

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// A password hashing scheme, identified by its magic prefix.
///
/// The set of schemes is closed; the registry is the constant
/// [`Scheme::ALL`] table, populated at compile time and never modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// MD5-crypt, magic prefix `$1$`.
    Md5,
    /// The Apache variant of MD5-crypt, magic prefix `$apr1$`.
    Apr1,
    /// SHA-256-crypt, magic prefix `$5$`.
    Sha256,
    /// SHA-512-crypt, magic prefix `$6$`.
    Sha512,
}

impl Scheme {
    /// All supported schemes, in magic-prefix dispatch order.
    pub const ALL: [Scheme; 4] = [Scheme::Md5, Scheme::Apr1, Scheme::Sha256, Scheme::Sha512];

    /// The magic prefix identifying this scheme in a hash string.
    pub fn magic(&self) -> &'static str {
        match self {
            Scheme::Md5 => md5_crypt::MAGIC,
            Scheme::Apr1 => apr1_crypt::MAGIC,
            Scheme::Sha256 => sha256_crypt::MAGIC,
            Scheme::Sha512 => sha512_crypt::MAGIC,
        }
    }

    /// Recognize the scheme of a salt or hash string by its magic
    /// prefix.
    pub fn from_hash(hash: &str) -> Option<Scheme> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| hash.starts_with(scheme.magic()))
    }
}

/// Hash a password with the given scheme.
///
/// The salt string must begin with the scheme's magic prefix and may be
/// a previously stored hash, whose checksum is then ignored. If `salt`
/// is empty, a random salt of maximum length is generated, with the
/// default number of rounds for the SHA-2 schemes, and hashing cannot
/// fail.
pub fn generate<B: AsRef<[u8]>>(scheme: Scheme, pass: B, salt: &str) -> Result<String> {
    match scheme {
        Scheme::Md5 => md5_crypt::generate(pass, salt),
        Scheme::Apr1 => apr1_crypt::generate(pass, salt),
        Scheme::Sha256 => sha256_crypt::generate(pass, salt),
        Scheme::Sha512 => sha512_crypt::generate(pass, salt),
    }
}

/// Verify that the hash corresponds to a password, using magic-prefix
/// recognition.
///
/// Returns `Err(Error::Unsupported)` if no scheme claims the prefix,
/// `Err(Error::Mismatch)` if the recomputed hash differs from the
/// stored one, and passes salt parsing errors through.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> Result<()> {
    match Scheme::from_hash(hash) {
        Some(Scheme::Md5) => md5_crypt::verify(pass, hash),
        Some(Scheme::Apr1) => apr1_crypt::verify(pass, hash),
        Some(Scheme::Sha256) => sha256_crypt::verify(pass, hash),
        Some(Scheme::Sha512) => sha512_crypt::verify(pass, hash),
        None => Err(Error::Unsupported),
    }
}

/// The work factor of a hash string, using magic-prefix recognition.
///
/// For the MD5 family this is the fixed round count; for the SHA-2
/// schemes it is the value of the `rounds=` field, clamped into the
/// allowed range, or the default when the field is absent.
pub fn cost(hash: &str) -> Result<u32> {
    match Scheme::from_hash(hash) {
        Some(Scheme::Md5) => md5_crypt::cost(hash),
        Some(Scheme::Apr1) => apr1_crypt::cost(hash),
        Some(Scheme::Sha256) => sha256_crypt::cost(hash),
        Some(Scheme::Sha512) => sha512_crypt::cost(hash),
        None => Err(Error::Unsupported),
    }
}

/// Returns `true` if the string begins with the magic prefix of a
/// supported scheme.
pub fn is_supported(hash: &str) -> bool {
    Scheme::from_hash(hash).is_some()
}

fn consteq(hash: &str, calchash: &str) -> bool {
    if hash.len() != calchash.len() {
        return false;
    }
    0 == hash
        .bytes()
        .zip(calchash.bytes())
        .fold(0, |xs, (h1, h2)| xs | h1 ^ h2)
}

/// Shared generation plumbing: parse the salt string, or make a fresh
/// one when it is empty, and run the scheme's mixing schedule on it.
fn generate_with(
    spec: &SaltSpec,
    pass: &[u8],
    salt: &str,
    crypt: fn(&[u8], &ParsedSalt) -> String,
) -> Result<String> {
    if salt.is_empty() {
        let fresh = spec.generate(spec.salt_len_max);
        let parsed = spec.parse(&fresh)?;
        Ok(crypt(pass, &parsed))
    } else {
        let parsed = spec.parse(salt)?;
        Ok(crypt(pass, &parsed))
    }
}

/// Shared verification plumbing: recompute the hash with the stored
/// hash as the salt source and compare the whole strings.
fn verify_with(
    spec: &SaltSpec,
    pass: &[u8],
    hash: &str,
    crypt: fn(&[u8], &ParsedSalt) -> String,
) -> Result<()> {
    let parsed = spec.parse(hash)?;
    let calchash = crypt(pass, &parsed);
    if consteq(hash, &calchash) {
        Ok(())
    } else {
        Err(Error::Mismatch)
    }
}
