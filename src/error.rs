//! Error values.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The set of error kinds is closed. Every failure mode of salt parsing,
//! hash generation and verification maps to exactly one variant, and no
//! error is ever recovered internally.

use thiserror::Error;

/// Possible errors.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The salt string does not begin with the scheme's magic prefix.
    #[error("invalid magic prefix")]
    BadMagicPrefix,
    /// The salt string is not in the modular crypt format.
    #[error("invalid salt format")]
    BadSaltFormat,
    /// The `rounds=` field is not a decimal 32-bit number.
    #[error("invalid rounds")]
    BadRounds,
    /// The hash is not the hash of the given password.
    #[error("hashed password is not the hash of the given password")]
    Mismatch,
    /// The hash string does not begin with any known magic prefix.
    #[error("unsupported hash scheme")]
    Unsupported,
}
