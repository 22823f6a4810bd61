// Salt parsing and generation.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::Error;
use crate::hash64::hash64_encode;
use crate::Result;

/// Rounds bounds for schemes with a tunable work factor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

/// Per-scheme salt parameters.
///
/// Every scheme module owns one static instance; the registry in the
/// crate root routes hash strings to them by magic prefix. `rounds` is
/// `None` for the MD5 family, whose round count is fixed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SaltSpec {
    pub magic: &'static str,
    pub salt_len_min: usize,
    pub salt_len_max: usize,
    pub rounds: Option<Rounds>,
}

/// A salt string picked apart into its fields.
///
/// The salt is borrowed from the input. Anything past the salt field,
/// such as the checksum of a stored hash, is discarded during parsing,
/// so a full hash string is acceptable wherever a salt string is.
#[derive(Debug)]
pub(crate) struct ParsedSalt<'a> {
    pub salt: &'a str,
    pub rounds: Option<u32>,
    pub rounds_present: bool,
}

impl SaltSpec {
    /// Parse a salt string or a stored hash into its fields.
    ///
    /// The input must begin with this scheme's magic prefix. An overlong
    /// salt is silently truncated to `salt_len_max`; a `$` anywhere in
    /// the salt field terminates it. The `rounds=` field is recognized
    /// only for schemes with tunable rounds, parsed as a decimal 32-bit
    /// signed number, and clamped into the scheme's bounds.
    pub fn parse<'a>(&self, input: &'a str) -> Result<ParsedSalt<'a>> {
        let rest = input
            .strip_prefix(self.magic)
            .ok_or(Error::BadMagicPrefix)?;
        let mut fields = rest.split('$');
        let first = fields.next().ok_or(Error::BadSaltFormat)?;

        let (salt, rounds, rounds_present) = match self.rounds {
            Some(bounds) => match first.strip_prefix("rounds=") {
                Some(num) => {
                    let rounds = num.parse::<i32>().map_err(|_| Error::BadRounds)?;
                    let rounds =
                        (rounds as i64).clamp(bounds.min as i64, bounds.max as i64) as u32;
                    let salt = fields.next().ok_or(Error::BadSaltFormat)?;
                    (salt, Some(rounds), true)
                }
                None => (first, Some(bounds.default), false),
            },
            None => (first, None, false),
        };

        let salt = if salt.len() > self.salt_len_max {
            salt.get(..self.salt_len_max).ok_or(Error::BadSaltFormat)?
        } else {
            salt
        };

        Ok(ParsedSalt {
            salt,
            rounds,
            rounds_present,
        })
    }

    /// Generate a random salt string of the given length, without a
    /// `rounds=` field. Randomness comes from the operating system's
    /// CSPRNG.
    pub fn generate(&self, length: usize) -> String {
        self.generate_with(&mut OsRng, length, None)
    }

    /// Generate a random salt string with an explicit rounds value.
    ///
    /// The rounds value is clamped into the scheme's bounds and elided
    /// from the output when it equals the default.
    pub fn generate_rounds(&self, length: usize, rounds: u32) -> String {
        self.generate_with(&mut OsRng, length, Some(rounds))
    }

    /// The oracle-injectable core of salt generation. Draws exactly
    /// `ceil(length * 6 / 8)` bytes from `rng`.
    fn generate_with<R: RngCore>(&self, rng: &mut R, length: usize, rounds: Option<u32>) -> String {
        let length = length.clamp(self.salt_len_min, self.salt_len_max);
        let mut raw = vec![0u8; (length * 6 + 7) / 8];
        rng.fill_bytes(&mut raw);
        let mut salt = hash64_encode(&raw);
        salt.truncate(length);

        match (self.rounds, rounds) {
            (Some(bounds), Some(rounds)) => {
                let rounds = rounds.clamp(bounds.min, bounds.max);
                if rounds == bounds.default {
                    format!("{}{}", self.magic, salt)
                } else {
                    format!("{}rounds={}${}", self.magic, rounds, salt)
                }
            }
            _ => format!("{}{}", self.magic, salt),
        }
    }
}
