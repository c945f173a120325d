/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::fmt;
use std::io::{Error, ErrorKind, Result};

pub const DEFAULT_BOOT_SEQUENCE: &str = "FASTBOOT";
pub const TOKEN_PREFIX: &[u8; 5] = b"READY";
pub const TOKEN_LEN: usize = 8;

/// ASCII command written to the preloader to request a boot mode.
///
/// The preloader acknowledges with `READY` followed by the last three
/// characters of the sequence in reverse order, so anything shorter than
/// three characters (or non-ASCII) can never be confirmed and is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSequence(String);

impl BootSequence {
    pub fn new(seq: impl Into<String>) -> Result<Self> {
        let seq = seq.into();
        if !seq.is_ascii() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Boot sequence {:?} is not ASCII", seq),
            ));
        }
        if seq.len() < TOKEN_LEN - TOKEN_PREFIX.len() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Boot sequence {:?} is too short, need at least {} characters",
                    seq,
                    TOKEN_LEN - TOKEN_PREFIX.len()
                ),
            ));
        }
        Ok(BootSequence(seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn confirmation_token(&self) -> [u8; TOKEN_LEN] {
        let mut token = [0u8; TOKEN_LEN];
        token[..TOKEN_PREFIX.len()].copy_from_slice(TOKEN_PREFIX);

        let tail = self.as_bytes().iter().rev().take(TOKEN_LEN - TOKEN_PREFIX.len());
        for (slot, byte) in token[TOKEN_PREFIX.len()..].iter_mut().zip(tail) {
            *slot = *byte;
        }
        token
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        BootSequence(DEFAULT_BOOT_SEQUENCE.to_string())
    }
}

impl fmt::Display for BootSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
