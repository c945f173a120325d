/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::process::ExitCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// The device echoed the expected confirmation token.
    Success,
    /// The device answered, but not with the expected token.
    UnexpectedResponse(Vec<u8>),
    /// Port missing, busy or failed mid-attempt. Retry later.
    PortUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Booted,
    UnexpectedResponse,
    NoPorts,
    Cancelled,
    Fatal,
    Usage,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Booted => 0,
            ExitStatus::Fatal => 1,
            ExitStatus::Usage => 2,
            ExitStatus::UnexpectedResponse => 99,
            ExitStatus::NoPorts => 100,
            ExitStatus::Cancelled => 101,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
