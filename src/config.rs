/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::core::boot::BootSequence;
use std::io::{Error, ErrorKind, Result};
use std::time::Duration;

pub const USAGE: &str = "Usage: autobooter [bootseq]";
pub const ENV_READ_TIMEOUT_MS: &str = "AUTOBOOTER_READ_TIMEOUT_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub boot_sequence: BootSequence,
    /// `None` waits for the reply until the port fails or the user cancels.
    pub read_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env_args() -> Result<Self> {
        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name. `env` looks up a variable by name.
    pub fn from_sources<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        if let Some(seq) = args.next() {
            config.boot_sequence = BootSequence::new(seq)?;
        }
        if let Some(extra) = args.next() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Unexpected argument {:?}", extra),
            ));
        }

        if let Some(timeout) = env(ENV_READ_TIMEOUT_MS) {
            let millis: u64 = parse_number(ENV_READ_TIMEOUT_MS, &timeout)?;
            config.read_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("{} must be a number, got {:?}", key, value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_fastboot() {
        let config = Config::from_sources(args(&[]), no_env).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.boot_sequence.as_str(), "FASTBOOT");
        assert_eq!(config.read_timeout, None);
    }

    #[test]
    fn positional_boot_sequence() {
        let config = Config::from_sources(args(&["METAMETA"]), no_env).unwrap();
        assert_eq!(config.boot_sequence.as_str(), "METAMETA");
    }

    #[test]
    fn rejects_extra_arguments() {
        let err = Config::from_sources(args(&["FASTBOOT", "COM5"]), no_env).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_short_boot_sequence() {
        assert!(Config::from_sources(args(&["FB"]), no_env).is_err());
    }

    #[test]
    fn read_timeout_from_environment() {
        let env = |key: &str| (key == ENV_READ_TIMEOUT_MS).then(|| "2000".to_string());
        let config = Config::from_sources(args(&[]), env).unwrap();
        assert_eq!(config.read_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn baudrate_and_delay_cannot_be_overridden() {
        let env = |key: &str| match key {
            "AUTOBOOTER_BAUDRATE" => Some("9600".to_string()),
            "AUTOBOOTER_POLL_MS" => Some("0".to_string()),
            _ => None,
        };
        let config = Config::from_sources(args(&[]), env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn zero_timeout_means_none() {
        let env = |key: &str| (key == ENV_READ_TIMEOUT_MS).then(|| "0".to_string());
        let config = Config::from_sources(args(&[]), env).unwrap();
        assert_eq!(config.read_timeout, None);
    }

    #[test]
    fn bad_number_is_rejected() {
        let env = |key: &str| (key == ENV_READ_TIMEOUT_MS).then(|| "soon".to_string());
        let err = Config::from_sources(args(&[]), env).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains(ENV_READ_TIMEOUT_MS));
    }
}
