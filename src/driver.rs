/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::config::Config;
use crate::connection::Connection;
use crate::connection::backend::SerialPreloaderPort;
use crate::connection::port::{PRELOADER_BAUDRATE, PreloaderPort};
use crate::core::outcome::{ExitStatus, HandshakeOutcome};
use crate::registry::{DeviceRegistry, find_preloader_ports};
use log::{debug, info};
use std::io::{Result, Write};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Pause between attempts so the OS port table is not hammered.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type PortFactory = Box<dyn Fn(&str, u32) -> Box<dyn PreloaderPort> + Send + Sync>;

/// Finds preloader ports once, then keeps knocking on them in order until
/// one of them answers the boot sequence.
pub struct Driver {
    config: Config,
    new_port: PortFactory,
    poll_interval: Duration,
}

impl Driver {
    pub fn new(config: Config, new_port: PortFactory) -> Self {
        Driver {
            config,
            new_port,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn serial(config: Config) -> Self {
        Self::new(
            config,
            Box::new(|name: &str, baudrate: u32| -> Box<dyn PreloaderPort> {
                Box::new(SerialPreloaderPort::new(name, baudrate))
            }),
        )
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub async fn run(
        &self,
        registry: &dyn DeviceRegistry,
        cancel: &CancellationToken,
    ) -> Result<ExitStatus> {
        let ports = self.discover(registry)?;
        if cancel.is_cancelled() {
            return Ok(ExitStatus::Cancelled);
        }
        if ports.is_empty() {
            println!("\nNo MTK Preloader ports found!");
            return Ok(ExitStatus::NoPorts);
        }

        println!("\nFound MTK Preloader ports:");
        for port in &ports {
            println!("   {}", port);
        }

        Ok(self.poll(&ports, cancel).await)
    }

    pub fn discover(&self, registry: &dyn DeviceRegistry) -> Result<Vec<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "Searching registry for MTK Preloader ports")?;
        stdout.flush()?;

        let ports = find_preloader_ports(registry, &mut stdout)?;
        info!("Found {} preloader port(s)", ports.len());
        Ok(ports)
    }

    pub async fn poll(&self, ports: &[String], cancel: &CancellationToken) -> ExitStatus {
        if ports.is_empty() {
            return ExitStatus::NoPorts;
        }

        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "Waiting for device");
        let _ = stdout.flush();

        loop {
            for port in ports {
                let mut connection = Connection::new((self.new_port)(port, PRELOADER_BAUDRATE))
                    .with_read_timeout(self.config.read_timeout);

                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return ExitStatus::Cancelled,
                    outcome = connection.attempt_boot(&self.config.boot_sequence, &mut stdout) => outcome,
                };
                drop(connection);

                match outcome {
                    HandshakeOutcome::Success => return ExitStatus::Booted,
                    HandshakeOutcome::UnexpectedResponse(response) => {
                        debug!("Giving up after {} bytes from {}", response.len(), port);
                        return ExitStatus::UnexpectedResponse;
                    }
                    HandshakeOutcome::PortUnavailable => {}
                }

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return ExitStatus::Cancelled,
                    _ = tokio::time::sleep(self.poll_interval) => {}
                }
            }
        }
    }
}
