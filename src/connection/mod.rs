/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod backend;
pub mod port;
use crate::connection::port::PreloaderPort;
use crate::core::boot::{BootSequence, TOKEN_LEN};
use crate::core::outcome::HandshakeOutcome;
use log::{debug, info, warn};
use std::io::Write;
use std::time::Duration;
use tokio::io::Result;

#[derive(Debug)]
pub struct Connection {
    pub port: Box<dyn PreloaderPort>,
    read_timeout: Option<Duration>,
}

impl Connection {
    pub fn new(port: Box<dyn PreloaderPort>) -> Self {
        Connection {
            port,
            read_timeout: None,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub async fn write(&mut self, data: &[u8], size: usize) -> Result<Vec<u8>> {
        self.port.write_all(data).await?;
        let mut buf = vec![0u8; size];
        match self.read_timeout {
            Some(limit) => {
                tokio::time::timeout(limit, self.port.read_exact(&mut buf))
                    .await
                    .map_err(|_| {
                        std::io::Error::new(std::io::ErrorKind::TimedOut, "No response in time")
                    })??;
            }
            None => {
                self.port.read_exact(&mut buf).await?;
            }
        }
        Ok(buf)
    }

    /// Sends the boot sequence once and classifies the reply. The port is
    /// closed again before returning, whatever the outcome. Operator
    /// progress goes to `out`; an unavailable port leaves a single `.`.
    pub async fn attempt_boot<W: Write>(
        &mut self,
        seq: &BootSequence,
        out: &mut W,
    ) -> HandshakeOutcome {
        let port_name = self.port.get_port_name();

        if let Err(e) = self.port.open().await {
            debug!("{} unavailable: {}", port_name, e);
            report(out, format_args!("."));
            return HandshakeOutcome::PortUnavailable;
        }

        report(out, format_args!("\nConnected. Sending {}\n", seq));
        let response = self.write(seq.as_bytes(), TOKEN_LEN).await;

        if let Err(e) = self.port.close().await {
            warn!("Failed to close {}: {}", port_name, e);
        }

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                debug!("{} dropped during handshake: {}", port_name, e);
                report(out, format_args!("."));
                return HandshakeOutcome::PortUnavailable;
            }
        };
        debug!("Response from {}: {}", port_name, hex::encode(&response));

        if response == seq.confirmation_token() {
            info!("{} acknowledged {}", port_name, seq);
            report(out, format_args!("Entered {} mode on port {}\n", seq, port_name));
            HandshakeOutcome::Success
        } else {
            report(
                out,
                format_args!(
                    "Unknown response {} on port {}\n",
                    String::from_utf8_lossy(&response),
                    port_name
                ),
            );
            HandshakeOutcome::UnexpectedResponse(response)
        }
    }
}

// Write errors on operator output are ignored.
fn report<W: Write>(out: &mut W, args: std::fmt::Arguments<'_>) {
    let _ = out.write_fmt(args);
    let _ = out.flush();
}
