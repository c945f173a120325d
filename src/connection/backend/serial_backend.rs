/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::connection::port::PreloaderPort;
use log::debug;
use tokio::io::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

#[derive(Debug)]
pub struct SerialPreloaderPort {
    port: Option<SerialStream>,
    port_name: String,
    baudrate: u32,
}

impl SerialPreloaderPort {
    pub fn new(port_name: impl Into<String>, baudrate: u32) -> Self {
        Self {
            port: None,
            port_name: port_name.into(),
            baudrate,
        }
    }

    fn not_open() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotConnected, "Port is not open")
    }
}

#[async_trait::async_trait]
impl PreloaderPort for SerialPreloaderPort {
    async fn open(&mut self) -> Result<()> {
        if self.port.is_none() {
            self.port = Some(tokio_serial::new(&self.port_name, self.baudrate).open_native_async()?);
            debug!(
                "Opened preloader port: {} with baudrate {}",
                self.port_name, self.baudrate
            );
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closed preloader port: {}", self.port_name);
        }
        Ok(())
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize> {
        match &mut self.port {
            Some(port) => port.read_exact(buf).await,
            None => Err(Self::not_open()),
        }
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        match &mut self.port {
            Some(port) => {
                port.write_all(buf).await?;
                port.flush().await
            }
            None => Err(Self::not_open()),
        }
    }

    fn get_port_name(&self) -> String {
        self.port_name.clone()
    }
}
