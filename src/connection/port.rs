/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::fmt::Debug;
use tokio::io::Result;

/// How the preloader's VID/PID (0e8d:2000) appears inside a registered
/// device path.
pub const PRELOADER_MARKER: &str = "vid_0e8d&pid_2000";

pub const PRELOADER_BAUDRATE: u32 = 115_200;

#[async_trait::async_trait]
pub trait PreloaderPort: Send + Debug {
    async fn open(&mut self) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize>;
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    fn get_port_name(&self) -> String;
}
