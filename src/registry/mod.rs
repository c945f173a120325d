/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::ComNameArbiter;

use crate::connection::port::PRELOADER_MARKER;
use log::debug;
use std::io::{Result, Write};

/// One value of the host's serial device table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub port_name: String,
    /// `None` when the stored value is not a string.
    pub descriptor: Option<String>,
}

impl RegistryEntry {
    pub fn is_preloader(&self) -> bool {
        self.descriptor
            .as_deref()
            .is_some_and(|desc| desc.contains(PRELOADER_MARKER))
    }
}

/// Read-only view of the table mapping serial port names to the device
/// path they were registered for.
pub trait DeviceRegistry {
    fn entries(&self) -> Result<Vec<RegistryEntry>>;
}

/// Opens the host registry. Only Windows keeps a COM name arbiter table.
#[cfg(windows)]
pub fn open_host_registry() -> Result<Box<dyn DeviceRegistry>> {
    Ok(Box::new(ComNameArbiter::open()?))
}

#[cfg(not(windows))]
pub fn open_host_registry() -> Result<Box<dyn DeviceRegistry>> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "The COM port registry is only available on Windows",
    ))
}

/// Scans the registry for preloader ports, printing `#` for every match and
/// `.` for every other entry to `progress`.
pub fn find_preloader_ports<W: Write>(
    registry: &dyn DeviceRegistry,
    progress: &mut W,
) -> Result<Vec<String>> {
    let mut ports = Vec::new();

    for entry in registry.entries()? {
        if entry.is_preloader() {
            debug!("Preloader port {} ({:?})", entry.port_name, entry.descriptor);
            write!(progress, "#")?;
            ports.push(entry.port_name);
        } else {
            write!(progress, ".")?;
        }
        progress.flush()?;
    }

    Ok(ports)
}
