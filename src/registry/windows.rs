/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use super::{DeviceRegistry, RegistryEntry};
use log::{debug, info};
use std::io::Result;
use winreg::RegKey;
use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
use winreg::types::FromRegValue;

const COM_NAME_ARBITER: &str = r"SYSTEM\CurrentControlSet\Control\COM Name Arbiter\Devices";

/// Read-only handle on the `COM Name Arbiter\Devices` key. The key is
/// closed when the handle is dropped.
#[derive(Debug)]
pub struct ComNameArbiter {
    key: RegKey,
}

impl ComNameArbiter {
    pub fn open() -> Result<Self> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm.open_subkey_with_flags(COM_NAME_ARBITER, KEY_READ)?;
        info!("Opened HKLM\\{}", COM_NAME_ARBITER);
        Ok(ComNameArbiter { key })
    }
}

impl DeviceRegistry for ComNameArbiter {
    fn entries(&self) -> Result<Vec<RegistryEntry>> {
        let mut entries = Vec::new();
        for value in self.key.enum_values() {
            let (port_name, data) = value?;
            let descriptor = match String::from_reg_value(&data) {
                Ok(desc) => Some(desc),
                Err(e) => {
                    debug!("Skipping non-string value {}: {}", port_name, e);
                    None
                }
            };
            entries.push(RegistryEntry {
                port_name,
                descriptor,
            });
        }
        Ok(entries)
    }
}
