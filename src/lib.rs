/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod config;
pub mod connection;
pub mod core;
pub mod driver;
pub mod registry;

pub use config::Config;
pub use crate::core::boot::BootSequence;
pub use crate::core::outcome::{ExitStatus, HandshakeOutcome};
pub use driver::Driver;
pub use registry::{DeviceRegistry, find_preloader_ports, open_host_registry};
