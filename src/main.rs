/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use autobooter::config::USAGE;
use autobooter::{Config, Driver, ExitStatus, open_host_registry};
use env_logger::Builder;
use log::{LevelFilter, error, warn};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = match Config::from_env_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitStatus::Usage.into();
        }
    };

    println!("Have USB attached and then remove/insert battery.");

    let cancel = CancellationToken::new();
    if let Err(e) = cancel_on_ctrl_c(cancel.clone()) {
        warn!("Ctrl-C will not be caught: {}", e);
    }

    let registry = match open_host_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to open the COM port registry: {}", e);
            return ExitStatus::Fatal.into();
        }
    };

    let driver = Driver::serial(config);
    let status = match driver.run(registry.as_ref(), &cancel).await {
        Ok(status) => status,
        Err(e) => {
            error!("Failed to read the COM port registry: {}", e);
            ExitStatus::Fatal
        }
    };
    drop(registry);

    if status == ExitStatus::Cancelled {
        println!("\nUser Canceled!");
    }
    status.into()
}

/// Registers the Ctrl-C listener before returning, so an interrupt from
/// here on is reported as a cancellation.
fn cancel_on_ctrl_c(cancel: CancellationToken) -> std::io::Result<()> {
    #[cfg(windows)]
    let mut interrupt = tokio::signal::windows::ctrl_c()?;
    #[cfg(unix)]
    let mut interrupt = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            cancel.cancel();
        }
    });
    Ok(())
}
