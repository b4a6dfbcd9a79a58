//! Diagnostic CLI for the pad adapter: list detected controllers and
//! check that rumble works.

mod logging;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use emupad::{DeviceManager, PadConfig, PadInput, SdlBackend};

#[derive(Parser)]
#[command(name = "emupadctl", about = "Gamepad adapter diagnostics")]
struct Cli {
    /// Print debug diagnostics.
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Controller mapping database to install before enumerating.
    #[arg(long)]
    mappings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate devices and print what the adapter sees.
    List,
    /// Play a short rumble on every detected device.
    TestRumble {
        /// Rumble strength, 0.0 to 1.0.
        #[arg(long, default_value_t = 0.6)]
        strength: f32,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.no_color);

    let mapping_db = match &cli.mappings {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("failed to read {}: {err}", path.display());
                return;
            }
        },
        None => Vec::new(),
    };

    let config = PadConfig::default();
    let mut manager = DeviceManager::new(SdlBackend::new());
    manager.enumerate(&config, &mapping_db);

    match cli.command {
        Command::List => list(&manager),
        Command::TestRumble { strength } => test_rumble(&mut manager, strength),
    }
}

fn list(manager: &DeviceManager<SdlBackend>) {
    if manager.is_empty() {
        log::info!("no game controllers detected");
        return;
    }
    for (slot, device) in manager.devices().iter().enumerate() {
        log::info!(
            "slot {slot}: {} [{}] id={:016x}{}",
            device.name().bold(),
            device.api(),
            device.unique_id(),
            if device.has_rumble() { " rumble" } else { "" }
        );
        log::debug!(
            "  cross={} l2={} left-x={}",
            device.binding_name(PadInput::Cross),
            device.binding_name(PadInput::L2),
            device.binding_name(PadInput::LeftStickRight)
        );
    }
}

fn test_rumble(manager: &mut DeviceManager<SdlBackend>, strength: f32) {
    if manager.is_empty() {
        log::info!("no game controllers detected");
        return;
    }
    for slot in 0..manager.len() {
        let Some(device) = manager.device_mut(slot) else {
            continue;
        };
        if device.test_force(strength) {
            log::info!("slot {slot}: rumble ok");
        } else {
            log::warn!("slot {slot}: rumble not available");
        }
    }
}
