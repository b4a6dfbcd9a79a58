//! Host gamepad adapter for the emulator's PAD subsystem.
//!
//! Discovers attached joysticks and game controllers, translates their
//! live state into the emulator's logical pad namespace (with dead-zone
//! and sensitivity applied) and drives the per-device rumble effects.
//! The virtual-controller register model, config persistence and binding
//! dialogs live elsewhere; this crate only hands them values.
//!
//! Per frame: call [`DeviceManager::update`] once, then query devices
//! with [`Device::get_input`].

mod backend;
mod config;
mod device;
mod error;
mod manager;
mod types;

#[cfg(test)]
mod fake;

#[cfg(feature = "sdl2-backend")]
mod sdl;

pub use crate::backend::{
    BackendApi, DeviceKind, EffectDesc, EffectWave, HostBackend, HostDevice,
    NB_EFFECTS,
};
pub use crate::config::{PadConfig, NB_PADS};
pub use crate::device::Device;
pub use crate::error::{Error, Result};
pub use crate::manager::DeviceManager;
pub use crate::types::{axis_name, button_name, raw, PadInput, PadValue, RawCode};

#[cfg(feature = "sdl2-backend")]
pub use crate::sdl::{SdlBackend, SdlDevice};
