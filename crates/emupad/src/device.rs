use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

use crate::backend::{
    BackendApi, DeviceKind, EffectDesc, HostBackend, HostDevice, NB_EFFECTS,
};
use crate::config::{PadConfig, NB_PADS};
use crate::types::{axis_name, button_name, raw, PadInput, PadValue, RawCode};

/// Hardcoded default map from logical input to raw button/axis code.
/// Follows the SDL game-controller layout.
const DEFAULT_BINDINGS: [(PadInput, RawCode); PadInput::COUNT] = [
    (PadInput::L2, raw::AXIS_TRIGGER_LEFT),
    (PadInput::R2, raw::AXIS_TRIGGER_RIGHT),
    (PadInput::L1, raw::BUTTON_LEFT_SHOULDER),
    (PadInput::R1, raw::BUTTON_RIGHT_SHOULDER),
    (PadInput::Triangle, raw::BUTTON_Y),
    (PadInput::Circle, raw::BUTTON_B),
    (PadInput::Cross, raw::BUTTON_A),
    (PadInput::Square, raw::BUTTON_X),
    (PadInput::Select, raw::BUTTON_BACK),
    (PadInput::L3, raw::BUTTON_LEFT_STICK),
    (PadInput::R3, raw::BUTTON_RIGHT_STICK),
    (PadInput::Start, raw::BUTTON_START),
    (PadInput::DPadUp, raw::BUTTON_DPAD_UP),
    (PadInput::DPadRight, raw::BUTTON_DPAD_RIGHT),
    (PadInput::DPadDown, raw::BUTTON_DPAD_DOWN),
    (PadInput::DPadLeft, raw::BUTTON_DPAD_LEFT),
    (PadInput::LeftStickUp, raw::AXIS_LEFT_Y),
    (PadInput::LeftStickRight, raw::AXIS_LEFT_X),
    (PadInput::LeftStickDown, raw::AXIS_LEFT_Y),
    (PadInput::LeftStickLeft, raw::AXIS_LEFT_X),
    (PadInput::RightStickUp, raw::AXIS_RIGHT_Y),
    (PadInput::RightStickRight, raw::AXIS_RIGHT_X),
    (PadInput::RightStickDown, raw::AXIS_RIGHT_Y),
    (PadInput::RightStickLeft, raw::AXIS_RIGHT_X),
];

/// One opened gamepad.
///
/// A `Device` that exists is fully initialized: construction returns
/// `None` for anything that failed to open or that the library could not
/// classify as a game controller.
pub struct Device<D: HostDevice> {
    dev: D,
    device_name: String,
    unique_id: u64,
    api: BackendApi,
    kind: DeviceKind,
    /// One id per preregistered effect slot, -1 when not registered.
    effects_id: [i32; NB_EFFECTS],
    bindings: [RawCode; PadInput::COUNT],
    sensitivity: i32,
    dead_zone: i32,
    force_feedback: [bool; NB_PADS],
}

impl<D: HostDevice> Device<D> {
    /// Open the device at `index` and bring it to a usable state.
    ///
    /// Returns `None` when the device cannot be used: open failure, or a
    /// joystick the library has no controller mapping for. Haptic
    /// failures only disable rumble.
    pub fn open<B>(backend: &mut B, index: u32, config: &PadConfig) -> Option<Self>
    where
        B: HostBackend<Device = D>,
    {
        let mut bindings = [0; PadInput::COUNT];
        for (input, code) in DEFAULT_BINDINGS {
            bindings[input.index()] = code;
        }

        let mut dev = match backend.open(index) {
            Ok(dev) => dev,
            Err(err) => {
                log::error!("PAD: failed to open joystick {index}: {err}");
                return None;
            }
        };

        let device_name = dev.name().to_owned();
        let guid = dev.guid().to_owned();

        if !dev.is_controller() {
            // The joystick handle is released on drop of `dev`.
            log::warn!(
                "PAD: joystick ({device_name}, GUID:{guid}) has no controller mapping\n\
                 A mapping string can be produced with AntiMicro or Steam and \
                 supplied through the extra_mappings setting"
            );
            return None;
        }

        let mut hasher = FnvHasher::default();
        guid.hash(&mut hasher);
        let unique_id = hasher.finish();

        let mut effects_id = [-1; NB_EFFECTS];
        if dev.has_haptic() && dev.open_haptic() {
            for slot in 0..NB_EFFECTS {
                let desc = EffectDesc::for_slot(slot, config.force_feedback_intensity);
                match dev.register_effect(&desc) {
                    Ok(id) => effects_id[slot] = id,
                    Err(err) => {
                        log::error!("PAD: haptic effect upload failed: {err}");
                        for id in effects_id.iter_mut().filter(|id| **id >= 0) {
                            dev.destroy_effect(*id);
                            *id = -1;
                        }
                        dev.close_haptic();
                        break;
                    }
                }
            }
        }

        log::info!(
            "PAD: controller ({device_name}) detected{}, GUID:{guid}",
            if dev.haptic_open() { " with rumble support" } else { "" }
        );

        Some(Self {
            dev,
            device_name,
            unique_id,
            api: backend.api(),
            kind: DeviceKind::Gamepad,
            effects_id,
            bindings,
            sensitivity: config.sensitivity,
            dead_zone: config.dead_zone,
            force_feedback: config.force_feedback,
        })
    }

    /// Pressed/held value of a logical input from the current snapshot.
    ///
    /// Sticks carry the signed 16-bit range scaled by sensitivity,
    /// triggers 0-255, buttons 0 or 0xFF. The dead zone is a strict
    /// inequality on both.
    pub fn get_input(&self, input: PadInput) -> PadValue {
        let k = self.sensitivity as f32 / 100.0;

        // Analog sticks range from -32k to +32k. Range conversion is
        // handled later by the virtual controller.
        if input.is_stick() {
            let raw = self.dev.axis(self.bindings[input.index()]);
            let value = (f32::from(raw) * k) as PadValue;
            return if value.abs() > self.dead_zone { value } else { 0 };
        }

        // Triggers range from 0 to +32k and are reported as 0-255.
        // Sensitivity does not apply here.
        if input.is_trigger() {
            let value = PadValue::from(self.dev.axis(self.bindings[input.index()]));
            return if value > self.dead_zone { value / 128 } else { 0 };
        }

        if self.dev.button(self.bindings[input.index()]) {
            0xFF // max pressure
        } else {
            0
        }
    }

    /// Start the preregistered effect in `slot` for one iteration.
    ///
    /// Does nothing for an out-of-range slot, a pad slot with force
    /// feedback disabled, or a device without a haptic handle. Playback
    /// failure is logged and otherwise ignored.
    pub fn rumble(&mut self, slot: usize, pad: usize) {
        if slot >= NB_EFFECTS {
            return;
        }
        if !self.force_feedback.get(pad).copied().unwrap_or(false) {
            return;
        }
        if !self.dev.haptic_open() {
            return;
        }

        let id = self.effects_id[slot];
        if let Err(err) = self.dev.run_effect(id, 1) {
            log::error!("PAD: haptic effect {id} is not working: {err}");
        }
    }

    /// Play a 400 ms one-shot rumble at `strength` in [0, 1], so the user
    /// can feel whether the pad is handled at all. False when the device
    /// has no haptic handle or playback failed.
    pub fn test_force(&mut self, strength: f32) -> bool {
        if !self.dev.haptic_open() {
            return false;
        }
        match self.dev.play_rumble(strength, 400) {
            Ok(()) => true,
            Err(err) => {
                log::error!("PAD: rumble is not working: {err}");
                false
            }
        }
    }

    /// Zero every binding entry.
    pub fn clear_bindings(&mut self) {
        self.bindings = [0; PadInput::COUNT];
    }

    /// Restore the hardcoded default bindings. Only keys present in the
    /// defaults table are touched.
    pub fn reset_bindings_to_default(&mut self) {
        for (input, code) in DEFAULT_BINDINGS {
            self.bindings[input.index()] = code;
        }
    }

    /// Bind a logical input to a raw button/axis code. Used by the
    /// external binding editor.
    pub fn set_binding(&mut self, input: PadInput, code: RawCode) {
        self.bindings[input.index()] = code;
    }

    /// Raw code currently bound to a logical input.
    pub fn binding(&self, input: PadInput) -> RawCode {
        self.bindings[input.index()]
    }

    /// Display name of the raw code bound to a logical input.
    pub fn binding_name(&self, input: PadInput) -> &'static str {
        let code = self.bindings[input.index()];
        if input.is_stick() || input.is_trigger() {
            axis_name(code)
        } else {
            button_name(code)
        }
    }

    pub fn name(&self) -> &str {
        &self.device_name
    }

    /// Stable hash of the device GUID string. Independent of the
    /// enumeration index; used to correlate persisted bindings.
    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }

    pub fn api(&self) -> BackendApi {
        self.api
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Whether this device can rumble.
    pub fn has_rumble(&self) -> bool {
        self.dev.haptic_open()
    }
}

impl<D: HostDevice> Drop for Device<D> {
    fn drop(&mut self) {
        // Release order is part of the backend contract: effects, then the
        // haptic handle, then the controller (which owns the joystick).
        // The controller is released when `dev` itself drops.
        if self.dev.haptic_open() {
            for id in self.effects_id.into_iter().filter(|id| *id >= 0) {
                self.dev.destroy_effect(id);
            }
            self.dev.close_haptic();
        }
    }
}
