//! SDL2 implementation of the backend contract, built on the safe `sdl2`
//! bindings.

use std::io::Cursor;

use sdl2::controller::{Axis, Button, GameController};
use sdl2::event::EventType;
use sdl2::haptic::Haptic;
use sdl2::joystick::Joystick;
use sdl2::{GameControllerSubsystem, HapticSubsystem, JoystickSubsystem, Sdl};

use crate::backend::{BackendApi, EffectDesc, EffectWave, HostBackend, HostDevice};
use crate::error::{Error, Result};
use crate::types::{raw, RawCode};

struct SdlCtx {
    joystick: JoystickSubsystem,
    controller: GameControllerSubsystem,
    haptic: HapticSubsystem,
    // Keeps the library alive and the device-added/removed events enabled.
    _sdl: Sdl,
    _pump: sdl2::EventPump,
}

/// Process-wide SDL2 state. Initialize-once, never torn down.
#[derive(Default)]
pub struct SdlBackend {
    ctx: Option<SdlCtx>,
}

impl SdlBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn ctx(&self) -> Result<&SdlCtx> {
        self.ctx.as_ref().ok_or(Error::NotInitialized)
    }
}

impl HostBackend for SdlBackend {
    type Device = SdlDevice;

    fn init(&mut self) -> Result<()> {
        if self.ctx.is_some() {
            return Ok(());
        }

        // Deliver input even when the host window is unfocused. Must be
        // set before init.
        sdl2::hint::set("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1");

        let sdl = sdl2::init().map_err(Error::BackendInit)?;
        let joystick = sdl.joystick().map_err(Error::BackendInit)?;
        let controller = sdl.game_controller().map_err(Error::BackendInit)?;
        let haptic = sdl.haptic().map_err(Error::BackendInit)?;
        let mut pump = sdl.event_pump().map_err(Error::BackendInit)?;

        // SDL installs its own INT/TERM handlers; the host process owns
        // those signals.
        restore_default_signal_handlers();

        // Query mode: state is polled each frame instead of being drained
        // from the event queue. Device arrival/removal stays on the queue.
        joystick.set_event_state(false);
        controller.set_event_state(false);
        pump.enable_event(EventType::ControllerDeviceAdded);
        pump.enable_event(EventType::ControllerDeviceRemoved);

        self.ctx = Some(SdlCtx {
            joystick,
            controller,
            haptic,
            _sdl: sdl,
            _pump: pump,
        });
        Ok(())
    }

    fn install_mapping_blob(&mut self, blob: &[u8]) -> Result<u32> {
        let ctx = self.ctx()?;
        let count = ctx
            .controller
            .load_mappings_from_read(&mut Cursor::new(blob))
            .map_err(|e| Error::Backend(e.to_string()))?;
        Ok(count.max(0) as u32)
    }

    fn install_mapping(&mut self, mapping: &str) -> Result<()> {
        let ctx = self.ctx()?;
        ctx.controller
            .add_mapping(mapping)
            .map(|_| ())
            .map_err(|e| Error::Backend(e.to_string()))
    }

    fn num_devices(&mut self) -> u32 {
        self.ctx()
            .ok()
            .and_then(|ctx| ctx.joystick.num_joysticks().ok())
            .unwrap_or(0)
    }

    fn open(&mut self, index: u32) -> Result<SdlDevice> {
        let ctx = self.ctx()?;

        let controller = if ctx.controller.is_game_controller(index) {
            Some(
                ctx.controller
                    .open(index)
                    .map_err(|e| Error::DeviceOpen(e.to_string()))?,
            )
        } else {
            None
        };
        let joystick = ctx
            .joystick
            .open(index)
            .map_err(|e| Error::DeviceOpen(e.to_string()))?;

        let name = ctx
            .joystick
            .name_for_index(index)
            .unwrap_or_else(|_| joystick.name());
        let guid = joystick.guid().string();

        Ok(SdlDevice {
            name,
            guid,
            haptic_sub: ctx.haptic.clone(),
            effects: Vec::new(),
            haptic: None,
            controller,
            joystick,
        })
    }

    fn update(&mut self) {
        if let Ok(ctx) = self.ctx() {
            ctx.controller.update();
        }
    }

    fn api(&self) -> BackendApi {
        BackendApi::Sdl
    }
}

/// One opened SDL device.
///
/// The safe `sdl2` haptic wrapper only exposes the rumble helper, so the
/// periodic effect slots are realized through the controller rumble API:
/// the sine slot drives the high-frequency (small) motor, the triangle
/// slot the low-frequency (big) one.
pub struct SdlDevice {
    name: String,
    guid: String,
    haptic_sub: HapticSubsystem,
    effects: Vec<EffectDesc>,
    // Field order is release order: haptic before controller, controller
    // before the raw joystick handle.
    haptic: Option<Haptic>,
    controller: Option<GameController>,
    joystick: Joystick,
}

impl HostDevice for SdlDevice {
    fn is_controller(&self) -> bool {
        self.controller.is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn guid(&self) -> &str {
        &self.guid
    }

    fn axis(&self, code: RawCode) -> i16 {
        match (&self.controller, axis_from_code(code)) {
            (Some(controller), Some(axis)) => controller.axis(axis),
            _ => self.joystick.axis(u32::from(code)).unwrap_or(0),
        }
    }

    fn button(&self, code: RawCode) -> bool {
        match (&self.controller, button_from_code(code)) {
            (Some(controller), Some(button)) => controller.button(button),
            _ => self.joystick.button(u32::from(code)).unwrap_or(false),
        }
    }

    fn has_haptic(&self) -> bool {
        self.joystick.has_rumble()
    }

    fn open_haptic(&mut self) -> bool {
        if self.haptic.is_some() {
            return true;
        }
        match self.haptic_sub.open_from_joystick_id(self.joystick.instance_id()) {
            Ok(haptic) => {
                self.haptic = Some(haptic);
                true
            }
            Err(err) => {
                log::error!("PAD: failed to open haptic device: {err}");
                false
            }
        }
    }

    fn haptic_open(&self) -> bool {
        self.haptic.is_some()
    }

    fn register_effect(&mut self, desc: &EffectDesc) -> Result<i32> {
        if self.haptic.is_none() {
            return Err(Error::HapticUnavailable);
        }
        self.effects.push(desc.clone());
        Ok(self.effects.len() as i32 - 1)
    }

    fn run_effect(&mut self, id: i32, iterations: u32) -> Result<()> {
        if self.haptic.is_none() {
            return Err(Error::HapticUnavailable);
        }
        let desc = usize::try_from(id)
            .ok()
            .and_then(|index| self.effects.get(index))
            .ok_or(Error::UnknownEffect(id))?;
        let magnitude = u16::try_from(desc.magnitude.max(0)).unwrap_or(0).saturating_mul(2);
        let length = desc.length_ms.saturating_mul(iterations.max(1));
        let wave = desc.wave;

        if let Some(controller) = self.controller.as_mut() {
            let (low, high) = match wave {
                EffectWave::Sine => (0, magnitude),
                EffectWave::Triangle => (magnitude, 0),
            };
            controller
                .set_rumble(low, high, length)
                .map_err(|e| Error::Backend(e.to_string()))
        } else if let Some(haptic) = self.haptic.as_mut() {
            haptic.rumble_play(f32::from(magnitude) / 65535.0, length);
            Ok(())
        } else {
            Err(Error::HapticUnavailable)
        }
    }

    fn destroy_effect(&mut self, _id: i32) {
        // Effects are plain descriptors here; the driver-side object only
        // exists for the duration of a rumble call.
    }

    fn close_haptic(&mut self) {
        self.effects.clear();
        self.haptic = None;
    }

    fn play_rumble(&mut self, strength: f32, duration_ms: u32) -> Result<()> {
        match self.haptic.as_mut() {
            Some(haptic) => {
                haptic.rumble_play(strength.clamp(0.0, 1.0), duration_ms);
                Ok(())
            }
            None => Err(Error::HapticUnavailable),
        }
    }
}

fn axis_from_code(code: RawCode) -> Option<Axis> {
    Some(match code {
        raw::AXIS_LEFT_X => Axis::LeftX,
        raw::AXIS_LEFT_Y => Axis::LeftY,
        raw::AXIS_RIGHT_X => Axis::RightX,
        raw::AXIS_RIGHT_Y => Axis::RightY,
        raw::AXIS_TRIGGER_LEFT => Axis::TriggerLeft,
        raw::AXIS_TRIGGER_RIGHT => Axis::TriggerRight,
        _ => return None,
    })
}

fn button_from_code(code: RawCode) -> Option<Button> {
    Some(match code {
        raw::BUTTON_A => Button::A,
        raw::BUTTON_B => Button::B,
        raw::BUTTON_X => Button::X,
        raw::BUTTON_Y => Button::Y,
        raw::BUTTON_BACK => Button::Back,
        raw::BUTTON_GUIDE => Button::Guide,
        raw::BUTTON_START => Button::Start,
        raw::BUTTON_LEFT_STICK => Button::LeftStick,
        raw::BUTTON_RIGHT_STICK => Button::RightStick,
        raw::BUTTON_LEFT_SHOULDER => Button::LeftShoulder,
        raw::BUTTON_RIGHT_SHOULDER => Button::RightShoulder,
        raw::BUTTON_DPAD_UP => Button::DPadUp,
        raw::BUTTON_DPAD_DOWN => Button::DPadDown,
        raw::BUTTON_DPAD_LEFT => Button::DPadLeft,
        raw::BUTTON_DPAD_RIGHT => Button::DPadRight,
        _ => return None,
    })
}

#[cfg(unix)]
fn restore_default_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
        libc::signal(libc::SIGTERM, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn restore_default_signal_handlers() {}
