use crate::error::Result;
use crate::types::RawCode;

/// Number of preregistered haptic effect slots per device.
/// Slot 0 excites the small (high-frequency) motor, slot 1 the big one.
pub const NB_EFFECTS: usize = 2;

/// Back-end family a device was opened through. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendApi {
    Sdl,
}

impl std::fmt::Display for BackendApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendApi::Sdl => f.write_str("SDL2"),
        }
    }
}

/// Device classification label. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Gamepad,
    Other,
}

/// Waveform of a periodic haptic effect.
///
/// Sine is the only waveform that reliably excites the small motor of
/// DualShock-family pads; triangle drives the big one. Keep slots ordered
/// by waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectWave {
    Sine,
    Triangle,
}

/// Descriptor of a periodic, polar-direction haptic effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectDesc {
    pub wave: EffectWave,
    /// Polar direction, in hundredths of a degree.
    pub direction: u16,
    pub period_ms: u16,
    pub magnitude: i16,
    /// Phase shift, in hundredths of a degree.
    pub phase: u16,
    pub length_ms: u32,
    pub delay_ms: u16,
    pub attack_ms: u16,
}

impl EffectDesc {
    /// The stock effect registered for a slot at device construction.
    /// 125 ms feels close to the real hardware.
    pub fn for_slot(slot: usize, magnitude: i16) -> Self {
        Self {
            wave: if slot == 0 { EffectWave::Sine } else { EffectWave::Triangle },
            direction: 18000,
            period_ms: 10,
            magnitude,
            phase: 18000,
            length_ms: 125,
            delay_ms: 0,
            attack_ms: 0,
        }
    }
}

/// The underlying input library, seen through the operations this
/// subsystem needs. Implemented by [`crate::SdlBackend`] and by the test
/// fakes that inject raw values.
pub trait HostBackend {
    type Device: HostDevice;

    /// Initialize the joystick, haptic, event and game-controller
    /// subsystems. Must be idempotent; the first successful call restores
    /// the process default interrupt and termination signal dispositions,
    /// enables background event reception and switches joystick and
    /// controller event delivery to query mode.
    fn init(&mut self) -> Result<()>;

    /// Install a bundled controller-mapping database. Returns the number
    /// of mappings added.
    fn install_mapping_blob(&mut self, blob: &[u8]) -> Result<u32>;

    /// Install one user-supplied mapping string.
    fn install_mapping(&mut self, mapping: &str) -> Result<()>;

    /// Number of presently connected joystick devices.
    fn num_devices(&mut self) -> u32;

    /// Open the device at the given enumeration index.
    fn open(&mut self, index: u32) -> Result<Self::Device>;

    /// Refresh the state of all connected controllers. Subsequent input
    /// queries observe this snapshot until the next refresh.
    fn update(&mut self);

    fn api(&self) -> BackendApi;
}

/// One opened host device. Owns the controller and haptic handles; the
/// joystick handle is borrowed from the controller.
pub trait HostDevice {
    /// Whether the library classified this device as a game controller.
    fn is_controller(&self) -> bool;

    fn name(&self) -> &str;

    /// Stable per-device GUID string.
    fn guid(&self) -> &str;

    /// Raw signed axis value under the given axis code.
    fn axis(&self, code: RawCode) -> i16;

    /// Raw button state under the given button code.
    fn button(&self, code: RawCode) -> bool;

    /// Whether the joystick reports haptic capability.
    fn has_haptic(&self) -> bool;

    /// Open the haptic handle. Returns false when opening failed; the
    /// device stays usable without rumble.
    fn open_haptic(&mut self) -> bool;

    /// Whether a haptic handle is currently open.
    fn haptic_open(&self) -> bool;

    /// Register a periodic effect, returning its id.
    fn register_effect(&mut self, desc: &EffectDesc) -> Result<i32>;

    /// Start a registered effect for the given number of iterations.
    fn run_effect(&mut self, id: i32, iterations: u32) -> Result<()>;

    /// Release one registered effect.
    fn destroy_effect(&mut self, id: i32);

    /// Close the haptic handle. Registered effect ids are invalid after
    /// this returns.
    fn close_haptic(&mut self);

    /// One-shot rumble helper, `strength` in [0, 1]. Used by the settings
    /// UI to let the user feel whether the pad is handled at all.
    fn play_rumble(&mut self, strength: f32, duration_ms: u32) -> Result<()>;
}
