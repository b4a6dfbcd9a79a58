/// Number of virtual pad slots the emulator drives.
pub const NB_PADS: usize = 2;

/// Read-only snapshot of the user settings this subsystem consumes.
///
/// Persistence is owned by the external config layer; devices copy what
/// they need at construction time.
#[derive(Debug, Clone)]
pub struct PadConfig {
    /// Linear stick scaling, in percent. 100 is neutral.
    pub sensitivity: i32,
    /// Raw-axis magnitude below which stick input is clamped to zero.
    pub dead_zone: i32,
    /// Magnitude of the preregistered haptic effects, signed 16-bit range.
    pub force_feedback_intensity: i16,
    /// Per pad slot: whether rumble requests are honored.
    pub force_feedback: [bool; NB_PADS],
    /// User-supplied controller mapping strings, installed after the
    /// bundled database.
    pub extra_mappings: Vec<String>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            sensitivity: 100,
            dead_zone: 1500,
            force_feedback_intensity: i16::MAX,
            force_feedback: [true; NB_PADS],
            extra_mappings: Vec::new(),
        }
    }
}

impl PadConfig {
    /// Whether rumble is enabled for the given pad slot. Out-of-range
    /// slots read as disabled.
    pub fn force_feedback_enabled(&self, pad: usize) -> bool {
        self.force_feedback.get(pad).copied().unwrap_or(false)
    }
}
