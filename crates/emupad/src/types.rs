/// A button or axis code in the underlying input library's namespace.
pub type RawCode = u8;

/// Output of an input query. Wide enough for the signed 16-bit stick range
/// after sensitivity scaling.
pub type PadValue = i32;

/// Logical pad inputs in the emulator's abstract namespace.
///
/// Three sub-kinds share the namespace: analog stick half-axes (signed
/// 16-bit range, centered at 0), the two analog triggers (reported as
/// 0-255) and digital buttons (0 or 0xFF). The discriminant doubles as a
/// dense index into the per-device binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PadInput {
    L2,
    R2,
    L1,
    R1,
    Triangle,
    Circle,
    Cross,
    Square,
    Select,
    L3,
    R3,
    Start,
    DPadUp,
    DPadRight,
    DPadDown,
    DPadLeft,
    LeftStickUp,
    LeftStickRight,
    LeftStickDown,
    LeftStickLeft,
    RightStickUp,
    RightStickRight,
    RightStickDown,
    RightStickLeft,
}

impl PadInput {
    /// Number of logical inputs; the binding table is this long.
    pub const COUNT: usize = 24;

    /// Every logical input, in binding-table order.
    pub const ALL: [PadInput; PadInput::COUNT] = [
        PadInput::L2,
        PadInput::R2,
        PadInput::L1,
        PadInput::R1,
        PadInput::Triangle,
        PadInput::Circle,
        PadInput::Cross,
        PadInput::Square,
        PadInput::Select,
        PadInput::L3,
        PadInput::R3,
        PadInput::Start,
        PadInput::DPadUp,
        PadInput::DPadRight,
        PadInput::DPadDown,
        PadInput::DPadLeft,
        PadInput::LeftStickUp,
        PadInput::LeftStickRight,
        PadInput::LeftStickDown,
        PadInput::LeftStickLeft,
        PadInput::RightStickUp,
        PadInput::RightStickRight,
        PadInput::RightStickDown,
        PadInput::RightStickLeft,
    ];

    /// Index into the binding table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for the eight analog stick half-axes.
    #[inline]
    pub fn is_stick(self) -> bool {
        matches!(
            self,
            PadInput::LeftStickUp
                | PadInput::LeftStickRight
                | PadInput::LeftStickDown
                | PadInput::LeftStickLeft
                | PadInput::RightStickUp
                | PadInput::RightStickRight
                | PadInput::RightStickDown
                | PadInput::RightStickLeft
        )
    }

    /// True for the two analog triggers.
    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, PadInput::L2 | PadInput::R2)
    }
}

/// Raw codes of the SDL game-controller namespace. These values are part
/// of the library's stable ABI and are what the binding table stores.
pub mod raw {
    use super::RawCode;

    pub const BUTTON_A: RawCode = 0;
    pub const BUTTON_B: RawCode = 1;
    pub const BUTTON_X: RawCode = 2;
    pub const BUTTON_Y: RawCode = 3;
    pub const BUTTON_BACK: RawCode = 4;
    pub const BUTTON_GUIDE: RawCode = 5;
    pub const BUTTON_START: RawCode = 6;
    pub const BUTTON_LEFT_STICK: RawCode = 7;
    pub const BUTTON_RIGHT_STICK: RawCode = 8;
    pub const BUTTON_LEFT_SHOULDER: RawCode = 9;
    pub const BUTTON_RIGHT_SHOULDER: RawCode = 10;
    pub const BUTTON_DPAD_UP: RawCode = 11;
    pub const BUTTON_DPAD_DOWN: RawCode = 12;
    pub const BUTTON_DPAD_LEFT: RawCode = 13;
    pub const BUTTON_DPAD_RIGHT: RawCode = 14;

    pub const AXIS_LEFT_X: RawCode = 0;
    pub const AXIS_LEFT_Y: RawCode = 1;
    pub const AXIS_RIGHT_X: RawCode = 2;
    pub const AXIS_RIGHT_Y: RawCode = 3;
    pub const AXIS_TRIGGER_LEFT: RawCode = 4;
    pub const AXIS_TRIGGER_RIGHT: RawCode = 5;
}

const BUTTON_NAMES: [&str; 15] = [
    "A",
    "B",
    "X",
    "Y",
    "Back",
    "Guide",
    "Start",
    "LeftStick",
    "RightStick",
    "LeftShoulder",
    "RightShoulder",
    "DPadUp",
    "DPadDown",
    "DPadLeft",
    "DPadRight",
];

const AXIS_NAMES: [&str; 6] = [
    "LeftX",
    "LeftY",
    "RightX",
    "RightY",
    "TriggerLeft",
    "TriggerRight",
];

/// Display name of a raw button code, for the binding UI.
pub fn button_name(code: RawCode) -> &'static str {
    BUTTON_NAMES.get(usize::from(code)).copied().unwrap_or("Unknown")
}

/// Display name of a raw axis code, for the binding UI.
pub fn axis_name(code: RawCode) -> &'static str {
    AXIS_NAMES.get(usize::from(code)).copied().unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_table_is_in_discriminant_order() {
        for (index, input) in PadInput::ALL.iter().enumerate() {
            assert_eq!(input.index(), index);
        }
    }

    #[test]
    fn sub_kinds_do_not_overlap() {
        for input in PadInput::ALL {
            assert!(!(input.is_stick() && input.is_trigger()));
        }
        assert_eq!(PadInput::ALL.iter().filter(|i| i.is_stick()).count(), 8);
        assert_eq!(PadInput::ALL.iter().filter(|i| i.is_trigger()).count(), 2);
    }

    #[test]
    fn raw_code_names_resolve() {
        assert_eq!(button_name(raw::BUTTON_A), "A");
        assert_eq!(button_name(raw::BUTTON_DPAD_RIGHT), "DPadRight");
        assert_eq!(axis_name(raw::AXIS_TRIGGER_RIGHT), "TriggerRight");
        assert_eq!(button_name(200), "Unknown");
        assert_eq!(axis_name(200), "Unknown");
    }
}
