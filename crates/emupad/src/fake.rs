//! In-memory backend used by the unit tests to inject raw values and
//! observe haptic traffic.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{BackendApi, EffectDesc, HostBackend, HostDevice};
use crate::error::{Error, Result};
use crate::types::RawCode;

/// One recorded call against a device's haptic surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HapticCall {
    Open,
    Destroy(i32),
    Close,
}

#[derive(Debug, Default)]
struct SpecInner {
    name: String,
    guid: String,
    controller: bool,
    haptic: bool,
    broken: bool,
    fail_effect_at: Option<usize>,
    axes: [i16; 8],
    buttons: [bool; 16],
    haptic_open: bool,
    registered: Vec<EffectDesc>,
    haptic_calls: Vec<HapticCall>,
    effect_runs: Vec<(i32, u32)>,
    rumble_plays: Vec<(f32, u32)>,
}

/// Description of one fake device, shared with every handle opened from
/// it so tests can mutate raw state and read back recorded calls.
#[derive(Clone)]
pub(crate) struct FakeSpec {
    inner: Rc<RefCell<SpecInner>>,
}

impl FakeSpec {
    pub(crate) fn controller(name: &str, guid: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SpecInner {
                name: name.to_owned(),
                guid: guid.to_owned(),
                controller: true,
                ..SpecInner::default()
            })),
        }
    }

    /// A joystick the library has no controller mapping for.
    pub(crate) fn plain_joystick(name: &str, guid: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SpecInner {
                name: name.to_owned(),
                guid: guid.to_owned(),
                ..SpecInner::default()
            })),
        }
    }

    /// A device whose open call fails outright.
    pub(crate) fn broken(name: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SpecInner {
                name: name.to_owned(),
                broken: true,
                ..SpecInner::default()
            })),
        }
    }

    pub(crate) fn with_haptic(self) -> Self {
        self.inner.borrow_mut().haptic = true;
        self
    }

    /// Make the n-th effect registration fail.
    pub(crate) fn fail_effect_registration_at(self, n: usize) -> Self {
        self.inner.borrow_mut().fail_effect_at = Some(n);
        self
    }

    pub(crate) fn set_axis(&self, code: RawCode, value: i16) {
        self.inner.borrow_mut().axes[usize::from(code)] = value;
    }

    pub(crate) fn press_button(&self, code: RawCode, pressed: bool) {
        self.inner.borrow_mut().buttons[usize::from(code)] = pressed;
    }

    pub(crate) fn registered_effects(&self) -> Vec<EffectDesc> {
        self.inner.borrow().registered.clone()
    }

    pub(crate) fn haptic_calls(&self) -> Vec<HapticCall> {
        self.inner.borrow().haptic_calls.clone()
    }

    pub(crate) fn effect_runs(&self) -> Vec<(i32, u32)> {
        self.inner.borrow().effect_runs.clone()
    }

    pub(crate) fn rumble_plays(&self) -> Vec<(f32, u32)> {
        self.inner.borrow().rumble_plays.clone()
    }
}

/// Device handle produced by [`FakeBackend::open`].
pub(crate) struct FakeDevice {
    name: String,
    guid: String,
    inner: Rc<RefCell<SpecInner>>,
}

impl HostDevice for FakeDevice {
    fn is_controller(&self) -> bool {
        self.inner.borrow().controller
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn guid(&self) -> &str {
        &self.guid
    }

    fn axis(&self, code: RawCode) -> i16 {
        let inner = self.inner.borrow();
        inner.axes.get(usize::from(code)).copied().unwrap_or(0)
    }

    fn button(&self, code: RawCode) -> bool {
        let inner = self.inner.borrow();
        inner.buttons.get(usize::from(code)).copied().unwrap_or(false)
    }

    fn has_haptic(&self) -> bool {
        self.inner.borrow().haptic
    }

    fn open_haptic(&mut self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.haptic {
            return false;
        }
        inner.haptic_open = true;
        inner.haptic_calls.push(HapticCall::Open);
        true
    }

    fn haptic_open(&self) -> bool {
        self.inner.borrow().haptic_open
    }

    fn register_effect(&mut self, desc: &EffectDesc) -> Result<i32> {
        let mut inner = self.inner.borrow_mut();
        if !inner.haptic_open {
            return Err(Error::HapticUnavailable);
        }
        if inner.fail_effect_at == Some(inner.registered.len()) {
            return Err(Error::Backend("effect upload refused".to_owned()));
        }
        inner.registered.push(desc.clone());
        Ok(inner.registered.len() as i32 - 1)
    }

    fn run_effect(&mut self, id: i32, iterations: u32) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if !inner.haptic_open {
            return Err(Error::HapticUnavailable);
        }
        inner.effect_runs.push((id, iterations));
        Ok(())
    }

    fn destroy_effect(&mut self, id: i32) {
        self.inner.borrow_mut().haptic_calls.push(HapticCall::Destroy(id));
    }

    fn close_haptic(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.haptic_open = false;
        inner.haptic_calls.push(HapticCall::Close);
    }

    fn play_rumble(&mut self, strength: f32, duration_ms: u32) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if !inner.haptic_open {
            return Err(Error::HapticUnavailable);
        }
        inner.rumble_plays.push((strength, duration_ms));
        Ok(())
    }
}

/// Counters recorded by [`FakeBackend`], shared so tests keep visibility
/// after the backend moves into a manager.
#[derive(Debug, Default)]
pub(crate) struct BackendProbe {
    pub(crate) init_calls: u32,
    pub(crate) blob_bytes: Vec<usize>,
    pub(crate) mappings: Vec<String>,
    pub(crate) updates: u32,
}

pub(crate) struct FakeBackend {
    specs: Vec<FakeSpec>,
    initialized: bool,
    fail_init: bool,
    probe: Rc<RefCell<BackendProbe>>,
}

impl FakeBackend {
    pub(crate) fn with_devices(specs: Vec<FakeSpec>) -> Self {
        Self {
            specs,
            initialized: false,
            fail_init: false,
            probe: Rc::default(),
        }
    }

    pub(crate) fn failing_init() -> Self {
        Self {
            specs: Vec::new(),
            initialized: false,
            fail_init: true,
            probe: Rc::default(),
        }
    }

    pub(crate) fn probe(&self) -> Rc<RefCell<BackendProbe>> {
        self.probe.clone()
    }
}

impl HostBackend for FakeBackend {
    type Device = FakeDevice;

    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            return Err(Error::BackendInit("no subsystems".to_owned()));
        }
        if !self.initialized {
            self.initialized = true;
            self.probe.borrow_mut().init_calls += 1;
        }
        Ok(())
    }

    fn install_mapping_blob(&mut self, blob: &[u8]) -> Result<u32> {
        self.probe.borrow_mut().blob_bytes.push(blob.len());
        Ok(0)
    }

    fn install_mapping(&mut self, mapping: &str) -> Result<()> {
        self.probe.borrow_mut().mappings.push(mapping.to_owned());
        Ok(())
    }

    fn num_devices(&mut self) -> u32 {
        self.specs.len() as u32
    }

    fn open(&mut self, index: u32) -> Result<FakeDevice> {
        let spec = self
            .specs
            .get(index as usize)
            .ok_or_else(|| Error::DeviceOpen(format!("no device at index {index}")))?;
        let inner = spec.inner.clone();
        if inner.borrow().broken {
            return Err(Error::DeviceOpen("device refused to open".to_owned()));
        }
        let (name, guid) = {
            let borrowed = inner.borrow();
            (borrowed.name.clone(), borrowed.guid.clone())
        };
        Ok(FakeDevice { name, guid, inner })
    }

    fn update(&mut self) {
        self.probe.borrow_mut().updates += 1;
    }

    fn api(&self) -> BackendApi {
        BackendApi::Sdl
    }
}
