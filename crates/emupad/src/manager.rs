use crate::backend::HostBackend;
use crate::config::PadConfig;
use crate::device::Device;

/// Registry of opened gamepads. The index into the registry is the slot
/// the emulator addresses devices by.
///
/// Enumeration and teardown own the registry; while the emulator runs,
/// only `update` and per-device input queries are expected, and neither
/// mutates it. Re-enumeration is destructive and must not race with
/// frame queries.
pub struct DeviceManager<B: HostBackend> {
    backend: B,
    devices: Vec<Device<B::Device>>,
}

impl<B: HostBackend> DeviceManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            devices: Vec::new(),
        }
    }

    /// Discover all presently connected devices and rebuild the registry.
    ///
    /// Initializes the input library on first call, installs the bundled
    /// controller-mapping database (an opaque blob from the external
    /// resource loader) plus any user mapping strings, then opens every
    /// reported device, dropping the ones that fail to come up.
    ///
    /// When subsystem init fails the registry is left empty; a later call
    /// retries.
    pub fn enumerate(&mut self, config: &PadConfig, mapping_db: &[u8]) {
        if self.backend.init().is_err() {
            return;
        }

        if !mapping_db.is_empty() {
            match self.backend.install_mapping_blob(mapping_db) {
                Ok(count) => log::debug!("PAD: installed {count} bundled mappings"),
                Err(err) => log::warn!("PAD: failed to install mapping database: {err}"),
            }
        }
        for mapping in &config.extra_mappings {
            if let Err(err) = self.backend.install_mapping(mapping) {
                log::warn!("PAD: failed to install user mapping ({mapping}): {err}");
            }
        }

        self.devices.clear();
        for index in 0..self.backend.num_devices() {
            if let Some(device) = Device::open(&mut self.backend, index, config) {
                self.devices.push(device);
            }
        }
    }

    /// Snapshot the state of all connected controllers. Must be called
    /// once per frame before any input query; two queries between updates
    /// observe the same snapshot.
    pub fn update(&mut self) {
        self.backend.update();
    }

    /// Device in the given slot, if any.
    pub fn device(&self, slot: usize) -> Option<&Device<B::Device>> {
        self.devices.get(slot)
    }

    pub fn device_mut(&mut self, slot: usize) -> Option<&mut Device<B::Device>> {
        self.devices.get_mut(slot)
    }

    pub fn devices(&self) -> &[Device<B::Device>] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
