use thiserror::Error;

/// Error type for backend operations.
///
/// None of these escape the per-frame surface: device construction and
/// haptic playback absorb them with a log line, callers only observe a
/// shorter registry or a zero input value.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend subsystems.
    #[error("backend init failed: {0}")]
    BackendInit(String),
    /// Backend was used before `init` succeeded.
    #[error("backend is not initialized")]
    NotInitialized,
    /// Failed to open the device at the given index.
    #[error("device open failed: {0}")]
    DeviceOpen(String),
    /// The device has no usable haptic handle.
    #[error("haptic unavailable")]
    HapticUnavailable,
    /// No registered haptic effect with this id.
    #[error("unknown haptic effect {0}")]
    UnknownEffect(i32),
    /// A generic backend error.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for backend operations.
pub type Result<T> = std::result::Result<T, Error>;
