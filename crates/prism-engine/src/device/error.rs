use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Failures while bringing up the GPU for a window.
///
/// All variants are fatal at startup: the render loop never starts and the
/// condition is reported once.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("window has zero size")]
    ZeroSizedWindow,

    #[error("failed to create wgpu surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no GPU adapter supports this surface: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("no supported surface formats")]
    NoSurfaceFormat,

    #[error("GPU lacks required capability: {what}")]
    MissingCapability { what: &'static str },
}

impl DeviceError {
    /// True when the hardware/driver cannot run the depth-tested 3D pipeline at all.
    pub fn is_capability_failure(&self) -> bool {
        matches!(self, Self::NoAdapter(_) | Self::MissingCapability { .. })
    }
}
