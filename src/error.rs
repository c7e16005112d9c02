use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The driver rejected creation of the raytracing device or one of
    /// its emulation-layer interfaces. A context reporting this was
    /// never usable.
    #[error("raytracing device initialization failed: {0}")]
    DeviceInit(String),

    #[error("descriptor heap creation failed: {0}")]
    HeapCreation(String),

    /// Every slot of the fixed-size descriptor heap has been handed out.
    /// Slots are never reclaimed within a context, so hitting this means
    /// the heap was sized too small for the workload.
    #[error("descriptor heap exhausted: all {capacity} slots allocated")]
    DescriptorHeapExhausted { capacity: u32 },
}
