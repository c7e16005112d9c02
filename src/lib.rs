//! Resource binding and trace dispatch for hardware raytracing with a
//! compute-emulated fallback path.
//!
//! [`RayTracingContext`] sits between a raytracing pipeline and the
//! device's descriptor and shader-table addressing rules. Callers
//! create views over resources they own and launch traces without
//! branching on whether the driver raytraces natively or through the
//! emulation layer; the two addressing models meet in
//! [`WrappedGpuPointer`].
//!
//! The hosting application owns the device and command list and exposes
//! them through [`RayTracingDevice`] and [`RayTracingCommandList`].

pub mod backend;
pub mod command;
pub mod context;
pub mod descriptor;
mod error;
pub mod resources;
pub mod sbt;
pub mod view;

pub use backend::{BackendKind, WrappedGpuPointer};
pub use command::{
    DispatchRaysDesc, GpuAddressRange, GpuAddressRangeAndStride, PipelineState,
    RayTracingCommandList,
};
pub use context::{RayTracingContext, DESCRIPTOR_HEAP_CAPACITY};
pub use descriptor::{
    CpuDescriptorHandle, DescriptorHeap, DescriptorHeapDesc, DescriptorHeapHandle,
    DescriptorHeapInfo, GpuDescriptorHandle,
};
pub use error::{Error, Result};
pub use resources::{
    Format, GpuResource, GpuVirtualAddress, ResourceBarrier, ResourceDesc, ResourceStates,
};
pub use sbt::ShaderBindings;
pub use view::{ViewAccess, ViewDesc, ViewDimension, MIP_LEVELS_ALL};

/// Device-side services the context records against.
///
/// Implemented by the hosting application over whatever owns the real
/// driver device. View writes are recording-style calls and cannot
/// fail; heap creation can be rejected by the driver.
pub trait RayTracingDevice {
    /// Whether the driver raytraces natively. Probed once per context;
    /// the context never re-asks.
    fn supports_native_raytracing(&self) -> bool;

    /// Byte distance between adjacent slots of a shader-visible heap.
    fn descriptor_increment_size(&self) -> u32;

    fn create_descriptor_heap(&self, desc: &DescriptorHeapDesc) -> Result<DescriptorHeapInfo>;

    fn create_unordered_access_view(
        &self,
        resource: &dyn GpuResource,
        desc: &ViewDesc,
        dest: CpuDescriptorHandle,
    );

    fn create_shader_resource_view(
        &self,
        resource: &dyn GpuResource,
        desc: &ViewDesc,
        dest: CpuDescriptorHandle,
    );
}
