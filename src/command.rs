use crate::descriptor::DescriptorHeapHandle;
use crate::resources::{GpuVirtualAddress, ResourceBarrier};

/// Opaque pipeline-state handle, produced by the host's pipeline
/// builder and valid for the fallback command interface.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineState(pub u64);

/// Contiguous shader-record span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GpuAddressRange {
    pub start: GpuVirtualAddress,
    pub size: u64,
}

/// Shader-record span walked with a fixed stride.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GpuAddressRangeAndStride {
    pub start: GpuVirtualAddress,
    pub size: u64,
    pub stride: u64,
}

/// Everything one trace launch needs: the three shader-table regions
/// and the 3D dispatch extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchRaysDesc {
    pub ray_gen_shader_record: GpuAddressRange,
    pub miss_shader_table: GpuAddressRangeAndStride,
    pub hit_group_table: GpuAddressRangeAndStride,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// Recording surface of the host's command list.
///
/// Calls record onto the stream immediately and return once recorded,
/// not once executed. Recording is externally synchronized; a context
/// is the single writer on its stream.
pub trait RayTracingCommandList {
    fn resource_barrier(&self, barriers: &[ResourceBarrier<'_>]);
    fn set_descriptor_heaps(&self, heaps: &[DescriptorHeapHandle]);
    fn set_pipeline_state(&self, state: PipelineState);
    fn dispatch_rays(&self, desc: &DispatchRaysDesc);
}
