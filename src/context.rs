use std::sync::Arc;

use crate::backend::{BackendKind, WrappedGpuPointer};
use crate::command::{DispatchRaysDesc, PipelineState, RayTracingCommandList};
use crate::descriptor::{DescriptorHeap, DescriptorHeapDesc, GpuDescriptorHandle};
use crate::error::Result;
use crate::resources::{GpuResource, ResourceBarrier, ResourceStates};
use crate::sbt::ShaderBindings;
use crate::view::{self, ViewDesc};
use crate::RayTracingDevice;

/// Shader-visible descriptor heap size of a context.
///
/// Slots are never reclaimed within a context, so this bounds the total
/// number of table-backed views a context can ever create.
pub const DESCRIPTOR_HEAP_CAPACITY: u32 = 256;

/// Resource-binding and dispatch context for one device + command-list
/// pairing.
///
/// Allocating operations take `&mut self`: a context is a single-writer
/// object, and callers sharing one across threads must serialize access
/// themselves (typically one context per recording thread).
pub struct RayTracingContext<D, L> {
    device: Arc<D>,
    command_list: Arc<L>,
    heap: DescriptorHeap,
    backend: BackendKind,
}

impl<D: RayTracingDevice, L: RayTracingCommandList> RayTracingContext<D, L> {
    /// Probes the device's raytracing capability once and builds the
    /// shader-visible descriptor heap.
    ///
    /// `force_fallback` pins the context to the compute-emulated path
    /// even on a natively capable driver.
    pub fn create(device: Arc<D>, command_list: Arc<L>, force_fallback: bool) -> Result<Self> {
        let backend = BackendKind::select(device.supports_native_raytracing(), force_fallback);
        let heap = DescriptorHeap::create(
            device.as_ref(),
            &DescriptorHeapDesc {
                capacity: DESCRIPTOR_HEAP_CAPACITY,
            },
        )?;
        tracing::info!(?backend, "created raytracing context");
        Ok(Self {
            device,
            command_list,
            heap,
            backend,
        })
    }

    pub fn device(&self) -> &Arc<D> {
        &self.device
    }

    pub fn command_list(&self) -> &Arc<L> {
        &self.command_list
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// GPU-visible handle of an already-allocated descriptor slot.
    pub fn descriptor_gpu_handle(&self, index: u32) -> GpuDescriptorHandle {
        self.heap.gpu_handle(index)
    }

    /// Re-binds the context's descriptor heap on the command stream.
    /// Needed after the host bound other heaps on the same stream.
    pub fn bind_descriptor_heap(&self) {
        self.command_list.set_descriptor_heaps(&[self.heap.raw()]);
    }

    /// Raw-buffer UAV at a fresh descriptor slot.
    pub fn create_buffer_uav_handle(
        &mut self,
        resource: &dyn GpuResource,
    ) -> Result<GpuDescriptorHandle> {
        let desc = ViewDesc::raw_buffer_uav(&resource.desc());
        self.write_view_at_slot(resource, &desc, None)
    }

    /// Raw-buffer UAV addressed the way the active backend wants it.
    pub fn create_buffer_uav_wrapped_pointer(
        &mut self,
        resource: &dyn GpuResource,
    ) -> Result<WrappedGpuPointer> {
        let desc = ViewDesc::raw_buffer_uav(&resource.desc());
        self.backend
            .resolve_view(self.device.as_ref(), &mut self.heap, resource, &desc)
    }

    /// Buffer SRV (raw or structured) at a fresh descriptor slot.
    pub fn create_buffer_srv_handle(
        &mut self,
        resource: &dyn GpuResource,
        raw: bool,
        structure_byte_stride: u32,
    ) -> Result<GpuDescriptorHandle> {
        let desc = ViewDesc::buffer_srv(&resource.desc(), raw, structure_byte_stride);
        self.write_view_at_slot(resource, &desc, None)
    }

    /// Buffer SRV addressed the way the active backend wants it.
    pub fn create_buffer_srv_wrapped_pointer(
        &mut self,
        resource: &dyn GpuResource,
        raw: bool,
        structure_byte_stride: u32,
    ) -> Result<WrappedGpuPointer> {
        let desc = ViewDesc::buffer_srv(&resource.desc(), raw, structure_byte_stride);
        self.backend
            .resolve_view(self.device.as_ref(), &mut self.heap, resource, &desc)
    }

    /// 2D or cube texture SRV.
    ///
    /// `index_to_use` rebinds a known in-range slot (for textures kept
    /// at a stable location across frames); `None` or an out-of-range
    /// index allocates fresh.
    pub fn create_texture_srv_handle(
        &mut self,
        resource: &dyn GpuResource,
        cubemap: bool,
        index_to_use: Option<u32>,
    ) -> Result<GpuDescriptorHandle> {
        let desc = ViewDesc::texture_srv(&resource.desc(), cubemap);
        self.write_view_at_slot(resource, &desc, index_to_use)
    }

    /// 2D or cube texture SRV addressed the way the active backend
    /// wants it.
    pub fn create_texture_srv_wrapped_pointer(
        &mut self,
        resource: &dyn GpuResource,
        cubemap: bool,
    ) -> Result<WrappedGpuPointer> {
        let desc = ViewDesc::texture_srv(&resource.desc(), cubemap);
        self.backend
            .resolve_view(self.device.as_ref(), &mut self.heap, resource, &desc)
    }

    /// Records one state-transition barrier, immediately.
    ///
    /// The context keeps no state history; `before` is the caller's
    /// declaration of the resource's current state.
    pub fn transition_resource(
        &self,
        resource: &dyn GpuResource,
        before: ResourceStates,
        after: ResourceStates,
    ) {
        self.command_list.resource_barrier(&[ResourceBarrier::Transition {
            resource,
            before,
            after,
        }]);
    }

    /// Records one UAV-completion barrier for `resource`, immediately.
    pub fn insert_uav_barrier(&self, resource: &dyn GpuResource) {
        self.command_list
            .resource_barrier(&[ResourceBarrier::UnorderedAccess { resource }]);
    }

    /// Computes the shader-table regions from `bindings`, binds `state`
    /// on the fallback command interface, and launches a
    /// `width * height * depth` trace.
    pub fn raytrace(
        &self,
        bindings: &dyn ShaderBindings,
        state: PipelineState,
        width: u32,
        height: u32,
        depth: u32,
    ) {
        let desc = DispatchRaysDesc::from_bindings(bindings, width, height, depth);
        tracing::debug!(width, height, depth, "dispatch rays");
        self.command_list.set_pipeline_state(state);
        self.command_list.dispatch_rays(&desc);
    }

    fn write_view_at_slot(
        &mut self,
        resource: &dyn GpuResource,
        desc: &ViewDesc,
        index_to_use: Option<u32>,
    ) -> Result<GpuDescriptorHandle> {
        let (index, cpu_handle) = self.heap.allocate(index_to_use)?;
        view::write_view(self.device.as_ref(), resource, desc, cpu_handle);
        Ok(self.heap.gpu_handle(index))
    }
}
