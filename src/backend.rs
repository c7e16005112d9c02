use crate::descriptor::DescriptorHeap;
use crate::error::Result;
use crate::resources::{GpuResource, GpuVirtualAddress};
use crate::view::{self, ViewDesc};
use crate::RayTracingDevice;

/// Which execution path the context drives.
///
/// Chosen once at construction and never re-probed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// The driver raytraces natively and resolves resource bindings
    /// from GPU virtual addresses alone.
    Native,
    /// Compute-emulated raytracing. The shader-visible descriptor heap
    /// is the only addressing mechanism the emulation layer has.
    Emulated,
}

impl BackendKind {
    pub(crate) fn select(supports_native: bool, force_fallback: bool) -> Self {
        if force_fallback || !supports_native {
            BackendKind::Emulated
        } else {
            BackendKind::Native
        }
    }

    pub fn is_emulated(self) -> bool {
        self == BackendKind::Emulated
    }

    /// Realizes `desc` under this backend's addressing model.
    ///
    /// Native passes the resource's GPU virtual address straight
    /// through and leaves the heap untouched. Emulated burns a fresh
    /// slot, writes the view there, and records the slot in the
    /// pointer.
    pub(crate) fn resolve_view<D: RayTracingDevice>(
        self,
        device: &D,
        heap: &mut DescriptorHeap,
        resource: &dyn GpuResource,
        desc: &ViewDesc,
    ) -> Result<WrappedGpuPointer> {
        let descriptor_heap_index = match self {
            BackendKind::Native => 0,
            BackendKind::Emulated => {
                let (index, cpu_handle) = heap.allocate(None)?;
                view::write_view(device, resource, desc, cpu_handle);
                index
            }
        };
        Ok(WrappedGpuPointer {
            descriptor_heap_index,
            gpu_virtual_address: resource.gpu_virtual_address(),
        })
    }
}

/// Backend-agnostic reference to a resource binding.
///
/// `descriptor_heap_index` is only meaningful on the emulated path; the
/// native path resolves the binding from `gpu_virtual_address` alone
/// and leaves the index at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrappedGpuPointer {
    pub descriptor_heap_index: u32,
    pub gpu_virtual_address: GpuVirtualAddress,
}
