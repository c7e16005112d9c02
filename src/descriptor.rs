use crate::error::{Error, Result};
use crate::RayTracingDevice;

/// CPU-visible address of a descriptor slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CpuDescriptorHandle {
    pub ptr: usize,
}

impl CpuDescriptorHandle {
    pub fn offset(self, index: u32, increment: u32) -> Self {
        Self {
            ptr: self.ptr + index as usize * increment as usize,
        }
    }
}

/// GPU-visible address of a descriptor slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GpuDescriptorHandle {
    pub ptr: u64,
}

impl GpuDescriptorHandle {
    pub fn offset(self, index: u32, increment: u32) -> Self {
        Self {
            ptr: self.ptr + index as u64 * increment as u64,
        }
    }
}

/// Opaque driver identity of a descriptor heap, used to rebind the heap
/// on a command stream.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DescriptorHeapHandle(pub u64);

#[derive(Clone, Copy, Debug)]
pub struct DescriptorHeapDesc {
    pub capacity: u32,
}

/// What the device reports for a freshly created shader-visible heap.
#[derive(Clone, Copy, Debug)]
pub struct DescriptorHeapInfo {
    pub heap: DescriptorHeapHandle,
    pub cpu_base: CpuDescriptorHandle,
    pub gpu_base: GpuDescriptorHandle,
}

/// Fixed-capacity, append-only index space over a shader-visible heap.
///
/// A fresh allocation advances the high-water cursor; slots are never
/// reclaimed. Passing an explicit in-range index instead rebinds that
/// slot and leaves the cursor alone.
pub struct DescriptorHeap {
    raw: DescriptorHeapHandle,
    cpu_base: CpuDescriptorHandle,
    gpu_base: GpuDescriptorHandle,
    increment: u32,
    capacity: u32,
    allocated: u32,
}

impl DescriptorHeap {
    pub fn create<D: RayTracingDevice>(device: &D, desc: &DescriptorHeapDesc) -> Result<Self> {
        let info = device.create_descriptor_heap(desc)?;
        tracing::debug!(heap = ?info.heap, capacity = desc.capacity, "created descriptor heap");
        Ok(Self {
            raw: info.heap,
            cpu_base: info.cpu_base,
            gpu_base: info.gpu_base,
            increment: device.descriptor_increment_size(),
            capacity: desc.capacity,
            allocated: 0,
        })
    }

    /// Hands out a slot and its CPU-visible handle.
    ///
    /// `index_to_use` within capacity picks that exact slot without
    /// advancing the cursor; `None` or an out-of-range index takes the
    /// next fresh slot. Runs out loudly once every fresh slot is gone.
    pub fn allocate(&mut self, index_to_use: Option<u32>) -> Result<(u32, CpuDescriptorHandle)> {
        let index = match index_to_use {
            Some(index) if index < self.capacity => index,
            _ => {
                if self.allocated == self.capacity {
                    return Err(Error::DescriptorHeapExhausted {
                        capacity: self.capacity,
                    });
                }
                let fresh = self.allocated;
                self.allocated += 1;
                fresh
            }
        };
        tracing::trace!(index, "allocate descriptor slot");
        Ok((index, self.cpu_handle(index)))
    }

    pub fn cpu_handle(&self, index: u32) -> CpuDescriptorHandle {
        debug_assert!(index < self.capacity);
        self.cpu_base.offset(index, self.increment)
    }

    /// GPU-visible companion of `cpu_handle`. Pure in the index.
    pub fn gpu_handle(&self, index: u32) -> GpuDescriptorHandle {
        debug_assert!(index < self.capacity);
        self.gpu_base.offset(index, self.increment)
    }

    pub fn raw(&self) -> DescriptorHeapHandle {
        self.raw
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// High-water mark of fresh allocations.
    pub fn allocated(&self) -> u32 {
        self.allocated
    }
}
