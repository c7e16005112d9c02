use crate::command::{DispatchRaysDesc, GpuAddressRange, GpuAddressRangeAndStride};
use crate::resources::GpuVirtualAddress;

/// Record layout of a shader table, as produced by the host's bindings
/// builder.
///
/// The table is a buffer of fixed-stride records laid out ray-gen,
/// miss, hit. Implementations own that ordering: indices and counts
/// must describe non-overlapping regions in that order, and nothing
/// here re-validates them.
pub trait ShaderBindings {
    /// Base GPU virtual address of the shader table buffer.
    fn shader_table_address(&self) -> GpuVirtualAddress;
    /// Byte stride of one shader record.
    fn record_stride(&self) -> u32;
    fn ray_gen_record_index(&self) -> u32;
    fn first_miss_record_index(&self) -> u32;
    fn miss_program_count(&self) -> u32;
    fn first_hit_record_index(&self) -> u32;
    fn hit_program_count(&self) -> u32;
}

impl DispatchRaysDesc {
    /// Lays the three shader-table regions out from the bindings'
    /// record layout: `start = base + index * stride`,
    /// `size = stride * count`.
    pub fn from_bindings(
        bindings: &dyn ShaderBindings,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Self {
        let base = bindings.shader_table_address();
        let stride = bindings.record_stride() as u64;
        let record_start = |index: u32| base + index as u64 * stride;

        Self {
            // One ray generation record per launch.
            ray_gen_shader_record: GpuAddressRange {
                start: record_start(bindings.ray_gen_record_index()),
                size: stride,
            },
            miss_shader_table: GpuAddressRangeAndStride {
                start: record_start(bindings.first_miss_record_index()),
                size: stride * bindings.miss_program_count() as u64,
                stride,
            },
            hit_group_table: GpuAddressRangeAndStride {
                start: record_start(bindings.first_hit_record_index()),
                size: stride * bindings.hit_program_count() as u64,
                stride,
            },
            width,
            height,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bindings {
        base: GpuVirtualAddress,
        stride: u32,
        ray_gen: u32,
        first_miss: u32,
        miss_count: u32,
        first_hit: u32,
        hit_count: u32,
    }

    impl ShaderBindings for Bindings {
        fn shader_table_address(&self) -> GpuVirtualAddress {
            self.base
        }
        fn record_stride(&self) -> u32 {
            self.stride
        }
        fn ray_gen_record_index(&self) -> u32 {
            self.ray_gen
        }
        fn first_miss_record_index(&self) -> u32 {
            self.first_miss
        }
        fn miss_program_count(&self) -> u32 {
            self.miss_count
        }
        fn first_hit_record_index(&self) -> u32 {
            self.first_hit
        }
        fn hit_program_count(&self) -> u32 {
            self.hit_count
        }
    }

    #[test]
    fn regions_follow_the_record_layout() {
        let bindings = Bindings {
            base: 0x1000,
            stride: 64,
            ray_gen: 0,
            first_miss: 1,
            miss_count: 2,
            first_hit: 3,
            hit_count: 5,
        };
        let desc = DispatchRaysDesc::from_bindings(&bindings, 1920, 1080, 1);

        assert_eq!(desc.ray_gen_shader_record.start, 0x1000);
        assert_eq!(desc.ray_gen_shader_record.size, 64);

        assert_eq!(desc.miss_shader_table.start, 0x1040);
        assert_eq!(desc.miss_shader_table.size, 128);
        assert_eq!(desc.miss_shader_table.stride, 64);

        assert_eq!(desc.hit_group_table.start, 0x10C0);
        assert_eq!(desc.hit_group_table.size, 320);
        assert_eq!(desc.hit_group_table.stride, 64);

        assert_eq!((desc.width, desc.height, desc.depth), (1920, 1080, 1));
    }

    #[test]
    fn empty_miss_table_has_zero_size() {
        let bindings = Bindings {
            base: 0x2000,
            stride: 32,
            ray_gen: 0,
            first_miss: 1,
            miss_count: 0,
            first_hit: 1,
            hit_count: 1,
        };
        let desc = DispatchRaysDesc::from_bindings(&bindings, 1, 1, 1);
        assert_eq!(desc.miss_shader_table.size, 0);
        assert_eq!(desc.hit_group_table.start, 0x2020);
    }
}
