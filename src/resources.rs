use std::fmt;

use bitflags::bitflags;

/// Address of a resource allocation in the GPU's address space.
pub type GpuVirtualAddress = u64;

/// Element format of a resource or view, numbered like the driver's
/// format table so hosts can round-trip their own format values.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Format(pub u32);

impl Format {
    pub const UNKNOWN: Self = Self(0);
    pub const R32G32B32A32_FLOAT: Self = Self(2);
    pub const R16G16B16A16_FLOAT: Self = Self(10);
    pub const R8G8B8A8_UNORM: Self = Self(28);
    pub const R32_TYPELESS: Self = Self(39);
    pub const R32_FLOAT: Self = Self(41);
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::UNKNOWN => "UNKNOWN",
            Self::R32G32B32A32_FLOAT => "R32G32B32A32_FLOAT",
            Self::R16G16B16A16_FLOAT => "R16G16B16A16_FLOAT",
            Self::R8G8B8A8_UNORM => "R8G8B8A8_UNORM",
            Self::R32_TYPELESS => "R32_TYPELESS",
            Self::R32_FLOAT => "R32_FLOAT",
            _ => return f.debug_tuple("Format").field(&self.0).finish(),
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Visible state of a resource, as declared on barrier transitions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ResourceStates: u32 {
        const COMMON = 0;
        const VERTEX_AND_CONSTANT_BUFFER = 1 << 0;
        const INDEX_BUFFER = 1 << 1;
        const RENDER_TARGET = 1 << 2;
        const UNORDERED_ACCESS = 1 << 3;
        const DEPTH_WRITE = 1 << 4;
        const DEPTH_READ = 1 << 5;
        const NON_PIXEL_SHADER_RESOURCE = 1 << 6;
        const PIXEL_SHADER_RESOURCE = 1 << 7;
        const STREAM_OUT = 1 << 8;
        const INDIRECT_ARGUMENT = 1 << 9;
        const COPY_DEST = 1 << 10;
        const COPY_SOURCE = 1 << 11;
        const GENERIC_READ = Self::VERTEX_AND_CONSTANT_BUFFER.bits()
            | Self::INDEX_BUFFER.bits()
            | Self::NON_PIXEL_SHADER_RESOURCE.bits()
            | Self::PIXEL_SHADER_RESOURCE.bits()
            | Self::INDIRECT_ARGUMENT.bits()
            | Self::COPY_SOURCE.bits();
    }
}

/// The properties of a resource that view creation reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDesc {
    /// Byte width for buffers, texel width for textures.
    pub width: u64,
    pub format: Format,
    /// 0 when the resource did not pin its mip chain length.
    pub mip_levels: u16,
}

/// Implemented by the host for whatever owns the underlying GPU
/// allocations.
///
/// The context never allocates resource memory. It only builds views
/// over resources handed to it, so all it needs is the description and
/// the address the GPU uses to reach the allocation.
pub trait GpuResource {
    fn desc(&self) -> ResourceDesc;
    fn gpu_virtual_address(&self) -> GpuVirtualAddress;
}

/// One barrier record for the command stream.
///
/// Resource state history is not tracked anywhere in this crate. On a
/// transition the caller declares the prior state and owns its
/// correctness.
pub enum ResourceBarrier<'a> {
    Transition {
        resource: &'a dyn GpuResource,
        before: ResourceStates,
        after: ResourceStates,
    },
    /// Orders all preceding unordered-access writes to the resource
    /// before any subsequent access to it.
    UnorderedAccess { resource: &'a dyn GpuResource },
}
