use crate::descriptor::CpuDescriptorHandle;
use crate::resources::{Format, GpuResource, ResourceDesc};
use crate::RayTracingDevice;

/// Mip-count sentinel meaning "every level the resource has".
pub const MIP_LEVELS_ALL: u32 = u32::MAX;

/// Raw buffer views expose the buffer as opaque 32-bit elements.
const RAW_ELEMENT_SIZE: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAccess {
    ShaderResource,
    UnorderedAccess,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewDimension {
    Buffer,
    Texture2D,
    TextureCube,
}

/// How a resource's bytes should be exposed to shaders.
///
/// Transient: built, consumed by one device call, dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewDesc {
    pub access: ViewAccess,
    pub dimension: ViewDimension,
    pub format: Format,
    /// Buffer views only.
    pub element_count: u32,
    /// Structured buffer views only, 0 otherwise.
    pub structure_byte_stride: u32,
    /// Byte-addressed rather than structured buffer view.
    pub raw: bool,
    /// Texture views only.
    pub mip_levels: u32,
}

impl ViewDesc {
    /// Unordered-access view over a whole buffer as raw 32-bit elements.
    pub fn raw_buffer_uav(resource: &ResourceDesc) -> Self {
        Self {
            access: ViewAccess::UnorderedAccess,
            ..Self::raw_buffer(resource)
        }
    }

    /// Buffer shader-resource view, raw or structured.
    ///
    /// Structured views record the caller's element stride and size the
    /// view as `byte width / stride` elements.
    pub fn buffer_srv(resource: &ResourceDesc, raw: bool, structure_byte_stride: u32) -> Self {
        if raw {
            Self::raw_buffer(resource)
        } else {
            assert!(
                structure_byte_stride != 0,
                "structured buffer views need a nonzero element stride"
            );
            Self {
                access: ViewAccess::ShaderResource,
                dimension: ViewDimension::Buffer,
                format: Format::UNKNOWN,
                element_count: (resource.width / structure_byte_stride as u64) as u32,
                structure_byte_stride,
                raw: false,
                mip_levels: 0,
            }
        }
    }

    /// 2D or cube texture shader-resource view in the resource's own
    /// format.
    ///
    /// A resource reporting 0 mip levels has not pinned its chain
    /// length, so the view asks for every level.
    pub fn texture_srv(resource: &ResourceDesc, cubemap: bool) -> Self {
        Self {
            access: ViewAccess::ShaderResource,
            dimension: if cubemap {
                ViewDimension::TextureCube
            } else {
                ViewDimension::Texture2D
            },
            format: resource.format,
            element_count: 0,
            structure_byte_stride: 0,
            raw: false,
            mip_levels: if resource.mip_levels == 0 {
                MIP_LEVELS_ALL
            } else {
                resource.mip_levels as u32
            },
        }
    }

    fn raw_buffer(resource: &ResourceDesc) -> Self {
        Self {
            access: ViewAccess::ShaderResource,
            dimension: ViewDimension::Buffer,
            format: Format::R32_TYPELESS,
            element_count: (resource.width / RAW_ELEMENT_SIZE) as u32,
            structure_byte_stride: 0,
            raw: true,
            mip_levels: 0,
        }
    }
}

/// Routes the realized view to the matching device entry point.
pub(crate) fn write_view<D: RayTracingDevice + ?Sized>(
    device: &D,
    resource: &dyn GpuResource,
    desc: &ViewDesc,
    dest: CpuDescriptorHandle,
) {
    match desc.access {
        ViewAccess::UnorderedAccess => device.create_unordered_access_view(resource, desc, dest),
        ViewAccess::ShaderResource => device.create_shader_resource_view(resource, desc, dest),
    }
}
