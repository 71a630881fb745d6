//! Capabilities and the device features they imply

use bitflags::bitflags;
use num_traits::FromPrimitive;
use std::fmt;

/// A capability declared by a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A capability known to the SPIR-V grammar
    Known(spirv::Capability),
    /// Any other raw value
    Other(u32),
}

impl From<u32> for Capability {
    fn from(value: u32) -> Self {
        spirv::Capability::from_u32(value).map_or(Capability::Other(value), Capability::Known)
    }
}

impl Capability {
    /// Returns the optional device features a module needs for this capability.
    pub fn required_features(&self) -> FeatureFlags {
        use spirv::Capability as Cap;

        let Capability::Known(capability) = self else {
            return FeatureFlags::empty();
        };
        match capability {
            Cap::Float64 => FeatureFlags::FLOAT64,
            Cap::Int64 | Cap::Int64Atomics => FeatureFlags::INT64,
            Cap::Int16 => FeatureFlags::INT16,
            Cap::ClipDistance => FeatureFlags::CLIP_DISTANCE,
            Cap::CullDistance => FeatureFlags::CULL_DISTANCE,
            Cap::ImageCubeArray | Cap::SampledCubeArray => FeatureFlags::IMAGE_CUBE_ARRAY,
            Cap::SampleRateShading => FeatureFlags::SAMPLE_RATE_SHADING,
            Cap::StorageImageExtendedFormats => FeatureFlags::EXTENDED_STORAGE_FORMATS,
            Cap::UniformBufferArrayDynamicIndexing
            | Cap::SampledImageArrayDynamicIndexing
            | Cap::StorageBufferArrayDynamicIndexing
            | Cap::StorageImageArrayDynamicIndexing => FeatureFlags::DYNAMIC_INDEXING,
            Cap::MultiView => FeatureFlags::MULTIVIEW,
            Cap::DrawParameters => FeatureFlags::DRAW_PARAMETERS,
            Cap::Geometry | Cap::GeometryPointSize | Cap::GeometryStreams => {
                FeatureFlags::GEOMETRY
            }
            Cap::Tessellation | Cap::TessellationPointSize => FeatureFlags::TESSELLATION,
            _ => FeatureFlags::empty(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Known(capability) => write!(f, "{:?}", capability),
            Capability::Other(value) => write!(f, "Capability({})", value),
        }
    }
}

bitflags! {
    /// Optional device features a module may depend on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureFlags: u32 {
        /// 64-bit floats in shaders
        const FLOAT64 = 1 << 0;

        /// 64-bit integers in shaders
        const INT64 = 1 << 1;

        /// 16-bit integers in shaders
        const INT16 = 1 << 2;

        /// Clip distance outputs
        const CLIP_DISTANCE = 1 << 3;

        /// Cull distance outputs
        const CULL_DISTANCE = 1 << 4;

        /// Cube map array images
        const IMAGE_CUBE_ARRAY = 1 << 5;

        /// Per-sample fragment shading
        const SAMPLE_RATE_SHADING = 1 << 6;

        /// Extended storage image formats
        const EXTENDED_STORAGE_FORMATS = 1 << 7;

        /// Dynamically indexed resource arrays
        const DYNAMIC_INDEXING = 1 << 8;

        /// Multiview rendering
        const MULTIVIEW = 1 << 9;

        /// Draw parameter builtins
        const DRAW_PARAMETERS = 1 << 10;

        /// Geometry shader stage
        const GEOMETRY = 1 << 11;

        /// Tessellation stages
        const TESSELLATION = 1 << 12;
    }
}

impl FeatureFlags {
    /// Folds the features required by a list of raw capability values.
    pub fn from_capabilities(capabilities: &[u32]) -> Self {
        capabilities
            .iter()
            .map(|&raw| Capability::from(raw).required_features())
            .fold(FeatureFlags::empty(), |acc, flags| acc | flags)
    }
}
