//! Resource binding reflection

use crate::module::{Instruction, Module};
use crate::opcode::{Dim, Op, StorageClass};
use crate::table::{IdTable, Slot};
use num_traits::FromPrimitive;

/// Kind of descriptor a resource binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Uniform buffer block
    UniformBuffer,
    /// Storage buffer block
    StorageBuffer,
    /// Standalone sampler
    Sampler,
    /// Sampled image without a sampler
    SampledImage,
    /// Read/write storage image
    StorageImage,
    /// Image and sampler combined
    CombinedImageSampler,
    /// Read-only texel buffer
    UniformTexelBuffer,
    /// Read/write texel buffer
    StorageTexelBuffer,
    /// Subpass input attachment
    InputAttachment,
}

impl ResourceKind {
    fn classify(inst: &Instruction<'_>, slot: &Slot, storage: StorageClass) -> Option<Self> {
        use spirv::StorageClass as Class;

        match inst.op()? {
            Op::TypeStruct => match storage {
                StorageClass::Known(Class::StorageBuffer) => Some(ResourceKind::StorageBuffer),
                StorageClass::Known(Class::Uniform) if slot.buffer_block => {
                    Some(ResourceKind::StorageBuffer)
                }
                StorageClass::Known(Class::Uniform) => Some(ResourceKind::UniformBuffer),
                _ => None,
            },
            Op::TypeImage => {
                // sampled: 1 = used with a sampler, 2 = read/write
                let [_, _, _, dimension, _, _, _, sampled] = inst.words::<8>().ok()?;
                Some(match (Dim::from_u32(dimension), sampled) {
                    (Some(Dim::DimSubpassData), _) => ResourceKind::InputAttachment,
                    (Some(Dim::DimBuffer), 2) => ResourceKind::StorageTexelBuffer,
                    (Some(Dim::DimBuffer), _) => ResourceKind::UniformTexelBuffer,
                    (_, 2) => ResourceKind::StorageImage,
                    _ => ResourceKind::SampledImage,
                })
            }
            Op::TypeSampler => Some(ResourceKind::Sampler),
            Op::TypeSampledImage => Some(ResourceKind::CombinedImageSampler),
            _ => None,
        }
    }

    /// Returns true for buffer blocks.
    pub fn is_buffer(&self) -> bool {
        matches!(self, ResourceKind::UniformBuffer | ResourceKind::StorageBuffer)
    }

    /// Returns true for kinds backed by an image.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            ResourceKind::SampledImage
                | ResourceKind::StorageImage
                | ResourceKind::CombinedImageSampler
                | ResourceKind::InputAttachment
        )
    }
}

/// A resource bound through a descriptor set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resource<'src> {
    /// Descriptor set
    pub set: u32,
    /// Binding within the set
    pub binding: u32,
    /// Variable name, or the block type's name for unnamed blocks
    pub name: Option<&'src str>,
    /// Storage class of the variable
    pub storage_class: StorageClass,
    /// Descriptor kind, if the variable's type could be resolved
    pub kind: Option<ResourceKind>,
    /// Number of descriptors: 1 for a single binding, the array length for
    /// arrays, 0 for runtime-sized arrays
    pub bind_count: Option<u32>,
}

/// What the scan could learn about a resource variable's type.
#[derive(Debug, Default)]
pub(crate) struct ResourceType<'src> {
    pub kind: Option<ResourceKind>,
    pub bind_count: Option<u32>,
    pub block_name: Option<&'src str>,
}

impl<'src> ResourceType<'src> {
    /// Follows `pointer_type` through any array to the element declaration.
    ///
    /// Only declarations already seen by the scan can be resolved; anything
    /// else is reported as unknown.
    pub fn resolve(
        module: &Module<'src>,
        table: &IdTable,
        pointer_type: u32,
        storage: StorageClass,
    ) -> Self {
        Self::try_resolve(module, table, pointer_type, storage).unwrap_or_default()
    }

    fn try_resolve(
        module: &Module<'src>,
        table: &IdTable,
        pointer_type: u32,
        storage: StorageClass,
    ) -> Option<Self> {
        let pointer = table.declaration(module, pointer_type)?;
        if pointer.op() != Some(Op::TypePointer) {
            return None;
        }
        let [_, _, _, pointee] = pointer.words::<4>().ok()?;

        let (element, bind_count) = unwrap_array(module, table, pointee)?;
        let inst = table.declaration(module, element)?;
        let slot = table.get(element).ok()?;

        let block_name = if inst.op() == Some(Op::TypeStruct) {
            table.name(module, element)
        } else {
            None
        };

        Some(ResourceType {
            kind: ResourceKind::classify(&inst, slot, storage),
            bind_count,
            block_name,
        })
    }
}

fn unwrap_array(module: &Module<'_>, table: &IdTable, ty: u32) -> Option<(u32, Option<u32>)> {
    let inst = table.declaration(module, ty)?;
    match inst.op() {
        Some(Op::TypeArray) => {
            let [_, _, element, length] = inst.words::<4>().ok()?;
            Some((element, array_length(module, table, length)))
        }
        Some(Op::TypeRuntimeArray) => {
            let [_, _, element] = inst.words::<3>().ok()?;
            Some((element, Some(0)))
        }
        _ => Some((ty, Some(1))),
    }
}

// Lengths sized by a specialization constant use its default value.
fn array_length(module: &Module<'_>, table: &IdTable, length: u32) -> Option<u32> {
    let inst = table.declaration(module, length)?;
    match inst.op()? {
        Op::Constant | Op::SpecConstant => inst.word(3),
        _ => None,
    }
}
