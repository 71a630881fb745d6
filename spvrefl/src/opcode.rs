//! SPIR-V vocabulary the decoder matches on

use num_traits::FromPrimitive;
use std::fmt;

pub use spirv::{Decoration, Dim, Op};

/// Storage class of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// A storage class known to the SPIR-V grammar
    Known(spirv::StorageClass),
    /// Any other raw value
    Other(u32),
}

impl StorageClass {
    /// Returns true if this is the known storage class `class`.
    pub fn is(&self, class: spirv::StorageClass) -> bool {
        *self == StorageClass::Known(class)
    }
}

impl Default for StorageClass {
    fn default() -> Self {
        StorageClass::Known(spirv::StorageClass::UniformConstant)
    }
}

impl From<u32> for StorageClass {
    fn from(value: u32) -> Self {
        spirv::StorageClass::from_u32(value).map_or(StorageClass::Other(value), StorageClass::Known)
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageClass::Known(class) => write!(f, "{:?}", class),
            StorageClass::Other(value) => write!(f, "StorageClass({})", value),
        }
    }
}

/// Returns true for the non-function type declarations, `OpTypeVoid`
/// through `OpTypePointer`.
pub fn is_type_declaration(op: Op) -> bool {
    matches!(
        op,
        Op::TypeVoid
            | Op::TypeBool
            | Op::TypeInt
            | Op::TypeFloat
            | Op::TypeVector
            | Op::TypeMatrix
            | Op::TypeImage
            | Op::TypeSampler
            | Op::TypeSampledImage
            | Op::TypeArray
            | Op::TypeRuntimeArray
            | Op::TypeStruct
            | Op::TypeOpaque
            | Op::TypePointer
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_family() {
        assert!(is_type_declaration(Op::TypeVoid));
        assert!(is_type_declaration(Op::TypeStruct));
        assert!(is_type_declaration(Op::TypePointer));
        assert!(!is_type_declaration(Op::TypeFunction));
        assert!(!is_type_declaration(Op::Capability));
    }

    #[test]
    fn test_storage_class_from_raw() {
        assert_eq!(
            StorageClass::from(1),
            StorageClass::Known(spirv::StorageClass::Input)
        );
        assert!(StorageClass::from(12).is(spirv::StorageClass::StorageBuffer));
        assert_eq!(StorageClass::from(0x7fff_0000), StorageClass::Other(0x7fff_0000));
        assert_eq!(StorageClass::default().to_string(), "UniformConstant");
        assert_eq!(StorageClass::Other(99).to_string(), "StorageClass(99)");
    }
}
