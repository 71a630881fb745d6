//! Specialization constant reflection

use crate::module::Module;
use crate::opcode::Op;
use crate::table::IdTable;
use std::fmt;

/// Scalar type of a specialization constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Boolean
    Bool,
    /// Integer of `width` bits
    Int {
        /// Bit width
        width: u32,
        /// Signedness
        signed: bool,
    },
    /// Float of `width` bits
    Float {
        /// Bit width
        width: u32,
    },
}

impl ScalarType {
    /// Resolves the scalar type declared for `type_id`.
    pub(crate) fn resolve(module: &Module<'_>, table: &IdTable, type_id: u32) -> Option<Self> {
        let inst = table.declaration(module, type_id)?;
        match inst.op()? {
            Op::TypeBool => Some(ScalarType::Bool),
            Op::TypeInt => {
                let [_, _, width, signedness] = inst.words::<4>().ok()?;
                Some(ScalarType::Int {
                    width,
                    signed: signedness != 0,
                })
            }
            Op::TypeFloat => {
                let [_, _, width] = inst.words::<3>().ok()?;
                Some(ScalarType::Float { width })
            }
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Bool => f.write_str("bool"),
            ScalarType::Int { width, signed: true } => write!(f, "i{}", width),
            ScalarType::Int { width, signed: false } => write!(f, "u{}", width),
            ScalarType::Float { width } => write!(f, "f{}", width),
        }
    }
}

/// A specialization constant declared by the module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecConstant<'src> {
    /// Numeric id from the `SpecId` decoration
    pub id: u32,
    /// Debug name, if the module carries one
    pub name: Option<&'src str>,
    /// Scalar type, if it could be resolved
    pub ty: Option<ScalarType>,
}
