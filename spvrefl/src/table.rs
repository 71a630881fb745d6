//! Per-id scratch state for a single scan

use crate::module::{Instruction, Module};
use crate::{Error, Result};

/// Everything the scan has learned about one id.
///
/// Fields are filled by whichever instruction reaches the id first and read
/// by later ones, so a decoration is visible to every instruction that
/// follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Slot {
    /// `Location` decoration
    pub location: Option<u32>,
    /// `DescriptorSet` decoration
    pub set: Option<u32>,
    /// `Binding` decoration
    pub binding: Option<u32>,
    /// `SpecId` decoration
    pub spec_id: Option<u32>,
    /// Word offset of the `OpName` instruction naming the id
    pub name: Option<u32>,
    /// Word offset of the instruction that declared the id
    pub word: Option<u32>,
    /// Struct decorated `BufferBlock`
    pub buffer_block: bool,
}

/// Random-access table with one slot per id below the module's bound.
pub(crate) struct IdTable {
    slots: Vec<Slot>,
}

impl IdTable {
    pub fn new(bound: u32) -> Self {
        IdTable {
            slots: vec![Slot::default(); bound as usize],
        }
    }

    /// Returns the slot for `id`, or `Invalid` if the id is out of bound.
    pub fn get(&self, id: u32) -> Result<&Slot> {
        self.slots.get(id as usize).ok_or(Error::Invalid)
    }

    /// Mutable access to the slot for `id`, or `Invalid` if out of bound.
    pub fn get_mut(&mut self, id: u32) -> Result<&mut Slot> {
        self.slots.get_mut(id as usize).ok_or(Error::Invalid)
    }

    /// Declaring instruction of `id`, if one was recorded.
    pub fn declaration<'a>(&self, module: &Module<'a>, id: u32) -> Option<Instruction<'a>> {
        let offset = self.slots.get(id as usize)?.word?;
        module.instruction(offset as usize).ok()
    }

    /// Debug name of `id`, if one was recorded and is non-empty.
    ///
    /// The name must be terminated inside its `OpName` instruction.
    pub fn name<'a>(&self, module: &Module<'a>, id: u32) -> Option<&'a str> {
        let offset = self.slots.get(id as usize)?.name?;
        let inst = module.instruction(offset as usize).ok()?;
        inst.literal_str(2).filter(|name| !name.is_empty())
    }
}
