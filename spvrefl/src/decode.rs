//! Single-pass instruction scan
//!
//! The scan walks the instruction stream once, front to back, recording
//! per-id facts in an [`IdTable`] and appending to the caller's [`Info`].
//! It stops successfully at the first `OpFunction`: everything after that
//! point is executable code and never affects the result.

use crate::header::{HEADER_WORDS, Header};
use crate::info::{Counts, Info};
use crate::module::{Instruction, Module};
use crate::opcode::{Decoration, Op, StorageClass, is_type_declaration};
use crate::reflect::{Resource, ResourceType, ScalarType, SpecConstant};
use crate::table::IdTable;
use crate::{Error, Result};
use num_traits::FromPrimitive;

/// Reflects `source` into `info`.
///
/// Which sinks of `info` carry a destination decides whether this is a
/// size pass or a fill pass. Counts and the input mask are reset first, so
/// parsing the same buffer again gives the same totals. On error, entries
/// written before the failing instruction stay in place.
pub fn parse<'src>(source: &'src [u8], info: &mut Info<'_, 'src>) -> Result<()> {
    info.reset();

    let module = Module::new(source);
    let header = Header::read(&module)?;
    debug_log!(
        "[SCAN] version {} generator {} bound {} ({} words)",
        header.version,
        header.generator,
        header.bound,
        module.len()
    );

    let mut scan = Scan {
        module,
        table: IdTable::new(header.bound),
    };

    let mut offset = HEADER_WORDS;
    while offset < module.len() {
        let inst = match module.instruction(offset) {
            Ok(inst) => inst,
            Err(err) => {
                debug_log!("[SCAN] malformed instruction at word {}", offset);
                return Err(err);
            }
        };

        if inst.op() == Some(Op::Function) {
            debug_log!("[SCAN] first function at word {}, done", offset);
            break;
        }

        if let Err(err) = scan.decode(&inst, info) {
            debug_log!(
                "[SCAN] {} at word {} (opcode {})",
                err,
                offset,
                inst.opcode()
            );
            return Err(err);
        }

        offset += inst.len();
    }

    Ok(())
}

/// Size pass: counts every category without storing entries.
pub fn count(source: &[u8]) -> Result<Counts> {
    let mut info = Info::counting();
    parse(source, &mut info)?;
    Ok(info.counts())
}

struct Scan<'src> {
    module: Module<'src>,
    table: IdTable,
}

impl<'src> Scan<'src> {
    fn decode(&mut self, inst: &Instruction<'src>, info: &mut Info<'_, 'src>) -> Result<()> {
        match inst.op() {
            Some(Op::Capability) => self.capability(inst, info),
            Some(Op::Name) => self.name(inst),
            Some(Op::Decorate) => self.decorate(inst),
            Some(Op::Constant) => self.constant(inst),
            Some(Op::SpecConstant | Op::SpecConstantTrue | Op::SpecConstantFalse) => {
                self.spec_constant(inst, info)
            }
            Some(Op::Variable) => self.variable(inst, info),
            Some(op) if is_type_declaration(op) => self.type_declaration(inst),
            _ => {
                debug_log!("[SCAN] skipping opcode {}", inst.opcode());
                Ok(())
            }
        }
    }

    fn capability(&self, inst: &Instruction<'src>, info: &mut Info<'_, 'src>) -> Result<()> {
        if inst.len() != 2 {
            return Err(Error::Invalid);
        }
        let [_, capability] = inst.words::<2>()?;
        info.features.push_with(|| capability);
        Ok(())
    }

    fn name(&mut self, inst: &Instruction<'src>) -> Result<()> {
        let [_, target, _] = inst.words::<3>()?;
        self.table.get_mut(target)?.name = Some(word_offset(inst)?);
        Ok(())
    }

    fn decorate(&mut self, inst: &Instruction<'src>) -> Result<()> {
        let [_, target, kind] = inst.words::<3>()?;
        let slot = self.table.get_mut(target)?;

        let field = match Decoration::from_u32(kind) {
            Some(Decoration::Location) => &mut slot.location,
            Some(Decoration::Binding) => &mut slot.binding,
            Some(Decoration::DescriptorSet) => &mut slot.set,
            Some(Decoration::SpecId) => &mut slot.spec_id,
            Some(Decoration::BufferBlock) => {
                slot.buffer_block = true;
                return Ok(());
            }
            _ => return Ok(()),
        };

        let [_, _, _, literal] = inst.words::<4>()?;
        *field = Some(literal);
        Ok(())
    }

    fn type_declaration(&mut self, inst: &Instruction<'src>) -> Result<()> {
        let [_, result] = inst.words::<2>()?;
        self.table.get_mut(result)?.word = Some(word_offset(inst)?);
        Ok(())
    }

    fn constant(&mut self, inst: &Instruction<'src>) -> Result<()> {
        let [_, _, result] = inst.words::<3>()?;
        self.table.get_mut(result)?.word = Some(word_offset(inst)?);
        Ok(())
    }

    fn spec_constant(&mut self, inst: &Instruction<'src>, info: &mut Info<'_, 'src>) -> Result<()> {
        let [_, result_type, result] = inst.words::<3>()?;
        let id = self.table.get(result)?.spec_id.ok_or(Error::Invalid)?;

        info.spec_constants.push_with(|| SpecConstant {
            id,
            name: self.table.name(&self.module, result),
            ty: ScalarType::resolve(&self.module, &self.table, result_type),
        });

        // Array types sized by this constant resolve its default through here
        self.table.get_mut(result)?.word = Some(word_offset(inst)?);
        Ok(())
    }

    fn variable(&self, inst: &Instruction<'src>, info: &mut Info<'_, 'src>) -> Result<()> {
        let [_, pointer_type, result, storage] = inst.words::<4>()?;
        let storage = StorageClass::from(storage);
        let slot = self.table.get(result)?;

        if storage.is(spirv::StorageClass::Input) {
            if let Some(location) = slot.location.filter(|&location| location < 32) {
                info.input_locations |= 1 << location;
                return Ok(());
            }
        }

        if storage.is(spirv::StorageClass::Output) {
            return Ok(());
        }

        let (Some(set), Some(binding)) = (slot.set, slot.binding) else {
            return Ok(());
        };

        info.resources.push_with(|| {
            let ty = ResourceType::resolve(&self.module, &self.table, pointer_type, storage);
            Resource {
                set,
                binding,
                name: self.table.name(&self.module, result).or(ty.block_name),
                storage_class: storage,
                kind: ty.kind,
                bind_count: ty.bind_count,
            }
        });
        Ok(())
    }
}

fn word_offset(inst: &Instruction<'_>) -> Result<u32> {
    u32::try_from(inst.offset()).map_err(|_| Error::Invalid)
}
