//! Word-addressed view over SPIR-V module bytes

use crate::opcode::Op;
use crate::{Error, Result};
use num_traits::FromPrimitive;

/// Size of a SPIR-V word in bytes
pub const WORD_SIZE: usize = 4;

/// Borrowed, word-addressed view of a module.
///
/// Words are little-endian. Trailing bytes that do not fill a whole word
/// are not part of the view.
#[derive(Clone, Copy)]
pub struct Module<'a> {
    bytes: &'a [u8],
}

impl<'a> Module<'a> {
    /// Creates a view over `bytes`, truncated to whole words.
    pub fn new(bytes: &'a [u8]) -> Self {
        let len = bytes.len() - bytes.len() % WORD_SIZE;
        Module {
            bytes: &bytes[..len],
        }
    }

    /// Returns the number of whole words in the module.
    pub fn len(&self) -> usize {
        self.bytes.len() / WORD_SIZE
    }

    /// Reads the word at `index`.
    pub fn word(&self, index: usize) -> Option<u32> {
        read_word(self.bytes, index)
    }

    /// Decodes the instruction starting at word `offset`.
    ///
    /// Fails if the instruction declares zero words or runs past the end
    /// of the module.
    pub fn instruction(&self, offset: usize) -> Result<Instruction<'a>> {
        let first = self.word(offset).ok_or(Error::Invalid)?;
        let opcode = (first & 0xffff) as u16;
        let len = (first >> 16) as usize;

        if len == 0 || offset + len > self.len() {
            return Err(Error::Invalid);
        }

        let start = offset * WORD_SIZE;
        Ok(Instruction {
            offset,
            opcode,
            bytes: &self.bytes[start..start + len * WORD_SIZE],
        })
    }
}

impl std::fmt::Debug for Module<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module").field("words", &self.len()).finish()
    }
}

/// A single decoded instruction.
#[derive(Clone, Copy, Debug)]
pub struct Instruction<'a> {
    offset: usize,
    opcode: u16,
    bytes: &'a [u8],
}

impl<'a> Instruction<'a> {
    /// Word offset of the instruction within the module.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The instruction's opcode.
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// Total word count, including the opcode word.
    pub fn len(&self) -> usize {
        self.bytes.len() / WORD_SIZE
    }

    /// Reads word `index` of the instruction (0 is the opcode word).
    pub fn word(&self, index: usize) -> Option<u32> {
        read_word(self.bytes, index)
    }

    /// Returns the first `N` words, or `Invalid` if the instruction is shorter.
    pub fn words<const N: usize>(&self) -> Result<[u32; N]> {
        if self.len() < N {
            return Err(Error::Invalid);
        }
        let mut out = [0u32; N];
        for (i, word) in out.iter_mut().enumerate() {
            *word = self.word(i).ok_or(Error::Invalid)?;
        }
        Ok(out)
    }

    /// The opcode as a known SPIR-V instruction, if it is one.
    pub fn op(&self) -> Option<Op> {
        Op::from_u16(self.opcode)
    }

    /// Reads the nul-terminated literal string starting at word `index`.
    ///
    /// The string must end inside this instruction. Returns `None` if it is
    /// unterminated or not UTF-8.
    pub fn literal_str(&self, index: usize) -> Option<&'a str> {
        let start = index.checked_mul(WORD_SIZE)?;
        let tail = self.bytes.get(start..)?;
        let end = tail.iter().position(|&b| b == 0)?;
        std::str::from_utf8(&tail[..end]).ok()
    }
}

fn read_word(bytes: &[u8], index: usize) -> Option<u32> {
    let start = index.checked_mul(WORD_SIZE)?;
    let chunk: [u8; WORD_SIZE] = bytes.get(start..start.checked_add(WORD_SIZE)?)?.try_into().ok()?;
    Some(u32::from_le_bytes(chunk))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_partial_word_is_dropped() {
        let mut bytes = to_bytes(&[1, 2]);
        bytes.push(0xaa);
        let module = Module::new(&bytes);
        assert_eq!(module.len(), 2);
        assert_eq!(module.word(1), Some(2));
        assert_eq!(module.word(2), None);
    }

    #[test]
    fn test_instruction_bounds() {
        // length 2 then a length 3 that runs off the end
        let bytes = to_bytes(&[(2 << 16) | 17, 1, (3 << 16) | 5, 7]);
        let module = Module::new(&bytes);

        let inst = module.instruction(0).unwrap();
        assert_eq!(inst.opcode(), 17);
        assert_eq!(inst.len(), 2);
        assert_eq!(inst.words::<2>().unwrap(), [(2 << 16) | 17, 1]);
        assert_eq!(inst.words::<3>(), Err(Error::Invalid));

        assert_eq!(module.instruction(2).unwrap_err(), Error::Invalid);
    }

    #[test]
    fn test_zero_length_instruction() {
        let bytes = to_bytes(&[17]);
        assert_eq!(Module::new(&bytes).instruction(0).unwrap_err(), Error::Invalid);
    }

    #[test]
    fn test_known_opcode() {
        let bytes = to_bytes(&[(2 << 16) | 17, 1, (1 << 16) | 0xfff0]);
        let module = Module::new(&bytes);
        assert_eq!(module.instruction(0).unwrap().op(), Some(Op::Capability));
        assert_eq!(module.instruction(2).unwrap().op(), None);
    }

    #[test]
    fn test_literal_str() {
        // OpName %1 "main", then a second instruction
        let mut bytes = to_bytes(&[(4 << 16) | 5, 1]);
        bytes.extend_from_slice(b"main\0\0\0\0");
        bytes.extend_from_slice(&to_bytes(&[(1 << 16) | 1]));
        let module = Module::new(&bytes);
        let inst = module.instruction(0).unwrap();
        assert_eq!(inst.literal_str(2), Some("main"));
        assert_eq!(inst.literal_str(3), Some(""));
        assert_eq!(inst.literal_str(4), None);
    }

    #[test]
    fn test_literal_stops_at_instruction_end() {
        // "abcd" fills its word with no terminator; the next word holds a nul
        let mut bytes = to_bytes(&[(3 << 16) | 5, 1]);
        bytes.extend_from_slice(b"abcd");
        bytes.extend_from_slice(&to_bytes(&[(4 << 16) | 71, 1, 33, 0]));
        let module = Module::new(&bytes);
        assert_eq!(module.instruction(0).unwrap().literal_str(2), None);
    }
}
