//! Module header validation

use crate::error::MAX_BOUND;
use crate::module::Module;
use crate::{Error, Result};
use std::fmt;

/// SPIR-V magic number
pub const MAGIC: u32 = spirv::MAGIC_NUMBER;

/// Number of words in the fixed header
pub const HEADER_WORDS: usize = 5;

/// Smallest module accepted, in words
pub const MIN_WORDS: usize = 16;

/// SPIR-V version declared in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
}

impl Version {
    /// Decodes the packed version word (`0x00MMmm00`).
    pub fn from_word(word: u32) -> Self {
        Version {
            major: (word >> 16) as u8,
            minor: (word >> 8) as u8,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Generator that produced the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generator(pub u32);

impl Generator {
    /// Registered tool id (upper 16 bits)
    pub fn tool(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Tool-specific version (lower 16 bits)
    pub fn version(&self) -> u16 {
        self.0 as u16
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (version {})", self.tool(), self.version())
    }
}

/// Validated module header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Declared SPIR-V version
    pub version: Version,
    /// Producing tool
    pub generator: Generator,
    /// All ids in the module are below this value
    pub bound: u32,
}

impl Header {
    /// Validates and decodes the header of `bytes`.
    ///
    /// Checks, in order: at least 16 words, the magic number, and an id
    /// bound below 65534.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::read(&Module::new(bytes))
    }

    pub(crate) fn read(module: &Module<'_>) -> Result<Self> {
        if module.len() < MIN_WORDS || module.word(0) != Some(MAGIC) {
            return Err(Error::Invalid);
        }

        let word = |i| module.word(i).ok_or(Error::Invalid);
        let bound = word(3)?;
        if bound >= MAX_BOUND {
            return Err(Error::TooBig);
        }

        Ok(Header {
            version: Version::from_word(word(1)?),
            generator: Generator(word(2)?),
            bound,
        })
    }
}
