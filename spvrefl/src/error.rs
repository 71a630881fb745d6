//! Error types for spvrefl operations

use thiserror::Error;

/// Largest id bound a module may declare.
///
/// Ids are kept in 16 bits in places, and the top of that range is reserved.
pub const MAX_BOUND: u32 = 0xfffe;

/// Error type for reflection operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The module is malformed: bad magic, truncated buffer or instruction,
    /// an out-of-bound id, or a missing decoration an instruction depends on
    #[error("Invalid SPIR-V")]
    Invalid,

    /// The declared id bound is at or above [`MAX_BOUND`]
    #[error("SPIR-V contains too many types/variables (max ID is 65534)")]
    TooBig,
}

impl Error {
    /// Returns the human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Error::Invalid => "Invalid SPIR-V",
            Error::TooBig => "SPIR-V contains too many types/variables (max ID is 65534)",
        }
    }
}

/// Result type for spvrefl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Describes the outcome of a parse, `"OK"` for success.
pub fn result_str<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "OK",
        Err(e) => e.description(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_description() {
        for err in [Error::Invalid, Error::TooBig] {
            assert_eq!(err.to_string(), err.description());
        }
    }

    #[test]
    fn test_result_str() {
        assert_eq!(result_str(&Ok::<(), Error>(())), "OK");
        assert_eq!(result_str::<()>(&Err(Error::Invalid)), "Invalid SPIR-V");
        assert!(result_str::<u32>(&Err(Error::TooBig)).contains("65534"));
    }
}
