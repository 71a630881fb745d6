//! Declaration-level reflection for SPIR-V modules
//!
//! This crate reads the module-level declarations of a compiled SPIR-V
//! shader (capabilities, input locations, specialization constants and
//! descriptor-bound resources) in a single forward scan, without a full
//! toolchain. The scan stops at the first function; executable code is
//! never inspected or validated.
//!
//! Output follows a count-then-fill protocol: a size pass with counting
//! [`Sink`]s reports how many entries each category has, and a fill pass
//! with caller-supplied slices stores them. [`Reflection`] does both.
//!
//! # Example
//!
//! ```no_run
//! use spvrefl::{Info, Sink, count, parse};
//!
//! let bytes = std::fs::read("shader.spv").unwrap();
//!
//! // Size pass
//! let counts = count(&bytes).unwrap();
//!
//! // Fill pass
//! let mut resources = vec![Default::default(); counts.resources as usize];
//! let mut info = Info {
//!     resources: Sink::filling(&mut resources),
//!     ..Info::counting()
//! };
//! parse(&bytes, &mut info).unwrap();
//!
//! for resource in &resources {
//!     println!("set {} binding {}", resource.set, resource.binding);
//! }
//! ```

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug-logs")]
        eprintln!($($arg)*)
    };
}

mod capability;
mod decode;
mod error;
mod header;
mod info;
mod module;
mod opcode;
pub mod reflect;
mod table;

pub use capability::{Capability, FeatureFlags};
pub use decode::{count, parse};
pub use error::{Error, MAX_BOUND, Result, result_str};
pub use header::{Generator, Header, MAGIC, Version};
pub use info::{Counts, Info, Sink};
pub use opcode::StorageClass;
pub use reflect::{Reflection, Resource, ResourceKind, ScalarType, SpecConstant};
pub use spirv;
