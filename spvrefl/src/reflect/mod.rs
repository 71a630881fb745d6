//! Owned reflection results
//!
//! [`Reflection`] runs the size pass, allocates exactly what it reports and
//! runs the fill pass, giving an owned view of everything the module
//! declares ahead of its first function.
//!
//! # Example
//! ```no_run
//! use spvrefl::reflect::Reflection;
//!
//! let bytes = std::fs::read("shader.spv").unwrap();
//! let reflection = Reflection::new(&bytes).unwrap();
//!
//! println!("SPIR-V {}", reflection.header().version);
//! for location in reflection.input_location_iter() {
//!     println!("input at location {}", location);
//! }
//! for resource in reflection.resources() {
//!     println!("set {} binding {}: {:?}", resource.set, resource.binding, resource.kind);
//! }
//! ```

mod resource;
mod spec_constant;

pub use resource::{Resource, ResourceKind};
pub use spec_constant::{ScalarType, SpecConstant};

pub(crate) use resource::ResourceType;

use crate::capability::{Capability, FeatureFlags};
use crate::decode::{count, parse};
use crate::header::Header;
use crate::info::{Info, Sink};
use crate::Result;

/// Reflection data for one module, borrowing names from its bytes
#[derive(Debug, Clone)]
pub struct Reflection<'src> {
    header: Header,
    features: Vec<u32>,
    input_locations: u32,
    spec_constants: Vec<SpecConstant<'src>>,
    push_constant_size: u32,
    resources: Vec<Resource<'src>>,
}

impl<'src> Reflection<'src> {
    /// Reflects a module.
    pub fn new(source: &'src [u8]) -> Result<Self> {
        let header = Header::parse(source)?;
        let counts = count(source)?;

        let mut features = vec![0; counts.features as usize];
        let mut spec_constants = vec![SpecConstant::default(); counts.spec_constants as usize];
        let mut resources = vec![Resource::default(); counts.resources as usize];

        let mut info = Info {
            features: Sink::filling(&mut features),
            input_locations: 0,
            spec_constants: Sink::filling(&mut spec_constants),
            push_constant_size: 0,
            resources: Sink::filling(&mut resources),
        };
        parse(source, &mut info)?;
        let input_locations = info.input_locations;
        let push_constant_size = info.push_constant_size;

        Ok(Reflection {
            header,
            features,
            input_locations,
            spec_constants,
            push_constant_size,
            resources,
        })
    }

    /// The validated module header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Raw capability values, in declaration order.
    pub fn features(&self) -> &[u32] {
        &self.features
    }

    /// Declared capabilities, in declaration order.
    pub fn capabilities(&self) -> impl ExactSizeIterator<Item = Capability> + '_ {
        self.features.iter().map(|&raw| Capability::from(raw))
    }

    /// Device features implied by the declared capabilities.
    pub fn required_features(&self) -> FeatureFlags {
        FeatureFlags::from_capabilities(&self.features)
    }

    /// Input location bitmask; bit `n` is set for `Location = n`.
    pub fn input_locations(&self) -> u32 {
        self.input_locations
    }

    /// Iterates the input locations in ascending order.
    pub fn input_location_iter(&self) -> impl Iterator<Item = u32> + '_ {
        let mask = self.input_locations;
        (0..32).filter(move |bit| mask & (1 << bit) != 0)
    }

    /// Specialization constants, in declaration order.
    pub fn spec_constants(&self) -> &[SpecConstant<'src>] {
        &self.spec_constants
    }

    /// Gets a specialization constant by its `SpecId`.
    pub fn spec_constant(&self, id: u32) -> Option<&SpecConstant<'src>> {
        self.spec_constants.iter().find(|c| c.id == id)
    }

    /// Gets a specialization constant by name.
    pub fn spec_constant_by_name(&self, name: &str) -> Option<&SpecConstant<'src>> {
        self.spec_constants.iter().find(|c| c.name == Some(name))
    }

    /// Aggregate push constant size in bytes.
    pub fn push_constant_size(&self) -> u32 {
        self.push_constant_size
    }

    /// Bindable resources, in declaration order.
    pub fn resources(&self) -> &[Resource<'src>] {
        &self.resources
    }

    /// Gets the resource at a set and binding.
    pub fn resource(&self, set: u32, binding: u32) -> Option<&Resource<'src>> {
        self.resources
            .iter()
            .find(|r| r.set == set && r.binding == binding)
    }

    /// Gets a resource by name.
    pub fn resource_by_name(&self, name: &str) -> Option<&Resource<'src>> {
        self.resources.iter().find(|r| r.name == Some(name))
    }
}
