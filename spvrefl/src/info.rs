//! Caller-owned result aggregator for the count-then-fill protocol

use crate::reflect::{Resource, SpecConstant};

/// A running count with an optional destination.
///
/// Without a destination the sink only counts. With one, entry `n` is
/// written to `dest[n]` while `n < dest.len()`; later entries are still
/// counted but not stored, so a `count()` larger than the destination tells
/// the caller to re-run with more room.
#[derive(Debug, Default)]
pub struct Sink<'out, T> {
    count: u32,
    dest: Option<&'out mut [T]>,
}

impl<'out, T> Sink<'out, T> {
    /// A sink that only counts.
    pub fn counting() -> Self {
        Sink {
            count: 0,
            dest: None,
        }
    }

    /// A sink that counts and fills `dest`.
    pub fn filling(dest: &'out mut [T]) -> Self {
        Sink {
            count: 0,
            dest: Some(dest),
        }
    }

    /// Number of entries seen.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns true if a destination is attached.
    pub fn is_filling(&self) -> bool {
        self.dest.is_some()
    }

    /// Entries written so far.
    pub fn written(&self) -> &[T] {
        match &self.dest {
            Some(dest) => &dest[..(self.count as usize).min(dest.len())],
            None => &[],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.count = 0;
    }

    /// Records one entry, building it only when there is room to store it.
    pub(crate) fn push_with(&mut self, make: impl FnOnce() -> T) {
        if let Some(slot) = self
            .dest
            .as_deref_mut()
            .and_then(|dest| dest.get_mut(self.count as usize))
        {
            *slot = make();
        }
        self.count += 1;
    }
}

/// Accumulated reflection output of one parse.
#[derive(Debug, Default)]
pub struct Info<'out, 'src> {
    /// Raw capability values, in declaration order
    pub features: Sink<'out, u32>,
    /// Bit `n` set when an input variable is decorated `Location = n`
    pub input_locations: u32,
    /// Specialization constants
    pub spec_constants: Sink<'out, SpecConstant<'src>>,
    /// Aggregate push constant size in bytes
    ///
    /// Reserved: the current decoders never set it.
    pub push_constant_size: u32,
    /// Descriptor-bound resources
    pub resources: Sink<'out, Resource<'src>>,
}

impl<'out, 'src> Info<'out, 'src> {
    /// An aggregator for a size pass: every sink only counts.
    pub fn counting() -> Self {
        Info {
            features: Sink::counting(),
            input_locations: 0,
            spec_constants: Sink::counting(),
            push_constant_size: 0,
            resources: Sink::counting(),
        }
    }

    /// Snapshot of the counts.
    pub fn counts(&self) -> Counts {
        Counts {
            features: self.features.count(),
            input_locations: self.input_locations,
            spec_constants: self.spec_constants.count(),
            push_constant_size: self.push_constant_size,
            resources: self.resources.count(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.features.reset();
        self.input_locations = 0;
        self.spec_constants.reset();
        self.push_constant_size = 0;
        self.resources.reset();
    }
}

/// Per-category totals from a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counts {
    /// Number of declared capabilities
    pub features: u32,
    /// Input location bitmask
    pub input_locations: u32,
    /// Number of specialization constants
    pub spec_constants: u32,
    /// Aggregate push constant size in bytes
    pub push_constant_size: u32,
    /// Number of bindable resources
    pub resources: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sink_never_builds() {
        let mut sink: Sink<'_, u32> = Sink::counting();
        sink.push_with(|| unreachable!());
        sink.push_with(|| unreachable!());
        assert_eq!(sink.count(), 2);
        assert!(sink.written().is_empty());
        assert!(!sink.is_filling());
    }

    #[test]
    fn test_filling_sink_stops_at_capacity() {
        let mut dest = [0u32; 2];
        let mut sink = Sink::filling(&mut dest);
        for value in [10, 20, 30] {
            sink.push_with(|| value);
        }
        assert_eq!(sink.count(), 3);
        assert_eq!(sink.written(), &[10, 20]);
        drop(sink);
        assert_eq!(dest, [10, 20]);
    }

    #[test]
    fn test_reset() {
        let mut info = Info::counting();
        info.features.push_with(|| 1);
        info.input_locations = 0b101;
        info.reset();
        assert_eq!(info.counts(), Counts::default());
    }
}
