//! Opaque generational handles.

use core::fmt;
use core::num::NonZeroU32;

/// Opaque reference to a context held by a [`ContextStore`](crate::ContextStore).
///
/// A handle names a slot and the generation the slot had when the context was
/// created. Releasing the context bumps the generation, so the old handle is
/// rejected even after the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: NonZeroU32,
}

impl Handle {
    pub(crate) fn new(index: u32, generation: NonZeroU32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> NonZeroU32 {
        self.generation
    }

    /// Packs the handle into a `u64` for callers that can only hold integers.
    ///
    /// The generation occupies the high half and is never zero, so no valid
    /// handle packs to `0`.
    pub fn to_raw(self) -> u64 {
        (u64::from(self.generation.get()) << 32) | u64::from(self.index)
    }

    /// Unpacks a value produced by [`Handle::to_raw`]. Returns `None` for `0`
    /// and any other value with a zero generation.
    pub fn from_raw(raw: u64) -> Option<Self> {
        let generation = NonZeroU32::new((raw >> 32) as u32)?;
        Some(Self::new(raw as u32, generation))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
