//! Strongly typed occupant identifier.
//!
//! The inner integer is `pub` to allow direct indexing into per-occupant
//! `Vec`s via `id.0 as usize`, but callers should prefer [`OccupantId::index`].

use std::fmt;

/// Index of an occupant within one simulated household.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupantId(pub u32);

impl OccupantId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OccupantId({})", self.0)
    }
}

impl From<OccupantId> for usize {
    #[inline(always)]
    fn from(id: OccupantId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for OccupantId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<OccupantId, Self::Error> {
        u32::try_from(n).map(OccupantId)
    }
}
