//! Physical layout of the two eye panels.
//!
//! Each panel carries three concentric rings: 24 outer, 16 middle and 4 inner
//! elements, chained in that order. The second panel follows the first on the
//! same chain, so element `i` of the left eye and its partner on the right eye
//! are 44 positions apart in "repeat" mode, or related by [`MIRROR_INDEX`] in
//! mirror mode.

use crate::strip::PixelStrip;

/// Elements on a single panel.
pub const PANEL_ELEMENTS: usize = 44;

/// Elements on the whole chain (both panels).
pub const ELEMENT_COUNT: usize = 2 * PANEL_ELEMENTS;

/// Size of the largest ring.
pub const MAX_RING_LEN: usize = 24;

/// One of the three concentric rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ring {
    Outer,
    Middle,
    Inner,
}

impl Ring {
    /// All rings, outermost first.
    pub const ALL: [Ring; 3] = [Ring::Outer, Ring::Middle, Ring::Inner];

    /// Position of the ring in the outer-to-inner order (0, 1 or 2).
    pub const fn index(self) -> usize {
        match self {
            Ring::Outer => 0,
            Ring::Middle => 1,
            Ring::Inner => 2,
        }
    }

    /// Ring at an outer-to-inner position.
    pub const fn from_index(index: usize) -> Option<Ring> {
        match index {
            0 => Some(Ring::Outer),
            1 => Some(Ring::Middle),
            2 => Some(Ring::Inner),
            _ => None,
        }
    }

    /// Layout row for this ring.
    pub const fn spec(self) -> RingSpec {
        RING_SPECS[self.index()]
    }
}

/// Which rotation phase drives a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSource {
    /// The shared outer/inner phase.
    Shared,
    /// The counter-rotating middle phase.
    Counter,
}

/// Layout and lighting pattern of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSpec {
    pub ring: Ring,
    /// First element of the ring on the first panel.
    pub start: usize,
    pub len: usize,
    /// Angular offset between neighbouring elements, in phase units.
    pub offset_step: u16,
    /// Rotation applied when mapping onto the mirrored panel.
    pub mirror_shift: usize,
    pub phase: PhaseSource,
    /// Pattern repeats every `period` phase units.
    pub period: u16,
    /// Elements whose phase is below this are lit.
    pub lit_below: u16,
}

impl RingSpec {
    /// Angular offset of the `i`-th element of this ring.
    pub const fn angular_offset(&self, i: usize) -> u16 {
        self.offset_step * i as u16
    }

    /// Absolute chain indices covered by this ring on the first panel.
    pub const fn indices(&self) -> core::ops::Range<usize> {
        self.start..self.start + self.len
    }

    /// Highest chain index of this ring on the mirrored panel.
    const fn mirror_base(&self) -> usize {
        PANEL_ELEMENTS + self.start + self.len - 1
    }
}

/// Ring layout, outermost first.
pub const RING_SPECS: [RingSpec; 3] = [
    RingSpec {
        ring: Ring::Outer,
        start: 0,
        len: 24,
        offset_step: 6,
        mirror_shift: 11,
        phase: PhaseSource::Shared,
        period: 72,
        lit_below: 24,
    },
    RingSpec {
        ring: Ring::Middle,
        start: 24,
        len: 16,
        offset_step: 9,
        mirror_shift: 7,
        phase: PhaseSource::Counter,
        period: 72,
        lit_below: 27,
    },
    RingSpec {
        ring: Ring::Inner,
        start: 40,
        len: 4,
        offset_step: 36,
        mirror_shift: 2,
        phase: PhaseSource::Shared,
        period: 144,
        lit_below: 108,
    },
];

/// Partner of every element on the opposite panel.
///
/// The first panel maps ring-by-ring onto the second with a rotation and a
/// reversal (the eyes face each other); the second panel maps back, so the
/// table is an involution without fixed points.
pub const MIRROR_INDEX: [usize; ELEMENT_COUNT] = build_mirror_index();

const fn build_mirror_index() -> [usize; ELEMENT_COUNT] {
    let mut table = [0; ELEMENT_COUNT];
    let mut r = 0;
    while r < RING_SPECS.len() {
        let spec = RING_SPECS[r];
        let mut i = 0;
        while i < spec.len {
            let from = spec.start + i;
            let to = spec.mirror_base() - ((i + spec.mirror_shift) % spec.len);
            table[from] = to;
            table[to] = from;
            i += 1;
        }
        r += 1;
    }
    table
}

/// Errors raised when writing through the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopologyError {
    /// The element, or its partner on the second panel, is past the chain end.
    IndexOutOfRange { index: usize, limit: usize },
}

impl core::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TopologyError::IndexOutOfRange { index, limit } => {
                write!(f, "element {} is outside the chain of {} elements", index, limit)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TopologyError {}

/// Write path onto both panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    mirror: bool,
    element_count: usize,
}

impl Topology {
    pub const fn new(mirror: bool, element_count: usize) -> Self {
        Self {
            mirror,
            element_count,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Partner of `index` on the opposite panel.
    pub fn mirror_index(&self, index: usize) -> Option<usize> {
        MIRROR_INDEX.get(index).copied()
    }

    /// Element that receives the copy of `index` on the second panel.
    pub fn partner(&self, index: usize) -> Option<usize> {
        if self.mirror {
            self.mirror_index(index)
        } else {
            Some(index + PANEL_ELEMENTS)
        }
    }

    /// Writes `color` to `index` and to its partner on the second panel.
    ///
    /// # Errors
    /// `IndexOutOfRange` if either element lies past the end of the chain.
    /// Nothing is written in that case.
    pub fn set_element<S: PixelStrip>(
        &self,
        strip: &mut S,
        index: usize,
        color: u32,
    ) -> Result<(), TopologyError> {
        let out_of_range = |index| TopologyError::IndexOutOfRange {
            index,
            limit: self.element_count,
        };

        if index >= self.element_count {
            return Err(out_of_range(index));
        }
        let partner = self.partner(index).ok_or(out_of_range(index))?;
        if partner >= self.element_count {
            return Err(out_of_range(partner));
        }

        strip.write_element(index, color);
        strip.write_element(partner, color);
        Ok(())
    }
}
