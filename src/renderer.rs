//! Per-frame drawing of the three rings.

use crate::colors::{self, OFF};
use crate::phase::{Rotation, wrap};
use crate::strip::PixelStrip;
use crate::topology::{MAX_RING_LEN, Ring, Topology, TopologyError};
use heapless::Vec;

/// On/off state of every element of one ring, in ring order.
pub type RingPattern = Vec<bool, MAX_RING_LEN>;

/// Which elements of `ring` are lit at the given rotation.
///
/// Each element sits at its angular offset plus the ring's driving phase;
/// it is lit while that position, taken modulo the ring's pattern period,
/// falls inside the lit window. The outer ring shows 8 of 24, the middle
/// ring 6 of 16 and the inner ring 3 of 4.
pub fn ring_pattern(ring: Ring, rotation: &Rotation) -> RingPattern {
    let spec = ring.spec();
    let phase = rotation.phase(spec.phase);
    let period = f32::from(spec.period);
    let lit_below = f32::from(spec.lit_below);

    let mut pattern = RingPattern::new();
    for i in 0..spec.len {
        let position = wrap(phase + f32::from(spec.angular_offset(i)), period);
        // Capacity is the largest ring, so this never overflows.
        let _ = pattern.push(position < lit_below);
    }
    pattern
}

/// Packed color of `ring` at the given brightness.
pub fn ring_color(hue: f32, brightness: f32) -> u32 {
    if brightness <= 0.0 {
        return OFF;
    }
    colors::hsv_packed(hue, 1.0, brightness)
}

/// Draws one ring: the lit pattern in `color`, everything else off.
///
/// A ring whose color is off is blanked without evaluating the pattern.
pub fn render_ring<S: PixelStrip>(
    strip: &mut S,
    topology: &Topology,
    ring: Ring,
    rotation: &Rotation,
    color: u32,
) -> Result<(), TopologyError> {
    let spec = ring.spec();

    if color == OFF {
        for index in spec.indices() {
            topology.set_element(strip, index, OFF)?;
        }
        return Ok(());
    }

    let pattern = ring_pattern(ring, rotation);
    for (index, lit) in spec.indices().zip(pattern.iter()) {
        topology.set_element(strip, index, if *lit { color } else { OFF })?;
    }
    Ok(())
}

/// Draws all three rings. `brightness` yields the brightness of each ring.
///
/// Only stages the colors; flushing is up to the caller.
pub fn render_frame<S, F>(
    strip: &mut S,
    topology: &Topology,
    rotation: &Rotation,
    mut brightness: F,
) -> Result<(), TopologyError>
where
    S: PixelStrip,
    F: FnMut(Ring) -> f32,
{
    for ring in Ring::ALL {
        let color = ring_color(rotation.hue(), brightness(ring));
        render_ring(strip, topology, ring, rotation, color)?;
    }
    Ok(())
}
