//! Output seam between the animation and the physical LED chain.

/// Trait for abstracting an addressable LED chain.
///
/// Implement this for your driver (WS2812 over SPI, PIO, RMT, ...). Writes are
/// staged locally and only reach the device on [`flush`](PixelStrip::flush).
/// Handle transmission faults inside the implementation - these methods
/// cannot fail.
pub trait PixelStrip {
    /// Stages a packed `0x00RRGGBB` color for the element at `index`.
    fn write_element(&mut self, index: usize, color: u32);

    /// Transmits all staged colors to the device.
    fn flush(&mut self);
}

/// In-memory double-buffered strip.
///
/// Writes land in the staged buffer; `flush` copies it to the shown buffer.
/// Useful as a staging area in front of a `smart-leds` style driver, and for
/// tests. Writes past `N` are ignored.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
    staged: [u32; N],
    shown: [u32; N],
    flushes: u32,
}

impl<const N: usize> FrameBuffer<N> {
    /// Creates a buffer with every element off.
    pub const fn new() -> Self {
        Self {
            staged: [0; N],
            shown: [0; N],
            flushes: 0,
        }
    }

    /// Colors written since the last flush (including untouched older values).
    pub fn staged(&self) -> &[u32; N] {
        &self.staged
    }

    /// Colors as of the last flush.
    pub fn shown(&self) -> &[u32; N] {
        &self.shown
    }

    /// Shown color of a single element.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.shown.get(index).copied()
    }

    /// Number of flushes performed.
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelStrip for FrameBuffer<N> {
    fn write_element(&mut self, index: usize, color: u32) {
        if let Some(slot) = self.staged.get_mut(index) {
            *slot = color;
        }
    }

    fn flush(&mut self) {
        self.shown = self.staged;
        self.flushes = self.flushes.wrapping_add(1);
    }
}
