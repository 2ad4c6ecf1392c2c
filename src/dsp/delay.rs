/// Fixed-length circular buffer holding a waveguide's state.
///
/// The length is decided once at construction and never changes, so every
/// access after that is a plain modular index with no allocation.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Zero-filled line of `len` cells. `len` must be at least 1.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "delay line needs at least one cell");
        Self {
            buffer: vec![0.0; len.max(1)],
            write_pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// The cell about to be overwritten and the one after it (wrapping).
    #[inline]
    pub fn current_pair(&self) -> (f32, f32) {
        let len = self.buffer.len();
        let next = (self.write_pos + 1) % len;
        (self.buffer[self.write_pos], self.buffer[next])
    }

    /// Overwrite the current cell and advance, wrapping at the end.
    #[inline]
    pub fn write_and_advance(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }
    }

    pub fn cells(&self) -> &[f32] {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
