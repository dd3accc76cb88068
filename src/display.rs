pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Monochrome screen, one byte per pixel, row-major. Zero is off.
pub struct FrameBuffer {
    bit_buffer: [u8; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [0; WIDTH * HEIGHT],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [0; WIDTH * HEIGHT];
    }

    pub fn buffer(&self) -> &[u8; WIDTH * HEIGHT] {
        &self.bit_buffer
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bit_buffer[Self::index(x, y)] != 0
    }

    fn index(x: usize, y: usize) -> usize {
        (y % HEIGHT) * WIDTH + (x % WIDTH)
    }

    /// XORs an 8-pixel-wide sprite onto the screen with its top-left corner
    /// at (x, y). Pixels running off an edge wrap to the opposite one.
    /// Returns true if any lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x0, y0) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..8 {
                if (bits >> (7 - col)) & 1 == 0 {
                    continue;
                }
                let cell = &mut self.bit_buffer[Self::index(x0 + col, y0 + row)];
                if *cell != 0 {
                    collision = true;
                    *cell = 0;
                } else {
                    *cell = 1;
                }
            }
        }
        collision
    }
}
