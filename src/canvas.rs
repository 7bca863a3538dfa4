/// A 2D raster drawing surface.
pub trait Canvas {
    fn dimensions(&self) -> (u32, u32);

    /// Resizes the backing store. The contents are cleared.
    fn resize(&mut self, width: u32, height: u32);

    fn set_fill(&mut self, rgb: [u8; 3]);

    /// Fills a rectangle with the current fill color, clipped to the surface.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32);
}

/// Row-major RGB pixel buffer, top row first.
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    fill: [u8; 3],
    pixels: Vec<[u8; 3]>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self::default();
        canvas.resize(width, height);
        canvas
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::must_cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[x as usize + y as usize * self.width as usize])
    }
}

impl Canvas for PixelCanvas {
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0; 3]);
    }

    #[inline]
    fn set_fill(&mut self, rgb: [u8; 3]) {
        self.fill = rgb;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        for row in y..y_end {
            let row_start = row as usize * self.width as usize;
            let start = row_start + x as usize;
            let end = row_start + x_end as usize;
            self.pixels[start..end].fill(self.fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resize_clears() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill([9, 9, 9]);
        canvas.fill_rect(0, 0, 4, 4);
        canvas.resize(2, 3);
        assert_eq!(canvas.dimensions(), (2, 3));
        assert_eq!(canvas.pixels(), &[[0; 3]; 6]);
    }

    #[test]
    fn fill_rect_clips() {
        let mut canvas = PixelCanvas::new(3, 2);
        canvas.set_fill([1, 2, 3]);
        canvas.fill_rect(2, 1, 10, 10);
        assert_eq!(canvas.pixel(2, 1), Some([1, 2, 3]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(2, 0), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(3, 0), None);

        canvas.fill_rect(5, 5, 1, 1);
        assert_eq!(canvas.as_bytes().len(), 3 * 2 * 3);
    }
}
