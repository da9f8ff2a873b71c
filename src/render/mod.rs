use crate::types::{Rgb, Vec2};

/// One backing-store cell. Empty cells carry zero alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCell {
    pub alpha: f32,
    pub color: Rgb,
}

impl RenderCell {
    pub const EMPTY: RenderCell = RenderCell {
        alpha: 0.0,
        color: Rgb::WHITE,
    };
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, RenderCell::EMPTY);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = RenderCell::EMPTY;
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: u16, y: u16, alpha: f32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        // Brightest dot wins where circles overlap
        if alpha >= cell.alpha {
            cell.alpha = alpha;
            cell.color = color;
        }
    }
}

/// The drawing surface: logical dimensions plus a backing store scaled by a
/// uniform factor, so all drawing calls are issued in logical units.
#[derive(Debug)]
pub struct Surface {
    width: f32,
    height: f32,
    scale: f32,
    frame: FrameBuffer,
}

impl Surface {
    pub fn new(scale: f32) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "scale must be positive and finite"
        );
        Self {
            width: 0.0,
            height: 0.0,
            scale,
            frame: FrameBuffer::new(0, 0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn is_sized(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Re-measures the surface. A zero dimension means the container is not
    /// attached yet; that is a no-op and the caller keeps the old field.
    /// Returns whether the surface was actually resized.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        if cols == 0 || rows == 0 {
            return false;
        }
        self.width = cols as f32;
        self.height = rows as f32;
        let backing_w = (self.width * self.scale).round() as u16;
        let backing_h = (self.height * self.scale).round() as u16;
        self.frame.resize(backing_w, backing_h);
        true
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Paints a filled circle given in logical units; the scale transform is
    /// applied here so callers never see backing-store coordinates.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        let cx = center.x * self.scale;
        let cy = center.y * self.scale;
        let r = radius * self.scale;
        let r_sq = r * r;

        let min_x = (cx - r).floor() as i32;
        let max_x = (cx + r).ceil() as i32;
        let min_y = (cy - r).floor() as i32;
        let max_y = (cy + r).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if x < 0 || y < 0 {
                    continue;
                }
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.frame.set(x as u16, y as u16, alpha, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod framebuffer {
        use super::*;

        #[test]
        fn creates_with_correct_dimensions() {
            let fb = FrameBuffer::new(80, 24);
            assert_eq!(fb.width(), 80);
            assert_eq!(fb.height(), 24);
        }

        #[test]
        fn zero_dimensions_creates_empty_buffer() {
            let fb = FrameBuffer::new(0, 0);
            assert_eq!(fb.width(), 0);
            assert_eq!(fb.height(), 0);
        }

        #[test]
        fn resize_clears_cells() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(5, 5, 0.5, Rgb::new(10, 20, 30));
            fb.resize(10, 10);
            assert_eq!(fb.get(5, 5), RenderCell::EMPTY);
        }

        #[test]
        fn set_keeps_brightest_cell() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(3, 3, 0.6, Rgb::new(1, 2, 3));
            fb.set(3, 3, 0.2, Rgb::new(9, 9, 9));
            let cell = fb.get(3, 3);
            assert_eq!(cell.alpha, 0.6);
            assert_eq!(cell.color, Rgb::new(1, 2, 3));
        }

        #[test]
        fn out_of_bounds_set_is_ignored() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(100, 100, 1.0, Rgb::WHITE);
            // Should not panic
        }
    }

    mod surface_resize {
        use super::*;

        #[test]
        fn backing_store_is_logical_times_scale() {
            let mut surface = Surface::new(2.0);
            assert_eq!(surface.scale(), 2.0);
            assert!(surface.resize(10, 5));
            assert_eq!(surface.width(), 10.0);
            assert_eq!(surface.height(), 5.0);
            assert_eq!(surface.frame().width(), 20);
            assert_eq!(surface.frame().height(), 10);
        }

        #[test]
        fn zero_dimension_is_a_no_op() {
            let mut surface = Surface::new(1.0);
            assert!(surface.resize(10, 5));
            assert!(!surface.resize(0, 5));
            assert!(!surface.resize(10, 0));
            assert_eq!(surface.width(), 10.0);
            assert_eq!(surface.height(), 5.0);
        }

        #[test]
        fn unsized_until_first_valid_resize() {
            let mut surface = Surface::new(1.0);
            assert!(!surface.is_sized());
            surface.resize(4, 4);
            assert!(surface.is_sized());
        }

        #[test]
        #[should_panic(expected = "scale must be positive and finite")]
        fn zero_scale_panics() {
            Surface::new(0.0);
        }
    }

    mod surface_fill_circle {
        use super::*;

        #[test]
        fn paints_center_cell() {
            let mut surface = Surface::new(1.0);
            surface.resize(20, 20);
            surface.fill_circle(Vec2::new(10.0, 10.0), 1.0, Rgb::new(200, 0, 0), 0.4);
            let cell = surface.frame().get(10, 10);
            assert_eq!(cell.alpha, 0.4);
            assert_eq!(cell.color, Rgb::new(200, 0, 0));
        }

        #[test]
        fn radius_one_covers_axis_neighbors() {
            let mut surface = Surface::new(1.0);
            surface.resize(20, 20);
            surface.fill_circle(Vec2::new(10.0, 10.0), 1.0, Rgb::WHITE, 0.5);
            assert_eq!(surface.frame().get(11, 10).alpha, 0.5);
            assert_eq!(surface.frame().get(10, 9).alpha, 0.5);
            // Diagonal is outside a radius-1 circle
            assert_eq!(surface.frame().get(11, 11).alpha, 0.0);
        }

        #[test]
        fn scale_maps_logical_center_to_backing_cells() {
            let mut surface = Surface::new(2.0);
            surface.resize(10, 10);
            surface.fill_circle(Vec2::new(3.0, 4.0), 1.0, Rgb::WHITE, 0.3);
            assert_eq!(surface.frame().get(6, 8).alpha, 0.3);
            assert_eq!(surface.frame().get(3, 4).alpha, 0.0);
        }

        #[test]
        fn circle_partially_off_surface_is_clipped() {
            let mut surface = Surface::new(1.0);
            surface.resize(10, 10);
            surface.fill_circle(Vec2::new(0.0, 0.0), 2.0, Rgb::WHITE, 0.9);
            assert_eq!(surface.frame().get(0, 0).alpha, 0.9);
            // Negative cells were skipped without panicking
        }

        #[test]
        fn clear_resets_every_cell() {
            let mut surface = Surface::new(1.0);
            surface.resize(10, 10);
            surface.fill_circle(Vec2::new(5.0, 5.0), 2.0, Rgb::WHITE, 0.9);
            surface.clear();
            for y in 0..10 {
                for x in 0..10 {
                    assert_eq!(surface.frame().get(x, y), RenderCell::EMPTY);
                }
            }
        }
    }
}
