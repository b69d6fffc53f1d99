//! Integer line drawing, and the edge stepping it shares with the polygon
//! scan converter.

use super::framebuffer::FrameBuffer;

/// Bresenham stepping from one pixel towards another further down the
/// screen, one scanline at a time.
///
/// Polygon edges and [`draw_line`] both walk with this, so a line drawn
/// between two polygon vertices lands on the pixels of that polygon edge.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct EdgeStepper {
    pub x: i32,
    pub y: i32,
    xdiff: i32,
    ydiff: i32,
    xunit: i32,
    error: i32,
    /// Steps left along the major axis.
    pub count: i32,
}

impl EdgeStepper {
    pub fn new(x: i32, y: i32, end_x: i32, end_y: i32) -> Self {
        let dx = end_x - x;
        let xdiff = dx.abs();
        let ydiff = (end_y - y).abs();
        Self {
            x,
            y,
            xdiff,
            ydiff,
            xunit: if dx < 0 { -1 } else { 1 },
            error: 0,
            count: xdiff.max(ydiff),
        }
    }

    pub fn x_major(&self) -> bool {
        self.xdiff > self.ydiff
    }

    /// Move to this scanline's x. The pixels an x-major edge passes over
    /// before its last one on the row are handed to `plot`.
    pub fn step(&mut self, mut plot: impl FnMut(i32, i32)) {
        if self.x_major() {
            while self.error < self.xdiff && self.count > 0 {
                self.count -= 1;
                self.x += self.xunit;
                self.error += self.ydiff;
                if self.error < self.xdiff {
                    plot(self.x, self.y);
                }
            }
            self.error -= self.xdiff;
        } else {
            self.error += self.xdiff;
            if self.error >= self.ydiff {
                self.error -= self.ydiff;
                self.x += self.xunit;
            }
            self.count -= 1;
        }
    }
}

/// Draws a line from `(x1, y1)` to `(x2, y2)` inclusive.
///
/// The line is walked top to bottom with [`EdgeStepper`], the same stepping
/// the scan converter uses for polygon edges. Both end points are lit.
pub fn draw_line(buffer: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: u8) {
    let ((x1, y1), (x2, y2)) = if y2 < y1 {
        ((x2, y2), (x1, y1))
    } else {
        ((x1, y1), (x2, y2))
    };

    buffer.set_pixel(x1, y1, color);
    let mut edge = EdgeStepper::new(x1, y1, x2, y2);
    while edge.count > 0 {
        edge.step(|x, y| buffer.set_pixel(x, y, color));
        buffer.set_pixel(edge.x, edge.y, color);
        edge.y += 1;
    }
    buffer.set_pixel(x2, y2, color);
}
