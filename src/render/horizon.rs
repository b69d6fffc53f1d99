//! Sky and ground backdrop.
//!
//! The horizon is a line 200 units wide at the focal distance, tilted by the
//! viewer's pitch and bank. It is projected, stretched to the window's side
//! edges and closed off with two far-away corners below (ground) and above
//! (sky). Both halves then go through the usual clip and fill stages.

use log::debug;

use super::framebuffer::FrameBuffer;
use super::rasterizer::Rasterizer;
use super::view::Viewport;
use crate::clipper::{xyclip, zclip, ClipError, ClippedPolygon};
use crate::math::{ivec3::IVec3, units_to_radians, vec3::Vec3};

/// Screen coordinate used for the far corners of the sky and ground.
const FAR: i32 = 32767;

/// Half width of the unprojected horizon line.
const HALF_WIDTH: f32 = 100.0;

/// Nearest z the horizon line is projected from.
const MIN_DEPTH: i32 = 10;

/// Draw the sky and ground polygons for a view with the given binary-degree
/// angles. Only pitch (`x`) and bank (`z`) matter.
pub fn draw_horizon<R: Rasterizer>(
    angles: IVec3,
    viewport: &Viewport,
    rasterizer: &R,
    buffer: &mut FrameBuffer,
) {
    // Fold pitch back into the forward half so the line never faces away.
    let mut flips = 0;
    let mut xangle = angles.x & 255;
    if xangle > 64 && xangle < 193 {
        xangle = (xangle + 128) & 255;
        flips += 1;
    }
    let zangle = angles.z & 255;
    if zangle > 64 && zangle < 193 {
        flips += 1;
    }

    let distance = viewport.distance as f32;
    let (xr, zr) = (units_to_radians(xangle), units_to_radians(zangle));
    let p1 = Vec3::new(-HALF_WIDTH, 0.0, distance)
        .rotate_x(xr)
        .rotate_z(zr);
    let p2 = Vec3::new(HALF_WIDTH, 0.0, distance)
        .rotate_x(xr)
        .rotate_z(zr);

    let z = (p1.z as i32).max(MIN_DEPTH) as f32;
    let project = |p: Vec3| {
        (
            (distance * ((p.x as i32) as f32 / z)) as i32 + viewport.xorigin,
            (distance * ((p.y as i32) as f32 / z)) as i32 + viewport.yorigin,
        )
    };
    let (rx1, ry1) = project(p1);
    let (rx2, ry2) = project(p2);

    let dx = match rx2 - rx1 {
        0 => 1,
        dx => dx,
    };
    let slope = (ry2 - ry1) as f32 / dx as f32;

    let window = &viewport.window;
    let left = IVec3::new(
        window.xmin,
        (slope * (window.xmin - rx1) as f32) as i32 + ry1,
        viewport.distance,
    );
    let right = IVec3::new(
        window.xmax,
        (slope * (window.xmax - rx1) as f32) as i32 + ry1,
        viewport.distance,
    );

    let (lower, upper) = if flips & 1 == 1 {
        (viewport.sky, viewport.ground)
    } else {
        (viewport.ground, viewport.sky)
    };

    for (far_y, color) in [(FAR, lower), (-FAR, upper)] {
        let corners = [
            left,
            right,
            IVec3::new(FAR, far_y, viewport.distance),
            IVec3::new(-FAR, far_y, viewport.distance),
        ];
        if let Err(err) = fill_backdrop(&corners, color, viewport, rasterizer, buffer) {
            debug!("horizon polygon dropped: {}", err);
        }
    }
}

fn fill_backdrop<R: Rasterizer>(
    corners: &[IVec3],
    color: u8,
    viewport: &Viewport,
    rasterizer: &R,
    buffer: &mut FrameBuffer,
) -> Result<(), ClipError> {
    let mut clip = ClippedPolygon::new(color);
    zclip(corners, color, &mut clip)?;
    xyclip(&mut clip, &viewport.window)?;
    if !clip.is_empty() {
        rasterizer.fill_polygon(&clip, buffer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::render::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::render::rasterizer::EdgeWalkRasterizer;
    use crate::view_control::ViewDirection;

    fn render(angles: IVec3) -> (Vec<u8>, Viewport) {
        let viewport = ViewConfig::default().viewport(ViewDirection::Rear);
        let mut pixels = vec![0u8; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize];
        let mut fb = FrameBuffer::screen(&mut pixels);
        draw_horizon(angles, &viewport, &EdgeWalkRasterizer, &mut fb);
        (pixels, viewport)
    }

    fn at(pixels: &[u8], x: i32, y: i32) -> u8 {
        pixels[(y * SCREEN_WIDTH as i32 + x) as usize]
    }

    #[test]
    fn test_level_view_splits_at_origin_row() {
        let (pixels, vp) = render(IVec3::ZERO);
        assert_eq!(at(&pixels, 160, 20), vp.sky);
        assert_eq!(at(&pixels, 160, 180), vp.ground);
        assert_eq!(at(&pixels, 5, 99), vp.sky);
        assert_eq!(at(&pixels, 5, 101), vp.ground);
    }

    #[test]
    fn test_whole_window_is_covered() {
        let (pixels, vp) = render(IVec3::new(10, 0, 20));
        let painted = pixels
            .iter()
            .filter(|&&p| p == vp.sky || p == vp.ground)
            .count();
        // The scan converter leaves each polygon's bottom row unpainted.
        let total = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;
        assert!(painted * 100 >= total * 97, "{painted} of {total}");
    }

    #[test]
    fn test_inverted_view_swaps_colours() {
        let (pixels, vp) = render(IVec3::new(0, 0, 128));
        assert_eq!(at(&pixels, 160, 20), vp.ground);
        assert_eq!(at(&pixels, 160, 180), vp.sky);
    }

    #[test]
    fn test_pitch_moves_horizon() {
        let (level, vp) = render(IVec3::ZERO);
        let (pitched, _) = render(IVec3::new(8, 0, 0));
        let boundary = |pixels: &[u8]| {
            (0..SCREEN_HEIGHT as i32)
                .find(|&y| at(pixels, 160, y) == vp.ground)
                .unwrap_or(SCREEN_HEIGHT as i32)
        };
        assert_ne!(boundary(&level), boundary(&pitched));
    }
}
