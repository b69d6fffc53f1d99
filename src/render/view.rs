//! Screen projection and the per-frame display pipeline.

use log::{debug, trace};

use super::framebuffer::FrameBuffer;
use super::horizon::draw_horizon;
use super::rasterizer::{EdgeWalkRasterizer, Rasterizer};
use super::sorting::z_sort;
use super::visibility::{build_polygon_list, VisiblePolygon};
use crate::clipper::{xyclip, zclip, ClipError, ClipRect, ClippedPolygon};
use crate::transform::{align_world, update_object, ViewPose};
use crate::world::World;

/// Colour the window is cleared to before anything is drawn.
pub const CLEAR_COLOR: u8 = 0;

/// Where and how a view is drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Inclusive screen rectangle polygons are clipped to.
    pub window: ClipRect,
    /// Screen position of the view axis.
    pub xorigin: i32,
    pub yorigin: i32,
    /// Focal distance in view units.
    pub distance: i32,
    pub ground: u8,
    pub sky: u8,
}

/// Perspective-project near-clipped vertices onto the screen.
///
/// `x' = distance * x / |z| + xorigin`, and likewise for y, truncated.
pub fn project(clip: &mut ClippedPolygon, viewport: &Viewport) {
    let distance = viewport.distance as f32;
    for v in clip.vertices_mut() {
        let z = v.z.abs().max(1) as f32;
        v.x = (distance * (v.x as f32 / z) + viewport.xorigin as f32) as i32;
        v.y = (distance * (v.y as f32 / z) + viewport.yorigin as f32) as i32;
    }
}

/// Counts for one displayed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects whose world coordinates were recomputed.
    pub updated: usize,
    /// Polygons that survived culling.
    pub listed: usize,
    /// Polygons that reached the scan converter.
    pub drawn: usize,
    /// Polygons dropped because clipping overflowed.
    pub dropped: usize,
}

/// Draws a [`World`] from a viewpoint, back to front.
///
/// Keeps the polygon list allocation between frames.
pub struct View<R: Rasterizer = EdgeWalkRasterizer> {
    rasterizer: R,
    polygons: Vec<VisiblePolygon>,
    pub horizon: bool,
}

impl Default for View<EdgeWalkRasterizer> {
    fn default() -> Self {
        Self::new(EdgeWalkRasterizer)
    }
}

impl<R: Rasterizer> View<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            polygons: Vec::new(),
            horizon: true,
        }
    }

    /// Polygons listed by the last call to [`display`](Self::display),
    /// farthest first.
    pub fn polygons(&self) -> &[VisiblePolygon] {
        &self.polygons
    }

    /// Render one frame into `buffer`.
    pub fn display(
        &mut self,
        world: &mut World,
        pose: &ViewPose,
        viewport: &Viewport,
        buffer: &mut FrameBuffer,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        buffer.fill_rect(&viewport.window, CLEAR_COLOR);
        if self.horizon {
            draw_horizon(pose.angles, viewport, &self.rasterizer, buffer);
        }

        for object in world.objects_mut() {
            if update_object(object) {
                stats.updated += 1;
            }
        }
        align_world(world, pose);

        build_polygon_list(world, &mut self.polygons);
        z_sort(&mut self.polygons);
        stats.listed = self.polygons.len();

        let mut clip = ClippedPolygon::default();
        for polygon in &self.polygons {
            match self.clip_and_project(polygon, viewport, &mut clip) {
                Ok(true) => {
                    self.rasterizer.fill_polygon(&clip, buffer);
                    stats.drawn += 1;
                }
                Ok(false) => {}
                Err(err) => {
                    debug!("polygon dropped: {}", err);
                    stats.dropped += 1;
                }
            }
        }

        trace!(
            "frame: {} updated, {} listed, {} drawn",
            stats.updated,
            stats.listed,
            stats.drawn
        );
        stats
    }

    /// Near clip, project and viewport clip one polygon into `clip`.
    /// Returns whether anything is left to draw.
    fn clip_and_project(
        &self,
        polygon: &VisiblePolygon,
        viewport: &Viewport,
        clip: &mut ClippedPolygon,
    ) -> Result<bool, ClipError> {
        zclip(&polygon.vertices, polygon.color, clip)?;
        if clip.is_empty() {
            return Ok(false);
        }
        project(clip, viewport);
        xyclip(clip, &viewport.window)?;
        Ok(!clip.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::math::ivec3::IVec3;
    use crate::render::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::view_control::ViewDirection;
    use crate::world::{Object, Polygon};

    fn full_view() -> Viewport {
        ViewConfig::default().viewport(ViewDirection::Rear)
    }

    fn screen() -> Vec<u8> {
        vec![0u8; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize]
    }

    fn panel(origin: IVec3, color: u8) -> Object {
        Object::new(
            vec![
                IVec3::new(-10, -10, 0),
                IVec3::new(10, -10, 0),
                IVec3::new(10, 10, 0),
                IVec3::new(-10, 10, 0),
            ],
            vec![Polygon::new(vec![0, 1, 2, 3], color)],
        )
        .with_origin(origin)
    }

    #[test]
    fn test_project_divides_by_depth() {
        let vp = full_view();
        let mut clip =
            ClippedPolygon::from_vertices(&[IVec3::new(100, -50, 400), IVec3::new(10, 10, -200)], 1)
                .unwrap();
        project(&mut clip, &vp);
        assert_eq!(clip.vertices()[0], IVec3::new(260, 50, 400));
        assert_eq!(clip.vertices()[1], IVec3::new(180, 120, -200));
    }

    #[test]
    fn test_display_draws_panel_in_front() {
        let mut world = World::new(vec![panel(IVec3::new(0, 0, 100), 7)]);
        let mut pixels = screen();
        let mut fb = FrameBuffer::screen(&mut pixels);
        let mut view = View::default();
        view.horizon = false;

        let stats = view.display(&mut world, &ViewPose::default(), &full_view(), &mut fb);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.drawn, 1);
        // 10 units at depth 100 is 40 pixels at focal distance 400.
        assert_eq!(fb.get_pixel(160, 100), Some(7));
        assert_eq!(fb.get_pixel(125, 65), Some(7));
        assert_eq!(fb.get_pixel(110, 100), Some(0));
        assert!(!world.objects()[0].dirty);

        let again = view.display(&mut world, &ViewPose::default(), &full_view(), &mut fb);
        assert_eq!(again.updated, 0);
        assert_eq!(again.drawn, 1);
    }

    #[test]
    fn test_display_skips_geometry_behind_viewer() {
        let mut world = World::new(vec![panel(IVec3::new(0, 0, -100), 7)]);
        let mut pixels = screen();
        let mut fb = FrameBuffer::screen(&mut pixels);
        let mut view = View::default();
        view.horizon = false;

        let stats = view.display(&mut world, &ViewPose::default(), &full_view(), &mut fb);
        assert_eq!(stats.listed, 0);
        assert!(pixels.iter().all(|&p| p == CLEAR_COLOR));
    }

    #[test]
    fn test_nearer_polygon_is_painted_last() {
        let mut world = World::new(vec![
            panel(IVec3::new(0, 0, 60), 3),
            panel(IVec3::new(0, 0, 200), 9),
        ]);
        let mut pixels = screen();
        let mut fb = FrameBuffer::screen(&mut pixels);
        let mut view = View::default();
        view.horizon = false;

        view.display(&mut world, &ViewPose::default(), &full_view(), &mut fb);
        assert_eq!(view.polygons()[0].color, 9);
        assert_eq!(fb.get_pixel(160, 100), Some(3));
    }

    #[test]
    fn test_horizon_fills_window_behind_objects() {
        let mut world = World::new(vec![panel(IVec3::new(0, 0, 100), 7)]);
        let mut pixels = screen();
        let mut fb = FrameBuffer::screen(&mut pixels);
        let vp = full_view();

        View::default().display(&mut world, &ViewPose::default(), &vp, &mut fb);
        assert_eq!(fb.get_pixel(10, 10), Some(vp.sky));
        assert_eq!(fb.get_pixel(10, 190), Some(vp.ground));
        assert_eq!(fb.get_pixel(160, 100), Some(7));
    }

    #[test]
    fn test_moving_the_eye_moves_the_image() {
        let mut world = World::new(vec![panel(IVec3::new(0, 0, 100), 7)]);
        let mut pixels = screen();
        let mut fb = FrameBuffer::screen(&mut pixels);
        let mut view = View::default();
        view.horizon = false;

        let pose = ViewPose {
            position: IVec3::new(30, 0, 0),
            angles: IVec3::ZERO,
        };
        view.display(&mut world, &pose, &full_view(), &mut fb);
        // Panel now spans x in [-40, -20] relative to the eye.
        assert_eq!(fb.get_pixel(160, 100), Some(0));
        assert_eq!(fb.get_pixel(40, 100), Some(7));
    }
}
