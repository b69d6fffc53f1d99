//! Screen layout of the cockpit views.

use crate::clipper::ClipRect;
use crate::render::view::Viewport;
use crate::view_control::ViewDirection;

/// A screen rectangle plus the point the view axis passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewWindow {
    pub rect: ClipRect,
    pub xorigin: i32,
    pub yorigin: i32,
}

impl ViewWindow {
    pub const fn new(rect: ClipRect, xorigin: i32, yorigin: i32) -> Self {
        Self {
            rect,
            xorigin,
            yorigin,
        }
    }
}

/// Window layout and colours for every view direction.
///
/// The forward view leaves the lower part of the screen to the instrument
/// panel; side views leave a strip for the cockpit sill; the rear view and
/// world-walk mode use the whole screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    pub forward: ViewWindow,
    pub side: ViewWindow,
    pub full: ViewWindow,
    pub focal_distance: i32,
    pub sky_color: u8,
    pub ground_color: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            forward: ViewWindow::new(ClipRect::new(0, 0, 319, 147), 159, 73),
            side: ViewWindow::new(ClipRect::new(0, 0, 319, 170), 160, 100),
            full: ViewWindow::new(ClipRect::new(0, 0, 319, 199), 160, 100),
            focal_distance: 400,
            sky_color: 11,
            ground_color: 105,
        }
    }
}

impl ViewConfig {
    pub fn window(&self, direction: ViewDirection) -> &ViewWindow {
        match direction {
            ViewDirection::Forward => &self.forward,
            ViewDirection::Right | ViewDirection::Left => &self.side,
            ViewDirection::Rear => &self.full,
        }
    }

    /// Viewport for looking out in `direction`.
    pub fn viewport(&self, direction: ViewDirection) -> Viewport {
        self.viewport_for(self.window(direction))
    }

    /// Full-screen viewport used by world-walk mode.
    pub fn walk_viewport(&self) -> Viewport {
        self.viewport_for(&self.full)
    }

    fn viewport_for(&self, window: &ViewWindow) -> Viewport {
        Viewport {
            window: window.rect,
            xorigin: window.xorigin,
            yorigin: window.yorigin,
            distance: self.focal_distance,
            ground: self.ground_color,
            sky: self.sky_color,
        }
    }
}
