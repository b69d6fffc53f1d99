//! Simulator core.
//!
//! The [`Engine`] owns everything one running simulation needs: the scenery,
//! the flight model, the view pipeline and the indexed screen. Each call to
//! [`Engine::frame`] advances the aircraft by one control snapshot and
//! redraws the cockpit view.

use std::path::Path;

use image::ImageResult;
use log::{debug, info};

use crate::config::ViewConfig;
use crate::flight::{
    ControlInput, FlightModel, FrameRateReport, GroundContact, OpMode, Telemetry,
};
use crate::render::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::render::line::draw_line;
use crate::render::palette::Palette;
use crate::render::view::{FrameStats, View, Viewport};
use crate::view_control::{view_pose, viewport};
use crate::world::World;

/// Fill colour of the instrument panel below a cockpit window.
const PANEL_COLOR: u8 = 8;
/// Colour of the line along the top of the panel.
const PANEL_EDGE_COLOR: u8 = 7;

/// What happened during one [`Engine::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    pub contact: GroundContact,
    pub stats: FrameStats,
}

impl FrameOutcome {
    pub fn crashed(&self) -> bool {
        self.contact == GroundContact::Crashed
    }
}

pub struct Engine {
    world: World,
    flight: FlightModel,
    view: View,
    config: ViewConfig,
    palette: Palette,
    pixels: Vec<u8>,
    /// Draw the instrument panel outline below cockpit windows.
    pub draw_panel: bool,
}

impl Engine {
    pub fn new(world: World, op_mode: OpMode) -> Self {
        info!(
            "Starting in {} mode with {} objects",
            op_mode,
            world.object_count()
        );
        Self {
            world,
            flight: FlightModel::new(op_mode),
            view: View::default(),
            config: ViewConfig::default(),
            palette: Palette::default(),
            pixels: vec![0; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            draw_panel: true,
        }
    }

    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_horizon(&mut self, enabled: bool) {
        self.view.horizon = enabled;
    }

    pub fn horizon(&self) -> bool {
        self.view.horizon
    }

    pub fn op_mode(&self) -> OpMode {
        self.flight.state().op_mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn flight(&self) -> &FlightModel {
        &self.flight
    }

    pub fn flight_mut(&mut self) -> &mut FlightModel {
        &mut self.flight
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn telemetry(&self) -> Telemetry {
        self.flight.telemetry()
    }

    pub fn frame_report(&self) -> FrameRateReport<'_> {
        FrameRateReport(self.flight.frame_times())
    }

    /// The indexed 320x200 screen.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.pixels
    }

    /// Viewport for the current mode and view selection.
    pub fn viewport(&self) -> Viewport {
        viewport(&self.config, self.flight.state())
    }

    /// Advance the simulation by one control snapshot and redraw.
    pub fn frame(&mut self, input: &ControlInput) -> FrameOutcome {
        let contact = self.flight.step(input);
        if contact == GroundContact::Crashed {
            self.world.mark_all_dirty();
        }
        let stats = self.render();
        FrameOutcome { contact, stats }
    }

    /// Redraw the current view without advancing the simulation.
    pub fn render(&mut self) -> FrameStats {
        let pose = view_pose(self.flight.state());
        let viewport = self.viewport();
        let mut buffer = FrameBuffer::screen(&mut self.pixels);

        let stats = self
            .view
            .display(&mut self.world, &pose, &viewport, &mut buffer);
        if self.draw_panel {
            draw_panel(&mut buffer, &viewport);
        }
        stats
    }

    /// Expand the screen through the palette into ARGB8888 bytes.
    pub fn expand_frame(&self, argb: &mut Vec<u8>) {
        self.palette.expand_into(&self.pixels, argb);
    }

    pub fn save_screenshot(&mut self, path: impl AsRef<Path>) -> ImageResult<()> {
        let path = path.as_ref();
        let buffer = FrameBuffer::screen(&mut self.pixels);
        self.palette.save_png(&buffer, path)?;
        debug!("Saved screenshot to {}", path.display());
        Ok(())
    }
}

/// Shade the screen area below the view window and outline its top edge.
fn draw_panel(buffer: &mut FrameBuffer, viewport: &Viewport) {
    let top = viewport.window.ymax + 1;
    let bottom = buffer.height() as i32 - 1;
    if top > bottom {
        return;
    }
    let right = buffer.width() as i32 - 1;
    for y in top..=bottom {
        buffer.fill_span(y, 0, right, PANEL_COLOR);
    }
    draw_line(buffer, 0, top, right, top, PANEL_EDGE_COLOR);
}
