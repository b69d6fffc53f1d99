use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;

use crate::flight::{ControlInput, MAX_DEFLECTION, MAX_THROTTLE};
use crate::render::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::view_control::ViewDirection;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Stick travel added per frame while an arrow key is held.
const STICK_STEP: i32 = 15;
/// Raw stick range either side of centre.
const STICK_MIN: i32 = -128;
const STICK_MAX: i32 = 127;
/// Raw stick units per unit of surface deflection.
const STICK_DIVISOR: i32 = 7;

/// Something the presenter should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    /// Print the telemetry dump.
    Dump,
    Screenshot,
    ToggleHorizon,
}

/// Keys that act for as long as they are held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rudder_left: bool,
    pub rudder_right: bool,
}

impl HeldKeys {
    pub fn from_keyboard(keyboard: &KeyboardState) -> Self {
        Self {
            left: keyboard.is_scancode_pressed(Scancode::Left),
            right: keyboard.is_scancode_pressed(Scancode::Right),
            up: keyboard.is_scancode_pressed(Scancode::Up),
            down: keyboard.is_scancode_pressed(Scancode::Down),
            rudder_left: keyboard.is_scancode_pressed(Scancode::Z),
            rudder_right: keyboard.is_scancode_pressed(Scancode::X),
        }
    }
}

/// Turns keyboard activity into cockpit controls.
///
/// The arrow keys behave like a self-centring joystick: holding one moves
/// the stick further each frame and letting go recentres it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardControls {
    /// Raw stick position, right positive.
    stick_x: i32,
    /// Raw stick position, forward positive.
    stick_y: i32,
    rudder: i32,
    throttle: i32,
    ignition: bool,
    brake: bool,
    view: ViewDirection,
}

impl Default for KeyboardControls {
    fn default() -> Self {
        Self {
            stick_x: 0,
            stick_y: 0,
            rudder: 0,
            throttle: 0,
            ignition: false,
            brake: true,
            view: ViewDirection::Forward,
        }
    }
}

impl KeyboardControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the continuous controls from the keys held this frame.
    pub fn update(&mut self, held: &HeldKeys) {
        self.stick_x = stick_axis(self.stick_x, held.right, held.left);
        self.stick_y = stick_axis(self.stick_y, held.up, held.down);
        self.rudder = match (held.rudder_left, held.rudder_right) {
            (true, false) => -MAX_DEFLECTION,
            (false, true) => MAX_DEFLECTION,
            _ => 0,
        };
    }

    /// Handle a key press. Returns an event for keys the presenter handles.
    pub fn key_down(&mut self, key: Keycode) -> Option<WindowEvent> {
        match key {
            Keycode::Escape => return Some(WindowEvent::Quit),
            Keycode::D => return Some(WindowEvent::Dump),
            Keycode::F12 => return Some(WindowEvent::Screenshot),
            Keycode::H => return Some(WindowEvent::ToggleHorizon),
            Keycode::PageUp => self.throttle = (self.throttle + 1).min(MAX_THROTTLE),
            Keycode::PageDown => self.throttle = (self.throttle - 1).max(0),
            Keycode::I => self.ignition = !self.ignition,
            Keycode::B => self.brake = !self.brake,
            Keycode::F1 => self.view = ViewDirection::Forward,
            Keycode::F2 => self.view = ViewDirection::Right,
            Keycode::F3 => self.view = ViewDirection::Rear,
            Keycode::F4 => self.view = ViewDirection::Left,
            _ => {}
        }
        None
    }

    /// Aileron deflection, positive rolling left.
    pub fn aileron(&self) -> i32 {
        stick_deflection(-self.stick_x)
    }

    /// Elevator deflection, positive lowering the nose.
    pub fn elevator(&self) -> i32 {
        stick_deflection(self.stick_y)
    }

    pub fn view(&self) -> ViewDirection {
        self.view
    }

    /// The control snapshot for this frame.
    pub fn snapshot(&self, elapsed_ms: Option<u32>) -> ControlInput {
        ControlInput {
            aileron: self.aileron(),
            elevator: self.elevator(),
            rudder: self.rudder,
            throttle: self.throttle,
            ignition: self.ignition,
            brake: self.brake,
            view: self.view,
            elapsed_ms,
        }
    }
}

fn stick_axis(position: i32, positive: bool, negative: bool) -> i32 {
    match (positive, negative) {
        (true, false) => (position + STICK_STEP).min(STICK_MAX),
        (false, true) => (position - STICK_STEP).max(STICK_MIN),
        _ => 0,
    }
}

fn stick_deflection(raw: i32) -> i32 {
    (raw / STICK_DIVISOR).clamp(-MAX_DEFLECTION, MAX_DEFLECTION)
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the milliseconds
    /// elapsed since the last call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time.min(u32::MAX as u64) as u32
    }
}

/// An SDL window showing the 320x200 screen scaled to fit.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
}

impl Window {
    pub fn new(title: &str, scale: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let scale = scale.max(1);
        let window = video_subsystem
            .window(title, SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, SCREEN_WIDTH, SCREEN_HEIGHT)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
        })
    }

    /// Drain pending events into `controls`, then sample the held keys.
    pub fn poll_events(&mut self, controls: &mut KeyboardControls) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => events.extend(controls.key_down(key)),
                _ => {}
            }
        }
        controls.update(&HeldKeys::from_keyboard(
            &self.event_pump.keyboard_state(),
        ));
        events
    }

    /// Show a 320x200 ARGB8888 frame stretched over the whole window.
    pub fn present(&mut self, argb: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, argb, (SCREEN_WIDTH * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_accumulates_and_recentres() {
        let mut controls = KeyboardControls::new();
        let held = HeldKeys {
            left: true,
            ..HeldKeys::default()
        };
        controls.update(&held);
        assert_eq!(controls.aileron(), 2);
        for _ in 0..20 {
            controls.update(&held);
        }
        assert_eq!(controls.aileron(), 15);

        controls.update(&HeldKeys::default());
        assert_eq!(controls.aileron(), 0);
    }

    #[test]
    fn test_elevator_and_rudder() {
        let mut controls = KeyboardControls::new();
        let held = HeldKeys {
            down: true,
            rudder_right: true,
            ..HeldKeys::default()
        };
        controls.update(&held);
        controls.update(&held);
        let input = controls.snapshot(Some(33));
        assert_eq!(input.elevator, -4);
        assert_eq!(input.rudder, MAX_DEFLECTION);
        assert_eq!(input.elapsed_ms, Some(33));
    }

    #[test]
    fn test_key_presses() {
        let mut controls = KeyboardControls::new();
        assert!(controls.snapshot(None).brake);

        for _ in 0..20 {
            assert_eq!(controls.key_down(Keycode::PageUp), None);
        }
        controls.key_down(Keycode::PageDown);
        controls.key_down(Keycode::I);
        controls.key_down(Keycode::B);
        controls.key_down(Keycode::F3);

        let input = controls.snapshot(None);
        assert_eq!(input.throttle, MAX_THROTTLE - 1);
        assert!(input.ignition);
        assert!(!input.brake);
        assert_eq!(input.view, ViewDirection::Rear);

        assert_eq!(controls.key_down(Keycode::Escape), Some(WindowEvent::Quit));
        assert_eq!(controls.key_down(Keycode::D), Some(WindowEvent::Dump));
    }
}
