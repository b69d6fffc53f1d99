//! Frame timing history and diagnostic dumps.

use std::fmt;

use super::model::AngularRates;
use super::state::AircraftState;
use super::NUM_FRAMES;

/// The most recent [`NUM_FRAMES`] loop times, oldest overwritten first.
#[derive(Clone, Debug)]
pub struct FrameTimes {
    times: Box<[u32; NUM_FRAMES]>,
    index: usize,
    wrapped: bool,
}

impl Default for FrameTimes {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimes {
    pub fn new() -> Self {
        Self {
            times: Box::new([0; NUM_FRAMES]),
            index: 0,
            wrapped: false,
        }
    }

    pub fn push(&mut self, ms: u32) {
        self.times[self.index] = ms;
        self.index += 1;
        if self.index == NUM_FRAMES {
            self.index = 0;
            self.wrapped = true;
        }
    }

    /// Number of frames currently recorded.
    pub fn len(&self) -> usize {
        if self.wrapped {
            NUM_FRAMES
        } else {
            self.index
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean frame time in whole milliseconds, `None` before the first frame.
    pub fn average_ms(&self) -> Option<u32> {
        let frames = self.len();
        if frames == 0 {
            return None;
        }
        let total: u64 = self.times[..frames].iter().map(|&t| t as u64).sum();
        Some((total / frames as u64) as u32)
    }

    /// Frames per second implied by [`average_ms`](Self::average_ms).
    pub fn average_fps(&self) -> Option<f32> {
        match self.average_ms()? {
            0 => None,
            ms => Some(1000.0 / ms as f32),
        }
    }

    pub fn clear(&mut self) {
        self.index = 0;
        self.wrapped = false;
    }
}

/// Shutdown line reporting the mean frame time.
pub struct FrameRateReport<'a>(pub &'a FrameTimes);

impl fmt::Display for FrameRateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Average time per frame (ms):")?;
        match self.0.average_ms() {
            Some(ms) => write!(f, " {}", ms),
            None => write!(f, " timer disabled"),
        }
    }
}

/// Read-only snapshot of the simulation for diagnostic display.
#[derive(Clone, Debug)]
pub struct Telemetry {
    pub state: AircraftState,
    pub rates: AngularRates,
    /// Length of the last integration step.
    pub loop_time: u32,
    pub average_ms: Option<u32>,
}

impl Telemetry {
    /// Frames per second implied by the last step alone.
    pub fn fps(&self) -> f32 {
        if self.loop_time == 0 {
            0.0
        } else {
            1000.0 / self.loop_time as f32
        }
    }

    /// Frames per second over the recorded frame history.
    pub fn average_fps(&self) -> Option<f32> {
        match self.average_ms? {
            0 => None,
            ms => Some(1000.0 / ms as f32),
        }
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "State vector realtime dump:")?;
        writeln!(f, "Physical parameters dump:")?;
        writeln!(f, "delta pitch (deg./ms): {:.6}", self.rates.pitch)?;
        writeln!(f, "delta yaw (deg./ms):   {:.6}", self.rates.yaw)?;
        writeln!(f, "delta roll (deg./ms):  {:.6}", self.rates.roll)?;
        writeln!(f, "last frame (ms):       {}", self.loop_time)?;
        writeln!(f, "frames per sec.:       {:.6}", self.fps())?;
        match self.average_ms {
            Some(ms) => writeln!(f, "average frame (ms):    {}", ms)?,
            None => writeln!(f, "average frame (ms):    -")?,
        }
        match self.average_fps() {
            Some(fps) => writeln!(f, "average fps:           {:.6}", fps)?,
            None => writeln!(f, "average fps:           -")?,
        }
        write!(f, "{}", self.state)
    }
}
