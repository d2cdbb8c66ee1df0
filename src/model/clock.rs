/// Wall-clock bookkeeping for the frame loop.
///
/// `tick` is fed an absolute time in seconds once per frame and hands back
/// the elapsed time since the previous tick. The clock never resets.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    current_time: f64,
    delta_time: f32,
    started: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `absolute_time` and return the delta since the last call.
    ///
    /// The first call returns 0. A time source that runs backwards yields a
    /// negative delta; the frame loop clamps it before animating.
    pub fn tick(&mut self, absolute_time: f64) -> f32 {
        self.delta_time = if self.started {
            (absolute_time - self.current_time) as f32
        } else {
            0.0
        };
        self.current_time = absolute_time;
        self.started = true;
        self.delta_time
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}

/// Averages frame count over roughly one second windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frame_count: u32,
    timer: f32,
    fps: f32,
}

impl FpsCounter {
    const WINDOW: f32 = 1.0;

    /// Record one frame. Returns the new average when a window closes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frame_count += 1;
        self.timer += dt.max(0.0);
        if self.timer >= Self::WINDOW {
            self.fps = self.frame_count as f32 / self.timer;
            self.frame_count = 0;
            self.timer = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
