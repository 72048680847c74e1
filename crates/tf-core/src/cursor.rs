use std::time::Duration;

/// Politique de bouclage de l'animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// 0, 1, 2, 3, 0, 1, 2, 3, …
    #[default]
    Wrap,
    /// 0, 1, 2, 1, 0, 1, 2, 1, 0, …
    Swing,
}

/// Position de lecture dans une animation rendue.
///
/// Machine à états pure : pas de timer interne, l'ordonnanceur externe
/// appelle [`FrameCursor::tick`] avec le temps écoulé.
///
/// # Example
/// ```
/// use tf_core::cursor::{FrameCursor, LoopMode};
/// let mut cursor = FrameCursor::new(3, LoopMode::Swing);
/// let seq: Vec<usize> = (0..5).map(|_| cursor.step()).collect();
/// assert_eq!(seq, vec![1, 2, 1, 0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct FrameCursor {
    len: usize,
    index: usize,
    forward: bool,
    mode: LoopMode,
    delay: Duration,
    accumulated: Duration,
    stopped: bool,
}

impl FrameCursor {
    /// Délai par défaut entre frames.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    /// Cursor at frame 0, moving forward, playing.
    ///
    /// A zero `len` is treated as a single frame.
    #[must_use]
    pub fn new(len: usize, mode: LoopMode) -> Self {
        Self {
            len: len.max(1),
            index: 0,
            forward: true,
            mode,
            delay: Self::DEFAULT_DELAY,
            accumulated: Duration::ZERO,
            stopped: false,
        }
    }

    /// Builder: set the delay between frames.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Current frame index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Jump to `index` (clamped to the last frame).
    pub fn set_index(&mut self, index: usize) -> &mut Self {
        self.index = index.min(self.len - 1);
        self
    }

    /// Active loop policy.
    #[must_use]
    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    /// Switch loop policy; direction resets to forward.
    pub fn set_mode(&mut self, mode: LoopMode) -> &mut Self {
        self.mode = mode;
        self.forward = true;
        self
    }

    /// Inverse le sens de lecture.
    pub fn reverse(&mut self) -> &mut Self {
        self.forward = !self.forward;
        self
    }

    /// `true` while moving towards higher indices.
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Delay between frames.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Set the delay between frames.
    pub fn set_delay(&mut self, delay: Duration) -> &mut Self {
        self.delay = delay;
        self
    }

    /// Frames per second derived from the delay. Zero delay gives 0.0.
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.delay.is_zero() {
            0.0
        } else {
            1.0 / self.delay.as_secs_f64()
        }
    }

    /// Set the delay from a frame rate. Non-positive rates are ignored.
    pub fn set_fps(&mut self, fps: f64) -> &mut Self {
        if fps > 0.0 && fps.is_finite() {
            self.delay = Duration::from_secs_f64(1.0 / fps);
        }
        self
    }

    /// Reprend la lecture.
    pub fn play(&mut self) {
        self.stopped = false;
    }

    /// Met la lecture en pause ; `tick` n'avance plus.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// `true` if stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advance one frame according to the loop policy and return the new index.
    pub fn step(&mut self) -> usize {
        self.index = match self.mode {
            LoopMode::Wrap => {
                if self.forward {
                    (self.index + 1) % self.len
                } else {
                    (self.len + self.index - 1) % self.len
                }
            }
            LoopMode::Swing => {
                let at_start = self.index == 0 && !self.forward;
                let at_end = self.index == self.len - 1 && self.forward;
                if at_start || at_end {
                    self.forward = !self.forward;
                }
                if self.forward {
                    (self.index + 1) % self.len
                } else {
                    self.index.saturating_sub(1)
                }
            }
        };
        self.index
    }

    /// Feed elapsed scheduler time. Steps at most once per call, keeping the
    /// remainder modulo the delay; returns the new index when it stepped.
    pub fn tick(&mut self, elapsed: Duration) -> Option<usize> {
        if self.stopped {
            return None;
        }
        self.accumulated += elapsed;
        if self.accumulated <= self.delay {
            return None;
        }
        self.accumulated = if self.delay.is_zero() {
            Duration::ZERO
        } else {
            Duration::from_nanos((self.accumulated.as_nanos() % self.delay.as_nanos()) as u64)
        };
        Some(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_cycles_forward() {
        let mut cursor = FrameCursor::new(4, LoopMode::Wrap);
        let seq: Vec<usize> = (0..6).map(|_| cursor.step()).collect();
        assert_eq!(seq, vec![1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn wrap_reversed_cycles_backward() {
        let mut cursor = FrameCursor::new(3, LoopMode::Wrap);
        cursor.reverse();
        let seq: Vec<usize> = (0..4).map(|_| cursor.step()).collect();
        assert_eq!(seq, vec![2, 1, 0, 2]);
    }

    #[test]
    fn swing_bounces_at_both_ends() {
        let mut cursor = FrameCursor::new(3, LoopMode::Swing);
        let seq: Vec<usize> = (0..8).map(|_| cursor.step()).collect();
        assert_eq!(seq, vec![1, 2, 1, 0, 1, 2, 1, 0]);
    }

    #[test]
    fn single_frame_stays_put() {
        for mode in [LoopMode::Wrap, LoopMode::Swing] {
            let mut cursor = FrameCursor::new(1, mode);
            assert_eq!(cursor.step(), 0);
            assert_eq!(cursor.step(), 0);
        }
    }

    #[test]
    fn tick_steps_only_past_delay() {
        let mut cursor =
            FrameCursor::new(5, LoopMode::Wrap).with_delay(Duration::from_millis(100));
        assert_eq!(cursor.tick(Duration::from_millis(60)), None);
        assert_eq!(cursor.tick(Duration::from_millis(40)), None);
        assert_eq!(cursor.tick(Duration::from_millis(30)), Some(1));
        // 130 ms accumulated → 30 ms carried over.
        assert_eq!(cursor.tick(Duration::from_millis(71)), Some(2));
    }

    #[test]
    fn stopped_cursor_ignores_ticks() {
        let mut cursor = FrameCursor::new(5, LoopMode::Wrap);
        cursor.stop();
        assert_eq!(cursor.tick(Duration::from_secs(1)), None);
        cursor.play();
        assert_eq!(cursor.tick(Duration::from_secs(1)), Some(1));
    }

    #[test]
    fn fps_and_delay_are_reciprocal() {
        let mut cursor = FrameCursor::new(2, LoopMode::Wrap);
        assert!((cursor.fps() - 10.0).abs() < 1e-9);
        cursor.set_fps(25.0);
        assert_eq!(cursor.delay(), Duration::from_millis(40));
        cursor.set_fps(0.0);
        assert_eq!(cursor.delay(), Duration::from_millis(40));
    }

    #[test]
    fn delay_defaults_then_builder_overrides() {
        let cursor = FrameCursor::new(2, LoopMode::Wrap);
        assert_eq!(cursor.delay(), FrameCursor::DEFAULT_DELAY);
        let cursor = cursor.with_delay(Duration::from_millis(70));
        assert_eq!(cursor.delay(), Duration::from_millis(70));
    }

    #[test]
    fn set_index_clamps() {
        let mut cursor = FrameCursor::new(3, LoopMode::Swing);
        cursor.set_index(10);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.step(), 1);
    }
}
