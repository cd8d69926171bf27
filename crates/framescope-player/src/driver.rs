//! Cooperative playback loop.
//!
//! The driver lives outside the viewport: each tick it sleeps until the
//! next frame deadline and, if playback is running, advances the viewport
//! by one frame. A failed frame advance is logged and swallowed so the
//! loop keeps running; the next tick simply tries again.

use framescope_core::Viewport;
use std::time::{Duration, Instant};

/// Frame-rate driven playback driver.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    frame_interval: Duration,
}

impl Player {
    /// Create a driver ticking at `fps` frames per second. Non-positive
    /// rates are clamped to a very slow tick instead of panicking.
    pub fn new(fps: f64) -> Self {
        let fps = if fps > 0.0 { fps } else { 1e-3 };
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / fps),
        }
    }

    /// The deadline for the tick following one at `prev`.
    pub fn next_deadline(&self, prev: Instant) -> Instant {
        prev + self.frame_interval
    }

    /// One tick without sleeping: advance the viewport a frame if playback
    /// is running. Frame failures are logged and swallowed.
    pub fn step(&self, viewport: &mut Viewport) {
        if viewport.paused() {
            return;
        }
        let next = viewport.current_frame() + 1;
        if let Err(err) = pollster::block_on(viewport.set_frame(next)) {
            log::warn!("frame {next} skipped: {err}");
        }
    }

    /// Run the playback loop until `stop` returns true, sleeping between
    /// ticks to hold the configured frame rate.
    pub fn run(&self, viewport: &mut Viewport, mut stop: impl FnMut(&Viewport) -> bool) {
        let mut deadline = Instant::now();
        loop {
            deadline = self.next_deadline(deadline);
            if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            if stop(viewport) {
                return;
            }
            self.step(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use framescope_core::{Circle, SceneInfo, Shape};
    use kurbo::{Point, Size};

    fn frame(x: f64) -> Vec<Shape> {
        vec![Shape::Circle(Circle::new(Point::new(x, 0.0), 1.0))]
    }

    fn playing_viewport(source: MemorySource, info: SceneInfo) -> Viewport {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        pollster::block_on(vp.init(&info, Box::new(source))).unwrap();
        vp.play();
        vp
    }

    #[test]
    fn test_step_advances_one_frame() {
        let source = MemorySource::new(vec![frame(0.0), frame(1.0), frame(2.0)]);
        let info = source.info();
        let mut vp = playing_viewport(source, info);
        let player = Player::new(30.0);

        player.step(&mut vp);
        assert_eq!(vp.current_frame(), 1);
        player.step(&mut vp);
        assert_eq!(vp.current_frame(), 2);
    }

    #[test]
    fn test_step_does_nothing_while_paused() {
        let source = MemorySource::new(vec![frame(0.0), frame(1.0)]);
        let info = source.info();
        let mut vp = playing_viewport(source, info);
        vp.pause();

        Player::new(30.0).step(&mut vp);
        assert_eq!(vp.current_frame(), 0);
    }

    #[test]
    fn test_step_stops_at_last_frame() {
        let source = MemorySource::new(vec![frame(0.0), frame(1.0)]);
        let info = source.info();
        let mut vp = playing_viewport(source, info);
        let player = Player::new(30.0);

        player.step(&mut vp);
        player.step(&mut vp);
        player.step(&mut vp);
        assert_eq!(vp.current_frame(), 1);
    }

    #[test]
    fn test_failed_advance_is_swallowed_and_playback_continues() {
        // Only frame 0 exists, but two frames are advertised, so the
        // advance to frame 1 fails inside the source.
        let source = MemorySource::new(vec![frame(0.0)]);
        let info = SceneInfo {
            nframes: 2,
            ..source.info()
        };
        let mut vp = playing_viewport(source, info);
        let player = Player::new(30.0);

        player.step(&mut vp);
        assert_eq!(vp.current_frame(), 0);
        assert!(!vp.paused());
        player.step(&mut vp);
        assert_eq!(vp.current_frame(), 0);
    }

    #[test]
    fn test_deadline_spacing_matches_fps() {
        let player = Player::new(25.0);
        let t0 = Instant::now();
        assert_eq!(player.next_deadline(t0) - t0, Duration::from_millis(40));
    }

    #[test]
    fn test_run_stops_on_condition() {
        let source = MemorySource::new(vec![frame(0.0), frame(1.0), frame(2.0)]);
        let info = source.info();
        let mut vp = playing_viewport(source, info);
        let player = Player::new(1000.0);

        player.run(&mut vp, |vp| vp.current_frame() == 2);
        assert_eq!(vp.current_frame(), 2);
    }
}
