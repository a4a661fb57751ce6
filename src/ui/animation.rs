//! Fade animations for overlays, driven by `iced_anim`

use std::time::{Duration, Instant};

use iced_anim::Animated;
use iced_anim::transition::Easing;

/// Dialog fade duration
const FADE_DURATION: Duration = Duration::from_millis(200);

/// Opacity that eases between hidden (0.0) and shown (1.0)
#[derive(Debug)]
pub struct FadeAnimation {
    animation: Animated<f32>,
}

impl Default for FadeAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeAnimation {
    pub fn new() -> Self {
        Self {
            animation: Animated::transition(0.0, Easing::EASE.with_duration(FADE_DURATION)),
        }
    }

    /// Fade in
    pub fn show(&mut self) {
        self.animation.update(1.0.into());
    }

    /// Fade out
    pub fn hide(&mut self) {
        self.animation.update(0.0.into());
    }

    /// Current opacity (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        *self.animation.value()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Whether anything should be drawn
    pub fn is_visible(&self) -> bool {
        self.progress() > 0.01 || self.is_animating()
    }

    /// Must be called on each animation frame
    pub fn tick(&mut self, now: Instant) {
        self.animation.tick(now);
    }
}
