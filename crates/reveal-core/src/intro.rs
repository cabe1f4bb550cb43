//! Intro choreography: logo fade/slide, typewriter text, secondary media,
//! caret blink and hide.
//!
//! The whole sequence is a declarative timeline; the state at any moment is
//! [`IntroTimeline::sample`] of the elapsed time. The choreographer only owns
//! the clock and reports one-shot edges (e.g. when the secondary media
//! should start playing).

use crate::config::IntroConfig;
use crate::ease::{Ease, Segment};

/// Values read by the compositor's content step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroState {
    pub logo_opacity: f32,
    pub logo_offset: f32,
    pub revealed_chars: usize,
    pub secondary_opacity: f32,
    pub secondary_offset: f32,
    pub caret_visible: bool,
    pub caret_hidden: bool,
}

impl IntroState {
    /// Before anything has played.
    pub fn initial(slide_from: f32) -> Self {
        Self {
            logo_opacity: 0.0,
            logo_offset: slide_from,
            revealed_chars: 0,
            secondary_opacity: 0.0,
            secondary_offset: slide_from,
            caret_visible: true,
            caret_hidden: false,
        }
    }

    /// Whether the caret should be drawn this frame.
    pub fn show_caret(&self) -> bool {
        self.caret_visible && !self.caret_hidden
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntroTimeline {
    pub logo_opacity: Segment,
    pub logo_offset: Segment,
    pub text: Segment,
    pub secondary_opacity: Segment,
    pub secondary_offset: Segment,
    pub caret_hide_at: f32,
    pub blink_interval: f32,
    text_len: usize,
}

impl IntroTimeline {
    pub fn new(cfg: &IntroConfig, text_len: usize) -> Self {
        let logo_opacity = Segment {
            start: cfg.start_delay,
            duration: cfg.logo_duration,
            from: 0.0,
            to: 1.0,
            ease: cfg.logo_ease,
        };
        let logo_offset = Segment {
            from: cfg.slide_from,
            to: 0.0,
            ..logo_opacity
        };
        let text = Segment {
            start: logo_opacity.end(),
            duration: text_len as f32 * cfg.char_duration,
            from: 0.0,
            to: text_len as f32,
            ease: Ease::Linear,
        };
        let secondary_opacity = Segment {
            start: text.end(),
            duration: cfg.secondary_duration,
            from: 0.0,
            to: 1.0,
            ease: cfg.logo_ease,
        };
        let secondary_offset = Segment {
            from: cfg.slide_from,
            to: 0.0,
            ..secondary_opacity
        };
        Self {
            logo_opacity,
            logo_offset,
            text,
            secondary_opacity,
            secondary_offset,
            caret_hide_at: secondary_opacity.end() + cfg.caret_hide_delay,
            blink_interval: cfg.caret_blink_interval,
            text_len,
        }
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Time at which the secondary media starts (phase 3/4 boundary).
    pub fn secondary_start(&self) -> f32 {
        self.secondary_opacity.start
    }

    /// End of the last tweened phase.
    pub fn phases_end(&self) -> f32 {
        self.secondary_opacity.end()
    }

    pub fn sample(&self, t: f32) -> IntroState {
        let t = t.max(0.0);
        // the linear tween lands on exact integers at character boundaries;
        // a hair of slack keeps float error from holding a glyph back a frame
        let revealed = (self.text.sample(t) + 1e-4).floor().max(0.0) as usize;
        IntroState {
            logo_opacity: self.logo_opacity.sample(t),
            logo_offset: self.logo_offset.sample(t),
            revealed_chars: revealed.min(self.text_len),
            secondary_opacity: self.secondary_opacity.sample(t),
            secondary_offset: self.secondary_offset.sample(t),
            caret_visible: blink_phase(t, self.blink_interval),
            caret_hidden: t >= self.caret_hide_at,
        }
    }
}

#[inline]
fn blink_phase(t: f32, interval: f32) -> bool {
    if interval <= 0.0 {
        return true;
    }
    ((t / interval).floor() as u64) % 2 == 0
}

/// One-shot edges crossed during an [`IntroChoreographer::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntroEvents {
    pub secondary_started: bool,
    pub caret_hidden: bool,
}

pub struct IntroChoreographer {
    timeline: IntroTimeline,
    elapsed: f32,
    state: IntroState,
    secondary_fired: bool,
    hide_fired: bool,
    canceled: bool,
}

impl IntroChoreographer {
    pub fn new(cfg: &IntroConfig, text_len: usize) -> Self {
        let timeline = IntroTimeline::new(cfg, text_len);
        let state = timeline.sample(0.0);
        Self {
            timeline,
            elapsed: 0.0,
            state,
            secondary_fired: false,
            hide_fired: false,
            canceled: false,
        }
    }

    pub fn timeline(&self) -> &IntroTimeline {
        &self.timeline
    }

    pub fn state(&self) -> &IntroState {
        &self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// All tweened phases are done (the caret may still be blinking).
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.timeline.phases_end()
    }

    pub fn advance(&mut self, dt: f32) -> IntroEvents {
        let mut events = IntroEvents::default();
        if self.canceled {
            return events;
        }
        self.elapsed += dt.max(0.0);
        self.state = self.timeline.sample(self.elapsed);

        if !self.secondary_fired && self.elapsed >= self.timeline.secondary_start() {
            self.secondary_fired = true;
            events.secondary_started = true;
            log::info!("[intro] secondary media at {:.2}s", self.elapsed);
        }
        if !self.hide_fired && self.state.caret_hidden {
            self.hide_fired = true;
            events.caret_hidden = true;
        }
        events
    }

    /// Freeze the clock; later `advance` calls are no-ops.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }
}
