//! Draw orchestration: countdown timer, status transitions and winner selection.
//!
//! A draw runs `Idle → Countdown → Winner`, and every later draw restarts at
//! `Countdown`. The orchestrator is polled from the event loop; it owns the
//! only repeating timer and cancels it on every path out of `Countdown`.

mod picker;
mod timer;

pub use picker::{RandomPicker, WinnerPicker};
pub use timer::IntervalTimer;

use std::time::Instant;

use tracing::{debug, info};

use crate::audio::SoundCues;
use crate::params::DrawTiming;
use crate::participants::ParticipantList;

/// Current phase of the draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    Idle,
    Countdown,
    Winner,
}

/// What the presentation layer should show right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawView<'a> {
    Idle,
    Countdown(u8),
    Winner(&'a str),
}

/// Transition reported by a timer tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawEvent {
    /// Countdown advanced to this value
    Tick(u8),
    /// Countdown finished and a winner was published
    WinnerSelected { index: usize, name: String },
}

/// Countdown state machine driving sound cues and winner selection
pub struct DrawOrchestrator<S: SoundCues, P: WinnerPicker> {
    participants: ParticipantList,
    timing: DrawTiming,
    sounds: S,
    picker: P,

    status: DrawStatus,
    countdown: u8,
    winner: Option<usize>,

    /// Ticks left until the reveal
    remaining: u8,
    timer: Option<IntervalTimer>,
}

impl<S: SoundCues, P: WinnerPicker> DrawOrchestrator<S, P> {
    pub fn new(participants: ParticipantList, timing: DrawTiming, sounds: S, picker: P) -> Self {
        let timing = DrawTiming {
            countdown_from: timing.countdown_from.max(1),
            ..timing
        };
        Self {
            countdown: timing.countdown_from,
            participants,
            timing,
            sounds,
            picker,
            status: DrawStatus::Idle,
            winner: None,
            remaining: 0,
            timer: None,
        }
    }

    pub fn status(&self) -> DrawStatus {
        self.status
    }

    /// Countdown value, only while counting down
    pub fn countdown(&self) -> Option<u8> {
        (self.status == DrawStatus::Countdown).then_some(self.countdown)
    }

    /// Winning name, only once the draw has finished
    pub fn winner(&self) -> Option<&str> {
        if self.status != DrawStatus::Winner {
            return None;
        }
        self.winner.and_then(|index| self.participants.get(index))
    }

    pub fn view(&self) -> DrawView<'_> {
        match self.status {
            DrawStatus::Idle => DrawView::Idle,
            DrawStatus::Countdown => DrawView::Countdown(self.countdown),
            DrawStatus::Winner => self.winner().map_or(DrawView::Idle, DrawView::Winner),
        }
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    /// Whether the start trigger should be enabled
    pub fn can_start(&self) -> bool {
        self.status != DrawStatus::Countdown
    }

    /// When the event loop must wake up to deliver the next tick
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(IntervalTimer::deadline)
    }

    #[cfg(test)]
    pub(crate) fn sounds(&self) -> &S {
        &self.sounds
    }

    /// Begin a new draw
    ///
    /// Returns `false` without touching any state while a countdown is
    /// already running.
    pub fn start_draw(&mut self, now: Instant) -> bool {
        if !self.can_start() {
            debug!("Start ignored: countdown already running");
            return false;
        }

        self.cancel_timer();

        let from = self.timing.countdown_from;
        self.winner = None;
        self.countdown = from;
        self.remaining = from;
        self.status = DrawStatus::Countdown;

        self.sounds.resume();
        self.sounds.beep(from);

        self.timer = Some(IntervalTimer::start(now, self.timing.tick_interval()));
        info!(
            countdown = from,
            participants = self.participants.len(),
            "Draw started"
        );
        true
    }

    /// Deliver at most one pending tick
    pub fn poll(&mut self, now: Instant) -> Option<DrawEvent> {
        let timer = self.timer.as_mut()?;
        if !timer.poll(now) {
            return None;
        }
        Some(self.tick())
    }

    /// Cancel any outstanding timer; call when the owning context goes away
    pub fn teardown(&mut self) {
        self.cancel_timer();
    }

    fn tick(&mut self) -> DrawEvent {
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining > 0 {
            self.countdown = self.remaining;
            self.sounds.beep(self.remaining);
            debug!(countdown = self.remaining, "Countdown tick");
            return DrawEvent::Tick(self.remaining);
        }

        // Timer goes first so no later tick can observe the Winner state
        self.cancel_timer();

        let len = self.participants.len();
        let index = self.picker.pick(len);
        debug_assert!(index < len, "picker returned {} for {} names", index, len);
        let index = index.min(len - 1);

        self.countdown = 0;
        self.winner = Some(index);
        self.status = DrawStatus::Winner;
        self.sounds.win();

        let name = self.participants.get(index).unwrap_or_default().to_string();
        info!(index, winner = %name, "Winner selected");
        DrawEvent::WinnerSelected { index, name }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(fired = timer.fired(), "Countdown timer cancelled");
        }
    }
}

impl<S: SoundCues, P: WinnerPicker> Drop for DrawOrchestrator<S, P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
