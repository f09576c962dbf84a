use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw at a fixed interval whether or not anything changed.
    Interval(Duration),
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after changes, at most once per interval.
    ///
    /// Changes arriving faster than the interval share one redraw.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Interval` mode from a frame rate (FPS).
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Decides which event comes next.
///
/// Ticks report the wall-clock time since the previous tick, so a loop that
/// falls behind hands the application one long tick instead of several short
/// ones.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Ticks are disabled until an interval is set. The first render is due
    /// immediately.
    pub(super) fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: now,
            dirty: true,
        }
    }

    /// Sets the tick interval and restarts the tick clock at `now`.
    ///
    /// `None` disables ticks.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        self.tick_interval = interval;
        self.last_tick = now;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or render is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event due at `now`, if any.
    ///
    /// Ticks take priority over renders.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval {
            let elapsed = now.saturating_duration_since(self.last_tick);
            if elapsed >= tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick(elapsed));
            }
        }

        let since_render = now.saturating_duration_since(self.last_render);
        let do_render = match self.render_mode {
            RenderMode::Interval(interval) => since_render >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => self.dirty && since_render >= interval,
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Time until the next tick or render, or `None` to wait for input only.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_initial_render_then_idle() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        assert!(events.due_event(start).is_some_and(|e| e.is_render()));
        assert!(events.due_event(start).is_none());
        assert_eq!(events.compute_timeout(start), None);
    }

    #[test]
    fn test_tick_reports_elapsed_time() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(16 * MS), start);
        let _ = events.due_event(start);

        assert!(events.due_event(start + 10 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 10 * MS), Some(6 * MS));

        let Some(TuiEvent::Tick(elapsed)) = events.due_event(start + 40 * MS) else {
            panic!("expected a tick");
        };
        assert_eq!(elapsed, 40 * MS);

        let Some(TuiEvent::Tick(elapsed)) = events.due_event(start + 56 * MS) else {
            panic!("expected a tick");
        };
        assert_eq!(elapsed, 16 * MS);
    }

    #[test]
    fn test_tick_marks_dirty() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(10 * MS), start);
        assert!(events.due_event(start).is_some_and(|e| e.is_render()));

        assert!(events.due_event(start + 10 * MS).is_some_and(|e| e.is_tick()));
        assert!(events.due_event(start + 10 * MS).is_some_and(|e| e.is_render()));
    }

    #[test]
    fn test_disabling_ticks() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(10 * MS), start);
        events.set_tick_interval(None, start);
        let _ = events.due_event(start);
        assert!(events.due_event(start + 100 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 100 * MS), None);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Throttled(30 * MS));

        assert!(events.due_event(start).is_none());
        assert_eq!(events.compute_timeout(start), Some(30 * MS));
        assert!(events.due_event(start + 30 * MS).is_some_and(|e| e.is_render()));
        assert_eq!(events.compute_timeout(start + 30 * MS), None);
    }

    #[test]
    fn test_interval_render_ignores_dirty_flag() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Interval(20 * MS));
        assert!(events.due_event(start + 20 * MS).is_some_and(|e| e.is_render()));
        assert!(events.due_event(start + 40 * MS).is_some_and(|e| e.is_render()));
    }

    #[test]
    fn test_render_mode_from_rate() {
        assert_eq!(
            RenderMode::interval_from_rate(8.0),
            RenderMode::Interval(125 * MS)
        );
        assert_eq!(
            RenderMode::throttled_from_rate(4.0),
            RenderMode::Throttled(250 * MS)
        );
    }
}
