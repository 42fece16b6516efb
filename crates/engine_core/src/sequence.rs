//! Timed phase sequences for cinematics.
//!
//! A sequence is a fixed list of `(phase, duration)` pairs. Advancing it reports
//! which phases were entered and exited, so callers react to transitions without
//! registering callbacks and without the sequence touching any game state.

/// Transition reported by [`Sequence::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent<P> {
    Enter(P),
    Exit(P),
}

/// A finite run of timed phases.
#[derive(Debug, Clone)]
pub struct Sequence<P> {
    phases: Vec<(P, f32)>,
    index: usize,
    phase_timer: f32,
    started: bool,
}

impl<P: Copy> Sequence<P> {
    /// Build a sequence. Negative durations are treated as zero.
    pub fn new(phases: impl IntoIterator<Item = (P, f32)>) -> Self {
        Self {
            phases: phases.into_iter().map(|(p, d)| (p, d.max(0.0))).collect(),
            index: 0,
            phase_timer: 0.0,
            started: false,
        }
    }

    /// Step the sequence by `dt` seconds.
    ///
    /// The first call enters the first phase. Large steps may cross several phase
    /// boundaries; every exit and enter is reported in order.
    pub fn advance(&mut self, dt: f32) -> Vec<PhaseEvent<P>> {
        let mut events = Vec::new();
        if self.is_complete() {
            return events;
        }
        if !self.started {
            self.started = true;
            events.push(PhaseEvent::Enter(self.phases[0].0));
        }

        self.phase_timer += dt.max(0.0);
        while let Some(&(phase, duration)) = self.phases.get(self.index) {
            if self.phase_timer < duration {
                break;
            }
            self.phase_timer -= duration;
            self.index += 1;
            log::trace!("sequence phase {} of {} finished", self.index, self.phases.len());
            events.push(PhaseEvent::Exit(phase));
            if let Some(&(next, _)) = self.phases.get(self.index) {
                events.push(PhaseEvent::Enter(next));
            } else {
                self.phase_timer = 0.0;
            }
        }
        events
    }

    /// Phase currently running, if the sequence has started and not finished.
    pub fn current(&self) -> Option<P> {
        if !self.started {
            return None;
        }
        self.phases.get(self.index).map(|&(p, _)| p)
    }

    /// Seconds spent in the current phase.
    pub fn phase_elapsed(&self) -> f32 {
        self.phase_timer
    }

    /// Fraction of the current phase completed, in [0, 1].
    pub fn phase_progress(&self) -> f32 {
        match self.phases.get(self.index) {
            Some(&(_, d)) if d > 0.0 => (self.phase_timer / d).clamp(0.0, 1.0),
            Some(_) => 1.0,
            None => 1.0,
        }
    }

    /// Total length of the sequence in seconds.
    pub fn total_duration(&self) -> f32 {
        self.phases.iter().map(|&(_, d)| d).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.phases.len()
    }
}
