use crate::engine::Engine;
use crate::feedback::SpinObserver;
use crate::history::WinRecord;
use crate::rng::PrizeDraw;

/// Stand-in for a host's frame and timer callbacks: advances a virtual clock
/// in fixed frame steps and fires the resolution timer at its deadline.
#[derive(Debug, Clone, Copy)]
pub struct VirtualTimeline {
    frame_interval_ms: f64,
    now_ms: f64,
}

impl VirtualTimeline {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self::starting_at(0.0, frame_interval_ms)
    }

    pub fn starting_at(now_ms: f64, frame_interval_ms: f64) -> Self {
        Self {
            frame_interval_ms: frame_interval_ms.max(f64::EPSILON),
            now_ms,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    /// Triggers one spin and plays it to resolution. `None` when the engine
    /// refused the trigger.
    pub fn run_spin<D: PrizeDraw>(
        &mut self,
        engine: &mut Engine<D>,
        observer: &mut impl SpinObserver,
    ) -> Option<WinRecord> {
        engine.trigger(self.now_ms, observer)?;
        let deadline = engine.resolve_deadline_ms()?;
        loop {
            let next = self.now_ms + self.frame_interval_ms;
            if next >= deadline {
                break;
            }
            self.now_ms = next;
            match engine.frame(self.now_ms, observer) {
                Some(update) if update.reschedule => continue,
                _ => break,
            }
        }
        self.now_ms = deadline;
        engine.resolve(self.now_ms, observer)
    }
}
