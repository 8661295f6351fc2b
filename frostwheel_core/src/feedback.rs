//! Audio and haptic cue descriptions. Hosts turn these into sound and vibration;
//! nothing here touches a device.

use crate::history::WinRecord;
use crate::prize::Prize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCue {
    SpinStart,
    Tick,
    Landing,
}

impl FeedbackCue {
    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub fn vibration_pattern(self) -> &'static [u32] {
        match self {
            FeedbackCue::SpinStart => &[20],
            FeedbackCue::Tick => &[5],
            FeedbackCue::Landing => &[60, 40, 60],
        }
    }
}

/// One sine note. Times are seconds relative to when the cue is played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start: f64,
    pub frequency: f64,
    /// Frequency at `release_end`; `None` keeps the pitch flat.
    pub glide_to: Option<f64>,
    pub peak_gain: f64,
    /// Linear rise to `peak_gain`; zero starts at peak.
    pub attack: f64,
    /// Exponential fall to `FLOOR_GAIN` ends here.
    pub release_end: f64,
    pub stop: f64,
}

pub const FLOOR_GAIN: f64 = 0.001;

const TICK_BASE_HZ: f64 = 880.0;
const TICK_JITTER_HZ: f64 = 200.0;
const CHIME_NOTES_HZ: [f64; 4] = [440.0, 554.37, 659.25, 880.0];
const CHIME_SPACING: f64 = 0.1;

/// Short "ice click". `jitter` in `[0,1)` detunes successive ticks.
pub fn tick_tone(jitter: f64) -> Tone {
    Tone {
        start: 0.0,
        frequency: TICK_BASE_HZ + jitter.clamp(0.0, 1.0) * TICK_JITTER_HZ,
        glide_to: Some(10.0),
        peak_gain: 0.1,
        attack: 0.0,
        release_end: 0.1,
        stop: 0.1,
    }
}

/// Rising A-major arpeggio played on landing.
pub fn landing_chime() -> Vec<Tone> {
    CHIME_NOTES_HZ
        .iter()
        .enumerate()
        .map(|(i, &frequency)| {
            let start = i as f64 * CHIME_SPACING;
            Tone {
                start,
                frequency,
                glide_to: None,
                peak_gain: 0.2,
                attack: 0.05,
                release_end: start + 0.5,
                stop: start + 0.6,
            }
        })
        .collect()
}

/// Receives engine events. Every method defaults to doing nothing.
pub trait SpinObserver {
    fn on_spin_start(&mut self, _winning_index: usize) {}
    fn on_tick(&mut self, _segment: usize) {}
    fn on_resolve(&mut self, _prize: &Prize) {}
    fn on_history_append(&mut self, _record: &WinRecord) {}
}

impl SpinObserver for () {}

/// One engine notification, as recorded by `EventLog`.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    Started { winning_index: usize },
    Tick { segment: usize },
    Resolved { prize: Prize },
    HistoryAppended { record: WinRecord },
}

impl SpinEvent {
    pub fn cue(&self) -> Option<FeedbackCue> {
        match self {
            SpinEvent::Started { .. } => Some(FeedbackCue::SpinStart),
            SpinEvent::Tick { .. } => Some(FeedbackCue::Tick),
            SpinEvent::Resolved { .. } => Some(FeedbackCue::Landing),
            SpinEvent::HistoryAppended { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<SpinEvent>,
}

impl EventLog {
    pub fn ticks(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SpinEvent::Tick { segment } => Some(*segment),
                _ => None,
            })
            .collect()
    }

    pub fn resolved(&self) -> Vec<&Prize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SpinEvent::Resolved { prize } => Some(prize),
                _ => None,
            })
            .collect()
    }
}

impl SpinObserver for EventLog {
    fn on_spin_start(&mut self, winning_index: usize) {
        self.events.push(SpinEvent::Started { winning_index });
    }

    fn on_tick(&mut self, segment: usize) {
        self.events.push(SpinEvent::Tick { segment });
    }

    fn on_resolve(&mut self, prize: &Prize) {
        self.events.push(SpinEvent::Resolved {
            prize: prize.clone(),
        });
    }

    fn on_history_append(&mut self, record: &WinRecord) {
        self.events.push(SpinEvent::HistoryAppended {
            record: record.clone(),
        });
    }
}
