use std::io::{self, Write};
use std::time::Duration;

use frostwheel_core::geometry::slice_under_pointer;
use frostwheel_core::{
    Catalog, Engine, FeedbackCue, FrameUpdate, Prize, PrizeDraw, SpinObserver, WinRecord,
};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

const BAR_WIDTH: usize = 32;

fn flush_stdout() {
    flush_logged(&mut io::stdout());
}

/// Flushes `out`; a failure is logged and reported as `false`.
fn flush_logged(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "stdout flush failed");
            false
        }
    }
}

/// Terminal stand-in for the sound and vibration layer: rings the bell on
/// ticks and prints the landing banner.
pub struct TerminalFeedback {
    bell: bool,
    catalog: Catalog,
    pub ticks: usize,
}

impl TerminalFeedback {
    pub fn new(catalog: Catalog, bell: bool) -> Self {
        Self {
            bell,
            catalog,
            ticks: 0,
        }
    }

    pub fn draw_frame(&self, update: &FrameUpdate) {
        let filled = (update.progress * BAR_WIDTH as f64).round() as usize;
        let under = slice_under_pointer(update.rotation, self.catalog.len());
        let label = self
            .catalog
            .get(under)
            .map(|p| format!("{} {}", p.icon, p.label))
            .unwrap_or_default();
        print!(
            "\r[{}{}] {:>5.1}%  {:<24}",
            "#".repeat(filled.min(BAR_WIDTH)),
            " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            update.progress * 100.0,
            label
        );
        flush_stdout();
    }

    fn ring(&self, cue: FeedbackCue) {
        debug!(?cue, pattern = ?cue.vibration_pattern(), "feedback cue");
        if self.bell {
            print!("\x07");
            flush_stdout();
        }
    }
}

impl SpinObserver for TerminalFeedback {
    fn on_spin_start(&mut self, _winning_index: usize) {
        self.ticks = 0;
        self.ring(FeedbackCue::SpinStart);
    }

    fn on_tick(&mut self, _segment: usize) {
        self.ticks += 1;
        self.ring(FeedbackCue::Tick);
    }

    fn on_resolve(&mut self, prize: &Prize) {
        self.ring(FeedbackCue::Landing);
        println!();
        println!("You got: {} {}!", prize.icon, prize.label);
    }

    fn on_history_append(&mut self, record: &WinRecord) {
        info!(id = %record.id, prize = %record.prize.label, ticks = self.ticks, "win recorded");
    }
}

/// Plays one spin in real time. A tokio interval stands in for the frame
/// callback and a sleep for the resolution timer; both are polled on this task.
pub async fn live_spin<D: PrizeDraw>(
    engine: &mut Engine<D>,
    frame_interval: Duration,
    feedback: &mut TerminalFeedback,
) -> Option<WinRecord> {
    let origin = Instant::now();
    let millis = |at: Instant| at.duration_since(origin).as_secs_f64() * 1000.0;

    engine.trigger(0.0, feedback)?;
    let resolve_after = Duration::from_millis(engine.config().resolve_after_ms() as u64);
    let timer = time::sleep_until(origin + resolve_after);
    tokio::pin!(timer);

    let mut frames = time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut animating = true;

    loop {
        tokio::select! {
            biased;
            at = frames.tick(), if animating => {
                match engine.frame(millis(at), feedback) {
                    Some(update) => {
                        if update.ticked || !update.reschedule {
                            feedback.draw_frame(&update);
                        }
                        animating = update.reschedule;
                    }
                    None => animating = false,
                }
            }
            _ = &mut timer => {
                return engine.resolve(millis(Instant::now()), feedback);
            }
        }
    }
}
