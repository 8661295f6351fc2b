use tracing::{debug, info, trace, warn};

use crate::{
    config::WheelConfig,
    easing::ease_spin,
    feedback::SpinObserver,
    geometry::{forward_delta, segment_at, target_angle},
    history::{now_millis, History, WinRecord},
    prize::{Catalog, Prize},
    rng::{PrizeDraw, RandomDraw},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    /// Frame loop running.
    Spinning,
    /// Animation finished; waiting for the resolution timer.
    Resolving,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub is_spinning: bool,
    /// Total clockwise rotation since the engine was created. Never decreases.
    pub cumulative_rotation: f64,
    /// Segment seen by the previous frame of the current spin.
    pub last_segment: Option<usize>,
}

/// Everything decided at trigger time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub slices: usize,
    pub start_rotation: f64,
    pub target_angle: f64,
    pub delta: f64,
    pub started_at_ms: f64,
}

impl SpinPlan {
    pub fn end_rotation(&self) -> f64 {
        self.start_rotation + self.delta
    }

    pub fn rotation_at(&self, eased: f64) -> f64 {
        self.start_rotation + self.delta * eased
    }
}

/// Pure spin computation: where the wheel must stop for `winning_index` to sit
/// under the pointer, starting from `start_rotation`.
pub fn compute_spin(
    start_rotation: f64,
    winning_index: usize,
    slices: usize,
    min_rotations: u32,
) -> (f64, f64) {
    let target = target_angle(winning_index, slices);
    let delta = forward_delta(start_rotation, target, min_rotations);
    (target, delta)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub progress: f64,
    pub rotation: f64,
    pub segment: usize,
    pub ticked: bool,
    /// Host should request another frame.
    pub reschedule: bool,
}

/// One wheel: catalog, timing config, draw source, spin state machine and the
/// session history. Hosts feed it timestamps from their frame and timer callbacks.
pub struct Engine<D = RandomDraw> {
    catalog: Catalog,
    config: WheelConfig,
    draw: D,
    phase: SpinPhase,
    state: SpinState,
    plan: Option<SpinPlan>,
    visual_rotation: f64,
    history: History,
    wall_clock: fn() -> i64,
}

impl<D: PrizeDraw> Engine<D> {
    pub fn new(catalog: Catalog, config: WheelConfig, draw: D) -> Self {
        Self {
            catalog,
            config,
            draw,
            phase: SpinPhase::Idle,
            state: SpinState {
                is_spinning: false,
                cumulative_rotation: 0.0,
                last_segment: None,
            },
            plan: None,
            visual_rotation: 0.0,
            history: History::new(),
            wall_clock: now_millis,
        }
    }

    /// Replaces the source of record timestamps (epoch millis).
    pub fn with_wall_clock(mut self, clock: fn() -> i64) -> Self {
        self.wall_clock = clock;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        self.plan.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    /// Rotation the wheel should be drawn at right now.
    pub fn visual_rotation(&self) -> f64 {
        self.visual_rotation
    }

    /// Host time at which the resolution timer must fire.
    pub fn resolve_deadline_ms(&self) -> Option<f64> {
        self.plan
            .map(|p| p.started_at_ms + self.config.resolve_after_ms() as f64)
    }

    /// Starts a spin. Ignored (returns `None`) while another spin is in flight.
    pub fn trigger(&mut self, now_ms: f64, observer: &mut impl SpinObserver) -> Option<SpinPlan> {
        if self.state.is_spinning {
            debug!(phase = ?self.phase, "spin trigger ignored, wheel busy");
            return None;
        }
        let slices = self.catalog.len();
        let winning_index = self.draw.draw(slices);
        let start_rotation = self.state.cumulative_rotation;
        let (target, delta) =
            compute_spin(start_rotation, winning_index, slices, self.config.min_rotations);
        let plan = SpinPlan {
            winning_index,
            slices,
            start_rotation,
            target_angle: target,
            delta,
            started_at_ms: now_ms,
        };

        self.state.cumulative_rotation = plan.end_rotation();
        self.state.is_spinning = true;
        self.state.last_segment = None;
        self.phase = SpinPhase::Spinning;
        self.plan = Some(plan);
        debug!(
            winning_index,
            start_rotation,
            end_rotation = plan.end_rotation(),
            "spin started"
        );
        observer.on_spin_start(winning_index);
        Some(plan)
    }

    /// Per-frame progress update. Returns `None` when no animation is running.
    pub fn frame(&mut self, now_ms: f64, observer: &mut impl SpinObserver) -> Option<FrameUpdate> {
        if self.phase != SpinPhase::Spinning {
            return None;
        }
        let plan = self.plan?;
        let elapsed = now_ms - plan.started_at_ms;
        let progress = (elapsed / self.config.spin_duration_ms as f64).clamp(0.0, 1.0);
        let rotation = plan.rotation_at(ease_spin(progress));
        let segment = segment_at(rotation, plan.slices);

        let ticked = self.state.last_segment != Some(segment);
        if ticked {
            trace!(segment, progress, "segment crossed");
            self.state.last_segment = Some(segment);
            observer.on_tick(segment);
        }
        self.visual_rotation = rotation;

        let reschedule = progress < 1.0;
        if !reschedule {
            self.phase = SpinPhase::Resolving;
        }
        Some(FrameUpdate {
            progress,
            rotation,
            segment,
            ticked,
            reschedule,
        })
    }

    /// Resolution timer callback. Records the drawn prize and returns the new
    /// history entry; `None` if nothing is in flight.
    pub fn resolve(&mut self, now_ms: f64, observer: &mut impl SpinObserver) -> Option<WinRecord> {
        let plan = self.plan?;
        if self.phase == SpinPhase::Spinning {
            warn!(
                elapsed_ms = now_ms - plan.started_at_ms,
                "resolution timer fired before the final frame; finishing animation"
            );
            let end = plan.started_at_ms + self.config.spin_duration_ms as f64;
            self.frame(now_ms.max(end), observer);
        }

        let prize: Prize = self.catalog.get(plan.winning_index)?.clone();
        self.state.is_spinning = false;
        self.phase = SpinPhase::Idle;
        self.plan = None;
        self.visual_rotation = plan.end_rotation();
        info!(prize = %prize.label, rotation = plan.end_rotation(), "spin resolved");
        observer.on_resolve(&prize);

        let record = self
            .history
            .append(WinRecord::new(prize, (self.wall_clock)()))
            .clone();
        observer.on_history_append(&record);
        Some(record)
    }
}

impl Engine<RandomDraw> {
    pub fn with_random(catalog: Catalog, config: WheelConfig) -> Self {
        Self::new(catalog, config, RandomDraw)
    }
}
