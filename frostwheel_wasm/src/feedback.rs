use frostwheel_core::feedback::{landing_chime, tick_tone, FLOOR_GAIN};
use frostwheel_core::{FeedbackCue, Prize, SpinObserver, Tone};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

/// Web Audio oscillators plus `navigator.vibrate`.
#[derive(Default)]
pub struct WebFeedback {
    audio: Option<AudioContext>,
}

impl WebFeedback {
    /// Browsers only allow audio after a user gesture, so this runs from the
    /// spin button handler.
    pub fn unlock(&mut self) {
        if self.audio.is_none() {
            self.audio = AudioContext::new().ok();
        }
        if let Some(ctx) = &self.audio {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn play(&self, tone: &Tone) -> Result<(), JsValue> {
        let Some(ctx) = &self.audio else {
            return Ok(());
        };
        let now = ctx.current_time();
        let start = now + tone.start;
        let release_end = now + tone.release_end;

        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value_at_time(tone.frequency as f32, start)?;
        if let Some(target) = tone.glide_to {
            osc.frequency()
                .exponential_ramp_to_value_at_time(target as f32, release_end)?;
        }

        if tone.attack > 0.0 {
            gain.gain().set_value_at_time(0.0, start)?;
            gain.gain()
                .linear_ramp_to_value_at_time(tone.peak_gain as f32, start + tone.attack)?;
        } else {
            gain.gain().set_value_at_time(tone.peak_gain as f32, start)?;
        }
        gain.gain()
            .exponential_ramp_to_value_at_time(FLOOR_GAIN as f32, release_end)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        osc.start_with_when(start)?;
        osc.stop_with_when(now + tone.stop)?;
        Ok(())
    }

    fn cue(&self, cue: FeedbackCue, tones: &[Tone]) {
        for tone in tones {
            if let Err(err) = self.play(tone) {
                log::warn!("audio cue {cue:?} failed: {err:?}");
            }
        }
        vibrate(cue.vibration_pattern());
    }
}

fn vibrate(pattern: &[u32]) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    match pattern {
        [single] => {
            navigator.vibrate_with_duration(*single);
        }
        _ => {
            let steps = js_sys::Array::new();
            for ms in pattern {
                steps.push(&JsValue::from(*ms));
            }
            navigator.vibrate_with_pattern(&steps);
        }
    }
}

impl SpinObserver for WebFeedback {
    fn on_spin_start(&mut self, _winning_index: usize) {
        self.cue(FeedbackCue::SpinStart, &[tick_tone(js_sys::Math::random())]);
    }

    fn on_tick(&mut self, _segment: usize) {
        self.cue(FeedbackCue::Tick, &[tick_tone(js_sys::Math::random())]);
    }

    fn on_resolve(&mut self, prize: &Prize) {
        log::info!("landed on {}", prize.label);
        self.cue(FeedbackCue::Landing, &landing_chime());
    }
}
