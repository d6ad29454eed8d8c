//! Audio system using Web Audio API
//!
//! Procedurally generated cues and background pads - no external files needed.
//! Every call is fire-and-forget; failures are swallowed so audio can never
//! stall the quiz or the simulation.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Answer matched
    Correct,
    /// Answer missed (any of the three attempts)
    Incorrect,
    /// Spear struck the target
    Hit,
    /// Final score revealed
    GameOver,
}

/// Background pad per game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Quiz,
    Game,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Sustained oscillators for the current background pad
    music_nodes: Vec<(OscillatorNode, GainNode)>,
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game plays on silently
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music_nodes: Vec::new(),
            sfx_volume: 0.8,
            music_volume: 0.4,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set sound effect volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require a user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Correct => self.play_correct(ctx, vol),
            SoundCue::Incorrect => self.play_incorrect(ctx, vol),
            SoundCue::Hit => self.play_hit(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Start the background pad for a phase, replacing any current one
    pub fn start_music(&mut self, track: MusicTrack) {
        self.stop_music();

        let vol = self.music_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Root + fifth, a register apart per phase
        let freqs: [f32; 2] = match track {
            MusicTrack::Quiz => [220.0, 330.0],
            MusicTrack::Game => [110.0, 165.0],
        };

        let t = ctx.current_time();
        for freq in freqs {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            // Slow attack so phase changes don't click
            gain.gain().set_value_at_time(0.0001, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.08, t + 1.5)
                .ok();
            osc.start().ok();
            self.music_nodes.push((osc, gain));
        }
    }

    /// Cut and drop the current background pad
    pub fn stop_music(&mut self) {
        let Some(ctx) = &self.ctx else {
            self.music_nodes.clear();
            return;
        };
        let t = ctx.current_time();
        for (osc, gain) in self.music_nodes.drain(..) {
            gain.gain().set_value_at_time(0.0001, t).ok();
            osc.stop_with_when(t + 0.05).ok();
        }
    }

    /// Stop everything (music now, cues are one-shot anyway)
    pub fn stop_all(&mut self) {
        self.stop_music();
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Correct answer - rising two-tone ding
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }
    }

    /// Wrong answer - low falling buzz
    fn play_incorrect(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Target hit - solid thump with a high ping
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Triangle) {
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Final score - descending close-out
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
