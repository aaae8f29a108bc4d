//! Audio system
//!
//! Plays the loaded sound assets through `HtmlAudioElement`. When an asset
//! failed to load, a short procedurally generated Web Audio cue plays instead.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::assets::{AssetStore, SoundAsset};
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bounced off a platform
    Jump,
    /// Picked up a coin
    Coin,
}

impl SoundEffect {
    fn asset(self) -> SoundAsset {
        match self {
            SoundEffect::Jump => SoundAsset::Jump,
            SoundEffect::Coin => SoundAsset::Coins,
        }
    }

    /// Base volume before settings are applied
    fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Jump => 0.3,
            SoundEffect::Coin => 0.4,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    assets: Rc<RefCell<AssetStore>>,
    /// Only needed for fallback cues; created lazily
    ctx: Option<AudioContext>,
}

impl AudioManager {
    pub fn new(assets: Rc<RefCell<AssetStore>>) -> Self {
        Self { assets, ctx: None }
    }

    /// Play a sound effect at the volume the settings allow
    pub fn play(&mut self, effect: SoundEffect, settings: &Settings) {
        let vol = settings.effective_volume(effect.base_volume());
        if vol <= 0.0 {
            return;
        }

        let element = self.assets.borrow().sound(effect.asset()).cloned();
        match element {
            Some(audio) => play_element(&audio, vol, effect),
            None => self.play_fallback(effect, vol),
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() {
            // May fail outside a secure context
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - fallback sounds disabled");
            }
        }
        let ctx = self.ctx.as_ref()?;
        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    fn play_fallback(&mut self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = self.context() else { return };
        match effect {
            SoundEffect::Jump => play_jump_cue(ctx, vol),
            SoundEffect::Coin => play_coin_cue(ctx, vol),
        }
    }
}

/// Rewind and play; a rejected play promise (autoplay policy) is only logged
fn play_element(audio: &HtmlAudioElement, vol: f32, effect: SoundEffect) {
    audio.set_current_time(0.0);
    audio.set_volume(vol as f64);
    match audio.play() {
        Ok(promise) => {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::info!("{:?} sound play failed: {:?}", effect, e);
                }
            });
        }
        Err(e) => log::info!("{:?} sound play failed: {:?}", effect, e),
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
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

/// Jump - quick upward chirp
fn play_jump_cue(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 220.0, OscillatorType::Triangle) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
        .ok();
    osc.frequency().set_value_at_time(220.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(660.0, t + 0.12)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.18).ok();
}

/// Coin - two bright rising notes
fn play_coin_cue(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [988.0, 1319.0].iter().enumerate() {
        let delay = i as f64 * 0.07;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Square) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}
