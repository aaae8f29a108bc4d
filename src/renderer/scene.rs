//! Gameplay layer: platforms, coins, astronaut and particles

use glam::Vec2;

use super::background::backdrop;
use super::{AssetView, DrawCmd, Glow, Paint, RenderOptions, Rgba};
use crate::Rect;
use crate::assets::ImageAsset;
use crate::consts::{ASTRONAUT_FRAME_SIZE, COIN_FRAME_SIZE};
use crate::sim::{Coin, Facing, GamePhase, GameState, Particle, Platform, PlatformKind, Player};

/// Entities this far outside the canvas are skipped
const VISIBILITY_MARGIN: f32 = 50.0;
/// Ticks for a breaking platform to fade out
const BREAK_FADE_TICKS: f32 = 30.0;
/// Max shake offset of a breaking platform, px
const BREAK_SHAKE: f32 = 2.0;

const HIGHLIGHT: Rgba = Rgba::rgba(255, 255, 255, 0.3);
const BORDER: Rgba = Rgba::rgba(255, 255, 255, 0.5);

/// Build the complete draw list for one frame
pub fn build_frame<A: AssetView + ?Sized>(
    state: &GameState,
    assets: &A,
    options: &RenderOptions,
    time_ms: f64,
) -> Vec<DrawCmd> {
    let width = state.viewport.width;
    let height = state.viewport.height;
    let camera_y = state.camera.y;

    let mut out = Vec::with_capacity(
        8 + options.star_count
            + options.dust_count
            + state.platforms.len() * 3
            + state.coins.len()
            + state.particles.len(),
    );
    out.push(DrawCmd::Clear);

    backdrop(
        &mut out,
        assets,
        options,
        state.score,
        camera_y,
        width,
        height,
        time_ms,
    );

    if state.phase != GamePhase::Playing {
        return out;
    }

    for platform in &state.platforms {
        let screen_y = state.camera.to_screen(platform.pos.y);
        if is_visible(screen_y, height) {
            draw_platform(&mut out, platform, screen_y, assets);
        }
    }

    for coin in state.coins.iter().filter(|c| !c.collected) {
        let screen_y = state.camera.to_screen(coin.pos.y);
        if is_visible(screen_y, height) {
            draw_coin(&mut out, coin, screen_y, assets);
        }
    }

    draw_player(&mut out, &state.player, state.camera.to_screen(state.player.pos.y), assets);

    if options.particles {
        for particle in &state.particles {
            draw_particle(&mut out, particle, state.camera.to_screen(particle.pos.y));
        }
    }

    out
}

#[inline]
fn is_visible(screen_y: f32, height: f32) -> bool {
    screen_y > -VISIBILITY_MARGIN && screen_y < height + VISIBILITY_MARGIN
}

/// Hash-based jitter in `[-1, 1]`, stable for a given input
fn jitter(seed: u32) -> f32 {
    let mut h = seed.wrapping_mul(0x9E37_79B9);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}

fn platform_sprite(kind: PlatformKind) -> ImageAsset {
    match kind {
        PlatformKind::Normal => ImageAsset::TilePurple,
        PlatformKind::Moving => ImageAsset::TileYellow,
        PlatformKind::Breakable => ImageAsset::TileRed,
    }
}

fn platform_glow(kind: PlatformKind) -> Option<Glow> {
    match kind {
        PlatformKind::Normal => None,
        PlatformKind::Moving => Some(Glow {
            color: Rgba::hex(0x64ff64),
            blur: 15.0,
        }),
        PlatformKind::Breakable => Some(Glow {
            color: Rgba::hex(0xff6464),
            blur: 10.0,
        }),
    }
}

fn platform_gradient(kind: PlatformKind) -> (Rgba, Rgba) {
    match kind {
        PlatformKind::Normal => (Rgba::hex(0x8888ff), Rgba::hex(0x4444aa)),
        PlatformKind::Moving => (Rgba::hex(0x88ff88), Rgba::hex(0x44aa44)),
        PlatformKind::Breakable => (Rgba::hex(0xff8888), Rgba::hex(0xaa4444)),
    }
}

fn draw_platform<A: AssetView + ?Sized>(
    out: &mut Vec<DrawCmd>,
    platform: &Platform,
    screen_y: f32,
    assets: &A,
) {
    let mut rect = Rect::new(platform.pos.x, screen_y, platform.size.x, platform.size.y);
    let mut alpha = 1.0;

    if platform.broken && platform.break_timer > 0 {
        alpha = (1.0 - platform.break_timer as f32 / BREAK_FADE_TICKS).max(0.0);
        let key = platform.id.wrapping_mul(64).wrapping_add(platform.break_timer);
        rect = rect.offset(
            jitter(key) * BREAK_SHAKE,
            jitter(key ^ 0x5bd1_e995) * BREAK_SHAKE,
        );
    }

    let glow = platform_glow(platform.kind);
    let sprite = platform_sprite(platform.kind);

    if assets.image_size(sprite).is_some() {
        out.push(DrawCmd::Image {
            asset: sprite,
            src: None,
            dest: rect,
            alpha,
            mirrored: false,
            smoothing: true,
            glow,
        });
        return;
    }

    let (top, bottom) = platform_gradient(platform.kind);
    out.push(DrawCmd::FillRect {
        rect,
        paint: Paint::VerticalGradient(vec![(0.0, top), (1.0, bottom)]),
        alpha,
        glow,
    });
    out.push(DrawCmd::FillRect {
        rect: Rect::new(rect.x, rect.y, rect.w, 3.0),
        paint: Paint::Solid(HIGHLIGHT),
        alpha,
        glow,
    });
    out.push(DrawCmd::StrokeRect {
        rect,
        color: BORDER,
        line_width: 2.0,
        alpha,
    });
}

fn draw_coin<A: AssetView + ?Sized>(out: &mut Vec<DrawCmd>, coin: &Coin, screen_y: f32, assets: &A) {
    if assets.image_size(ImageAsset::Coin).is_some() {
        out.push(DrawCmd::Image {
            asset: ImageAsset::Coin,
            src: Some(Rect::new(
                coin.frame as f32 * COIN_FRAME_SIZE,
                0.0,
                COIN_FRAME_SIZE,
                COIN_FRAME_SIZE,
            )),
            dest: Rect::new(coin.pos.x, screen_y, coin.size.x, coin.size.y),
            alpha: 1.0,
            mirrored: false,
            smoothing: false,
            glow: Some(Glow {
                color: Rgba::GOLD,
                blur: 10.0,
            }),
        });
    } else {
        out.push(DrawCmd::Circle {
            center: Vec2::new(coin.pos.x + coin.size.x / 2.0, screen_y + coin.size.y / 2.0),
            radius: coin.size.x / 2.0,
            color: Rgba::GOLD,
            alpha: 1.0,
            glow: Some(Glow {
                color: Rgba::GOLD,
                blur: 8.0,
            }),
        });
    }
}

fn draw_player<A: AssetView + ?Sized>(
    out: &mut Vec<DrawCmd>,
    player: &Player,
    screen_y: f32,
    assets: &A,
) {
    let dest = Rect::new(player.pos.x, screen_y, player.size.x, player.size.y);
    if assets.image_size(ImageAsset::Astronaut).is_some() {
        out.push(DrawCmd::Image {
            asset: ImageAsset::Astronaut,
            src: Some(Rect::new(
                player.frame as f32 * ASTRONAUT_FRAME_SIZE,
                0.0,
                ASTRONAUT_FRAME_SIZE,
                ASTRONAUT_FRAME_SIZE,
            )),
            dest,
            alpha: 1.0,
            mirrored: player.facing == Facing::Left,
            smoothing: false,
            glow: None,
        });
    } else {
        out.push(DrawCmd::FillRect {
            rect: dest,
            paint: Paint::Solid(Rgba::WHITE),
            alpha: 1.0,
            glow: None,
        });
    }
}

fn draw_particle(out: &mut Vec<DrawCmd>, particle: &Particle, screen_y: f32) {
    let [r, g, b] = particle.color;
    let alpha = particle.alpha().clamp(0.0, 1.0);
    out.push(DrawCmd::Circle {
        center: Vec2::new(particle.pos.x, screen_y),
        radius: particle.size.max(0.5),
        color: Rgba::rgba(r, g, b, alpha),
        alpha,
        glow: None,
    });
}
