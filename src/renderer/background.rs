//! Backdrop: parallax space image (or gradient), twinkling stars and dust

use glam::Vec2;

use super::{AssetView, DrawCmd, Paint, RenderOptions, Rgba};
use crate::Rect;
use crate::assets::ImageAsset;

/// Points per background change
const PHASE_POINTS: u64 = 300;
const BACKGROUND_PARALLAX: f32 = 0.3;
const STAR_PARALLAX: f32 = 0.1;
const DUST_PARALLAX: f32 = 0.02;

const DUST_COLOR: Rgba = Rgba::rgba(200, 200, 255, 0.4);

/// Background image for the current score: cycles every 300 points
pub fn background_for_score(score: u64) -> ImageAsset {
    match (score / PHASE_POINTS) % 3 {
        0 => ImageAsset::Background,
        1 => ImageAsset::Space2,
        _ => ImageAsset::Space3,
    }
}

/// Space image tiled vertically with parallax, or the fallback gradient
pub fn background<A: AssetView + ?Sized>(
    out: &mut Vec<DrawCmd>,
    assets: &A,
    score: u64,
    camera_y: f32,
    width: f32,
    height: f32,
) {
    let asset = background_for_score(score);
    let size = assets
        .image_size(asset)
        .filter(|(w, h)| *w > 0.0 && *h > 0.0);

    let Some((iw, ih)) = size else {
        out.push(DrawCmd::FillRect {
            rect: Rect::new(0.0, 0.0, width, height),
            paint: Paint::VerticalGradient(vec![
                (0.0, Rgba::hex(0x0f0f23)),
                (0.5, Rgba::hex(0x1a1a2e)),
                (1.0, Rgba::hex(0x16213e)),
            ]),
            alpha: 1.0,
            glow: None,
        });
        return;
    };

    let scale = (width / iw).max(height / ih);
    let (sw, sh) = (iw * scale, ih * scale);
    let offset = if height > 0.0 {
        (camera_y * BACKGROUND_PARALLAX) % height
    } else {
        0.0
    };

    let mut y = -sh;
    while y <= height + sh {
        out.push(DrawCmd::Image {
            asset,
            src: None,
            dest: Rect::new((width - sw) / 2.0, y + offset, sw, sh),
            alpha: 1.0,
            mirrored: false,
            smoothing: true,
            glow: None,
        });
        y += sh;
    }
}

/// Twinkling white stars, drifting slowly with the camera
pub fn stars(
    out: &mut Vec<DrawCmd>,
    count: usize,
    camera_y: f32,
    width: f32,
    height: f32,
    time_ms: f64,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let band = height * 3.0;
    for i in 0..count {
        let fi = i as f32;
        let t = time_ms as f32;
        let x = (fi * 37.0) % width;
        let y = ((fi * 73.0) % band + camera_y * STAR_PARALLAX) % band;
        let radius = ((t * 0.001 + fi).sin() * 1.5 + (i % 3) as f32 + 1.0).max(0.5);
        let alpha = ((t * 0.002 + fi).sin() * 0.3 + 0.7).clamp(0.1, 1.0);
        out.push(DrawCmd::Circle {
            center: Vec2::new(x, y),
            radius,
            color: Rgba::WHITE,
            alpha,
            glow: None,
        });
    }
}

/// Faint dust motes drifting sideways over time
pub fn dust(
    out: &mut Vec<DrawCmd>,
    count: usize,
    camera_y: f32,
    width: f32,
    height: f32,
    time_ms: f64,
) {
    if height <= 0.0 {
        return;
    }
    let wrap_x = width + 100.0;
    let band = height * 2.0;
    for i in 0..count {
        let fi = i as f32;
        // Keep the large clock term in f64 before wrapping
        let x = ((i as f64 * 67.0 + time_ms * 0.01) % wrap_x as f64) as f32;
        let y = (fi * 89.0 + camera_y * DUST_PARALLAX) % band;
        let radius = (((time_ms * 0.003) as f32 + fi).sin() * 2.0 + 2.0).max(0.5);
        out.push(DrawCmd::Circle {
            center: Vec2::new(x, y),
            radius,
            color: DUST_COLOR,
            alpha: 1.0,
            glow: None,
        });
    }
}

/// Whole backdrop in draw order
#[allow(clippy::too_many_arguments)]
pub fn backdrop<A: AssetView + ?Sized>(
    out: &mut Vec<DrawCmd>,
    assets: &A,
    options: &RenderOptions,
    score: u64,
    camera_y: f32,
    width: f32,
    height: f32,
    time_ms: f64,
) {
    background(out, assets, score, camera_y, width, height);
    stars(out, options.star_count, camera_y, width, height, time_ms);
    dust(out, options.dust_count, camera_y, width, height, time_ms);
}
