//! Canvas 2D backend: executes draw commands on a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{DrawCmd, Glow, Paint};
use crate::Rect;
use crate::assets::AssetStore;

/// Draws command lists onto the game canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Canvas was re-measured
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Execute a frame. Each command runs inside its own save/restore pair.
    pub fn render(&self, cmds: &[DrawCmd], assets: &AssetStore) {
        for cmd in cmds {
            self.ctx.save();
            if let Err(e) = self.execute(cmd, assets) {
                log::warn!("Draw command failed: {:?}", e);
            }
            self.ctx.restore();
        }
    }

    fn execute(&self, cmd: &DrawCmd, assets: &AssetStore) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear => {
                ctx.clear_rect(0.0, 0.0, self.width, self.height);
            }
            DrawCmd::FillRect {
                rect,
                paint,
                alpha,
                glow,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                self.apply_glow(glow);
                match paint {
                    Paint::Solid(color) => ctx.set_fill_style_str(&color.to_css()),
                    Paint::VerticalGradient(stops) => {
                        let gradient = ctx.create_linear_gradient(
                            rect.x as f64,
                            rect.y as f64,
                            rect.x as f64,
                            (rect.y + rect.h) as f64,
                        );
                        for (offset, color) in stops {
                            gradient.add_color_stop(*offset, &color.to_css())?;
                        }
                        ctx.set_fill_style_canvas_gradient(&gradient);
                    }
                }
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::StrokeRect {
                rect,
                color,
                line_width,
                alpha,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*line_width as f64);
                ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                alpha,
                glow,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                self.apply_glow(glow);
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCmd::Image {
                asset,
                src,
                dest,
                alpha,
                mirrored,
                smoothing,
                glow,
            } => {
                let Some(image) = assets.image(*asset) else {
                    return Ok(());
                };
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_image_smoothing_enabled(*smoothing);
                self.apply_glow(glow);

                // Mirror around the destination rect: flip the x axis and draw
                // at the reflected position
                let dest = if *mirrored {
                    ctx.scale(-1.0, 1.0)?;
                    Rect::new(-(dest.x + dest.w), dest.y, dest.w, dest.h)
                } else {
                    *dest
                };

                match src {
                    Some(src) => ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            image,
                            src.x as f64,
                            src.y as f64,
                            src.w as f64,
                            src.h as f64,
                            dest.x as f64,
                            dest.y as f64,
                            dest.w as f64,
                            dest.h as f64,
                        )?,
                    None => ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        dest.x as f64,
                        dest.y as f64,
                        dest.w as f64,
                        dest.h as f64,
                    )?,
                }
            }
        }
        Ok(())
    }

    fn apply_glow(&self, glow: &Option<Glow>) {
        if let Some(glow) = glow {
            self.ctx.set_shadow_color(&glow.color.to_css());
            self.ctx.set_shadow_blur(glow.blur as f64);
        }
    }
}
