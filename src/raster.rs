use crate::config::{Color, Rect};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::f64::consts::TAU;

// ============================================================================
// CANVAS
// ============================================================================

/// RGBA8 frame buffer view, row-major
pub struct Canvas<'a> {
    pub frame: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(frame.len(), width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(canvas: &mut Canvas, x: i32, y: i32, color: Color, alpha: f32) {
    if x < 0 || y < 0 || x as usize >= canvas.width || y as usize >= canvas.height {
        return;
    }
    let idx = (y as usize * canvas.width + x as usize) * 4;
    let frame = &mut *canvas.frame;
    let a = alpha.clamp(0.0, 1.0);
    let src = [color.r as f32, color.g as f32, color.b as f32];
    let dst = [frame[idx] as f32, frame[idx + 1] as f32, frame[idx + 2] as f32];
    let out = [
        (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
        (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
        (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
        0xff,
    ];
    frame[idx..idx + 4].copy_from_slice(&out);
}

/// Pixel box around a sector: its center, both arc ends and every axis
/// crossing inside the sweep, padded for the anti-aliased rim.
fn sector_bounds(radius: f64, start_angle: f64, sweep: f64) -> (i32, i32, i32, i32) {
    if sweep >= TAU {
        let r = radius.ceil() as i32 + 1;
        return (-r, r, -r, r);
    }
    let ends = [start_angle, start_angle + sweep];
    let axes = (0..4)
        .map(|k| k as f64 * TAU / 4.0)
        .filter(|axis| (axis - start_angle).rem_euclid(TAU) < sweep);

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for angle in ends.into_iter().chain(axes) {
        let (x, y) = (radius * angle.cos(), radius * angle.sin());
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (
        min_x.floor() as i32 - 1,
        max_x.ceil() as i32 + 1,
        min_y.floor() as i32 - 1,
        max_y.ceil() as i32 + 1,
    )
}

/// Pie slice from `start_angle` sweeping `sweep` radians, angles growing
/// clockwise on screen. Only the sector's own box is scanned.
pub fn fill_sector(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    radius: i32,
    start_angle: f64,
    sweep: f64,
    color: Color,
) {
    let full_circle = sweep >= TAU;
    let (left, right, top, bottom) = sector_bounds(radius as f64 + 1.0, start_angle, sweep);
    let x_range = (cx + left).max(0)..=(cx + right).min(canvas.width as i32 - 1);
    let y_range = (cy + top).max(0)..=(cy + bottom).min(canvas.height as i32 - 1);

    for y in y_range {
        for x in x_range.clone() {
            let (dx, dy) = ((x - cx) as f64, (y - cy) as f64);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius as f64 + 1.0 {
                continue;
            }
            if !full_circle {
                let angle = dy.atan2(dx);
                if (angle - start_angle).rem_euclid(TAU) >= sweep {
                    continue;
                }
            }
            let aa = if dist > radius as f64 {
                1.0 - (dist - radius as f64).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                set_pixel(canvas, x, y, color, aa as f32);
            }
        }
    }
}

/// Ring of `width` px whose outer edge sits `outer_radius` px from the center.
pub fn stroke_ring(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    outer_radius: f64,
    width: f64,
    color: Color,
) {
    let inner_radius = outer_radius - width;
    let r = outer_radius.ceil() as i32 + 1;
    for y in (cy - r).max(0)..=(cy + r).min(canvas.height as i32 - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(canvas.width as i32 - 1) {
            let (dx, dy) = ((x - cx) as f64, (y - cy) as f64);
            let dist = (dx * dx + dy * dy).sqrt();
            let outer = (outer_radius + 0.5 - dist).clamp(0.0, 1.0);
            let inner = (dist - inner_radius + 0.5).clamp(0.0, 1.0);
            let aa = outer.min(inner);
            if aa > 0.0 {
                set_pixel(canvas, x, y, color, aa as f32);
            }
        }
    }
}

pub fn fill_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Color) {
    fill_sector(canvas, cx, cy, radius, 0.0, TAU, color);
}

pub fn fill_triangle(canvas: &mut Canvas, points: [(f64, f64); 3], color: Color) {
    let (min_x, max_x) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
    let (min_y, max_y) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

    // Winding decides which side of each edge counts as inside.
    let [a, b, c] = points;
    let area = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
    if area == 0.0 {
        return;
    }
    let sign = area.signum();
    let edges = [(a, b), (b, c), (c, a)];

    for y in (min_y.floor() as i32 - 1)..=(max_y.ceil() as i32 + 1) {
        for x in (min_x.floor() as i32 - 1)..=(max_x.ceil() as i32 + 1) {
            let (px, py) = (x as f64, y as f64);
            let inside_dist = edges
                .iter()
                .map(|(p0, p1)| {
                    let (ex, ey) = (p1.0 - p0.0, p1.1 - p0.1);
                    let len = (ex * ex + ey * ey).sqrt();
                    sign * (ex * (py - p0.1) - ey * (px - p0.0)) / len
                })
                .fold(f64::MAX, f64::min);
            let aa = (inside_dist + 0.5).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(canvas, x, y, color, aa as f32);
            }
        }
    }
}

pub fn fill_rect(canvas: &mut Canvas, rect: Rect, color: Color) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            set_pixel(canvas, x, y, color, 1.0);
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

fn layout_glyphs<'f>(text: &str, font: &Font<'f>, scale: Scale) -> Vec<PositionedGlyph<'f>> {
    font.layout(text, scale, point(0.0, 0.0)).collect()
}

/// Pen advance of a laid-out string, in pixels.
pub fn text_advance(text: &str, font: &Font, scale: Scale) -> f64 {
    let glyphs = layout_glyphs(text, font, scale);
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => (last.position().x - first.position().x
            + last.unpositioned().h_metrics().advance_width) as f64,
        _ => 0.0,
    }
}

/// Horizontal text, vertically centered on `y`. `x` is the left edge or the
/// center depending on `align`.
pub fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
    align: TextAlign,
) {
    draw_text_runs(canvas, x, y, &[(text, color)], font, scale, align);
}

/// Several differently colored pieces of text set on one line, aligned as a
/// whole.
pub fn draw_text_runs(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    runs: &[(&str, Color)],
    font: &Font,
    scale: Scale,
    align: TextAlign,
) {
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0;
    let total: f64 = runs
        .iter()
        .map(|(text, _)| text_advance(text, font, scale))
        .sum();
    let mut pen = match align {
        TextAlign::Left => x as f64,
        TextAlign::Center => x as f64 - total / 2.0,
    };

    for (text, color) in runs {
        for glyph in font.layout(text, scale, point(pen as f32, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    set_pixel(canvas, bb.min.x + gx as i32, bb.min.y + gy as i32, *color, v);
                });
            }
        }
        pen += text_advance(text, font, scale);
    }
}

/// Text rotated about (`cx`, `cy`) by `angle`, right-aligned so it ends
/// `end_radius` px from the center with its baseline `baseline` px below the
/// ray, so every label hugs the rim whatever its length.
pub fn draw_radial_text(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    angle: f64,
    end_radius: f64,
    baseline: f64,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
) {
    let glyphs = layout_glyphs(text, font, scale);
    if glyphs.is_empty() {
        return;
    }
    let start_x = end_radius - text_advance(text, font, scale);
    let (cos_r, sin_r) = (angle.cos(), angle.sin());

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                if v > 0.001 {
                    // position in the label's own frame, x along the ray
                    let local_x = start_x + (bb.min.x + gx as i32) as f64;
                    let local_y = baseline + (bb.min.y + gy as i32) as f64;

                    let final_x = cx as f64 + local_x * cos_r - local_y * sin_r;
                    let final_y = cy as f64 + local_x * sin_r + local_y * cos_r;
                    draw_antialiased_pixel(canvas, final_x, final_y, color, v);
                }
            });
        }
    }
}

fn draw_antialiased_pixel(canvas: &mut Canvas, x: f64, y: f64, color: Color, alpha: f32) {
    let x_floor = x.floor() as i32;
    let y_floor = y.floor() as i32;
    let x_frac = x - x_floor as f64;
    let y_frac = y - y_floor as f64;

    // Spread across the 4 nearest pixels with bilinear weights
    let samples = [
        (x_floor, y_floor, (1.0 - x_frac) * (1.0 - y_frac)),
        (x_floor + 1, y_floor, x_frac * (1.0 - y_frac)),
        (x_floor, y_floor + 1, (1.0 - x_frac) * y_frac),
        (x_floor + 1, y_floor + 1, x_frac * y_frac),
    ];

    for (px, py, weight) in samples {
        let final_alpha = alpha * weight as f32;
        if final_alpha > 0.001 {
            set_pixel(canvas, px, py, color, final_alpha);
        }
    }
}
