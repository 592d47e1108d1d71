use crate::config::{Color, Rect, RouletteConfig};
use crate::geometry::{color_for_index, slice_arc, slice_bounds};
use crate::raster::{
    draw_radial_text, draw_text, draw_text_runs, fill_circle, fill_rect, fill_sector,
    fill_triangle, stroke_ring, Canvas, TextAlign,
};
use rusttype::{Font, Scale};

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Disc {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
    },
    Slice {
        index: usize,
        cx: i32,
        cy: i32,
        radius: i32,
        start_angle: f64,
        sweep: f64,
        color: Color,
    },
    RadialLabel {
        cx: i32,
        cy: i32,
        angle: f64,
        end_radius: f64,
        baseline: f64,
        text: String,
        font_size: f32,
        color: Color,
    },
    Ring {
        cx: i32,
        cy: i32,
        outer_radius: f64,
        width: f64,
        color: Color,
    },
    Triangle {
        points: [(f64, f64); 3],
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: f32,
        color: Color,
        align: TextAlign,
    },
    /// One line made of differently colored pieces.
    TextRuns {
        x: i32,
        y: i32,
        runs: Vec<(String, Color)>,
        font_size: f32,
        align: TextAlign,
    },
}

impl DrawCommand {
    fn is_text(&self) -> bool {
        matches!(
            self,
            Self::RadialLabel { .. } | Self::Text { .. } | Self::TextRuns { .. }
        )
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn slice_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Slice { .. }))
            .count()
    }

    /// Rasterizes every command in order. Text is skipped without a font.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in &self.commands {
            if command.is_text() && font.is_none() {
                continue;
            }
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Disc {
                    cx,
                    cy,
                    radius,
                    color,
                } => fill_circle(canvas, *cx, *cy, *radius, *color),
                DrawCommand::Slice {
                    cx,
                    cy,
                    radius,
                    start_angle,
                    sweep,
                    color,
                    ..
                } => fill_sector(canvas, *cx, *cy, *radius, *start_angle, *sweep, *color),
                DrawCommand::RadialLabel {
                    cx,
                    cy,
                    angle,
                    end_radius,
                    baseline,
                    text,
                    font_size,
                    color,
                } => {
                    if let Some(font) = font {
                        draw_radial_text(
                            canvas,
                            *cx,
                            *cy,
                            *angle,
                            *end_radius,
                            *baseline,
                            text,
                            font,
                            Scale::uniform(*font_size),
                            *color,
                        );
                    }
                }
                DrawCommand::Ring {
                    cx,
                    cy,
                    outer_radius,
                    width,
                    color,
                } => stroke_ring(canvas, *cx, *cy, *outer_radius, *width, *color),
                DrawCommand::Triangle { points, color } => fill_triangle(canvas, *points, *color),
                DrawCommand::Rect { rect, color } => fill_rect(canvas, *rect, *color),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                    align,
                } => {
                    if let Some(font) = font {
                        draw_text(
                            canvas,
                            *x,
                            *y,
                            text,
                            font,
                            Scale::uniform(*font_size),
                            *color,
                            *align,
                        );
                    }
                }
                DrawCommand::TextRuns {
                    x,
                    y,
                    runs,
                    font_size,
                    align,
                } => {
                    if let Some(font) = font {
                        let runs: Vec<(&str, Color)> =
                            runs.iter().map(|(text, color)| (text.as_str(), *color)).collect();
                        draw_text_runs(
                            canvas,
                            *x,
                            *y,
                            &runs,
                            font,
                            Scale::uniform(*font_size),
                            *align,
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// WHEEL
// ============================================================================

/// Appends the wheel (slices, labels, border ring, hub, pointer) for `names`
/// turned by `rotation`. An empty list gives a plain disc with ring, hub and
/// pointer.
pub fn render_wheel(scene: &mut Scene, config: &RouletteConfig, names: &[String], rotation: f64) {
    let layout = config.layout();

    if names.is_empty() {
        scene.add_command(DrawCommand::Disc {
            cx: layout.cx,
            cy: layout.cy,
            radius: layout.radius,
            color: config.empty_wheel_color,
        });
    } else {
        let arc = slice_arc(names.len());
        for (index, name) in names.iter().enumerate() {
            let (start_angle, _) = slice_bounds(index, names.len(), rotation);
            scene.add_command(DrawCommand::Slice {
                index,
                cx: layout.cx,
                cy: layout.cy,
                radius: layout.radius,
                start_angle,
                sweep: arc,
                color: color_for_index(index),
            });
            scene.add_command(DrawCommand::RadialLabel {
                cx: layout.cx,
                cy: layout.cy,
                angle: start_angle + arc / 2.0,
                end_radius: layout.label_radius,
                baseline: layout.label_baseline,
                text: name.clone(),
                font_size: layout.label_font_size,
                color: config.label_color,
            });
        }
    }

    scene.add_command(DrawCommand::Ring {
        cx: layout.cx,
        cy: layout.cy,
        outer_radius: layout.ring_radius,
        width: config.ring_width,
        color: config.ring_color,
    });

    // Hub
    scene.add_command(DrawCommand::Disc {
        cx: layout.cx,
        cy: layout.cy,
        radius: layout.hub_radius,
        color: config.hub_color,
    });

    // Pointer, fixed at angle 0
    scene.add_command(DrawCommand::Triangle {
        points: layout.pointer,
        color: config.pointer_color,
    });
}

/// Clears the canvas and draws only the wheel.
pub fn render(
    canvas: &mut Canvas,
    config: &RouletteConfig,
    font: Option<&Font>,
    names: &[String],
    rotation: f64,
) {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));
    render_wheel(&mut scene, config, names, rotation);
    scene.render(canvas, font);
}

// ============================================================================
// PANEL
// ============================================================================

/// What the controls under the wheel show for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PanelState<'a> {
    pub input: &'a str,
    pub can_spin: bool,
    pub spinning: bool,
    pub winner: Option<&'a str>,
}

pub fn render_panel(scene: &mut Scene, config: &RouletteConfig, panel: PanelState) {
    let layout = config.layout();
    let input = layout.input_box;

    scene.add_command(DrawCommand::Rect {
        rect: input,
        color: config.input_color,
    });
    let (text, color) = if panel.input.is_empty() {
        (config.placeholder.clone(), config.placeholder_color)
    } else {
        (panel.input.to_string(), config.input_text_color)
    };
    scene.add_command(DrawCommand::Text {
        x: input.x + 8,
        y: input.y + input.height / 2,
        text,
        font_size: config.panel_font_size,
        color,
        align: TextAlign::Left,
    });

    let button = layout.spin_button;
    scene.add_command(DrawCommand::Rect {
        rect: button,
        color: if panel.can_spin {
            config.button_color
        } else {
            config.button_disabled_color
        },
    });
    let (bx, by) = button.center();
    scene.add_command(DrawCommand::Text {
        x: bx,
        y: by,
        text: if panel.spinning { "Spinning..." } else { "Spin" }.to_string(),
        font_size: config.panel_font_size,
        color: config.panel_text_color,
        align: TextAlign::Center,
    });

    if let Some(winner) = panel.winner {
        scene.add_command(DrawCommand::TextRuns {
            x: bx,
            y: layout.winner_y,
            runs: vec![
                ("Winner: ".to_string(), config.panel_text_color),
                (winner.to_string(), config.winner_name_color),
            ],
            font_size: config.winner_font_size,
            align: TextAlign::Center,
        });
    }
}

/// Full window frame: background, wheel and controls.
pub fn render_frame(
    canvas: &mut Canvas,
    config: &RouletteConfig,
    font: Option<&Font>,
    names: &[String],
    rotation: f64,
    panel: PanelState,
) {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));
    render_wheel(&mut scene, config, names, rotation);
    render_panel(&mut scene, config, panel);
    scene.render(canvas, font);
}
