use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for wheel and panel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// APPLICATION CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct RouletteConfig {
    #[builder(default = "Roulette Wheel".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 300)]
    pub wheel_size: usize,
    #[builder(default = 130)]
    pub panel_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Wheel configuration
    #[builder(default = 10)]
    pub rim_margin: i32,
    #[builder(default = 40)]
    pub hub_radius: i32,
    #[builder(default = 16.0)]
    pub label_font_size: f32,
    #[builder(default = 10.0)]
    pub label_inset: f64,
    #[builder(default = 5.0)]
    pub label_baseline: f64,

    // Pointer configuration
    #[builder(default = 10.0)]
    pub pointer_overhang: f64,
    #[builder(default = 20.0)]
    pub pointer_depth: f64,
    #[builder(default = 15.0)]
    pub pointer_half_width: f64,

    // Border ring hugging the wheel area
    #[builder(default = 2.0)]
    pub ring_width: f64,

    // Panel configuration
    #[builder(default = 16.0)]
    pub panel_font_size: f32,
    #[builder(default = 22.0)]
    pub winner_font_size: f32,
    #[builder(default = "Enter a name and press Enter".to_string())]
    pub placeholder: String,

    // Colors
    #[builder(default = Color::from_hex(0x6264A7))]
    pub background_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub label_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub hub_color: Color,
    #[builder(default = Color::from_hex(0x333333))]
    pub pointer_color: Color,
    #[builder(default = Color::from_hex(0x464775))]
    pub empty_wheel_color: Color,
    #[builder(default = Color::from_hex(0x36A2EB))]
    pub button_color: Color,
    #[builder(default = Color::from_hex(0x8A8C99))]
    pub button_disabled_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub input_color: Color,
    #[builder(default = Color::from_hex(0x222222))]
    pub input_text_color: Color,
    #[builder(default = Color::from_hex(0x9A9A9A))]
    pub placeholder_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub panel_text_color: Color,
    #[builder(default = Color::from_hex(0x36A2EB))]
    pub winner_name_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub ring_color: Color,

    // Font configuration, searched in the usual system locations when unset
    pub font_path: Option<PathBuf>,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RouletteConfig {
    pub fn window_width(&self) -> usize {
        self.wheel_size
    }

    pub fn window_height(&self) -> usize {
        self.wheel_size + self.panel_height
    }

    /// Time between redraws. Rates below one frame per second count as one.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.max_framerate.max(1.0))
    }

    pub fn layout(&self) -> WheelLayout {
        WheelLayout::new(self)
    }
}

// ============================================================================
// DERIVED GEOMETRY
// ============================================================================

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && x < (self.x + self.width) as f64
            && y >= self.y as f64
            && y < (self.y + self.height) as f64
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Pixel positions of everything drawn in a frame, derived from the config
#[derive(Debug, Clone)]
pub struct WheelLayout {
    pub cx: i32,
    pub cy: i32,
    pub radius: i32,
    pub hub_radius: i32,
    pub label_radius: f64,
    pub label_baseline: f64,
    pub label_font_size: f32,
    /// Outer edge of the border ring.
    pub ring_radius: f64,
    /// Tip first, then the two base corners.
    pub pointer: [(f64, f64); 3],
    pub input_box: Rect,
    pub spin_button: Rect,
    pub winner_y: i32,
}

impl WheelLayout {
    fn new(config: &RouletteConfig) -> Self {
        let center = config.wheel_size as i32 / 2;
        let radius = center - config.rim_margin;
        let (cx, cy) = (center, center);
        let rim = cx as f64 + radius as f64;
        let pointer = [
            (rim + config.pointer_overhang, cy as f64),
            (rim - config.pointer_depth, cy as f64 - config.pointer_half_width),
            (rim - config.pointer_depth, cy as f64 + config.pointer_half_width),
        ];

        let panel_top = config.wheel_size as i32;
        let width = config.wheel_size as i32;
        let input_box = Rect::new(20, panel_top + 8, width - 40, 32);
        let spin_button = Rect::new(width / 2 - 60, panel_top + 50, 120, 32);

        Self {
            cx,
            cy,
            radius,
            hub_radius: config.hub_radius,
            label_radius: radius as f64 - config.label_inset,
            label_baseline: config.label_baseline,
            label_font_size: config.label_font_size,
            ring_radius: config.wheel_size as f64 / 2.0,
            pointer,
            input_box,
            spin_button,
            winner_y: panel_top + 108,
        }
    }
}
