use crate::config::RouletteConfig;
use crate::controller::{Controller, SpinOutcome};
use crate::raster::Canvas;
use crate::render::{render_frame, PanelState};
use crate::RouletteCommand;
use rand::rngs::StdRng;
use rand::Rng;
use rusttype::Font;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// Host-side state: the controller plus the text entry and button around it.
#[derive(Debug)]
pub struct AppState<R = StdRng> {
    controller: Controller<R>,
    input: String,
}

impl<R: Rng> AppState<R> {
    pub fn new(controller: Controller<R>) -> Self {
        Self {
            controller,
            input: String::new(),
        }
    }

    pub fn controller(&self) -> &Controller<R> {
        &self.controller
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn type_text(&mut self, text: &str) {
        self.input.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Enter key: commits the typed name, or spins when nothing is typed.
    pub fn submit(&mut self, now: Instant) {
        if self.input.is_empty() {
            self.request_spin(now);
            return;
        }
        let name = std::mem::take(&mut self.input);
        self.controller.add_name(&name);
    }

    /// Mouse press at frame coordinates.
    pub fn click(&mut self, x: f64, y: f64, config: &RouletteConfig, now: Instant) {
        if config.layout().spin_button.contains(x, y) {
            self.request_spin(now);
        }
    }

    pub fn request_spin(&mut self, now: Instant) -> SpinOutcome {
        self.controller.start_spin(now)
    }

    pub fn apply(&mut self, command: RouletteCommand, now: Instant) {
        match command {
            RouletteCommand::AddName(name) => {
                self.controller.add_name(&name);
            }
            RouletteCommand::Spin => {
                self.request_spin(now);
            }
        }
    }

    pub fn drain_commands(&mut self, receiver: &Receiver<RouletteCommand>, now: Instant) {
        // Take everything queued without blocking the frame
        while let Ok(command) = receiver.try_recv() {
            self.apply(command, now);
        }
    }

    /// Advances any running spin. Returns `true` when the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(now).is_some()
    }

    pub fn panel(&self) -> PanelState<'_> {
        PanelState {
            input: &self.input,
            can_spin: self.controller.can_spin(),
            spinning: self.controller.is_spinning(),
            winner: self.controller.winner(),
        }
    }

    pub fn render(&self, canvas: &mut Canvas, config: &RouletteConfig, font: Option<&Font>) {
        render_frame(
            canvas,
            config,
            font,
            self.controller.names(),
            self.controller.rotation(),
            self.panel(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn app() -> AppState {
        AppState::new(Controller::seeded(3))
    }

    #[test]
    fn test_typing_and_enter_adds_name() {
        let mut app = app();
        let now = Instant::now();
        app.type_text("Ali");
        app.type_text("ce\r");
        assert_eq!(app.input(), "Alice");
        app.submit(now);
        assert_eq!(app.input(), "");
        assert_eq!(app.controller().names(), ["Alice"]);

        app.type_text("Bo");
        app.backspace();
        app.backspace();
        app.backspace();
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_enter_on_empty_input_spins() {
        let mut app = app();
        let now = Instant::now();
        app.submit(now);
        assert!(!app.controller().is_spinning());
        assert!(app.controller().names().is_empty());

        app.apply(RouletteCommand::AddName("Bob".into()), now);
        app.submit(now);
        assert!(app.controller().is_spinning());
    }

    #[test]
    fn test_button_click_spins_only_inside() {
        let config = RouletteConfig::default();
        let button = config.layout().spin_button;
        let mut app = app();
        let now = Instant::now();
        app.apply(RouletteCommand::AddName("A".into()), now);

        app.click(0.0, 0.0, &config, now);
        assert!(!app.controller().is_spinning());

        let (bx, by) = button.center();
        app.click(bx as f64, by as f64, &config, now);
        assert!(app.controller().is_spinning());
        assert!(!app.panel().can_spin);
        assert!(app.panel().spinning);
    }

    #[test]
    fn test_commands_from_channel() {
        let (tx, rx) = mpsc::channel();
        let mut app = app();
        let t0 = Instant::now();
        tx.send(RouletteCommand::AddName("X".into())).unwrap();
        tx.send(RouletteCommand::AddName("Y".into())).unwrap();
        tx.send(RouletteCommand::Spin).unwrap();
        app.drain_commands(&rx, t0);
        assert_eq!(app.controller().names(), ["X", "Y"]);
        assert!(app.controller().is_spinning());

        assert!(app.tick(t0 + Duration::from_millis(500)));
        assert!(app.tick(t0 + Duration::from_secs(4)));
        assert!(!app.tick(t0 + Duration::from_secs(5)));
        let winner = app.panel().winner.map(str::to_string);
        assert!(matches!(winner.as_deref(), Some("X") | Some("Y")));
    }

    #[test]
    fn test_render_full_frame_without_font() {
        let config = RouletteConfig::default();
        let (w, h) = (config.window_width(), config.window_height());
        let mut frame = vec![0; w * h * 4];
        let mut canvas = Canvas::new(&mut frame, w, h);
        let mut app = app();
        app.apply(RouletteCommand::AddName("A".into()), Instant::now());
        app.render(&mut canvas, &config, None);

        let button = config.layout().spin_button;
        let (bx, by) = button.center();
        assert_eq!(canvas.pixel(bx as usize, by as usize), Some(config.button_color));
    }
}
