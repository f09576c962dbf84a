use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, Runtime};

use super::screen::PlayScreen;

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(screen: PlayScreen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &PlayScreen {
        &self.screen
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        runtime.set_tick_rate(Some(FPS));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
