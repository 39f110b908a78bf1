use ratatui::Frame;

use crate::{
    ui::{GameView, Menu},
    App, AppState,
};

/// A UI Screen boundary: one per app state
pub trait Screen {
    fn render(&mut self, app: &mut App, f: &mut Frame);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&mut self, app: &mut App, f: &mut Frame) {
        f.render_widget(
            Menu {
                selection: app.menu_selection,
                notice: app.notice.as_deref(),
            },
            f.area(),
        );
    }
}

pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&mut self, app: &mut App, f: &mut Frame) {
        match app.game.as_ref() {
            Some(game) => f.render_widget(GameView { game }, f.area()),
            // Nothing to show without a session; fall back to the picker.
            None => MenuScreen.render(app, f),
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Game => Box::new(GameScreen),
    }
}
