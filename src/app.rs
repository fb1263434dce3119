use eframe::egui;

use crate::state::{AppState, DEFAULT_DATA_PATH};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PropViewApp {
    pub state: AppState,
}

impl Default for PropViewApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl PropViewApp {
    /// Create the app and attempt the default dataset load.
    pub fn startup() -> Self {
        let mut app = Self::default();
        app.state.load_from_path(std::path::Path::new(DEFAULT_DATA_PATH));
        app
    }
}

impl eframe::App for PropViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the scrollable dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &self.state);
        });
    }
}
