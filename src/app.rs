use std::path::PathBuf;
use std::time::Instant;

use eframe::egui;

use care_directory::config::AppConfig;
use care_directory::nav::Route;

use crate::state::AppState;
use crate::ui::{cards, detail, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CareDirectoryApp {
    pub state: AppState,
}

impl CareDirectoryApp {
    /// Build the app, loading `dataset` (or the configured one) and jumping to
    /// `location` when given.
    pub fn new(config: AppConfig, dataset: Option<PathBuf>, location: Option<&str>) -> Self {
        let dataset = dataset.or_else(|| config.dataset.clone());
        let mut state = AppState::new(config);

        if let Some(path) = dataset {
            state.load_path(&path);
        }

        if let Some(location) = location {
            match Route::from_location(location) {
                Some(route) => state.navigate(route),
                None => log::warn!("Ignoring unknown location '{location}'"),
            }
        }

        Self { state }
    }

    fn handle_navigation_keys(&mut self, ctx: &egui::Context) {
        let (back, forward) = ctx.input(|i| {
            (
                (i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft))
                    || i.pointer.button_pressed(egui::PointerButton::Extra1),
                (i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight))
                    || i.pointer.button_pressed(egui::PointerButton::Extra2),
            )
        });
        if back {
            self.state.go_back();
        } else if forward {
            self.state.go_forward();
        }
    }
}

impl eframe::App for CareDirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Debounced search: re-filter once typing settles.
        if let Some(wait) = self.state.tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
        self.handle_navigation_keys(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        let route = self.state.route().clone();

        // ---- Left side panel: filters ----
        if matches!(route, Route::Browse | Route::List) {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: current view ----
        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Browse => cards::browse_view(ui, &mut self.state),
            Route::List => cards::list_view(ui, &mut self.state),
            Route::Search => cards::search_view(ui, &mut self.state),
            Route::Alphabet { letter } => cards::alphabet_view(ui, &mut self.state, letter),
            Route::Detail { .. } => detail::detail_view(ui, &mut self.state),
        });
    }
}
