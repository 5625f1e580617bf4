use std::time::Instant;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use care_directory::data::facets;
use care_directory::data::filter::SelectionMode;
use care_directory::data::model::FacetCategory;
use care_directory::nav::Route;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel used by the browse and list views.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let facet_index = dataset.facets.clone();
    let counts: Vec<_> = FacetCategory::ALL
        .iter()
        .map(|&category| {
            facets::counts(&dataset.resources, category)
                .into_iter()
                .map(|(value, n)| (value.to_string(), n))
                .collect::<std::collections::BTreeMap<_, _>>()
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            search_box(ui, state);
            ui.separator();

            if facet_index.is_empty() {
                ui.label(RichText::new("No filter values in this dataset.").italics());
                return;
            }

            // ---- Condition (single select) ----
            ui.strong("Condition");
            let current = state
                .filter
                .selected_condition()
                .unwrap_or("Choose Condition")
                .to_string();
            let mut picked: Option<Option<String>> = None;
            egui::ComboBox::from_id_salt("condition_filter")
                .selected_text(current)
                .width(ui.available_width() - 8.0)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.filter.selected_condition().is_none(), "Any")
                        .clicked()
                    {
                        picked = Some(None);
                    }
                    for condition in &facet_index.conditions {
                        let is_selected =
                            state.filter.selected_condition() == Some(condition.as_str());
                        if ui.selectable_label(is_selected, condition).clicked() {
                            picked = Some(Some(condition.clone()));
                        }
                    }
                });
            if let Some(condition) = picked {
                state.set_condition(condition);
            }
            ui.separator();

            // ---- Facet bubbles ----
            for (category, counts) in FacetCategory::ALL.into_iter().zip(&counts) {
                let values = facet_index.values(category);
                if values.is_empty() {
                    continue;
                }
                let n_selected = state.filter.selected_values(category).len();
                let hint = match state.filter.mode(category) {
                    SelectionMode::Single => "",
                    SelectionMode::Multi => "  (any of)",
                };
                egui::CollapsingHeader::new(
                    RichText::new(format!("{category}  ({n_selected}/{}){hint}", values.len()))
                        .strong(),
                )
                .id_salt(category)
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal_wrapped(|ui: &mut Ui| {
                        for value in values {
                            let n = counts.get(value).copied().unwrap_or(0);
                            let mut text = RichText::new(format!("{value} ({n})"));
                            if category == FacetCategory::Region {
                                text = text.color(state.region_colors.color_for(value));
                            }
                            let selected = state.filter.is_selected(category, value);
                            if ui.selectable_label(selected, text).clicked() {
                                state.toggle_facet(category, value);
                            }
                        }
                    });
                });
            }

            ui.separator();
            if ui.button("Clear filters").clicked() {
                state.clear_filters();
            }
        });
}

/// Search box with name autocomplete. Browse debounces, list filters at once.
fn search_box(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Search");
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.filter.search_text)
            .hint_text("Name or keyword…")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        on_search_changed(state);
    }

    let mut chosen: Option<String> = None;
    let suggestions = state.autocomplete();
    // Hide the list once the box holds exactly the one suggested name.
    if !(suggestions.len() == 1 && suggestions[0] == state.filter.search_text) {
        for name in suggestions {
            if ui.small_button(name).clicked() {
                chosen = Some(name.to_string());
            }
        }
    }
    if let Some(name) = chosen {
        state.filter.set_search_text(name);
        state.refilter();
    }
}

fn on_search_changed(state: &mut AppState) {
    if matches!(state.route(), Route::Browse) {
        state.search_typed(Instant::now());
    } else {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .add_enabled(state.history.can_go_back(), egui::Button::new("◀"))
            .on_hover_text("Back (Alt+←)")
            .clicked()
        {
            state.go_back();
        }
        if ui
            .add_enabled(state.history.can_go_forward(), egui::Button::new("▶"))
            .on_hover_text("Forward (Alt+→)")
            .clicked()
        {
            state.go_forward();
        }

        ui.separator();

        let current = state.route().clone();
        let tabs = [
            ("Browse", Route::Browse),
            ("List", Route::List),
            ("A–Z", Route::Alphabet { letter: None }),
            ("Search", Route::Search),
        ];
        for (label, route) in tabs {
            let active = std::mem::discriminant(&current) == std::mem::discriminant(&route);
            if ui.selectable_label(active, label).clicked() && !active {
                state.navigate(route);
            }
        }

        ui.separator();

        if state.search_pending() {
            ui.spinner();
        }
        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} resources loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open resource directory")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
