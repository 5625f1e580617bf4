use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use care_directory::data::filter::available_letters;
use care_directory::data::model::Resource;
use care_directory::nav::Route;

use crate::color::ColorMap;
use crate::state::AppState;

const CARD_WIDTH: f32 = 260.0;

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a resource directory to browse  (File → Open…)");
    });
}

fn results_header(ui: &mut Ui, state: &AppState) {
    let label = state.results_label();
    if state.visible_indices.is_empty() {
        ui.label(RichText::new(label).italics().color(Color32::GRAY));
    } else {
        ui.label(label);
    }
    ui.add_space(4.0);
}

/// One card. Returns true when the user asked to open it.
fn card(ui: &mut Ui, resource: &Resource, colors: &ColorMap) -> bool {
    let mut open = false;
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(CARD_WIDTH - 16.0);
        if ui.link(RichText::new(&resource.name).strong()).clicked() {
            open = true;
        }
        if !resource.conditions.is_empty() {
            ui.label(RichText::new(&resource.conditions).small().italics());
        }
        if !resource.region.is_empty() {
            ui.label(
                RichText::new(&resource.region)
                    .color(Color32::WHITE)
                    .background_color(colors.color_for(&resource.region)),
            );
        }
        if ui.small_button("View Resource").clicked() {
            open = true;
        }
    });
    open
}

/// Lay out the visible resources as a card grid.
fn card_grid(ui: &mut Ui, state: &AppState) -> Option<String> {
    let columns = ((ui.available_width() / CARD_WIDTH).floor() as usize).max(1);
    let mut opened = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("resource_cards")
                .num_columns(columns)
                .spacing([8.0, 8.0])
                .show(ui, |ui: &mut Ui| {
                    for (n, resource) in state.visible().enumerate() {
                        if card(ui, resource, &state.region_colors) {
                            opened = Some(resource.name.clone());
                        }
                        if (n + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    opened
}

// ---------------------------------------------------------------------------
// Browse – faceted card grid
// ---------------------------------------------------------------------------

pub fn browse_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }
    results_header(ui, state);
    if let Some(name) = card_grid(ui, state) {
        state.navigate(Route::detail(name));
    }
}

// ---------------------------------------------------------------------------
// List – tabular view
// ---------------------------------------------------------------------------

pub fn list_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }
    results_header(ui, state);

    let mut opened: Option<String> = None;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(240.0).at_least(120.0))
        .column(Column::initial(220.0))
        .column(Column::initial(120.0))
        .column(Column::initial(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Name", "Condition(s)", "Health Region", "Cost", "Virtual/In-person"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for resource in state.visible() {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        if ui.link(&resource.name).clicked() {
                            opened = Some(resource.name.clone());
                        }
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&resource.conditions);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(&resource.region)
                                .color(state.region_colors.color_for(&resource.region)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&resource.cost);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&resource.modality);
                    });
                });
            }
        });

    if let Some(name) = opened {
        state.navigate(Route::detail(name));
    }
}

// ---------------------------------------------------------------------------
// Alphabetical index
// ---------------------------------------------------------------------------

pub fn alphabet_view(ui: &mut Ui, state: &mut AppState, letter: Option<char>) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }

    let present = available_letters(state.resources());
    let mut picked: Option<Option<char>> = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.selectable_label(letter.is_none(), "All").clicked() {
            picked = Some(None);
        }
        for c in 'A'..='Z' {
            let button = ui.add_enabled(
                present.contains(&c),
                egui::Button::new(c.to_string()).selected(letter == Some(c)),
            );
            if button.clicked() {
                picked = Some(Some(c));
            }
        }
    });
    ui.separator();

    if let Some(choice) = picked {
        if choice != letter {
            state.select_letter(choice);
        }
    }

    results_header(ui, state);
    if let Some(name) = card_grid(ui, state) {
        state.navigate(Route::detail(name));
    }
}

// ---------------------------------------------------------------------------
// Search with suggestion bubbles
// ---------------------------------------------------------------------------

pub fn search_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.search.search_text)
                .hint_text("Search by name or keyword…")
                .desired_width(420.0),
        );
        if response.changed() {
            state.quick_search_typed();
        }
    });

    let mut clicked = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, item) in state.bubbles.items().iter().enumerate() {
            if ui
                .selectable_label(state.bubbles.selected() == Some(i), item)
                .clicked()
            {
                clicked = Some(i);
            }
        }
    });
    if let Some(i) = clicked {
        state.click_bubble(i);
    }
    ui.separator();

    // Results stay hidden until something is typed.
    if state.search.search_text.trim().is_empty() {
        return;
    }
    results_header(ui, state);
    if let Some(name) = card_grid(ui, state) {
        state.navigate(Route::detail(name));
    }
}
