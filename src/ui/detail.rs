use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use care_directory::data::model::Resource;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Single-resource detail view
// ---------------------------------------------------------------------------

pub fn detail_view(ui: &mut Ui, state: &mut AppState) {
    if ui.link("← Back").clicked() {
        state.go_back();
        return;
    }
    ui.separator();

    let Some(resource) = state.detail() else {
        ui.heading("Resource not found.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(path) = state.image_path(resource) {
                ui.add(
                    egui::Image::new(format!("file://{}", path.display()))
                        .max_width(ui.available_width())
                        .max_height(180.0),
                );
            }
            ui.heading(&resource.name);

            let tags = resource.tag_list();
            if !tags.is_empty() {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for tag in tags {
                        ui.label(
                            RichText::new(tag)
                                .small()
                                .color(Color32::WHITE)
                                .background_color(Color32::DARK_GRAY),
                        );
                    }
                });
            }
            ui.add_space(6.0);

            if !resource.services.is_empty() {
                ui.label(&resource.services);
                ui.add_space(6.0);
            }

            egui::Grid::new("resource_fields")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (label, value) in fields(resource) {
                        ui.strong(label);
                        ui.label(value);
                        ui.end_row();
                    }

                    ui.strong("Website");
                    if resource.website.is_empty() {
                        ui.label("");
                    } else {
                        ui.hyperlink_to(&resource.website, &resource.website);
                    }
                    ui.end_row();

                    ui.strong("Email");
                    if resource.email.is_empty() {
                        ui.label("");
                    } else {
                        ui.hyperlink_to(&resource.email, format!("mailto:{}", resource.email));
                    }
                    ui.end_row();
                });

            ui.add_space(6.0);
            match map_link(&resource.map) {
                Some(url) => {
                    ui.hyperlink_to("Open map", url);
                }
                None => {
                    ui.label(RichText::new("No map available.").italics());
                }
            }
        });
}

fn fields(resource: &Resource) -> [(&'static str, &str); 9] {
    [
        ("Address", resource.address.as_str()),
        ("Phone Number", resource.phone.as_str()),
        ("Status", resource.status.as_str()),
        ("Cost", resource.cost.as_str()),
        ("Language", resource.language.as_str()),
        ("Condition(s)", resource.conditions.as_str()),
        ("Health Region", resource.region.as_str()),
        ("Service Type", resource.modality.as_str()),
        ("Age Restriction", resource.age_restriction.as_str()),
    ]
}

/// URL behind the `map` column: either a bare link or the `src` of an
/// embedded iframe.
fn map_link(map: &str) -> Option<&str> {
    let map = map.trim();
    if map.starts_with("http://") || map.starts_with("https://") {
        return Some(map);
    }
    let start = map.find("src=\"")? + "src=\"".len();
    let len = map[start..].find('"')?;
    Some(&map[start..start + len]).filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_link_from_iframe_or_bare_url() {
        let iframe = r#"<iframe src="https://maps.example/embed?pb=1" width="600"></iframe>"#;
        assert_eq!(map_link(iframe), Some("https://maps.example/embed?pb=1"));
        assert_eq!(map_link(" https://maps.example/x "), Some("https://maps.example/x"));
        assert_eq!(map_link(""), None);
        assert_eq!(map_link("<iframe src=\"\"></iframe>"), None);
    }
}
