use eframe::egui::{self, Color32, RichText, Ui};

use netflix_eda::data::filter::TypeFilter;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – type filter and data quality
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter");
    ui.separator();

    let mut selected = state.type_filter;
    ui.strong("Content type");
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(selected.label())
        .show_ui(ui, |ui: &mut Ui| {
            for filter in TypeFilter::ALL {
                ui.selectable_value(&mut selected, filter, filter.label());
            }
        });
    state.set_type_filter(selected);

    ui.add_space(8.0);
    ui.heading("Data");
    ui.separator();

    let Some(catalog) = &state.catalog else {
        ui.label("No catalog loaded.");
        return;
    };

    if let Some(path) = &state.source {
        ui.label(RichText::new(path.display().to_string()).monospace().small());
    }

    let report = state.report;
    egui::Grid::new("clean_report")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            // (label, count, whether a non-zero count means lost data)
            let rows = [
                ("Titles", catalog.len(), false),
                ("Filled with \"Unknown\"", report.filled_unknown, false),
                ("Missing date added", report.missing_dates, false),
                ("Unparsable date added", report.unparsed_dates, true),
                ("Duration without number", report.unparsed_durations, true),
                ("No genres", report.empty_genres, true),
            ];
            for (label, count, lossy) in rows {
                ui.label(label);
                let text = RichText::new(count.to_string());
                ui.label(if lossy && count > 0 { text.color(Color32::YELLOW) } else { text });
                ui.end_row();
            }
        });
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
            let has_source = state.source.is_some();
            if ui.add_enabled(has_source, egui::Button::new("Reload")).clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(has_source, egui::Button::new("Reload (discard cache)"))
                .clicked()
            {
                state.force_reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} titles loaded, {} visible",
                catalog.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
