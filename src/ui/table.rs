use std::fmt::Display;

use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

/// Render `(key, count)` rows as a two-column table.
pub fn counts_table<K: Display>(ui: &mut Ui, id: &str, key_header: &str, rows: &[(K, usize)]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(60.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong(key_header);
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
            })
            .body(|mut body| {
                for (key, count) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(key.to_string());
                        });
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                    });
                }
            });
    });
}
