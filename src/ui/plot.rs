use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use netflix_eda::data::aggregate::{DurationDistribution, HistogramBin};

use crate::color::ColorMap;
use crate::state::AppState;
use crate::ui::table;

const CHART_HEIGHT: f32 = 260.0;
const COUNTRY_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
const MOVIE_COLOR: Color32 = Color32::from_rgb(46, 139, 87);
const SEASON_COLOR: Color32 = Color32::from_rgb(128, 0, 128);

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every chart for the current type filter.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a cleaned catalog to explore it  (File → Open…)");
        });
        return;
    }

    let summary = &state.summary;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Top {} Genres", state.settings.top_k));
            genre_chart(ui, &summary.top_genres, state.genre_colors.as_ref());
            details(ui, "genre_table", |ui| {
                table::counts_table(ui, "genres", "Genre", &summary.top_genres);
            });
            ui.separator();

            ui.heading("Yearly Trend of Content Release");
            yearly_chart(ui, &summary.yearly_trend);
            details(ui, "year_table", |ui| {
                table::counts_table(ui, "years", "Release year", &summary.yearly_trend);
            });
            ui.separator();

            ui.heading(format!("Top {} Countries", state.settings.top_k));
            country_chart(ui, &summary.top_countries);
            details(ui, "country_table", |ui| {
                table::counts_table(ui, "countries", "Country", &summary.top_countries);
            });
            ui.separator();

            ui.heading("Duration Analysis");
            match &summary.durations {
                DurationDistribution::NotApplicable => {
                    ui.label(
                        RichText::new("Select Movie or TV Show to see the duration distribution.")
                            .italics(),
                    );
                }
                d if d.is_empty() => {
                    ui.label("No duration data for the selected titles.");
                }
                DurationDistribution::Minutes(_) => movie_histogram(ui, &state.duration_bins),
                DurationDistribution::Seasons(seasons) => {
                    season_chart(ui, seasons);
                    details(ui, "season_table", |ui| {
                        table::counts_table(ui, "seasons", "Seasons", seasons);
                    });
                }
            }
        });
}

fn details(ui: &mut Ui, id: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::CollapsingHeader::new("Table")
        .id_salt(id)
        .default_open(false)
        .show(ui, add_contents);
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Horizontal bars, the most frequent genre on top.
fn genre_chart(ui: &mut Ui, genres: &[(String, usize)], colors: Option<&ColorMap>) {
    let bars: Vec<Bar> = genres
        .iter()
        .rev()
        .enumerate()
        .map(|(i, (genre, count))| {
            let fill = colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(genre));
            Bar::new(i as f64, *count as f64).name(genre).fill(fill)
        })
        .collect();

    Plot::new("genre_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Count")
        .y_axis_label("Genre")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Genres"));
        });
}

fn yearly_chart(ui: &mut Ui, yearly: &[(i32, usize)]) {
    let to_points = || -> PlotPoints {
        yearly
            .iter()
            .map(|&(year, count)| [f64::from(year), count as f64])
            .collect()
    };

    Plot::new("yearly_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Release Year")
        .y_axis_label("Number of Titles")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(to_points()).name("Titles").width(1.5));
            plot_ui.points(Points::new(to_points()).radius(3.0));
        });
}

fn country_chart(ui: &mut Ui, countries: &[(String, usize)]) {
    let bars: Vec<Bar> = countries
        .iter()
        .enumerate()
        .map(|(i, (country, count))| Bar::new(i as f64, *count as f64).name(country))
        .collect();

    Plot::new("country_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Country (hover for name)")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(COUNTRY_COLOR).name("Countries"));
        });
}

fn movie_histogram(ui: &mut Ui, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.0}–{:.0} min", b.start, b.end))
        })
        .collect();

    Plot::new("movie_duration_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Duration (minutes)")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(MOVIE_COLOR).name("Movies"));
        });
}

fn season_chart(ui: &mut Ui, seasons: &[(u32, usize)]) {
    let bars: Vec<Bar> = seasons
        .iter()
        .map(|&(n, count)| {
            Bar::new(f64::from(n), count as f64)
                .width(0.8)
                .name(format!("{n} season(s)"))
        })
        .collect();

    Plot::new("season_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Number of Seasons")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(SEASON_COLOR).name("TV Shows"));
        });
}
