use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Selection;
use crate::state::AppState;

const BANNER_CAPTION: &str = "Squat, bench press and deadlift: the three lifts of a full meet";

const WELCOME_TEXT: &str = "\
Welcome to Power Pro Metrics!

Explore the most relevant statistics of competitive powerlifting. Use the \
filters on the left to choose a year, a federation and a weight class. \
You will find the distribution of competitors by sex, followed by the top 10 \
athletes by best squat, bench press and deadlift.

Explore and discover the most impressive lifts in the sport!";

// ---------------------------------------------------------------------------
// Header – title, image and welcome text
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new(&state.config.title).size(28.0).strong());
    ui.add_space(6.0);

    ui.columns(2, |cols| {
        let banner = egui::include_image!("../../assets/banner.png");
        cols[0].vertical(|ui: &mut Ui| {
            ui.add(egui::Image::new(banner).max_width(300.0).corner_radius(4.0));
            ui.label(RichText::new(BANNER_CAPTION).italics().small());
        });
        cols[1].label(RichText::new(WELCOME_TEXT).size(15.0));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
///
/// Every selector edits a copy of the current [`Selection`]; if anything
/// changed, the copy is handed back to the state which recomputes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    let Some(current) = state.selection.clone() else {
        ui.label("The dataset has no rows.");
        return;
    };

    let options = &state.options;
    let mut next = current.clone();

    ui.strong("Year");
    egui::ComboBox::from_id_salt("year")
        .selected_text(next.year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &options.years {
                ui.selectable_value(&mut next.year, year, year.to_string());
            }
        });
    ui.add_space(4.0);

    ui.strong("Federation");
    egui::ComboBox::from_id_salt("federation")
        .selected_text(&next.federation)
        .show_ui(ui, |ui: &mut Ui| {
            for fed in &options.federations {
                ui.selectable_value(&mut next.federation, fed.clone(), fed);
            }
        });
    ui.add_space(4.0);

    ui.strong("Weight class");
    egui::ComboBox::from_id_salt("weight_class")
        .selected_text(next.weight_class.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in &options.weight_classes {
                ui.selectable_value(&mut next.weight_class, choice.clone(), choice.to_string());
            }
        });

    if next != current {
        apply(state, next);
    }
}

fn apply(state: &mut AppState, selection: Selection) {
    log::debug!("Selection changed to {selection:?}");
    state.apply_selection(selection);
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

        if let Some(ds) = &state.dataset {
            if let Some(source) = &state.source {
                ui.label(source.display().to_string());
                ui.separator();
            }
            ui.label(format!(
                "{} results loaded, {} match the filters",
                ds.len(),
                state.matching_rows
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
        .set_title("Open powerlifting results")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} results from {} with columns {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.columns()
                );
                state.set_dataset(path, dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
