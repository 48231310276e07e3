use chrono::NaiveDate;
use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::parse_date;
use crate::data::sort::SortKey;
use crate::error::FilterKind;
use crate::state::{AppState, FetchStatus};

// ---------------------------------------------------------------------------
// Left side panel – filter inputs and sort buttons
// ---------------------------------------------------------------------------

/// Render the left filter / sort panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filter By");
            ui.separator();

            section_header(ui, state, "Date", FilterKind::Date);
            date_input(ui, "Start date", "start_date", &mut state.inputs.start_date);
            date_input(ui, "End date", "end_date", &mut state.inputs.end_date);
            ui.add_space(6.0);

            section_header(ui, state, "Revenue", FilterKind::Revenue);
            amount_input(ui, "Minimum (include zeroes)", &mut state.inputs.min_revenue);
            amount_input(ui, "Maximum (include zeroes)", &mut state.inputs.max_revenue);
            ui.add_space(6.0);

            section_header(ui, state, "Net Income", FilterKind::NetIncome);
            amount_input(ui, "Minimum (include zeroes)", &mut state.inputs.min_net_income);
            amount_input(ui, "Maximum (include zeroes)", &mut state.inputs.max_net_income);
            ui.add_space(8.0);

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply Filters").clicked() {
                    // The error is already stored as the notice.
                    let _ = state.apply_filters();
                }
                if ui.button("Reset Filters").clicked() {
                    state.reset();
                }
            });

            ui.add_space(12.0);
            ui.heading("Sort By");
            ui.separator();

            egui::Grid::new("sort_buttons")
                .num_columns(2)
                .spacing([6.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    for key in SortKey::ALL {
                        if ui
                            .button(format!("{key} ↑"))
                            .on_hover_text(format!("{key} Ascending"))
                            .clicked()
                        {
                            state.sort_by(key, true);
                        }
                        if ui
                            .button(format!("{key} ↓"))
                            .on_hover_text(format!("{key} Descending"))
                            .clicked()
                        {
                            state.sort_by(key, false);
                        }
                        ui.end_row();
                    }
                });
        });
}

/// Section title with a button that runs only this section's filter.
fn section_header(ui: &mut Ui, state: &mut AppState, title: &str, kind: FilterKind) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(title);
        if ui
            .small_button("Apply")
            .on_hover_text(format!("Apply only the {kind} filter"))
            .clicked()
        {
            let _ = state.apply_filter(kind);
        }
    });
}

/// Text field for a `YYYY-MM-DD` bound with a calendar picker beside it.
///
/// The text stays authoritative so an invalid date can still be typed and
/// reported when filters are applied.
fn date_input(ui: &mut Ui, label: &str, id: &str, value: &mut String) {
    ui.label(label);
    ui.horizontal(|ui: &mut Ui| {
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text("YYYY-MM-DD")
                .desired_width(110.0),
        );
        let mut picked: NaiveDate =
            parse_date(value).unwrap_or_else(|| chrono::Local::now().date_naive());
        if ui
            .add(DatePickerButton::new(&mut picked).id_salt(id))
            .changed()
        {
            *value = picked.format("%Y-%m-%d").to_string();
        }
    });
}

fn amount_input(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text("e.g. 100000000"));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the header with dataset counts and fetch status.
pub fn top_bar(ui: &mut Ui, state: &AppState, title: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(title);
        ui.separator();

        match &state.fetch {
            FetchStatus::Pending => {
                ui.spinner();
                ui.label("Fetching statements…");
            }
            FetchStatus::Loaded => {
                ui.label(format!(
                    "{} statements loaded, {} visible",
                    state.store.original().len(),
                    state.working().len()
                ));
            }
            FetchStatus::Failed(msg) => {
                ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Validation notice
// ---------------------------------------------------------------------------

/// Show the pending validation notice until the user dismisses it.
pub fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(msg) = state.notice.clone() else {
        return;
    };
    let mut dismissed = false;
    egui::Window::new("Invalid filter")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(msg);
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    if dismissed {
        state.dismiss_notice();
    }
}
