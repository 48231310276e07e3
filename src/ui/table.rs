use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};
use serde_json::Value as JsonValue;

use crate::data::model::as_float;
use crate::state::{AppState, FetchStatus};

const HEADERS: [&str; 6] = [
    "Date",
    "Revenue ($MM)",
    "Net Income ($MM)",
    "Gross Profit ($MM)",
    "EPS",
    "Operating Income ($MM)",
];

// ---------------------------------------------------------------------------
// Statement table (central panel)
// ---------------------------------------------------------------------------

/// Render the working dataset as a table, one row per statement.
pub fn statement_table(ui: &mut Ui, state: &AppState) {
    let rows = state.working();

    let provider_empty = state.fetch == FetchStatus::Loaded && state.store.original().is_empty();
    if rows.is_empty() && provider_empty {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("The provider returned no statements.");
        });
        return;
    }

    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(90.0))
        .columns(Column::remainder().at_least(90.0), HEADERS.len() - 1)
        .header(row_height + 4.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let rec = &rows[row.index()];
                let cells = [
                    rec.date.clone(),
                    format_millions(&rec.revenue),
                    format_millions(&rec.net_income),
                    format_millions(&rec.gross_profit),
                    format_plain(&rec.eps),
                    format_millions(&rec.operating_income),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Cell formatting
// ---------------------------------------------------------------------------

const MISSING: &str = "n/a";

/// Scale a raw amount to millions and format it with `,` grouping and at
/// most three fraction digits: `394328000000` → `394,328`,
/// `-1500000` → `-1.5`.
pub fn format_millions(value: &JsonValue) -> String {
    match as_float(value) {
        Some(v) => group_thousands(v / 1_000_000.0),
        None => MISSING.to_string(),
    }
}

/// EPS and other unscaled values, shown as sent.
pub fn format_plain(value: &JsonValue) -> String {
    match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) if !s.trim().is_empty() => s.clone(),
        _ => MISSING.to_string(),
    }
}

fn group_thousands(v: f64) -> String {
    let fixed = format!("{:.3}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = v < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn millions_are_grouped() {
        assert_eq!(format_millions(&json!(394328000000_i64)), "394,328");
        assert_eq!(format_millions(&json!(100000000)), "100");
        assert_eq!(format_millions(&json!("1234567000000")), "1,234,567");
    }

    #[test]
    fn millions_keep_up_to_three_decimals() {
        assert_eq!(format_millions(&json!(-1500000)), "-1.5");
        assert_eq!(format_millions(&json!(1234)), "0.001");
        assert_eq!(format_millions(&json!(1)), "0");
        assert_eq!(format_millions(&json!(-1)), "0");
        assert_eq!(format_millions(&json!(2999999)), "3");
    }

    #[test]
    fn missing_values_render_placeholder() {
        assert_eq!(format_millions(&JsonValue::Null), "n/a");
        assert_eq!(format_millions(&json!("abc")), "n/a");
        assert_eq!(format_plain(&JsonValue::Null), "n/a");
    }

    #[test]
    fn eps_is_unscaled() {
        assert_eq!(format_plain(&json!(6.16)), "6.16");
        assert_eq!(format_plain(&json!("1.52")), "1.52");
    }
}
