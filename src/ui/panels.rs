use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{self, TOP_AREAS};
use crate::data::model::{REQUIRED_COLUMNS, TransactionTable};
use crate::state::AppState;
use crate::ui::charts;

/// Rows shown in the dataset preview.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Narrative commentary
// ---------------------------------------------------------------------------

const OBSERVATION_SIZE: &str = "Property size shows the strongest relationship with price.";
const OBSERVATION_AREAS: &str =
    "High-demand areas maintain consistently higher value per sqft.";
const OBSERVATION_TREND: &str = "Short-term trend suggests mild price cooling.";

const MARKET_SUMMARY: &str = "The monthly trend shows a mild cooling in average transaction \
    value. This suggests short-term price stabilization after a high-activity period. Larger \
    properties continue to dominate total transaction value, but mid-sized units remain the \
    most actively traded segment. This pattern is consistent with a transitioning market \
    rather than a crash.";

const AREA_INSIGHT: &str = "Premium zones command significantly higher average transaction \
    values. This confirms that location remains a primary pricing driver in Dubai. Investors \
    targeting high-liquidity markets should focus on top-tier areas where price resilience is \
    historically stronger.";

const CORRELATION_INSIGHT: &str = "Property size shows the strongest statistical relationship \
    with price. Structural features have more influence than external amenities. This \
    reinforces the thesis that square footage is the dominant pricing driver in Dubai \
    transactions.";

const CAPTION: &str = "Exploratory analysis of Dubai property transactions to identify price \
    drivers, market behavior, and short-term trend signals.";

const METHODOLOGY: &str = "Data cleaned and transformed on load. Outliers removed for fair \
    comparison. Correlation analysis applied to identify price drivers. Trend analysis \
    performed on aggregated monthly values. This dashboard is designed for directional market \
    insight, not predictive financial advice.";

// ---------------------------------------------------------------------------
// Central panel – the dashboard
// ---------------------------------------------------------------------------

/// Render the whole dashboard in a fixed sequence. Every aggregate is
/// recomputed from the immutable table on each pass; nothing is cached
/// between refreshes.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            match &state.status_message {
                Some(msg) => ui.heading(RichText::new(msg).color(Color32::RED)),
                None => ui.heading("Open a transactions export to begin  (File → Open…)"),
            }
        });
        return;
    };

    let monthly = aggregate::monthly_mean(table);
    let ranked = aggregate::top_areas(table, TOP_AREAS);
    let corr = aggregate::correlation_matrix(table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Dubai Property Dashboard");

            subheader(ui, "Dataset Preview");
            preview_table(ui, table);

            subheader(ui, "Key Market Observations");
            ui.columns(3, |cols: &mut [Ui]| {
                callout(&mut cols[0], Callout::Info, OBSERVATION_SIZE);
                callout(&mut cols[1], Callout::Success, OBSERVATION_AREAS);
                callout(&mut cols[2], Callout::Warning, OBSERVATION_TREND);
            });

            subheader(ui, "Size vs Transaction Value (Log Scale)");
            if let Some(colors) = &state.color_map {
                charts::size_vs_price(ui, table, colors);
            }

            subheader(ui, "Monthly Price Trend");
            charts::monthly_trend(ui, &monthly);

            subheader(ui, "Market Insight Summary");
            callout(ui, Callout::Info, MARKET_SUMMARY);

            subheader(ui, "Area Price Comparison");
            charts::area_comparison(ui, &ranked);
            callout(ui, Callout::Info, AREA_INSIGHT);

            subheader(ui, "Feature Correlation Analysis");
            charts::correlation_heatmap(ui, &corr);
            callout(ui, Callout::Success, CORRELATION_INSIGHT);

            ui.add_space(12.0);
            ui.label(RichText::new(CAPTION).weak().italics());

            subheader(ui, "Methodology");
            ui.label(METHODOLOGY);
            ui.add_space(24.0);
        });
}

fn subheader(ui: &mut Ui, title: &str) {
    ui.add_space(18.0);
    ui.label(RichText::new(title).size(18.0).strong());
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Callout blocks
// ---------------------------------------------------------------------------

/// The three advisory styles of the observation and insight blocks.
enum Callout {
    Info,
    Success,
    Warning,
}

fn callout(ui: &mut Ui, kind: Callout, text: &str) {
    let (fill, text_color) = match kind {
        Callout::Info => (Color32::from_rgb(28, 48, 70), Color32::from_rgb(150, 200, 255)),
        Callout::Success => (Color32::from_rgb(24, 60, 38), Color32::from_rgb(140, 230, 170)),
        Callout::Warning => (Color32::from_rgb(70, 58, 20), Color32::from_rgb(240, 210, 120)),
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.4)))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(text_color));
        });
}

// ---------------------------------------------------------------------------
// Dataset preview table
// ---------------------------------------------------------------------------

/// First rows of the table, one column per required CSV column.
fn preview_table(ui: &mut Ui, table: &TransactionTable) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(110.0), REQUIRED_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for tx in table.rows.iter().take(PREVIEW_ROWS) {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_number(tx.trans_value));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_number(tx.actual_area));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_number(tx.procedure_area));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&tx.group);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&tx.area);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(tx.date.format("%Y-%m-%d").to_string());
                    });
                });
            }
        });
}

fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
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

        if state.loading {
            ui.spinner();
        }

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} transactions, {} groups",
                table.len(),
                table.group_labels.len()
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
        .set_title("Open transactions export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
