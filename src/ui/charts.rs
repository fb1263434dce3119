use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, Points, Polygon, Text};

use crate::color::{self, ColorMap};
use crate::data::aggregate::{AggregateRow, CorrelationMatrix};
use crate::data::filter::{OUTLIER_QUANTILE, below_quantile};
use crate::data::model::TransactionTable;

const ACCENT: Color32 = Color32::from_rgb(92, 176, 255);

// ---------------------------------------------------------------------------
// Size vs price scatter (log-log)
// ---------------------------------------------------------------------------

/// Log-log scatter of ACTUAL_AREA vs TRANS_VALUE, filtered through the
/// outlier filter on the price column and coloured by GROUP_EN.
///
/// egui_plot has no native log scale, so points are plotted in log10 space
/// with power-of-ten tick labels.
pub fn size_vs_price(ui: &mut Ui, table: &TransactionTable, colors: &ColorMap) {
    let kept = below_quantile(table, OUTLIER_QUANTILE);

    // One series per group so the legend lists the group labels.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &kept {
        let row = &table.rows[idx];
        let (Some(area), Some(value)) = (row.actual_area, row.trans_value) else {
            continue;
        };
        if area <= 0.0 || value <= 0.0 {
            continue; // not representable on a log axis
        }
        series
            .entry(row.group.as_str())
            .or_default()
            .push([area.log10(), value.log10()]);
    }

    Plot::new("size_vs_price")
        .legend(Legend::default())
        .x_axis_label("Actual Area (log scale)")
        .y_axis_label("Transaction Value (log scale)")
        .x_axis_formatter(|mark, _range| pow10_label(mark.value))
        .y_axis_formatter(|mark, _range| pow10_label(mark.value))
        .height(340.0)
        .show(ui, |plot_ui| {
            for (group, points) in &series {
                plot_ui.points(
                    Points::new(points.clone())
                        .name(*group)
                        .color(colors.color_for(group))
                        .radius(2.0),
                );
            }
        });
}

/// Tick label for a log10-transformed axis: powers of ten only.
fn pow10_label(log_value: f64) -> String {
    if (log_value - log_value.round()).abs() > 1e-6 {
        return String::new();
    }
    let exp = log_value.round() as i32;
    if (0..=6).contains(&exp) {
        format!("{}", 10f64.powi(exp))
    } else {
        format!("1e{exp}")
    }
}

// ---------------------------------------------------------------------------
// Monthly trend line
// ---------------------------------------------------------------------------

/// Line of mean transaction value per month bucket, with markers.
pub fn monthly_trend(ui: &mut Ui, monthly: &[AggregateRow]) {
    let points: Vec<[f64; 2]> = monthly
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, r.mean])
        .collect();
    let months: Vec<String> = monthly.iter().map(|r| r.key.clone()).collect();

    Plot::new("monthly_trend")
        .x_axis_formatter(move |mark, _range| index_label(&months, mark.value))
        .y_axis_label("Average Transaction Value")
        .height(300.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points.clone())
                    .color(ACCENT)
                    .width(2.0)
                    .name("Average monthly value"),
            );
            plot_ui.points(Points::new(points).color(ACCENT).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Area comparison bars
// ---------------------------------------------------------------------------

/// Descending bar chart of the top areas by mean transaction value, tinted
/// by the mean.
pub fn area_comparison(ui: &mut Ui, ranked: &[AggregateRow]) {
    let max = ranked.first().map(|r| r.mean).unwrap_or(1.0);
    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean)
                .name(&r.key)
                .fill(color::sequential_color(r.mean / max))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = ranked.iter().map(|r| short_label(&r.key)).collect();

    Plot::new("area_comparison")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .y_axis_label("Average Transaction Value")
        .height(300.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= 14 {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(12).collect();
        short.push('…');
        short
    }
}

/// Tick label for an index axis: the label at integer positions, nothing
/// in between.
fn index_label(labels: &[String], value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 || value < -0.5 {
        return String::new();
    }
    labels
        .get(value.round() as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap of the numeric-column correlation matrix on a
/// diverging blue↔red scale.
pub fn correlation_heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    let n = corr.columns.len();
    let x_labels: Vec<String> = corr.columns.iter().map(|c| c.to_string()).collect();
    // First matrix row is drawn at the top.
    let y_labels: Vec<String> = corr.columns.iter().rev().map(|c| c.to_string()).collect();

    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .x_axis_formatter(move |mark, _range| index_label(&x_labels, mark.value))
        .y_axis_formatter(move |mark, _range| index_label(&y_labels, mark.value))
        .height(300.0)
        .show(ui, |plot_ui| {
            for i in 0..n {
                for j in 0..n {
                    let r = corr.values[i][j];
                    let x = j as f64;
                    let y = (n - 1 - i) as f64;
                    plot_ui.polygon(
                        Polygon::new(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ])
                        .fill_color(color::diverging_color(r))
                        .stroke(Stroke::new(1.0, Color32::from_gray(40))),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{r:.2}"))
                            .size(14.0)
                            .color(Color32::BLACK),
                    ));
                }
            }
        });
}
