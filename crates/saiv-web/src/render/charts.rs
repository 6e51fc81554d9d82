//! Inline SVG charts.
//!
//! Charts are fixed-size SVG fragments wrapped in a `<figure>`. Every chart
//! takes plain labels and numbers so that pages decide what to plot; no
//! chart reads records directly.

use std::f64::consts::PI;
use std::fmt::Write;

use super::NO_DATA;
use super::html::escape;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const PAD_LEFT: f64 = 48.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 40.0;

/// Default series colour.
pub const PRIMARY: &str = "#1f77b4";
/// Secondary series colour.
pub const SECONDARY: &str = "#ff7f0e";

/// One labelled value with its fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

impl Datum {
    pub fn new(label: impl Into<String>, value: f64, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// A named series for grouped bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

fn figure(title: &str, svg: &str) -> String {
    format!(
        r#"<figure class="chart"><figcaption>{}</figcaption>{svg}</figure>"#,
        escape(title)
    )
}

fn placeholder(title: &str) -> String {
    figure(title, &format!(r#"<p class="empty">{NO_DATA}</p>"#))
}

fn open_svg(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" role="img">"#
    )
}

fn plot_width() -> f64 {
    WIDTH - PAD_LEFT - PAD_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - PAD_TOP - PAD_BOTTOM
}

fn scale_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

fn y_for(value: f64, max: f64) -> f64 {
    PAD_TOP + plot_height() * (1.0 - (value.max(0.0) / max).min(1.0))
}

fn axes(out: &mut String, max: f64) {
    let bottom = PAD_TOP + plot_height();
    let _ = write!(
        out,
        r##"<line x1="{PAD_LEFT}" y1="{PAD_TOP}" x2="{PAD_LEFT}" y2="{bottom}" stroke="#888"/><line x1="{PAD_LEFT}" y1="{bottom}" x2="{}" y2="{bottom}" stroke="#888"/>"##,
        WIDTH - PAD_RIGHT
    );
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="10" text-anchor="end">{}</text><text x="{}" y="{bottom}" font-size="10" text-anchor="end">0</text>"#,
        PAD_LEFT - 4.0,
        PAD_TOP + 4.0,
        trim_number(max),
        PAD_LEFT - 4.0
    );
}

fn x_label(out: &mut String, x: f64, label: &str) {
    let _ = write!(
        out,
        r#"<text x="{x:.1}" y="{:.1}" font-size="10" text-anchor="middle">{}</text>"#,
        HEIGHT - PAD_BOTTOM + 14.0,
        escape(label)
    );
}

fn label_step(count: usize) -> usize {
    count.div_ceil(12).max(1)
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn legend(out: &mut String, entries: &[(&str, &str)], y: f64) {
    let mut x = PAD_LEFT;
    for (name, color) in entries {
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{:.1}" width="10" height="10" fill="{color}"/><text x="{:.1}" y="{y:.1}" font-size="10">{}</text>"#,
            y - 9.0,
            x + 14.0,
            escape(name)
        );
        x += 24.0 + 7.0 * name.chars().count() as f64;
    }
}

/// Line chart over evenly spaced labelled points.
pub fn line_chart(title: &str, points: &[(String, f64)], color: &str) -> String {
    if points.is_empty() {
        return placeholder(title);
    }
    let max = scale_max(points.iter().map(|(_, v)| *v));
    let step = if points.len() > 1 {
        plot_width() / (points.len() - 1) as f64
    } else {
        0.0
    };
    let x_for = |i: usize| {
        if points.len() > 1 {
            PAD_LEFT + step * i as f64
        } else {
            PAD_LEFT + plot_width() / 2.0
        }
    };

    let mut svg = open_svg(WIDTH, HEIGHT);
    axes(&mut svg, max);
    let path: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, (_, v))| format!("{:.1},{:.1}", x_for(i), y_for(*v, max)))
        .collect();
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
        path.join(" ")
    );
    let every = label_step(points.len());
    for (i, (label, value)) in points.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{color}"><title>{}: {}</title></circle>"#,
            x_for(i),
            y_for(*value, max),
            escape(label),
            trim_number(*value)
        );
        if i % every == 0 {
            x_label(&mut svg, x_for(i), label);
        }
    }
    svg.push_str("</svg>");
    figure(title, &svg)
}

/// Bar chart, one bar per datum.
pub fn bar_chart(title: &str, bars: &[Datum]) -> String {
    if bars.is_empty() {
        return placeholder(title);
    }
    let max = scale_max(bars.iter().map(|d| d.value));
    let slot = plot_width() / bars.len() as f64;
    let width = slot * 0.7;

    let mut svg = open_svg(WIDTH, HEIGHT);
    axes(&mut svg, max);
    let every = label_step(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let x = PAD_LEFT + slot * i as f64 + (slot - width) / 2.0;
        let y = y_for(bar.value, max);
        let _ = write!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            PAD_TOP + plot_height() - y,
            bar.color,
            escape(&bar.label),
            trim_number(bar.value)
        );
        if i % every == 0 {
            x_label(&mut svg, x + width / 2.0, &bar.label);
        }
    }
    svg.push_str("</svg>");
    figure(title, &svg)
}

/// Bars grouped per label, one bar per series.
pub fn grouped_bar_chart(title: &str, labels: &[String], series: &[Series]) -> String {
    if labels.is_empty() || series.is_empty() {
        return placeholder(title);
    }
    let max = scale_max(series.iter().flat_map(|s| s.values.iter().copied()));
    let slot = plot_width() / labels.len() as f64;
    let bar_width = slot * 0.8 / series.len() as f64;

    let mut svg = open_svg(WIDTH, HEIGHT + 16.0);
    axes(&mut svg, max);
    let every = label_step(labels.len());
    for (i, label) in labels.iter().enumerate() {
        let group_x = PAD_LEFT + slot * i as f64 + slot * 0.1;
        for (j, s) in series.iter().enumerate() {
            let value = s.values.get(i).copied().unwrap_or(0.0);
            let x = group_x + bar_width * j as f64;
            let y = y_for(value, max);
            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{:.1}" fill="{}"><title>{} {}: {}</title></rect>"#,
                PAD_TOP + plot_height() - y,
                s.color,
                escape(label),
                escape(&s.name),
                trim_number(value)
            );
        }
        if i % every == 0 {
            x_label(&mut svg, group_x + slot * 0.4, label);
        }
    }
    let entries: Vec<(&str, &str)> = series.iter().map(|s| (s.name.as_str(), s.color)).collect();
    legend(&mut svg, &entries, HEIGHT + 10.0);
    svg.push_str("</svg>");
    figure(title, &svg)
}

/// Pie chart. Zero and negative slices are skipped.
pub fn pie_chart(title: &str, slices: &[Datum]) -> String {
    let slices: Vec<&Datum> = slices.iter().filter(|d| d.value > 0.0).collect();
    let total: f64 = slices.iter().map(|d| d.value).sum();
    if slices.is_empty() || total <= 0.0 {
        return placeholder(title);
    }

    let (cx, cy, r) = (120.0, 110.0, 90.0);
    let mut svg = open_svg(WIDTH, 230.0);
    if slices.len() == 1 {
        let _ = write!(
            svg,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"><title>{}: 100.0%</title></circle>"#,
            slices[0].color,
            escape(&slices[0].label)
        );
    } else {
        let mut angle = -PI / 2.0;
        for slice in &slices {
            let sweep = slice.value / total * 2.0 * PI;
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if sweep > PI { 1 } else { 0 };
            let _ = write!(
                svg,
                r##"<path d="M{cx},{cy} L{x1:.2},{y1:.2} A{r},{r} 0 {large} 1 {x2:.2},{y2:.2} Z" fill="{}" stroke="#fff"><title>{}: {:.1}%</title></path>"##,
                slice.color,
                escape(&slice.label),
                slice.value / total * 100.0
            );
            angle = end;
        }
    }
    for (i, slice) in slices.iter().enumerate() {
        let y = 30.0 + 20.0 * i as f64;
        let _ = write!(
            svg,
            r#"<rect x="250" y="{:.1}" width="12" height="12" fill="{}"/><text x="268" y="{y:.1}" font-size="12">{} ({}, {:.1}%)</text>"#,
            y - 10.0,
            slice.color,
            escape(&slice.label),
            trim_number(slice.value),
            slice.value / total * 100.0
        );
    }
    svg.push_str("</svg>");
    figure(title, &svg)
}

/// Bucket counts of `values` into `bins` equal-width bins over `[min, max]`.
///
/// Values outside the range are clamped into the first or last bin.
pub fn bin_counts(values: &[f64], bins: usize, min: f64, max: f64) -> Vec<u64> {
    let bins = bins.max(1);
    let mut counts = vec![0_u64; bins];
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };
    for value in values.iter().filter(|v| v.is_finite()) {
        let index = ((value - min) / width).floor();
        let index = if index < 0.0 { 0 } else { (index as usize).min(bins - 1) };
        counts[index] += 1;
    }
    counts
}

/// Histogram of `values` over `[min, max]`.
pub fn histogram(title: &str, values: &[f64], bins: usize, min: f64, max: f64, color: &'static str) -> String {
    if values.is_empty() {
        return placeholder(title);
    }
    let counts = bin_counts(values, bins, min, max);
    let width = (max - min) / counts.len() as f64;
    let bars: Vec<Datum> = counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let low = min + width * i as f64;
            Datum::new(format!("{low:.1}-{:.1}", low + width), *count as f64, color)
        })
        .collect();
    bar_chart(title, &bars)
}

/// Heatmap of `cells[row][column]`, shaded relative to the largest cell.
pub fn heatmap(title: &str, rows: &[String], columns: &[String], cells: &[Vec<f64>]) -> String {
    let max = cells.iter().flatten().copied().fold(0.0_f64, f64::max);
    if rows.is_empty() || columns.is_empty() || max <= 0.0 {
        return placeholder(title);
    }
    let label_width = 56.0;
    let cell_w = (WIDTH - label_width - PAD_RIGHT) / columns.len() as f64;
    let cell_h = 22.0;
    let height = PAD_TOP + cell_h * rows.len() as f64 + 24.0;

    let mut svg = open_svg(WIDTH, height);
    for (r, row_label) in rows.iter().enumerate() {
        let y = PAD_TOP + cell_h * r as f64;
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="end">{}</text>"#,
            label_width - 4.0,
            y + cell_h * 0.65,
            escape(row_label)
        );
        for (c, column) in columns.iter().enumerate() {
            let value = cells.get(r).and_then(|row| row.get(c)).copied().unwrap_or(0.0);
            let opacity = (value / max).clamp(0.0, 1.0) * 0.9 + 0.05;
            let _ = write!(
                svg,
                r#"<rect x="{:.1}" y="{y:.1}" width="{:.1}" height="{cell_h}" fill="{PRIMARY}" fill-opacity="{opacity:.2}"><title>{} {}: {}</title></rect>"#,
                label_width + cell_w * c as f64,
                cell_w - 1.0,
                escape(row_label),
                escape(column),
                trim_number(value)
            );
        }
    }
    let every = label_step(columns.len());
    for (c, column) in columns.iter().enumerate().step_by(every) {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle">{}</text>"#,
            label_width + cell_w * (c as f64 + 0.5),
            PAD_TOP + cell_h * rows.len() as f64 + 14.0,
            escape(column)
        );
    }
    svg.push_str("</svg>");
    figure(title, &svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_render_placeholder() {
        assert!(line_chart("Trend", &[], PRIMARY).contains(NO_DATA));
        assert!(bar_chart("Risk", &[]).contains(NO_DATA));
        assert!(grouped_bar_chart("Att", &[], &[]).contains(NO_DATA));
        assert!(pie_chart("Status", &[Datum::new("a", 0.0, PRIMARY)]).contains(NO_DATA));
        assert!(histogram("Hist", &[], 10, 0.0, 1.0, PRIMARY).contains(NO_DATA));
        assert!(heatmap("Heat", &["Mon".into()], &["0".into()], &[vec![0.0]]).contains(NO_DATA));
    }

    #[test]
    fn test_line_chart_points() {
        let points = vec![("Mon".to_string(), 1.0), ("Tue".to_string(), 3.0)];
        let html = line_chart("Daily", &points, PRIMARY);
        assert!(html.contains("<polyline"));
        assert_eq!(html.matches("<circle").count(), 2);
        assert!(html.contains("Tue: 3"));
        assert!(!html.contains(NO_DATA));
    }

    #[test]
    fn test_pie_chart_percentages() {
        let html = pie_chart(
            "Status",
            &[
                Datum::new("approved", 3.0, "green"),
                Datum::new("flagged", 1.0, "red"),
                Datum::new("rejected", 0.0, "gray"),
            ],
        );
        assert_eq!(html.matches("<path").count(), 2);
        assert!(html.contains("approved (3, 75.0%)"));
        assert!(!html.contains("rejected"));
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let html = pie_chart("Status", &[Datum::new("approved", 5.0, "green")]);
        assert!(html.contains("<circle"));
        assert!(html.contains("100.0%"));
    }

    #[test]
    fn test_bin_counts() {
        let counts = bin_counts(&[0.0, 0.05, 0.5, 0.99, 1.0, 1.5, -1.0], 10, 0.0, 1.0);
        assert_eq!(counts.len(), 10);
        assert_eq!(counts[0], 3);
        assert_eq!(counts[5], 1);
        assert_eq!(counts[9], 3);
    }

    #[test]
    fn test_grouped_bars_and_legend() {
        let labels = vec!["W1".to_string(), "W2".to_string()];
        let series = vec![
            Series { name: "Expected".into(), color: PRIMARY, values: vec![10.0, 10.0] },
            Series { name: "Actual".into(), color: SECONDARY, values: vec![8.0] },
        ];
        let html = grouped_bar_chart("Attendance", &labels, &series);
        assert_eq!(html.matches("<rect").count(), 4 + 2);
        assert!(html.contains("W2 Actual: 0"));
    }

    #[test]
    fn test_heatmap_cells() {
        let rows = vec!["Mon".to_string(), "Tue".to_string()];
        let cols = vec!["9".to_string(), "10".to_string()];
        let html = heatmap("Activity", &rows, &cols, &[vec![1.0, 0.0], vec![2.0, 4.0]]);
        assert_eq!(html.matches("<rect").count(), 4);
        assert!(html.contains("Tue 10: 4"));
    }
}
