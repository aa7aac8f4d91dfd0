//! Text, JSON and CSV output for tables and page views.

use std::fmt::Write;

use anyhow::Result;
use rpf_lab_core::{
    BarChart, Cell, MetricsTable, OutputConfig, OutputFormat, PageView, SceneSection, TableView,
};
use serde_json::{json, Value};

/// Points printed per cloud in text output.
const SCENE_PREVIEW_POINTS: usize = 5;

pub fn render_view(view: &PageView, format: OutputFormat, output: &OutputConfig) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Csv => Ok(view_csv(view, output.precision)),
        OutputFormat::Table => Ok(view_text(view, output)),
    }
}

pub fn render_table(
    table: &MetricsTable,
    view: TableView,
    format: OutputFormat,
    precision: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Vec<Value>> = table
                .cells(view)
                .into_iter()
                .map(|row| row.into_iter().map(cell_json).collect())
                .collect();
            let doc = json!({ "columns": view.column_names(), "rows": rows });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        OutputFormat::Csv => {
            let mut out = String::new();
            let header: Vec<String> = view.column_names().into_iter().map(csv_field).collect();
            writeln!(out, "{}", header.join(","))?;
            for row in table.cells(view) {
                let fields: Vec<String> = row.iter().map(|c| csv_field(&c.to_string())).collect();
                writeln!(out, "{}", fields.join(","))?;
            }
            Ok(out)
        }
        OutputFormat::Table => Ok(table_text(table, view, precision)),
    }
}

pub fn render_names(title: &str, names: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", title);
    let _ = writeln!(out, "{:-<40}", "");
    for (i, name) in names.iter().enumerate() {
        let _ = writeln!(out, "  {:<4} {}", i + 1, name);
    }
    out
}

fn cell_json(cell: Cell<'_>) -> Value {
    match cell {
        Cell::Text(s) => Value::from(s),
        Cell::Number(n) => json!(n),
    }
}

fn csv_field(value: impl AsRef<str>) -> String {
    let value = value.as_ref();
    if value.contains([',', '"', '\n']) {
        return format!("\"{}\"", value.replace('"', "\"\""));
    }
    value.to_string()
}

fn format_cell(cell: &Cell<'_>, precision: usize) -> String {
    match cell {
        Cell::Text(s) => s.to_string(),
        Cell::Number(n) => format!("{:.*}", precision, n),
    }
}

fn table_text(table: &MetricsTable, view: TableView, precision: usize) -> String {
    let headers = view.column_names();
    let rows: Vec<Vec<String>> = table
        .cells(view)
        .iter()
        .map(|row| row.iter().map(|c| format_cell(c, precision)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "  {}", line(&header).trim_end());
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "  {}", "-".repeat(total));
    for row in &rows {
        let _ = writeln!(out, "  {}", line(row).trim_end());
    }
    let _ = writeln!(out, "  ({} rows)", rows.len());
    out
}

/// Pads on the right by character count so labels like "Recall@5°" line up.
fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

fn view_text(view: &PageView, output: &OutputConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{:=<60}", "");
    let _ = writeln!(out, "{}", view.intro);
    let _ = writeln!(out);

    if let Some(notice) = view.notice {
        let _ = writeln!(out, "  ! {}", notice);
        return out;
    }

    for section in &view.charts {
        out.push_str(&chart_text(&section.chart, output));
        let _ = writeln!(out, "  {}", section.description);
        let _ = writeln!(out);
    }

    if let Some(scene) = &view.scene {
        out.push_str(&scene_text(scene, output.precision));
    }
    out
}

fn chart_text(chart: &BarChart, output: &OutputConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#### {}", chart.title);
    let unit = chart
        .metric
        .unit()
        .map(|u| format!(" ({})", u))
        .unwrap_or_default();
    let _ = writeln!(out, "  x: {}  y: {}{}", chart.x_label, chart.y_label, unit);

    let max = chart.max_value();
    let best = chart.best().map(|(m, b)| (m.to_string(), b.dataset.clone()));
    let method_width = chart.groups.iter().map(|g| g.method.chars().count()).max().unwrap_or(0);
    let dataset_width = chart.series.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    for group in &chart.groups {
        for (i, bar) in group.bars.iter().enumerate() {
            let method = if i == 0 { group.method.as_str() } else { "" };
            let len = bar_len(bar.value, max, output.bar_width);
            let is_best = best
                .as_ref()
                .is_some_and(|(m, d)| *m == group.method && *d == bar.dataset);
            let _ = writeln!(
                out,
                "  {} {} {} {:.*}{}",
                pad(method, method_width),
                pad(&bar.dataset, dataset_width),
                pad(&"█".repeat(len), output.bar_width),
                output.precision,
                bar.value,
                if is_best { "  *best" } else { "" }
            );
        }
    }
    out
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if width == 0 || max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    len.clamp(1, width)
}

fn scene_text(scene: &SceneSection, precision: usize) -> String {
    let mut out = String::new();
    let s = &scene.summary;
    let _ = writeln!(out, "#### {} (seed {})", scene.title, scene.seed);
    let _ = writeln!(out, "  Predicted vs ground truth:");
    let _ = writeln!(out, "    RE:            {:.*} deg", precision, s.rotation_error_deg);
    let _ = writeln!(out, "    TE:            {:.*}", precision, s.translation_error);
    let _ = writeln!(out, "    RMSE:          {:.*}", precision, s.rmse);
    let _ = writeln!(
        out,
        "    Overlap Ratio: {:.*} (tau {})",
        precision, s.overlap_ratio, s.overlap_tau
    );
    for cloud in &scene.clouds {
        let _ = writeln!(
            out,
            "  {} [{}], {} points",
            cloud.label,
            cloud.color,
            cloud.points.len()
        );
        for p in cloud.points.iter().take(SCENE_PREVIEW_POINTS) {
            let _ = writeln!(
                out,
                "    ({:>8.3}, {:>8.3}, {:>8.3})",
                p[0], p[1], p[2]
            );
        }
    }
    out
}

fn view_csv(view: &PageView, precision: usize) -> String {
    let mut out = String::new();
    if let Some(notice) = view.notice {
        let _ = writeln!(out, "# {}", notice);
        return out;
    }
    let _ = writeln!(out, "metric,method,dataset,value");
    for section in &view.charts {
        let metric = csv_field(section.chart.metric.column_name());
        for (method, bar) in section.chart.bars() {
            let _ = writeln!(
                out,
                "{},{},{},{:.*}",
                metric,
                csv_field(method),
                csv_field(&bar.dataset),
                precision,
                bar.value
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpf_lab_core::{render_page, Notice, Page, PageRequest, Selection};

    fn table() -> MetricsTable {
        MetricsTable::builtin().unwrap()
    }

    #[test]
    fn test_table_csv_header_and_rows() {
        let filtered = table().filter(&["TUD-L"], &["GARF"]);
        let csv = render_table(&filtered, TableView::Rigidity, OutputFormat::Csv, 4).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Dataset,Method,RE,TE,Recall@5°,Recall@1cm,RMSE,Overlap_Ratio"
        );
        assert_eq!(lines[1], "TUD-L,GARF,0.9,0.025,0.88,0.87,0.035,0.65");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_table_json_keeps_column_order() {
        let filtered = table().filter(&["ModelNet 40"], &["RPF (Joint)"]);
        let out = render_table(&filtered, TableView::Pairwise, OutputFormat::Json, 4).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["columns"][4], "Recall@5°");
        assert_eq!(doc["rows"][0][1], "RPF (Joint)");
        assert_eq!(doc["rows"][0][4], 0.995);
        assert_eq!(doc["rows"][0].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_table_text_lists_every_row() {
        let text = render_table(&table(), TableView::Pairwise, OutputFormat::Table, 3).unwrap();
        assert!(text.contains("(16 rows)"));
        assert!(text.contains("ModelNet 40"));
        assert!(text.contains("0.995"));
    }

    #[test]
    fn test_view_text_marks_best_bar() {
        let request = PageRequest::new(
            Page::MetricComparison,
            Selection::new(["TUD-L"], ["RPF (Joint)", "PointDSC"])
                .with_metrics([rpf_lab_core::Metric::RotationError]),
        );
        let view = render_page(&request, &table());
        let text = render_view(&view, OutputFormat::Table, &OutputConfig::default()).unwrap();
        assert!(text.contains("#### Rotation Error (RE) by Method and Dataset"));
        let best_line = text.lines().find(|l| l.contains("*best")).unwrap();
        assert!(best_line.contains("RPF (Joint)"));
    }

    #[test]
    fn test_notice_in_every_format() {
        let request = PageRequest::new(
            Page::RigidityPreservation,
            Selection::new(Vec::<String>::new(), ["GARF"]),
        );
        let view = render_page(&request, &table());
        let message = Notice::EmptySelection.message();

        let text = render_view(&view, OutputFormat::Table, &OutputConfig::default()).unwrap();
        assert!(text.contains(message));

        let csv = render_view(&view, OutputFormat::Csv, &OutputConfig::default()).unwrap();
        assert_eq!(csv.trim(), format!("# {}", message));

        let json = render_view(&view, OutputFormat::Json, &OutputConfig::default()).unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["notice"], "empty_selection");
    }

    #[test]
    fn test_view_csv_rows() {
        let request = PageRequest::new(
            Page::RigidityPreservation,
            Selection::new(["TUD-L", "ModelNet 40"], ["GARF"]),
        )
        .with_scene(None);
        let view = render_page(&request, &table());
        let csv = render_view(&view, OutputFormat::Csv, &OutputConfig::default()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "metric,method,dataset,value");
        assert_eq!(lines[1], "RMSE,GARF,TUD-L,0.0350");
        assert_eq!(lines[4], "Overlap_Ratio,GARF,ModelNet 40,0.6800");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(0.5, 1.0, 40), 20);
        assert_eq!(bar_len(0.0001, 1.0, 40), 1);
        assert_eq!(bar_len(0.0, 1.0, 40), 0);
        assert_eq!(bar_len(1.0, 0.0, 40), 0);
    }

    #[test]
    fn test_csv_field_quotes() {
        assert_eq!(csv_field("RPF (Single)"), "RPF (Single)");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
    }
}
