use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BenchmarkRecord, Metric, RpfLabError};

/// A column of the benchmark table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Dataset,
    Method,
    Metric(Metric),
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Dataset => "Dataset",
            Column::Method => "Method",
            Column::Metric(metric) => metric.column_name(),
        }
    }

    pub fn cell<'a>(&self, record: &'a BenchmarkRecord) -> Cell<'a> {
        match self {
            Column::Dataset => Cell::Text(&record.dataset),
            Column::Method => Cell::Text(&record.method),
            Column::Metric(metric) => Cell::Number(metric.value(record)),
        }
    }
}

/// A single value of a projected row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Which set of columns a table is shown with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableView {
    /// Pose accuracy columns used by the metric comparison page
    #[default]
    Pairwise,
    /// Pairwise columns plus RMSE and overlap ratio
    Rigidity,
}

const PAIRWISE_COLUMNS: [Column; 6] = [
    Column::Dataset,
    Column::Method,
    Column::Metric(Metric::RotationError),
    Column::Metric(Metric::TranslationError),
    Column::Metric(Metric::Recall5Deg),
    Column::Metric(Metric::Recall1Cm),
];

const RIGIDITY_COLUMNS: [Column; 8] = [
    Column::Dataset,
    Column::Method,
    Column::Metric(Metric::RotationError),
    Column::Metric(Metric::TranslationError),
    Column::Metric(Metric::Recall5Deg),
    Column::Metric(Metric::Recall1Cm),
    Column::Metric(Metric::Rmse),
    Column::Metric(Metric::OverlapRatio),
];

impl TableView {
    pub fn label(&self) -> &'static str {
        match self {
            TableView::Pairwise => "pairwise",
            TableView::Rigidity => "rigidity",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            TableView::Pairwise => &PAIRWISE_COLUMNS,
            TableView::Rigidity => &RIGIDITY_COLUMNS,
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(Column::name).collect()
    }

    pub fn all() -> &'static [TableView] {
        &[TableView::Pairwise, TableView::Rigidity]
    }
}

impl FromStr for TableView {
    type Err = RpfLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pairwise" | "pose" => Ok(TableView::Pairwise),
            "rigidity" | "full" => Ok(TableView::Rigidity),
            _ => Err(RpfLabError::UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairwise_schema() {
        assert_eq!(
            TableView::Pairwise.column_names(),
            vec!["Dataset", "Method", "RE", "TE", "Recall@5°", "Recall@1cm"]
        );
    }

    #[test]
    fn test_rigidity_schema_extends_pairwise() {
        let names = TableView::Rigidity.column_names();
        assert_eq!(names.len(), 8);
        assert_eq!(&names[..6], TableView::Pairwise.column_names().as_slice());
        assert_eq!(&names[6..], &["RMSE", "Overlap_Ratio"]);
    }

    #[test]
    fn test_cell_projection() {
        let record = BenchmarkRecord::new("TUD-L", "GARF").with_pose_errors(0.9, 0.025);
        assert_eq!(Column::Method.cell(&record), Cell::Text("GARF"));
        assert_eq!(
            Column::Metric(Metric::RotationError).cell(&record),
            Cell::Number(0.9)
        );
        assert_eq!(Cell::Number(0.025).to_string(), "0.025");
    }

    #[test]
    fn test_parse_view() {
        assert_eq!("Rigidity".parse::<TableView>().unwrap(), TableView::Rigidity);
        assert!("wide".parse::<TableView>().is_err());
    }
}
