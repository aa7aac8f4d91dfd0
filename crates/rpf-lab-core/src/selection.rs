use serde::{Deserialize, Serialize};

use crate::data::{DATASETS, DEFAULT_METHODS};
use crate::{Metric, MetricsTable};

/// What the user picked: datasets, methods and, on the comparison page,
/// metrics to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub datasets: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            datasets: DATASETS.iter().map(|d| d.to_string()).collect(),
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            metrics: vec![Metric::RotationError, Metric::TranslationError],
        }
    }
}

impl Selection {
    pub fn new<D, M>(datasets: D, methods: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            datasets: datasets.into_iter().map(Into::into).collect(),
            methods: methods.into_iter().map(Into::into).collect(),
            metrics: Vec::new(),
        }
    }

    /// Every dataset and method in `table`, with the default metrics.
    pub fn everything(table: &MetricsTable) -> Self {
        Self {
            datasets: table.datasets().into_iter().map(String::from).collect(),
            methods: table.methods().into_iter().map(String::from).collect(),
            metrics: Metric::pairwise().to_vec(),
        }
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    pub fn set_datasets(&mut self, datasets: Vec<String>) {
        self.datasets = datasets;
    }

    pub fn set_methods(&mut self, methods: Vec<String>) {
        self.methods = methods;
    }

    pub fn set_metrics(&mut self, metrics: Vec<Metric>) {
        self.metrics = metrics;
    }

    /// Selected metrics in order, without repeats.
    pub fn unique_metrics(&self) -> Vec<Metric> {
        let mut out = Vec::new();
        for metric in &self.metrics {
            if !out.contains(metric) {
                out.push(*metric);
            }
        }
        out
    }
}

/// Result of filtering by a [`Selection`].
///
/// The two empty cases are informational; callers show a notice instead of
/// charts.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// No dataset or no method was selected
    EmptySelection,
    /// The selection is non-empty but matches no rows
    NoMatches,
    Rows(MetricsTable),
}

impl SelectOutcome {
    pub fn rows(&self) -> Option<&MetricsTable> {
        match self {
            SelectOutcome::Rows(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, SelectOutcome::Rows(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = Selection::default();
        assert_eq!(selection.datasets, vec!["TUD-L", "ModelNet 40"]);
        assert_eq!(
            selection.methods,
            vec!["RPF (Single)", "RPF (Joint)", "DCPNet", "RPMNet"]
        );
        assert_eq!(
            selection.metrics,
            vec![Metric::RotationError, Metric::TranslationError]
        );
    }

    #[test]
    fn test_unique_metrics_keeps_first_order() {
        let selection = Selection::new(["TUD-L"], ["GARF"]).with_metrics([
            Metric::Recall1Cm,
            Metric::RotationError,
            Metric::Recall1Cm,
        ]);
        assert_eq!(
            selection.unique_metrics(),
            vec![Metric::Recall1Cm, Metric::RotationError]
        );
    }

    #[test]
    fn test_everything_covers_table() {
        let table = MetricsTable::builtin().unwrap();
        let selection = Selection::everything(&table);
        assert_eq!(selection.datasets.len(), 2);
        assert_eq!(selection.methods.len(), 8);
        assert_eq!(table.select(&selection).rows(), Some(&table));
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(SelectOutcome::EmptySelection.is_empty());
        assert!(SelectOutcome::NoMatches.rows().is_none());
    }
}
