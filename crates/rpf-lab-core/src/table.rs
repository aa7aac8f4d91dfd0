use std::collections::HashSet;

use serde::Serialize;

use crate::column::{Cell, TableView};
use crate::data;
use crate::error::{Result, RpfLabError};
use crate::selection::{SelectOutcome, Selection};
use crate::{BenchmarkRecord, Metric};

/// Immutable benchmark results, one row per (dataset, method) pair.
///
/// Rows keep insertion order. Filtering returns a new table and never
/// touches the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsTable {
    records: Vec<BenchmarkRecord>,
}

impl MetricsTable {
    /// Builds the table from the embedded illustrative dataset.
    pub fn builtin() -> Result<Self> {
        let table = Self::from_records(data::records())?;
        tracing::debug!(
            rows = table.len(),
            datasets = table.datasets().len(),
            methods = table.methods().len(),
            "Built benchmark table"
        );
        Ok(table)
    }

    /// Validates `records` and wraps them in a table.
    pub fn from_records(records: Vec<BenchmarkRecord>) -> Result<Self> {
        let mut seen = HashSet::new();

        for (row, record) in records.iter().enumerate() {
            if record.dataset.trim().is_empty() {
                return Err(RpfLabError::EmptyName { field: "Dataset", row });
            }
            if record.method.trim().is_empty() {
                return Err(RpfLabError::EmptyName { field: "Method", row });
            }

            for metric in Metric::all() {
                let value = metric.value(record);
                if !value.is_finite() {
                    return Err(RpfLabError::NonFinite {
                        column: metric.column_name(),
                        row,
                    });
                }
                let (min, max) = metric.bounds();
                if value < min || value > max {
                    return Err(RpfLabError::OutOfRange {
                        column: metric.column_name(),
                        row,
                        value,
                        min,
                        max,
                    });
                }
            }

            if !seen.insert(record.key()) {
                return Err(RpfLabError::DuplicateRecord {
                    dataset: record.dataset.clone(),
                    method: record.method.clone(),
                });
            }
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records.iter()
    }

    /// Unique dataset names in order of first appearance.
    pub fn datasets(&self) -> Vec<&str> {
        unique(self.records.iter().map(|r| r.dataset.as_str()))
    }

    /// Unique method names in order of first appearance.
    pub fn methods(&self) -> Vec<&str> {
        unique(self.records.iter().map(|r| r.method.as_str()))
    }

    pub fn get(&self, dataset: &str, method: &str) -> Option<&BenchmarkRecord> {
        self.records
            .iter()
            .find(|r| r.dataset == dataset && r.method == method)
    }

    pub fn rows_for_dataset<'a>(
        &'a self,
        dataset: &'a str,
    ) -> impl Iterator<Item = &'a BenchmarkRecord> + 'a {
        self.records.iter().filter(move |r| r.dataset == dataset)
    }

    /// Keeps rows whose dataset and method are both selected.
    ///
    /// An empty selection on either side yields an empty table.
    pub fn filter<D, M>(&self, datasets: &[D], methods: &[M]) -> MetricsTable
    where
        D: AsRef<str>,
        M: AsRef<str>,
    {
        let datasets: HashSet<&str> = datasets.iter().map(|d| d.as_ref()).collect();
        let methods: HashSet<&str> = methods.iter().map(|m| m.as_ref()).collect();

        let records: Vec<BenchmarkRecord> = self
            .records
            .iter()
            .filter(|r| datasets.contains(r.dataset.as_str()) && methods.contains(r.method.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            datasets = datasets.len(),
            methods = methods.len(),
            matched = records.len(),
            "Filtered benchmark table"
        );

        // A subset of a validated table is still valid.
        MetricsTable { records }
    }

    /// Filters by `selection`, telling apart an empty selection from an
    /// empty result.
    pub fn select(&self, selection: &Selection) -> SelectOutcome {
        if selection.datasets.is_empty() || selection.methods.is_empty() {
            return SelectOutcome::EmptySelection;
        }

        let filtered = self.filter(&selection.datasets, &selection.methods);
        if filtered.is_empty() {
            return SelectOutcome::NoMatches;
        }
        SelectOutcome::Rows(filtered)
    }

    /// Each row projected onto the columns of `view`.
    pub fn cells(&self, view: TableView) -> Vec<Vec<Cell<'_>>> {
        self.records
            .iter()
            .map(|r| view.columns().iter().map(|c| c.cell(r)).collect())
            .collect()
    }
}

impl<'a> IntoIterator for &'a MetricsTable {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
