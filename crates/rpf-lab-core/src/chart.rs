//! Grouped bar charts: methods along the x axis, one bar per dataset.

use serde::Serialize;

use crate::{Metric, MetricsTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub dataset: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub method: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub metric: Metric,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Datasets in legend order
    pub series: Vec<String>,
    pub groups: Vec<BarGroup>,
}

impl BarChart {
    pub fn grouped(table: &MetricsTable, metric: Metric) -> Self {
        let groups = table
            .methods()
            .into_iter()
            .map(|method| BarGroup {
                method: method.to_string(),
                bars: table
                    .iter()
                    .filter(|r| r.method == method)
                    .map(|r| Bar {
                        dataset: r.dataset.clone(),
                        value: metric.value(r),
                    })
                    .collect(),
            })
            .collect();

        Self {
            metric,
            title: format!("{} by Method and Dataset", metric.label()),
            x_label: "Method",
            y_label: metric.axis_label(),
            series: table.datasets().into_iter().map(String::from).collect(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.bars.is_empty())
    }

    pub fn bars(&self) -> impl Iterator<Item = (&str, &Bar)> {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(move |b| (g.method.as_str(), b)))
    }

    pub fn max_value(&self) -> f64 {
        self.bars().map(|(_, b)| b.value).fold(0.0, f64::max)
    }

    /// Best (method, bar) on this chart: lowest error or highest score.
    pub fn best(&self) -> Option<(&str, &Bar)> {
        let lower = self.metric.lower_is_better();
        self.bars().reduce(|best, candidate| {
            let better = if lower {
                candidate.1.value < best.1.value
            } else {
                candidate.1.value > best.1.value
            };
            if better {
                candidate
            } else {
                best
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MODELNET_40, TUD_L};

    fn chart(metric: Metric, methods: &[&str]) -> BarChart {
        let table = MetricsTable::builtin().unwrap();
        let filtered = table.filter(&[TUD_L, MODELNET_40], methods);
        BarChart::grouped(&filtered, metric)
    }

    #[test]
    fn test_groups_by_method() {
        let chart = chart(Metric::RotationError, &["DCPNet", "RPF (Single)"]);
        assert_eq!(chart.title, "Rotation Error (RE) by Method and Dataset");
        assert_eq!(chart.y_label, "RE");
        assert_eq!(chart.series, vec![TUD_L, MODELNET_40]);

        let methods: Vec<_> = chart.groups.iter().map(|g| g.method.as_str()).collect();
        assert_eq!(methods, vec!["RPF (Single)", "DCPNet"]);

        let rpf = &chart.groups[0];
        assert_eq!(rpf.bars.len(), 2);
        assert_eq!(rpf.bars[0].dataset, TUD_L);
        assert_eq!(rpf.bars[0].value, 0.5);
        assert_eq!(rpf.bars[1].value, 0.3);
    }

    #[test]
    fn test_best_respects_direction() {
        let errors = chart(Metric::Rmse, &["RPF (Joint)", "GARF"]);
        let (method, bar) = errors.best().unwrap();
        assert_eq!((method, bar.dataset.as_str(), bar.value), ("RPF (Joint)", MODELNET_40, 0.008));

        let overlap = chart(Metric::OverlapRatio, &["PointDSC", "GARF"]);
        let (method, bar) = overlap.best().unwrap();
        assert_eq!((method, bar.value), ("GARF", 0.68));
        assert_eq!(overlap.y_label, "Overlap Ratio");
    }

    #[test]
    fn test_empty_table_gives_empty_chart() {
        let chart = chart(Metric::TranslationError, &[]);
        assert!(chart.is_empty());
        assert!(chart.best().is_none());
        assert_eq!(chart.max_value(), 0.0);
    }
}
