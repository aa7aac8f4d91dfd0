//! The two dashboard pages as a pure function of an explicit request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chart::BarChart;
use crate::config::SceneConfig;
use crate::scene::{AlignmentSummary, CloudKind, ConceptualScene};
use crate::selection::{SelectOutcome, Selection};
use crate::{Metric, MetricsTable, RpfLabError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    MetricComparison,
    RigidityPreservation,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::MetricComparison => "Metric Comparison Dashboard",
            Page::RigidityPreservation => "Rigidity Preservation Analysis",
        }
    }

    pub fn intro(&self) -> &'static str {
        match self {
            Page::MetricComparison => {
                "Compare point cloud registration methods across datasets and metrics. \
                 Lower is better for RE and TE; higher is better for recall."
            }
            Page::RigidityPreservation => {
                "How well each method preserves the rigidity of the point clouds during \
                 transformation. Lower RMSE is better; a higher overlap ratio is better."
            }
        }
    }

    /// Metrics plotted for `selection` on this page.
    pub fn metrics(&self, selection: &Selection) -> Vec<Metric> {
        match self {
            Page::MetricComparison => selection.unique_metrics(),
            Page::RigidityPreservation => Metric::rigidity().to_vec(),
        }
    }

    pub fn all() -> &'static [Page] {
        &[Page::MetricComparison, Page::RigidityPreservation]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = RpfLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compare" | "comparison" | "metrics" | "metric_comparison" => {
                Ok(Page::MetricComparison)
            }
            "rigidity" | "rigidity_preservation" => Ok(Page::RigidityPreservation),
            _ => Err(RpfLabError::UnknownPage(s.to_string())),
        }
    }
}

/// Everything a page render depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: Page,
    pub selection: Selection,
    /// Conceptual scene settings; `None` leaves the scene out
    pub scene: Option<SceneConfig>,
}

impl PageRequest {
    pub fn new(page: Page, selection: Selection) -> Self {
        Self {
            page,
            selection,
            scene: Some(SceneConfig::default()),
        }
    }

    pub fn with_scene(mut self, scene: Option<SceneConfig>) -> Self {
        self.scene = scene;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    EmptySelection,
    NoMatches,
    NoMetrics,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptySelection => {
                "Please select at least one dataset and one method to display the charts."
            }
            Notice::NoMatches => {
                "No data available for the selected combination of datasets and methods."
            }
            Notice::NoMetrics => "Please select at least one metric to display its chart.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSection {
    pub description: &'static str,
    pub chart: BarChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudView {
    pub kind: CloudKind,
    pub label: &'static str,
    pub color: &'static str,
    pub points: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSection {
    pub title: &'static str,
    pub seed: u64,
    pub summary: AlignmentSummary,
    pub clouds: Vec<CloudView>,
}

impl SceneSection {
    pub fn build(config: &SceneConfig) -> Self {
        let scene = ConceptualScene::generate(config.seed, config.num_points);
        let clouds = CloudKind::all()
            .iter()
            .map(|kind| CloudView {
                kind: *kind,
                label: kind.label(),
                color: kind.color(),
                points: scene.cloud(*kind).iter().map(|p| [p.x, p.y, p.z]).collect(),
            })
            .collect();

        Self {
            title: "Conceptual 3D Point Cloud Alignment",
            seed: config.seed,
            summary: scene.summary(config.overlap_tau),
            clouds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    pub intro: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub charts: Vec<ChartSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneSection>,
}

impl PageView {
    fn notice(page: Page, notice: Notice) -> Self {
        Self {
            page,
            title: page.title(),
            intro: page.intro(),
            notice: Some(notice),
            charts: Vec::new(),
            scene: None,
        }
    }

    pub fn is_notice(&self) -> bool {
        self.notice.is_some()
    }
}

/// Renders one page from `request` against `table`.
///
/// Empty selections and empty results come back as a notice, never an
/// error.
pub fn render_page(request: &PageRequest, table: &MetricsTable) -> PageView {
    let page = request.page;

    let filtered = match table.select(&request.selection) {
        SelectOutcome::EmptySelection => return PageView::notice(page, Notice::EmptySelection),
        SelectOutcome::NoMatches => return PageView::notice(page, Notice::NoMatches),
        SelectOutcome::Rows(rows) => rows,
    };

    let metrics = page.metrics(&request.selection);
    if metrics.is_empty() {
        return PageView::notice(page, Notice::NoMetrics);
    }

    let charts = metrics
        .into_iter()
        .map(|metric| ChartSection {
            description: metric.description(),
            chart: BarChart::grouped(&filtered, metric),
        })
        .collect();

    let scene = match page {
        Page::RigidityPreservation => request.scene.as_ref().map(SceneSection::build),
        Page::MetricComparison => None,
    };

    tracing::debug!(page = ?page, rows = filtered.len(), "Rendered page");

    PageView {
        page,
        title: page.title(),
        intro: page.intro(),
        notice: None,
        charts,
        scene,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MetricsTable {
        MetricsTable::builtin().unwrap()
    }

    #[test]
    fn test_comparison_page_defaults() {
        let request = PageRequest::new(Page::MetricComparison, Selection::default());
        let view = render_page(&request, &table());

        assert!(!view.is_notice());
        let metrics: Vec<_> = view.charts.iter().map(|c| c.chart.metric).collect();
        assert_eq!(metrics, vec![Metric::RotationError, Metric::TranslationError]);
        assert_eq!(view.charts[0].chart.groups.len(), 4);
        assert!(view.scene.is_none());
    }

    #[test]
    fn test_rigidity_page_plots_fixed_metrics_and_scene() {
        let selection = Selection::default().with_metrics(Vec::<Metric>::new());
        let request = PageRequest::new(Page::RigidityPreservation, selection);
        let view = render_page(&request, &table());

        let metrics: Vec<_> = view.charts.iter().map(|c| c.chart.metric).collect();
        assert_eq!(metrics, vec![Metric::Rmse, Metric::OverlapRatio]);

        let scene = view.scene.unwrap();
        assert_eq!(scene.clouds.len(), 3);
        assert!(scene.clouds.iter().all(|c| c.points.len() == 100));
    }

    #[test]
    fn test_scene_can_be_left_out() {
        let request = PageRequest::new(Page::RigidityPreservation, Selection::default())
            .with_scene(None);
        assert!(render_page(&request, &table()).scene.is_none());
    }

    #[test]
    fn test_notices() {
        let table = table();

        let empty = PageRequest::new(Page::MetricComparison, Selection::new(["TUD-L"], Vec::<String>::new()));
        assert_eq!(render_page(&empty, &table).notice, Some(Notice::EmptySelection));

        let missing = PageRequest::new(Page::RigidityPreservation, Selection::new(["KITTI"], ["GARF"]));
        assert_eq!(render_page(&missing, &table).notice, Some(Notice::NoMatches));

        let no_metrics = PageRequest::new(Page::MetricComparison, Selection::new(["TUD-L"], ["GARF"]));
        let view = render_page(&no_metrics, &table);
        assert_eq!(view.notice, Some(Notice::NoMetrics));
        assert!(view.charts.is_empty());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!("rigidity".parse::<Page>().unwrap(), Page::RigidityPreservation);
        assert_eq!("Compare".parse::<Page>().unwrap(), Page::MetricComparison);
        assert!("home".parse::<Page>().is_err());
    }
}
