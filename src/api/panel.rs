use std::collections::HashSet;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ScaleMode, TransformMode};
use crate::error::{ChartError, ChartResult};

/// Number of panels the dashboard grid holds.
pub const PANEL_COUNT: usize = 8;

/// One chart of the dashboard: its series, axis unit, scale and transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    /// Legend label to provider series id. Insertion order is legend order.
    pub series: IndexMap<String, String>,
    pub unit_label: String,
    #[serde(default)]
    pub scale: ScaleMode,
    #[serde(default)]
    pub transform: TransformMode,
}

impl Panel {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        series: &[(&str, &str)],
        unit_label: impl Into<String>,
        scale: ScaleMode,
        transform: TransformMode,
    ) -> Self {
        Self {
            title: title.into(),
            series: series
                .iter()
                .map(|(label, id)| ((*label).to_owned(), (*id).to_owned()))
                .collect(),
            unit_label: unit_label.into(),
            scale,
            transform,
        }
    }

    /// Text of the value axis. Percentage units collapse to "Percentage (%)".
    #[must_use]
    pub fn y_axis_label(&self) -> &str {
        if self.unit_label.starts_with("Percentage") {
            "Percentage (%)"
        } else {
            &self.unit_label
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if self.title.trim().is_empty() {
            return Err(ChartError::InvalidCatalog(
                "panel title must not be empty".to_owned(),
            ));
        }
        if self.series.is_empty() {
            return Err(ChartError::InvalidCatalog(format!(
                "panel `{}` has no series",
                self.title
            )));
        }
        if let Some((label, _)) = self.series.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(ChartError::InvalidCatalog(format!(
                "panel `{}` series `{label}` has an empty id",
                self.title
            )));
        }
        Ok(())
    }
}

/// Ordered, validated set of the dashboard's panels.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCatalog {
    panels: Vec<Panel>,
}

impl PanelCatalog {
    /// Validates panel count, non-empty series maps and unique titles.
    pub fn new(panels: Vec<Panel>) -> ChartResult<Self> {
        if panels.len() != PANEL_COUNT {
            return Err(ChartError::InvalidCatalog(format!(
                "expected {PANEL_COUNT} panels, got {}",
                panels.len()
            )));
        }

        let mut titles = HashSet::with_capacity(panels.len());
        for panel in &panels {
            panel.validate()?;
            if !titles.insert(panel.title.as_str()) {
                return Err(ChartError::InvalidCatalog(format!(
                    "duplicate panel title `{}`",
                    panel.title
                )));
            }
        }

        Ok(Self { panels })
    }

    /// The built-in economic catalog, constructed once per process.
    #[must_use]
    pub fn standard() -> &'static PanelCatalog {
        static STANDARD: OnceLock<PanelCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| PanelCatalog {
            panels: standard_panels(),
        })
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.title == title)
    }
}

fn standard_panels() -> Vec<Panel> {
    use ScaleMode::{Linear, Logarithmic};
    use TransformMode::{Raw, YearOverYear};

    vec![
        Panel::new(
            "Inflation (Year-over-Year Change)",
            &[
                ("Food", "CPIUFDSL"),
                ("Shelter", "CUSR0000SAH1"),
                ("Transportation", "CUSR0000SAT1"),
                ("Energy", "CPIENGSL"),
            ],
            "Percentage Change",
            Linear,
            YearOverYear,
        ),
        Panel::new(
            "Construction and Industrial Production (Year-over-Year Change)",
            &[
                ("Construction Spending", "TTLCONS"),
                ("Industrial Production", "INDPRO"),
            ],
            "Percentage Change",
            Linear,
            YearOverYear,
        ),
        Panel::new(
            "Total Industry Capacity Utilization",
            &[("Capacity Utilization", "TCU")],
            "Percentage",
            Linear,
            Raw,
        ),
        Panel::new(
            "Social Services Spending",
            &[
                ("Education", "G160291A027NBEA"),
                ("Health", "HLTHSCPCHCSA"),
                ("Social Benefits", "W823RC1"),
            ],
            "Billions of Dollars",
            Logarithmic,
            Raw,
        ),
        Panel::new(
            "Financial Sector - Loans and Credit",
            &[("Private Loans", "BUSLOANS"), ("Consumer Credit", "TOTALSL")],
            "Billions of Dollars",
            Logarithmic,
            Raw,
        ),
        Panel::new(
            "Stock Market",
            &[("S&P 500", "SP500")],
            "USD",
            Linear,
            Raw,
        ),
        Panel::new(
            "GDP Growth (Annual)",
            &[("Real GDP", "A191RL1A225NBEA")],
            "Percentage Change",
            Linear,
            Raw,
        ),
        Panel::new(
            "Labor Market Indicators",
            &[
                ("Unemployment", "UNRATE"),
                ("Employment Population Ratio", "EMRATIO"),
            ],
            "Percentage",
            Linear,
            Raw,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{PanelCatalog, standard_panels};

    #[test]
    fn standard_panels_pass_validation() {
        let catalog = PanelCatalog::new(standard_panels()).expect("standard catalog is valid");
        assert_eq!(&catalog, PanelCatalog::standard());
    }
}
