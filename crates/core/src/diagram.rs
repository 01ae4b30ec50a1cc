// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Everything the diagram view renders for one axis selection.

use serde::Serialize;
use tracing::warn;

use crate::keypath::KeyPath;
use crate::record::ResultRecord;
use crate::regression::{regressions, SiteRegression};
use crate::series::{build_series, RejectedResult, SeriesCollection};

/// Series, trend lines and rejection warnings for an X/Y selection.
///
/// Rebuilt from scratch whenever the results or the axis selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram<'a> {
    /// X axis key path.
    pub x_path: KeyPath,
    /// Y axis key path.
    pub y_path: KeyPath,
    /// Per-site points.
    pub series: SeriesCollection<'a>,
    /// Per-site trend lines.
    pub regressions: Vec<SiteRegression<'a>>,
    /// Results left out of the chart.
    pub rejected: Vec<RejectedResult<'a>>,
}

impl<'a> Diagram<'a> {
    /// Build the diagram for `results`.
    pub fn build(results: &'a [ResultRecord], x_path: &KeyPath, y_path: &KeyPath) -> Self {
        let (series, rejected) = build_series(results, x_path, y_path).into_parts();
        let regressions = regressions(&series);

        if !rejected.is_empty() {
            warn!(
                rejected = rejected.len(),
                total = results.len(),
                "Some results could not be plotted"
            );
        }

        Self {
            x_path: x_path.clone(),
            y_path: y_path.clone(),
            series,
            regressions,
            rejected,
        }
    }

    /// Nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// One warning line per rejected result.
    pub fn warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.rejected.iter().map(|r| {
            let id = r
                .result
                .id
                .as_ref()
                .map_or_else(|| "<unsaved>".to_string(), |id| id.to_string());
            format!("Result {} from site {}: {}", id, r.result.site.label(), r.reason)
        })
    }
}
