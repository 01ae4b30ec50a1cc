// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-site point series for result diagrams.
//!
//! The diagram view plots one series per site: every result contributes a
//! point `(x, y)` read from the payload through two user-chosen key paths.
//! Results whose axis values are not JSON numbers are set aside with a
//! reason so the view can warn about them.
//!
//! # Invariants
//!
//! - Every input result ends up either in exactly one site series or in the
//!   rejection list, never both and never neither.
//! - Sites appear in the order they are first seen in the input.
//! - Points within a site are sorted by ascending `x`; ties keep input order.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::keypath::KeyPath;
use crate::record::{ResultRecord, SiteRef};

/// Why a result did not produce a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The X key path did not resolve to a number.
    XNotNumeric,
    /// The X value was numeric but the Y value was not.
    YNotNumeric,
}

impl RejectReason {
    /// User-facing warning text.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::XNotNumeric => "X axis value not numeric",
            RejectReason::YNotNumeric => "Y axis value not numeric",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for RejectReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// One plotted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint<'a> {
    /// X axis value.
    pub x: f64,
    /// Y axis value.
    pub y: f64,
    /// The result the point was read from.
    pub result: &'a ResultRecord,
}

/// A result that could not be plotted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedResult<'a> {
    /// The rejected result.
    pub result: &'a ResultRecord,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// All points measured on one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSeries<'a> {
    /// The site, as referenced by its first result.
    pub site: &'a SiteRef,
    /// Points in ascending `x` order.
    pub points: Vec<DataPoint<'a>>,
}

/// Site series keyed by site identifier, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesCollection<'a> {
    buckets: Vec<SiteSeries<'a>>,
    #[serde(skip)]
    index: HashMap<&'a str, usize>,
}

impl<'a> SeriesCollection<'a> {
    fn push(&mut self, point: DataPoint<'a>) {
        let result: &'a ResultRecord = point.result;
        let site = &result.site;
        let slot = match self.index.get(site.id.as_str()) {
            Some(&slot) => slot,
            None => {
                self.buckets.push(SiteSeries {
                    site,
                    points: Vec::new(),
                });
                let slot = self.buckets.len() - 1;
                self.index.insert(site.id.as_str(), slot);
                slot
            }
        };
        self.buckets[slot].points.push(point);
    }

    fn sort_points(&mut self) {
        for bucket in &mut self.buckets {
            // sort_by is stable, so equal x keeps input order. Adding 0.0
            // folds -0.0 into 0.0, which total_cmp would otherwise order first.
            bucket
                .points
                .sort_by(|a, b| (a.x + 0.0).total_cmp(&(b.x + 0.0)));
        }
    }

    /// Number of sites with at least one point.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// No site has any point.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Series for a site identifier.
    pub fn get(&self, site_id: &str) -> Option<&SiteSeries<'a>> {
        self.index.get(site_id).map(|&slot| &self.buckets[slot])
    }

    /// Series in first-seen site order.
    pub fn iter(&self) -> std::slice::Iter<'_, SiteSeries<'a>> {
        self.buckets.iter()
    }

    /// Total number of points across all sites.
    pub fn point_count(&self) -> usize {
        self.buckets.iter().map(|b| b.points.len()).sum()
    }
}

impl<'s, 'a> IntoIterator for &'s SeriesCollection<'a> {
    type Item = &'s SiteSeries<'a>;
    type IntoIter = std::slice::Iter<'s, SiteSeries<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Output of [`build_series`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesOutcome<'a> {
    /// Plottable points grouped by site.
    pub series: SeriesCollection<'a>,
    /// Results that produced no point, in input order.
    pub rejected: Vec<RejectedResult<'a>>,
}

impl<'a> SeriesOutcome<'a> {
    /// Split into the collection and the rejection list.
    pub fn into_parts(self) -> (SeriesCollection<'a>, Vec<RejectedResult<'a>>) {
        (self.series, self.rejected)
    }
}

/// Build per-site series from `results` using `x_path` and `y_path`.
///
/// X is checked before Y, so a result failing both axes is rejected with
/// [`RejectReason::XNotNumeric`].
pub fn build_series<'a>(
    results: &'a [ResultRecord],
    x_path: &KeyPath,
    y_path: &KeyPath,
) -> SeriesOutcome<'a> {
    let mut outcome = SeriesOutcome::default();

    for result in results {
        let Some(x) = result.lookup(x_path).as_number() else {
            outcome.rejected.push(RejectedResult {
                result,
                reason: RejectReason::XNotNumeric,
            });
            continue;
        };
        let Some(y) = result.lookup(y_path).as_number() else {
            outcome.rejected.push(RejectedResult {
                result,
                reason: RejectReason::YNotNumeric,
            });
            continue;
        };
        outcome.series.push(DataPoint { x, y, result });
    }

    outcome.series.sort_points();

    debug!(
        x = %x_path,
        y = %y_path,
        sites = outcome.series.len(),
        points = outcome.series.point_count(),
        rejected = outcome.rejected.len(),
        "Built diagram series"
    );

    outcome
}
