// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Least-squares trend lines drawn over each site's series.

use serde::Serialize;

use crate::record::SiteRef;
use crate::series::{DataPoint, SeriesCollection};

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    /// Line slope.
    pub slope: f64,
    /// Value at `x = 0`.
    pub intercept: f64,
    /// Coefficient of determination. `None` when every y is equal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
}

impl Regression {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over `(x, y)` pairs.
///
/// Returns `None` for fewer than two points, when all x are equal, or when
/// the fitted line does not fit in `f64`.
pub fn fit<I>(pairs: I) -> Option<Regression>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();
    if pairs.len() < 2 {
        return None;
    }

    // Work in units of the largest magnitude so sums of squares stay finite.
    let scale_x = pairs.iter().fold(0.0_f64, |m, (x, _)| m.max(x.abs()));
    if scale_x == 0.0 {
        return None;
    }
    let scale_y = match pairs.iter().fold(0.0_f64, |m, (_, y)| m.max(y.abs())) {
        s if s == 0.0 => 1.0,
        s => s,
    };

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x / scale_x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y / scale_y).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x / scale_x - mean_x;
        let dy = y / scale_y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return None;
    }

    let unit_slope = sxy / sxx;
    let regression = Regression {
        slope: unit_slope * (scale_y / scale_x),
        intercept: (mean_y - unit_slope * mean_x) * scale_y,
        r_squared: (syy != 0.0).then(|| (sxy * sxy) / (sxx * syy)),
    };

    let finite = regression.slope.is_finite()
        && regression.intercept.is_finite()
        && regression.r_squared.map_or(true, f64::is_finite);
    finite.then_some(regression)
}

/// Fit a line through a site's points.
pub fn linear_regression(points: &[DataPoint<'_>]) -> Option<Regression> {
    fit(points.iter().map(|p| (p.x, p.y)))
}

/// Trend line for one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRegression<'a> {
    /// The site.
    pub site: &'a SiteRef,
    /// Its fitted line.
    #[serde(flatten)]
    pub regression: Regression,
}

/// Fit every site in `series`, skipping sites without a well-defined line.
pub fn regressions<'a>(series: &SeriesCollection<'a>) -> Vec<SiteRegression<'a>> {
    series
        .iter()
        .filter_map(|s| {
            linear_regression(&s.points).map(|regression| SiteRegression {
                site: s.site,
                regression,
            })
        })
        .collect()
}
