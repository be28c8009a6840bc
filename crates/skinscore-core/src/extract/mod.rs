//! Metric extractors.
//!
//! Each extractor turns a [`PreparedRegion`] into one raw statistic in its own
//! physical unit. They share no state and run in parallel.

mod chroma;
mod edges;
mod luminance;
pub mod stats;


use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::config::AnalysisOptions;
use crate::metric::Metric;
use crate::prepare::PreparedRegion;

pub use chroma::pigmentation;
pub use edges::{lines, wrinkles};
pub use luminance::{brightness, dryness, texture_pores};

/// One raw statistic per metric, indexed in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawMetricVector {
    values: [f32; 6],
}

impl RawMetricVector {
    pub fn from_fn<F: FnMut(Metric) -> f32>(mut f: F) -> Self {
        let mut values = [0.0; 6];
        for metric in Metric::ALL {
            values[metric.index()] = f(metric);
        }
        Self { values }
    }

    pub fn get(&self, metric: Metric) -> f32 {
        self.values[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: f32) {
        self.values[metric.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f32)> + '_ {
        Metric::ALL.iter().map(move |&m| (m, self.values[m.index()]))
    }

    pub fn to_map(&self) -> BTreeMap<Metric, f32> {
        self.iter().collect()
    }
}

/// Run the single extractor belonging to `metric`.
pub fn extract_metric(metric: Metric, region: &PreparedRegion, options: &AnalysisOptions) -> f32 {
    match metric {
        Metric::Brightness => brightness(region),
        Metric::Dryness => dryness(region, options.dryness_sigma),
        Metric::TexturePores => texture_pores(region),
        Metric::Lines => lines(region, options),
        Metric::Wrinkles => wrinkles(region, options),
        Metric::Pigmentation => pigmentation(region),
    }
}

/// Run all six extractors in parallel.
pub fn extract_all(region: &PreparedRegion, options: &AnalysisOptions) -> RawMetricVector {
    let values: Vec<(Metric, f32)> = Metric::ALL
        .par_iter()
        .map(|&metric| (metric, extract_metric(metric, region, options)))
        .collect();

    let mut raw = RawMetricVector::default();
    for (metric, value) in values {
        raw.set(metric, value);
    }
    raw
}
