// Icicle: A Discrete-Event Simulator for In-Network Caching
// Copyright (C) 2026  The Icicle Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Statistical utilities
//!
//! Discrete distributions with finite support used by the workload generators, and the empirical
//! distribution helpers used by the collectors.

use rand::prelude::*;
use thiserror::Error;

/// Errors of the statistical utilities
#[derive(Error, Debug, PartialEq)]
pub enum StatsError {
    /// The probabilities passed to a discrete distribution do not sum up to one
    #[error("The pdf values must sum up to 1.0, but they sum up to {0}")]
    PdfNotNormalized(f64),
    /// The support of a distribution must not be empty
    #[error("The population must not be empty")]
    EmptyPopulation,
    /// Zipf distributions are only defined for positive exponents
    #[error("The exponent must be positive, but it is {0}")]
    NonPositiveExponent(f64),
    /// Empirical distributions need at least one sample
    #[error("The data must contain at least one element")]
    NoData,
    /// Histograms need at least one bin
    #[error("The number of bins must be positive")]
    NoBins,
}

/// # Discrete distribution with finite support
///
/// The support is the set of contiguous integers `{1, ..., n}`. Sampling draws a uniform number
/// in `[0, 1)` and performs a binary search over the cumulative distribution. The generator is
/// owned by the distribution and seeded once at construction, so a seeded instance replays the
/// exact same sequence on every run.
#[derive(Debug, Clone)]
pub struct DiscreteDist {
    pdf: Vec<f64>,
    cdf: Vec<f64>,
    rng: StdRng,
}

impl DiscreteDist {
    /// Create a distribution from the given probabilities. The probabilities must sum up to one
    /// (within a tolerance of `1e-3`).
    pub fn new(pdf: Vec<f64>, seed: Option<u64>) -> Result<Self, StatsError> {
        if pdf.is_empty() {
            return Err(StatsError::EmptyPopulation);
        }
        let sum: f64 = pdf.iter().sum();
        if (sum - 1.0).abs() > 1e-3 {
            return Err(StatsError::PdfNotNormalized(sum));
        }
        let mut cdf = Vec::with_capacity(pdf.len());
        let mut acc = 0.0;
        for p in pdf.iter() {
            acc += p;
            cdf.push(acc);
        }
        // force the last entry to one to eliminate rounding at the tail
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { pdf, cdf, rng })
    }

    /// The cardinality of the support.
    pub fn len(&self) -> usize {
        self.pdf.len()
    }

    /// Returns true if and only if the support is empty (never the case for a constructed
    /// distribution).
    pub fn is_empty(&self) -> bool {
        self.pdf.is_empty()
    }

    /// The probability density function.
    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    /// The cumulative distribution function.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Draw a random value from the support `{1, ..., n}`.
    pub fn rv(&mut self) -> usize {
        let u: f64 = self.rng.gen();
        // smallest index whose cumulative probability reaches u, offset to the 1-based support
        self.cdf.partition_point(|&p| p < u) + 1
    }
}

/// # Truncated Zipf distribution
///
/// A Zipf distribution over the finite population `{1, ..., n}`, which admits any positive
/// exponent `alpha`: `pdf[i]` is proportional to `(i + 1)^-alpha`.
#[derive(Debug, Clone)]
pub struct TruncatedZipfDist {
    dist: DiscreteDist,
    alpha: f64,
}

impl TruncatedZipfDist {
    /// Create a truncated Zipf distribution with exponent `alpha` over a population of size `n`.
    pub fn new(alpha: f64, n: usize, seed: Option<u64>) -> Result<Self, StatsError> {
        if alpha <= 0.0 {
            return Err(StatsError::NonPositiveExponent(alpha));
        }
        if n == 0 {
            return Err(StatsError::EmptyPopulation);
        }
        let mut pdf: Vec<f64> = (1..=n).map(|i| (i as f64).powf(-alpha)).collect();
        let norm: f64 = pdf.iter().sum();
        for p in pdf.iter_mut() {
            *p /= norm;
        }
        Ok(Self { dist: DiscreteDist::new(pdf, seed)?, alpha })
    }

    /// The exponent of the distribution.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The cardinality of the population.
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    /// Returns true if and only if the population is empty (never the case for a constructed
    /// distribution).
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// The probability density function.
    pub fn pdf(&self) -> &[f64] {
        self.dist.pdf()
    }

    /// The cumulative distribution function.
    pub fn cdf(&self) -> &[f64] {
        self.dist.cdf()
    }

    /// Draw a random value from the population `{1, ..., n}`.
    pub fn rv(&mut self) -> usize {
        self.dist.rv()
    }
}

/// Compute the empirical CDF of a set of samples.
///
/// Returns the sorted unique sample values paired with their cumulative probability. The last
/// probability is forced to one to eliminate rounding at the tail.
pub fn cdf(data: &[f64]) -> Result<Vec<(f64, f64)>, StatsError> {
    if data.is_empty() {
        return Err(StatsError::NoData);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut points: Vec<(f64, u64)> = Vec::new();
    for &x in sorted.iter() {
        match points.last_mut() {
            Some((value, count)) if *value == x => *count += 1,
            _ => points.push((x, 1)),
        }
    }
    let total = data.len() as f64;
    let mut acc = 0u64;
    let mut result: Vec<(f64, f64)> = points
        .into_iter()
        .map(|(value, count)| {
            acc += count;
            (value, acc as f64 / total)
        })
        .collect();
    if let Some(last) = result.last_mut() {
        last.1 = 1.0;
    }
    Ok(result)
}

/// Compute the empirical PDF of a set of samples over `n_bins` equally sized bins.
///
/// Returns the center point of each bin paired with the estimated density. All samples must not
/// be equal, since then the bin width would collapse to zero.
pub fn pdf(data: &[f64], n_bins: usize) -> Result<Vec<(f64, f64)>, StatsError> {
    if data.is_empty() {
        return Err(StatsError::NoData);
    }
    if n_bins == 0 {
        return Err(StatsError::NoBins);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if max <= min {
        return Err(StatsError::NoData);
    }
    let width = (max - min) / n_bins as f64;
    let mut counts = vec![0u64; n_bins];
    for &x in sorted.iter() {
        let mut bin = ((x - min) / width) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        counts[bin] += 1;
    }
    let norm = data.len() as f64 * width;
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (min + width * (i as f64 + 0.5), c as f64 / norm))
        .collect())
}
