//! Natural breaks classification and the label frequency filter built on it.
//!
//! [`jenks_breaks`] is the Fisher-Jenks optimisation: it partitions a set of
//! values into classes minimising the within-class variance and returns the
//! class bounds. [`jenks_filter`] counts labels, classifies the counts and
//! keeps the labels of the dominant classes.

use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    InvalidSortMode(String),
    InvalidCutoff { cutoff: usize, bounds: usize },
    InfeasibleBreaks { nb_class: usize, values: usize },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidSortMode(mode) => write!(
                f,
                "sort_by should be either 'alphabetically' or 'count', not {}",
                mode
            ),
            StatsError::InvalidCutoff { cutoff, bounds } => write!(
                f,
                "cutoff {} is out of range for {} class bounds",
                cutoff, bounds
            ),
            StatsError::InfeasibleBreaks { nb_class, values } => write!(
                f,
                "number of classes must be at least 2 and smaller than the number of values ({} classes, {} values)",
                nb_class, values
            ),
        }
    }
}

impl std::error::Error for StatsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Alphabetically,
    Count,
}

impl FromStr for SortBy {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetically" => Ok(SortBy::Alphabetically),
            "count" => Ok(SortBy::Count),
            other => Err(StatsError::InvalidSortMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JenksOptions {
    pub nb_class: usize,
    /// Position of the threshold bound, counted from the end of the bounds.
    pub cutoff: usize,
    pub strict: bool,
    pub sort_by: SortBy,
}

impl Default for JenksOptions {
    fn default() -> Self {
        JenksOptions {
            nb_class: 3,
            cutoff: 2,
            strict: false,
            sort_by: SortBy::Alphabetically,
        }
    }
}

/// Computes the Jenks natural breaks of `values` into `nb_class` classes.
///
/// Returns `nb_class + 1` bounds: the minimum, the upper bound of every
/// class but the last, and the maximum.
///
/// # Errors
///
/// `StatsError::InfeasibleBreaks` when `nb_class < 2`, when there are not
/// more values than classes, or when ties make the classes degenerate
/// (e.g. a uniform distribution).
pub fn jenks_breaks(values: &[f64], nb_class: usize) -> Result<Vec<f64>, StatsError> {
    let n = values.len();
    if nb_class < 2 || nb_class >= n {
        return Err(StatsError::InfeasibleBreaks {
            nb_class,
            values: n,
        });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // 1-based indices on both axes: lower[l][j] is the first value index of
    // the last class when the first l values are split into j classes.
    let mut lower = vec![vec![0usize; nb_class + 1]; n + 1];
    let mut variance = vec![vec![f64::INFINITY; nb_class + 1]; n + 1];
    for j in 1..=nb_class {
        lower[1][j] = 1;
        variance[1][j] = 0.0;
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut weight = 0.0;
        let mut v = 0.0;

        for m in 1..=l {
            let i3 = l - m + 1;
            let val = sorted[i3 - 1];
            sum_squares += val * val;
            sum += val;
            weight += 1.0;
            v = sum_squares - (sum * sum) / weight;

            let i4 = i3 - 1;
            if i4 != 0 {
                for j in 2..=nb_class {
                    let candidate = v + variance[i4][j - 1];
                    if variance[l][j] >= candidate {
                        lower[l][j] = i3;
                        variance[l][j] = candidate;
                    }
                }
            }
        }
        lower[l][1] = 1;
        variance[l][1] = v;
    }

    let mut bounds = vec![0.0; nb_class + 1];
    bounds[0] = sorted[0];
    bounds[nb_class] = sorted[n - 1];

    let mut k = n;
    for j in (2..=nb_class).rev() {
        let start = lower[k][j];
        // tied values can leave a single value for several classes
        let upper = start.checked_sub(2).ok_or(StatsError::InfeasibleBreaks {
            nb_class,
            values: n,
        })?;
        bounds[j - 1] = sorted[upper];
        k = start - 1;
    }

    Ok(bounds)
}

/// Keeps the dominant labels of `labels` by frequency.
///
/// Occurrences are counted per distinct label and the counts are split in
/// `nb_class` natural-break classes; labels counted at or above the bound
/// `cutoff` positions from the end are kept (strictly above when `strict`).
/// When breaks cannot be computed the minimum count is used as a strict
/// threshold instead. Inputs of two labels or fewer are only sorted.
pub fn jenks_filter<S: AsRef<str>>(
    labels: &[S],
    options: &JenksOptions,
) -> Result<Vec<String>, StatsError> {
    if labels.is_empty() {
        return Ok(Vec::new());
    }

    if labels.len() <= 2 {
        let mut sorted: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        sorted.sort();
        return Ok(sorted);
    }

    let counts = value_counts(labels);
    let values: Vec<f64> = counts.iter().map(|(_, c)| *c as f64).collect();

    let mut strict = options.strict;
    let threshold = match jenks_breaks(&values, options.nb_class) {
        Ok(bounds) => threshold_at(&bounds, options.cutoff)?,
        Err(StatsError::InfeasibleBreaks { .. }) => {
            strict = true;
            values.iter().copied().fold(f64::INFINITY, f64::min)
        }
        Err(e) => return Err(e),
    };

    let mut kept: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| {
            let count = *count as f64;
            if strict {
                count > threshold
            } else {
                count >= threshold
            }
        })
        .collect();

    match options.sort_by {
        SortBy::Alphabetically => kept.sort_by(|a, b| a.0.cmp(&b.0)),
        SortBy::Count => kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))),
    }

    Ok(kept.into_iter().map(|(label, _)| label).collect())
}

fn value_counts<S: AsRef<str>>(labels: &[S]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

fn threshold_at(bounds: &[f64], cutoff: usize) -> Result<f64, StatsError> {
    let index = if cutoff == 0 {
        Some(0)
    } else {
        bounds.len().checked_sub(cutoff)
    };

    index
        .and_then(|i| bounds.get(i).copied())
        .ok_or(StatsError::InvalidCutoff {
            cutoff,
            bounds: bounds.len(),
        })
}
