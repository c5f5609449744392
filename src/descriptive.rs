//! Descriptive statistics for a single [`Sample`].
//!
//! Central tendency, dispersion and shape statistics, an ordered
//! frequency table, and a text histogram.
//!
//! # Conventions
//!
//! | Statistic | Convention |
//! |-----------|------------|
//! | variance, std dev | sample (n − 1 denominator), n ≥ 2 |
//! | skewness | population moment g1 = m3 / m2^1.5 |
//! | kurtosis | population excess g2 = m4 / m2² − 3 |
//! | mode | strictly most frequent value, else [`Mode::NoUniqueMode`] |
//!
//! Skewness and kurtosis are undefined for a sample whose values are all
//! equal; they fail with [`StatError::UndefinedMoment`] and are stored as
//! `None` in a [`DescriptiveResult`].
//!
//! # Example
//!
//! ```
//! use u_statcalc::coercion::Sample;
//! use u_statcalc::descriptive::{describe, Mode};
//!
//! let sample = Sample::from_values(vec![10.0, 20.0, 20.0, 30.0, 40.0]).unwrap();
//! let result = describe(&sample).unwrap();
//! assert_eq!(result.mean, 24.0);
//! assert_eq!(result.median, 20.0);
//! assert_eq!(result.mode, Mode::Unique(20.0));
//! assert!((result.variance - 130.0).abs() < 1e-9);
//! ```

use std::fmt;

use tracing::debug;
use u_numflow::stats;

use crate::coercion::Sample;
use crate::error::StatError;

// ── Frequency table ───────────────────────────────────────────────────

/// Ordered mapping from a distinct value to its occurrence count (≥ 1).
///
/// Numeric tables are in ascending key order; categorical tables keep the
/// order in which each label first appeared.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K> FrequencyTable<K> {
    pub(crate) fn from_entries(entries: Vec<(K, usize)>) -> Self {
        Self { entries }
    }

    /// Iterates over `(key, count)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Counts in table order.
    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<K: PartialEq> FrequencyTable<K> {
    /// Count for `key`, or 0 when absent.
    pub fn count_of(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, c)| *c)
    }
}

/// Builds the frequency table of a sample, ascending by value.
///
/// Values are grouped by exact floating-point equality: `0.1 + 0.2` and
/// `0.3` stay separate keys.
pub fn frequency_distribution(sample: &Sample) -> FrequencyTable<f64> {
    let mut sorted = sample.values().to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mut entries: Vec<(f64, usize)> = Vec::new();
    for v in sorted {
        match entries.last_mut() {
            Some((key, count)) if *key == v => *count += 1,
            _ => entries.push((v, 1)),
        }
    }
    FrequencyTable::from_entries(entries)
}

// ── Histogram ─────────────────────────────────────────────────────────

/// Layout of the text histogram.
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    /// Right-aligned width of the value label. Default: 6.
    pub label_width: usize,
    /// Character repeated once per occurrence. Default: `█`.
    pub bar_char: char,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            label_width: 6,
            bar_char: '█',
        }
    }
}

impl HistogramConfig {
    /// Sets the label width.
    pub fn label_width(mut self, width: usize) -> Self {
        self.label_width = width;
        self
    }

    /// Sets the bar character.
    pub fn bar_char(mut self, c: char) -> Self {
        self.bar_char = c;
        self
    }
}

/// Renders one line per table entry: a fixed-width label and a bar whose
/// length equals the count.
///
/// ```
/// use u_statcalc::coercion::Sample;
/// use u_statcalc::descriptive::{frequency_distribution, text_histogram, HistogramConfig};
///
/// let sample = Sample::from_values(vec![2.0, 1.0, 2.0]).unwrap();
/// let table = frequency_distribution(&sample);
/// let text = text_histogram(&table, &HistogramConfig::default().bar_char('#'));
/// assert_eq!(text, "     1: #\n     2: ##\n");
/// ```
pub fn text_histogram(table: &FrequencyTable<f64>, config: &HistogramConfig) -> String {
    let width = config.label_width;
    table
        .iter()
        .map(|(key, count)| {
            let bar: String = std::iter::repeat(config.bar_char).take(count).collect();
            format!("{key:>width$}: {bar}\n")
        })
        .collect()
}

// ── Mode ──────────────────────────────────────────────────────────────

/// Most frequent value, or the absence of a single one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// One value occurs strictly more often than every other.
    Unique(f64),
    /// Two or more values share the highest count.
    NoUniqueMode,
}

impl Mode {
    /// The modal value, if unique.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Unique(v) => Some(*v),
            Self::NoUniqueMode => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique(v) => write!(f, "{v}"),
            Self::NoUniqueMode => write!(f, "No unique mode"),
        }
    }
}

// ── Individual statistics ─────────────────────────────────────────────

/// Arithmetic mean.
///
/// Stays finite for every valid sample: when the plain sum overflows, the
/// values are averaged after dividing by their largest magnitude.
pub fn mean(sample: &Sample) -> f64 {
    match stats::mean(sample.values()) {
        Some(m) if m.is_finite() => m,
        _ => {
            let scale = max_magnitude(sample.values());
            unit_scaled(sample.values())
                .and_then(|z| stats::mean(&z))
                .map_or(0.0, |m| m * scale)
        }
    }
}

fn max_magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Divides finite `values` by their largest magnitude so each lies in
/// [-1, 1]. `None` when every value is zero.
///
/// Ratios such as t, r, g1 and g2 are unchanged by this rescaling, and on
/// the rescaled values their intermediate sums can neither overflow nor
/// underflow to zero.
pub(crate) fn unit_scaled(values: &[f64]) -> Option<Vec<f64>> {
    let scale = max_magnitude(values);
    (scale > 0.0).then(|| values.iter().map(|v| v / scale).collect())
}

/// Median; the average of the two middle values for even length.
pub fn median(sample: &Sample) -> f64 {
    stats::median(sample.values()).unwrap_or(f64::NAN)
}

/// Mode under the strict-maximum rule.
pub fn mode(sample: &Sample) -> Mode {
    mode_of(&frequency_distribution(sample))
}

fn mode_of(table: &FrequencyTable<f64>) -> Mode {
    let Some(top) = table.iter().map(|(_, c)| c).max() else {
        return Mode::NoUniqueMode;
    };
    let mut leaders = table.iter().filter(|(_, c)| *c == top);
    match (leaders.next(), leaders.next()) {
        (Some((k, _)), None) => Mode::Unique(*k),
        _ => Mode::NoUniqueMode,
    }
}

/// Sample variance (n − 1 denominator).
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if the sample has fewer than 2 values
/// - [`StatError::NumericOverflow`] if the spread is too wide for an `f64`
pub fn variance(sample: &Sample) -> Result<f64, StatError> {
    sample.require(2)?;
    let var = stats::variance(sample.values()).ok_or(StatError::InsufficientData {
        min_required: 2,
        actual: sample.len(),
    })?;
    if !var.is_finite() {
        return Err(StatError::NumericOverflow {
            quantity: "variance",
        });
    }
    Ok(var)
}

/// Sample standard deviation.
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if the sample has fewer than 2 values
/// - [`StatError::NumericOverflow`] if the result exceeds the `f64` range
///
/// Computed on rescaled values, so it stays accurate where the variance
/// itself would overflow or underflow.
pub fn standard_deviation(sample: &Sample) -> Result<f64, StatError> {
    sample.require(2)?;
    let Some(z) = unit_scaled(sample.values()) else {
        return Ok(0.0);
    };
    let sd = stats::std_dev(&z).ok_or(StatError::InsufficientData {
        min_required: 2,
        actual: sample.len(),
    })? * max_magnitude(sample.values());
    if !sd.is_finite() {
        return Err(StatError::NumericOverflow {
            quantity: "standard deviation",
        });
    }
    Ok(sd)
}

/// Central moments m2, m3, m4 (n denominator) of the deviations from the
/// mean, rescaled into [-1, 1]. Only scale-free ratios of them are
/// meaningful.
fn scaled_central_moments(
    sample: &Sample,
    moment: &'static str,
) -> Result<(f64, f64, f64), StatError> {
    sample.require(2)?;
    let values = sample.values();
    // Exact check: every value equal means zero variance.
    if values.iter().all(|&v| v == values[0]) {
        return Err(StatError::UndefinedMoment { moment });
    }

    let m = mean(sample);
    let deviations: Vec<f64> = values.iter().map(|&v| v - m).collect();
    if deviations.iter().any(|d| !d.is_finite()) {
        return Err(StatError::NumericOverflow { quantity: moment });
    }
    let z = unit_scaled(&deviations).ok_or(StatError::UndefinedMoment { moment })?;

    let n = z.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for d in z {
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Ok((m2 / n, m3 / n, m4 / n))
}

/// Population skewness g1 = m3 / m2^1.5.
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if fewer than 2 values
/// - [`StatError::UndefinedMoment`] if all values are equal
/// - [`StatError::NumericOverflow`] if deviations exceed the `f64` range
pub fn skewness(sample: &Sample) -> Result<f64, StatError> {
    let (m2, m3, _) = scaled_central_moments(sample, "skewness")?;
    Ok(m3 / m2.powf(1.5))
}

/// Population excess kurtosis g2 = m4 / m2² − 3 (normal ⇒ 0).
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if fewer than 2 values
/// - [`StatError::UndefinedMoment`] if all values are equal
/// - [`StatError::NumericOverflow`] if deviations exceed the `f64` range
pub fn kurtosis(sample: &Sample) -> Result<f64, StatError> {
    let (m2, _, m4) = scaled_central_moments(sample, "kurtosis")?;
    Ok(m4 / (m2 * m2) - 3.0)
}

// ── Summary ───────────────────────────────────────────────────────────

/// Full descriptive summary of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveResult {
    /// Number of observations.
    pub count: usize,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Mode or [`Mode::NoUniqueMode`].
    pub mode: Mode,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Sample variance.
    pub variance: f64,
    /// Population skewness, `None` when all values are equal.
    pub skewness: Option<f64>,
    /// Population excess kurtosis, `None` when all values are equal.
    pub kurtosis: Option<f64>,
    /// Ascending frequency table.
    pub frequencies: FrequencyTable<f64>,
}

/// Computes every descriptive statistic for `sample`.
///
/// # Errors
///
/// - [`StatError::InsufficientData`] if the sample has fewer than 2 values
/// - [`StatError::NumericOverflow`] if the variance exceeds the `f64` range
///
/// A zero-variance sample is not an error here: its shape statistics are
/// reported as `None`.
pub fn describe(sample: &Sample) -> Result<DescriptiveResult, StatError> {
    let variance = variance(sample)?;
    let std_dev = standard_deviation(sample)?;
    let frequencies = frequency_distribution(sample);

    let shape = |r: Result<f64, StatError>| match r {
        Ok(v) => Ok(Some(v)),
        Err(StatError::UndefinedMoment { .. }) => Ok(None),
        Err(e) => Err(e),
    };
    let skewness = shape(skewness(sample))?;
    let kurtosis = shape(kurtosis(sample))?;

    debug!(
        count = sample.len(),
        distinct = frequencies.len(),
        "computed descriptive statistics"
    );

    Ok(DescriptiveResult {
        count: sample.len(),
        min: sample.min(),
        max: sample.max(),
        mean: mean(sample),
        median: median(sample),
        mode: mode_of(&frequencies),
        std_dev,
        variance,
        skewness,
        kurtosis,
        frequencies,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> Sample {
        Sample::from_values(values.to_vec()).unwrap()
    }

    // ── Central tendency ─────────────────────────────────────────

    #[test]
    fn reference_sample() {
        let s = sample(&[10.0, 20.0, 20.0, 30.0, 40.0]);
        assert!((mean(&s) - 24.0).abs() < 1e-12);
        assert_eq!(median(&s), 20.0);
        assert_eq!(mode(&s), Mode::Unique(20.0));
        assert!((standard_deviation(&s).unwrap() - 11.40175425).abs() < 1e-6);
        assert!((variance(&s).unwrap() - 130.0).abs() < 1e-9);
    }

    #[test]
    fn median_even_length() {
        assert_eq!(median(&sample(&[4.0, 1.0, 3.0, 2.0])), 2.5);
    }

    #[test]
    fn single_value_statistics() {
        let s = sample(&[7.0]);
        assert_eq!(mean(&s), 7.0);
        assert_eq!(median(&s), 7.0);
        assert_eq!(mode(&s), Mode::Unique(7.0));
    }

    // ── Mode policy ──────────────────────────────────────────────

    #[test]
    fn mode_tie_has_no_unique_mode() {
        assert_eq!(mode(&sample(&[1.0, 1.0, 2.0, 2.0, 3.0])), Mode::NoUniqueMode);
    }

    #[test]
    fn mode_uniform_has_no_unique_mode() {
        let m = mode(&sample(&[1.0, 2.0, 3.0]));
        assert_eq!(m, Mode::NoUniqueMode);
        assert_eq!(m.to_string(), "No unique mode");
        assert_eq!(m.value(), None);
    }

    // ── Dispersion ───────────────────────────────────────────────

    #[test]
    fn variance_needs_two_values() {
        let s = sample(&[5.0]);
        let expected = StatError::InsufficientData {
            min_required: 2,
            actual: 1,
        };
        assert_eq!(variance(&s).unwrap_err(), expected);
        assert_eq!(standard_deviation(&s).unwrap_err(), expected);
    }

    #[test]
    fn constant_sample_has_zero_variance() {
        let s = sample(&[3.0, 3.0, 3.0]);
        assert_eq!(variance(&s).unwrap(), 0.0);
    }

    // ── Shape ────────────────────────────────────────────────────

    #[test]
    fn symmetric_sample_has_zero_skew() {
        let s = sample(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(skewness(&s).unwrap().abs() < 1e-12);
    }

    #[test]
    fn skewness_population_convention() {
        // mean 1.75, deviations -0.75 x3 and 2.25
        // m2 = (3 * 0.5625 + 5.0625) / 4 = 1.6875
        // m3 = (3 * -0.421875 + 11.390625) / 4 = 2.53125
        let s = sample(&[1.0, 1.0, 1.0, 4.0]);
        let expected = 2.53125 / 1.6875_f64.powf(1.5);
        assert!((skewness(&s).unwrap() - expected).abs() < 1e-12);
        assert!(skewness(&s).unwrap() > 0.0);
    }

    #[test]
    fn kurtosis_uniform_pair() {
        // Two distinct values: m4 / m2^2 = 1, excess = -2.
        let s = sample(&[0.0, 1.0]);
        assert!((kurtosis(&s).unwrap() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn kurtosis_reference_sample() {
        // mean 24; deviations -14, -4, -4, 6, 16
        // m2 = 520 / 5 = 104, m4 = 105_760 / 5 = 21_152
        let s = sample(&[10.0, 20.0, 20.0, 30.0, 40.0]);
        let expected = 21_152.0 / (104.0 * 104.0) - 3.0;
        assert!((kurtosis(&s).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn shape_undefined_for_constant_sample() {
        let s = sample(&[2.0, 2.0, 2.0]);
        assert_eq!(
            skewness(&s).unwrap_err(),
            StatError::UndefinedMoment { moment: "skewness" }
        );
        assert_eq!(
            kurtosis(&s).unwrap_err(),
            StatError::UndefinedMoment { moment: "kurtosis" }
        );
    }

    #[test]
    fn shape_needs_two_values() {
        let s = sample(&[2.0]);
        assert!(matches!(
            skewness(&s),
            Err(StatError::InsufficientData { .. })
        ));
    }

    // ── Extreme magnitudes ───────────────────────────────────────

    #[test]
    fn tiny_values_keep_their_shape() {
        let s = sample(&[1e-200, 2e-200, 3e-200]);
        assert!((mean(&s) - 2e-200).abs() < 1e-212);
        assert!((standard_deviation(&s).unwrap() - 1e-200).abs() < 1e-212);
        assert!(skewness(&s).unwrap().abs() < 1e-12);
        // deviations -1, 0, 1 (scaled): m2 = m4 = 2/3, g2 = 1.5 - 3
        assert!((kurtosis(&s).unwrap() + 1.5).abs() < 1e-12);

        let r = describe(&s).unwrap();
        assert!(r.std_dev > 0.0);
        assert!(r.skewness.unwrap().is_finite());
        assert!(r.kurtosis.unwrap().is_finite());
    }

    #[test]
    fn huge_spread_overflows_variance() {
        let s = sample(&[1e200, -1e200, 5e199]);
        let overflow = StatError::NumericOverflow {
            quantity: "variance",
        };
        assert_eq!(variance(&s).unwrap_err(), overflow);
        assert_eq!(describe(&s).unwrap_err(), overflow);

        // still representable
        let sd = standard_deviation(&s).unwrap();
        assert!(sd.is_finite() && sd > 1e200);
        assert!(skewness(&s).unwrap().is_finite());
        assert!(kurtosis(&s).unwrap().is_finite());
    }

    #[test]
    fn mean_survives_sum_overflow() {
        let s = sample(&[f64::MAX, f64::MAX, f64::MAX / 2.0]);
        let m = mean(&s);
        assert!(m.is_finite());
        assert!((m / f64::MAX - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_spread_overflows_deviations() {
        // mean is MAX / 3; the deviation of -MAX from it is not finite
        let s = sample(&[f64::MAX, -f64::MAX, f64::MAX]);
        assert!(matches!(
            skewness(&s),
            Err(StatError::NumericOverflow { .. })
        ));
        assert!(matches!(
            standard_deviation(&s),
            Err(StatError::NumericOverflow { .. })
        ));
    }

    // ── Frequency table ──────────────────────────────────────────

    #[test]
    fn frequency_table_sorted_ascending() {
        let s = sample(&[3.0, 1.0, 2.0, 3.0, -1.0, 3.0]);
        let table = frequency_distribution(&s);
        let keys: Vec<f64> = table.keys().copied().collect();
        assert_eq!(keys, vec![-1.0, 1.0, 2.0, 3.0]);
        assert_eq!(table.counts(), vec![1, 1, 1, 3]);
        assert_eq!(table.total(), s.len());
        assert_eq!(table.count_of(&3.0), 3);
        assert_eq!(table.count_of(&9.0), 0);
    }

    #[test]
    fn frequency_table_exact_equality() {
        let s = sample(&[0.1 + 0.2, 0.3]);
        let table = frequency_distribution(&s);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn histogram_layout() {
        let s = sample(&[10.0, 20.0, 20.0]);
        let text = text_histogram(&frequency_distribution(&s), &HistogramConfig::default());
        assert_eq!(text, "    10: █\n    20: ██\n");
    }

    #[test]
    fn histogram_custom_width() {
        let s = sample(&[1.5]);
        let config = HistogramConfig::default().label_width(4).bar_char('*');
        let text = text_histogram(&frequency_distribution(&s), &config);
        assert_eq!(text, " 1.5: *\n");
    }

    // ── Summary ──────────────────────────────────────────────────

    #[test]
    fn describe_reference_sample() {
        let s = sample(&[10.0, 20.0, 20.0, 30.0, 40.0]);
        let r = describe(&s).unwrap();
        assert_eq!(r.count, 5);
        assert_eq!(r.min, 10.0);
        assert_eq!(r.max, 40.0);
        assert_eq!(r.mode, Mode::Unique(20.0));
        assert!((r.std_dev - 11.40).abs() < 0.01);
        assert!(r.skewness.is_some());
        assert!(r.kurtosis.is_some());
        assert_eq!(r.frequencies.total(), 5);
    }

    #[test]
    fn describe_constant_sample() {
        let r = describe(&sample(&[4.0, 4.0])).unwrap();
        assert_eq!(r.variance, 0.0);
        assert_eq!(r.skewness, None);
        assert_eq!(r.kurtosis, None);
        assert_eq!(r.mode, Mode::Unique(4.0));
    }

    #[test]
    fn describe_single_value_fails() {
        assert!(matches!(
            describe(&sample(&[1.0])),
            Err(StatError::InsufficientData { .. })
        ));
    }
}
