//! Stage Quantizer
//!
//! Maps a percentage read off a captured game screen to the catalog stage
//! whose tabulated value is closest to it.
//!
//! Stage 0 is never returned for a readable value: a non-zero reading means
//! at least stage 1 was equipped. Ties resolve to the lower stage.

use crate::catalog::OptionCatalog;
use crate::utils::normalization::normalize_value;

/// A captured reading, either as displayed text or as a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observed<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> Observed<'a> {
    /// Numeric reading, `None` when unparsable or non-finite
    pub fn value(self) -> Option<f64> {
        match self {
            Observed::Text(raw) => normalize_value(raw),
            Observed::Number(v) if v.is_finite() => Some(v),
            Observed::Number(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Observed<'a> {
    fn from(raw: &'a str) -> Self {
        Observed::Text(raw)
    }
}

impl<'a> From<&'a String> for Observed<'a> {
    fn from(raw: &'a String) -> Self {
        Observed::Text(raw.as_str())
    }
}

impl From<f64> for Observed<'_> {
    fn from(value: f64) -> Self {
        Observed::Number(value)
    }
}

/// Nearest catalog stage to an observed percentage.
///
/// Returns 0 for an unknown option type, an unparsable reading, or a table
/// with no stage beyond 0.
pub fn nearest_stage<'a>(
    catalog: &OptionCatalog,
    option_type: &str,
    observed: impl Into<Observed<'a>>,
) -> usize {
    let observed = observed.into();

    let Some(stages) = catalog.stages(option_type) else {
        tracing::warn!("Cannot quantize unknown option type '{}'", option_type);
        return 0;
    };

    let Some(value) = observed.value() else {
        tracing::warn!("Unparsable reading {:?} for '{}'", observed, option_type);
        return 0;
    };

    let mut best_stage = 0;
    let mut best_diff = f64::INFINITY;

    for (stage, tabulated) in stages.iter().enumerate().skip(1) {
        let diff = (tabulated - value).abs();
        if diff < best_diff {
            best_diff = diff;
            best_stage = stage;
        }
    }

    best_stage
}
