//! Benchmarkable mean implementations.

use crate::{mean::mean, reference::reference_mean};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which implementation a benchmark expression evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanImpl {
    /// The exported native function, `cpp_mean(a, b)`.
    Native,
    /// The host-style vector mean, `mean(c(a, b))`.
    Reference,
}

impl MeanImpl {
    /// Every implementation, in report order.
    pub const ALL: [MeanImpl; 2] = [MeanImpl::Native, MeanImpl::Reference];

    /// Evaluate the mean of `a` and `b`.
    #[inline]
    pub fn evaluate(self, a: f64, b: f64) -> f64 {
        match self {
            MeanImpl::Native => mean(a, b),
            MeanImpl::Reference => reference_mean(&[a, b]),
        }
    }

    /// Host expression this implementation stands for, e.g. `cpp_mean(1, 2)`.
    pub fn expression(self, a: f64, b: f64) -> String {
        match self {
            MeanImpl::Native => format!("cpp_mean({}, {})", host_literal(a), host_literal(b)),
            MeanImpl::Reference => {
                format!("mean(c({}, {}))", host_literal(a), host_literal(b))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MeanImpl::Native => "native",
            MeanImpl::Reference => "reference",
        }
    }
}

impl fmt::Display for MeanImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeanImpl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "cpp_mean" => Ok(MeanImpl::Native),
            "reference" | "mean" => Ok(MeanImpl::Reference),
            other => Err(format!(
                "unknown implementation '{other}', expected 'native' or 'reference'"
            )),
        }
    }
}

/// Spell a double the way the host prints literals.
fn host_literal(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{value}")
    }
}
