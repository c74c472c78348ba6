//! Duration-expression parsing for dae-style config values ("30s", "1h1m").

use once_cell::sync::Lazy;
use regex::Regex;

static TIME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)(ms|[smhd])").unwrap());

/// Output unit for [`derive_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
}

fn factor_millis(unit: &str) -> f64 {
    match unit {
        "ms" => 1.0,
        "s" => 1_000.0,
        "m" => 60_000.0,
        "h" => 3_600_000.0,
        "d" => 86_400_000.0,
        _ => 0.0,
    }
}

/// Sums the `<number><unit>` tokens of a duration expression and converts
/// the total to the requested unit.
///
/// Tokens may repeat and mix freely (`"1h1m1s100ms"`). Text that is not a
/// recognized token contributes nothing, so the empty or garbage expression
/// derives to `0`.
pub fn derive_time(expr: &str, unit: TimeUnit) -> f64 {
    let total_ms: f64 = TIME_TOKEN
        .captures_iter(expr)
        .filter_map(|caps| {
            let value: f64 = caps[1].parse().ok()?;
            Some(value * factor_millis(&caps[2]))
        })
        .sum();

    match unit {
        TimeUnit::Milliseconds => total_ms,
        TimeUnit::Seconds => total_ms / 1_000.0,
    }
}
