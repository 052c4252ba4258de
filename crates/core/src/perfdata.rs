//! Parser for free-form performance-data strings.
//!
//! A perf-data string is a space-separated list of `name=value` tokens,
//! as reported by passive checks: `'load'=5c 'temp'=42`. Single quotes
//! around the name or the value are decoration and are stripped. A value
//! with a trailing `c` (no space before it) marks a cumulative counter;
//! the marker is removed before the number is parsed. Everything else is
//! a raw gauge value.

use crate::error::CoreError;

/// Classification of a parsed metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// An independent, fluctuating measurement.
    Raw,
    /// A counter that accumulates over time.
    Cumulative,
}

impl MetricKind {
    /// Lowercase name as seeded in the `metric_types` table.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Raw => "raw",
            MetricKind::Cumulative => "cumulative",
        }
    }
}

/// One metric extracted from a perf-data string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMetric {
    pub name: String,
    pub value: f64,
    pub kind: MetricKind,
}

/// Lazy iterator over the metrics of a perf-data string.
///
/// Tokens are yielded in input order. The iterator is `Clone`, so a
/// parse can be restarted from a saved position. Empty tokens produced
/// by leading, trailing, or repeated separators are skipped; any other
/// malformed token stops the scan with [`CoreError::Parse`].
#[derive(Debug, Clone)]
pub struct PerfData<'a> {
    tokens: std::str::Split<'a, char>,
}

impl<'a> PerfData<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            tokens: raw.split(' '),
        }
    }
}

impl Iterator for PerfData<'_> {
    type Item = Result<ParsedMetric, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.tokens.next()?;
            if !token.is_empty() {
                return Some(parse_token(token));
            }
        }
    }
}

/// Parse a whole perf-data string into metrics, in input order.
pub fn parse(raw: &str) -> Result<Vec<ParsedMetric>, CoreError> {
    PerfData::new(raw).collect()
}

/// Parse a single `name=value[c]` token.
fn parse_token(token: &str) -> Result<ParsedMetric, CoreError> {
    let Some((name, value)) = token.split_once('=') else {
        return Err(CoreError::Parse(format!(
            "token '{token}' is missing the '=' separator"
        )));
    };

    let name = strip_quotes(name);
    let value = strip_quotes(value);

    let (number, kind) = match value.strip_suffix('c') {
        Some(digits) => (digits, MetricKind::Cumulative),
        None => (value, MetricKind::Raw),
    };

    let value: f64 = number.parse().map_err(|_| {
        CoreError::Parse(format!("token '{token}' has a non-numeric value"))
    })?;

    Ok(ParsedMetric {
        name: name.to_string(),
        value,
        kind,
    })
}

/// Strip decorative single quotes surrounding a name or value.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn quoted_cumulative_and_raw() {
        let metrics = parse("'load'=5c 'temp'=42").unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].name, "load");
        assert_eq!(metrics[0].value, 5.0);
        assert_eq!(metrics[0].kind, MetricKind::Cumulative);
        assert_eq!(metrics[1].name, "temp");
        assert_eq!(metrics[1].value, 42.0);
        assert_eq!(metrics[1].kind, MetricKind::Raw);
    }

    #[test]
    fn unquoted_tokens() {
        let metrics = parse("uptime=12345c rta=0.81").unwrap();
        assert_eq!(metrics[0].kind, MetricKind::Cumulative);
        assert_eq!(metrics[0].value, 12345.0);
        assert_eq!(metrics[1].kind, MetricKind::Raw);
        assert_eq!(metrics[1].value, 0.81);
    }

    #[test]
    fn missing_separator_fails() {
        assert_matches!(parse("bad_token"), Err(CoreError::Parse(_)));
    }

    #[test]
    fn non_numeric_value_fails() {
        assert_matches!(parse("cpu=high"), Err(CoreError::Parse(_)));
        // The cumulative marker alone is not a number either.
        assert_matches!(parse("cpu=c"), Err(CoreError::Parse(_)));
    }

    #[test]
    fn empty_string_yields_no_metrics() {
        assert_eq!(parse("").unwrap(), vec![]);
    }

    #[test]
    fn stray_spaces_are_skipped() {
        let metrics = parse(" a=1  b=2 ").unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].name, "a");
        assert_eq!(metrics[1].name, "b");
    }

    #[test]
    fn negative_and_fractional_values() {
        let metrics = parse("offset=-0.5 'drift'=1.25c").unwrap();
        assert_eq!(metrics[0].value, -0.5);
        assert_eq!(metrics[0].kind, MetricKind::Raw);
        assert_eq!(metrics[1].value, 1.25);
        assert_eq!(metrics[1].kind, MetricKind::Cumulative);
    }

    #[test]
    fn order_matches_input_order() {
        let metrics = parse("z=1 a=2 m=3").unwrap();
        let names: Vec<_> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn iterator_is_restartable() {
        let perf = PerfData::new("a=1 b=2");
        let checkpoint = perf.clone();

        let first: Vec<_> = perf.collect::<Result<_, _>>().unwrap();
        let second: Vec<_> = checkpoint.collect::<Result<_, _>>().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iterator_stops_at_first_bad_token() {
        let mut perf = PerfData::new("ok=1 broken nope=2");
        assert!(perf.next().unwrap().is_ok());
        assert!(perf.next().unwrap().is_err());
    }
}
