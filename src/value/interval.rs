//! Closed real-number interval

use std::fmt;

use serde_json::{json, Value as JsonValue};

use super::errors::{ValueError, ValueResult};

/// `[start, end]` with finite bounds. `start <= end` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealInterval {
    start: f64,
    end: f64,
}

impl RealInterval {
    /// Creates an interval. Both bounds must be finite.
    pub fn new(start: f64, end: f64) -> ValueResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ValueError::invalid(format!(
                "interval bounds must be finite, got {} - {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the portable `{"start", "end"}` form
    pub fn to_dict(&self) -> JsonValue {
        json!({ "start": self.start, "end": self.end })
    }

    /// Parses the portable form. Integer bounds are widened to f64.
    pub fn from_dict(data: &JsonValue) -> ValueResult<Self> {
        let obj = data
            .as_object()
            .ok_or_else(|| ValueError::invalid("interval must be an object"))?;

        let bound = |key: &str| {
            obj.get(key)
                .and_then(JsonValue::as_f64)
                .ok_or_else(|| ValueError::invalid(format!("interval '{}' must be a number", key)))
        };

        Self::new(bound("start")?, bound("end")?)
    }
}

impl fmt::Display for RealInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let interval = RealInterval::new(1.0, 5.0).unwrap();
        assert_eq!(interval.start(), 1.0);
        assert_eq!(interval.end(), 5.0);
    }

    #[test]
    fn test_reversed_bounds_allowed() {
        let interval = RealInterval::new(5.0, 1.0).unwrap();
        assert_eq!(interval.start(), 5.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(RealInterval::new(f64::NAN, 1.0).is_err());
        assert!(RealInterval::new(0.0, f64::INFINITY).is_err());
        assert!(RealInterval::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_dict_round_trip() {
        let bounds = [(2.0, 6.0), (-1.25, 0.0), (0.1, 0.1), (-1e300, 1e300)];
        for (start, end) in bounds {
            let interval = RealInterval::new(start, end).unwrap();
            let dict = interval.to_dict();
            assert_eq!(dict, json!({ "start": start, "end": end }));
            assert_eq!(RealInterval::from_dict(&dict).unwrap(), interval);
        }
    }

    #[test]
    fn test_from_dict_accepts_integers() {
        let interval = RealInterval::from_dict(&json!({ "start": 1, "end": 3 })).unwrap();
        assert_eq!(interval, RealInterval::new(1.0, 3.0).unwrap());
    }

    #[test]
    fn test_from_dict_rejects_bad_shapes() {
        assert!(RealInterval::from_dict(&json!([1.0, 2.0])).is_err());
        assert!(RealInterval::from_dict(&json!({ "start": 1.0 })).is_err());
        assert!(RealInterval::from_dict(&json!({ "start": "a", "end": 2.0 })).is_err());
    }
}
