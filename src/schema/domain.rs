use std::collections::HashSet;

use super::Domain;

/// Running bounds and granularity of an integer column.
///
/// `step` is the smallest positive distance from a value to the minimum seen
/// *so far*, so it depends on row order and is not the true minimal gap
/// between all pairs. Slider granularity in the viewer relies on exactly this.
/// A larger later delta never replaces a smaller step, unlike the JavaScript
/// viewer, which kept the last positive delta.
#[derive(Debug, Default, Clone)]
pub struct RangeStats {
    min: Option<i64>,
    max: Option<i64>,
    step: Option<i64>,
}

impl RangeStats {
    pub fn observe(&mut self, value: i64) {
        let min = self.min.map_or(value, |m| m.min(value));
        self.min = Some(min);
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        // a delta beyond i64 can never be the smallest step
        if let Some(delta) = value.checked_sub(min) {
            if delta > 0 && self.step.map_or(true, |s| delta < s) {
                self.step = Some(delta);
            }
        }
    }

    /// `Domain::None` if nothing was observed; otherwise the bounds with
    /// `step` defaulting to 1.
    pub fn finish(self) -> Domain {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Domain::Range {
                min,
                max,
                step: self.step.unwrap_or(1),
            },
            _ => Domain::None,
        }
    }
}

/// Insertion-ordered set of raw strings.
#[derive(Debug, Default, Clone)]
pub struct Distinct {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl Distinct {
    pub fn insert(&mut self, value: &str) {
        if !self.seen.contains(value) {
            self.seen.insert(value.to_string());
            self.order.push(value.to_string());
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}
