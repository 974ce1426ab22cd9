//! Per-severity finding counts.

use serde::Serialize;

use crate::domain::seo::Severity;

/// Count of findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

impl Tally {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Pass => self.pass += 1,
            Severity::Warn => self.warn += 1,
            Severity::Fail => self.fail += 1,
        }
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.fail > 0
    }
}

impl FromIterator<Severity> for Tally {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut tally = Self::default();
        for severity in iter {
            tally.add(severity);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_severity() {
        let tally: Tally = [Severity::Pass, Severity::Fail, Severity::Warn, Severity::Pass]
            .into_iter()
            .collect();
        assert_eq!(tally, Tally { pass: 2, warn: 1, fail: 1 });
        assert!(tally.has_failures());
    }
}
