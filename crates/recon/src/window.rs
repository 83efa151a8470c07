//! Harvest window expansion.
//!
//! A window is written `START-END` with month codes, inclusive on both ends.
//! When `START` comes after `END` the window crosses the year boundary
//! (`DEZ-MAR` covers DEZ, JAN, FEV, MAR). Anything unparseable yields no
//! active months.

use crate::calendar::Month;
use crate::model::MonthSet;

/// A parsed `START-END` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestWindow {
    pub start: Month,
    pub end: Month,
}

impl HarvestWindow {
    pub fn wraps_year(&self) -> bool {
        self.start.ordinal() > self.end.ordinal()
    }

    pub fn months(&self) -> MonthSet {
        let mut set = MonthSet::empty();
        let (start, end) = (self.start.ordinal(), self.end.ordinal());
        let mut mark = |range: std::ops::RangeInclusive<u8>| {
            for ordinal in range {
                if let Some(m) = Month::from_ordinal(ordinal) {
                    set.insert(m);
                }
            }
        };
        if start <= end {
            mark(start..=end);
        } else {
            mark(start..=12);
            mark(1..=end);
        }
        set
    }
}

/// Parse a window expression. Returns `None` for empty or malformed input.
pub fn parse_window(window: &str) -> Option<HarvestWindow> {
    let parts: Vec<String> = window.split('-').map(|p| p.trim().to_uppercase()).collect();
    if parts.len() != 2 {
        return None;
    }
    let start = Month::from_code(&parts[0])?;
    let end = Month::from_code(&parts[1])?;
    Some(HarvestWindow { start, end })
}

/// Active months for a window expression.
pub fn expand(window: Option<&str>) -> MonthSet {
    window
        .and_then(parse_window)
        .map(|w| w.months())
        .unwrap_or_else(MonthSet::empty)
}
