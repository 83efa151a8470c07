//! Canonical month table.
//!
//! Month codes are the Portuguese three-letter abbreviations used by the
//! product catalog (`JAN`, `FEV`, ..., `DEZ`). Ordinals run 1 to 12.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Jan,
    Fev,
    Mar,
    Abr,
    Mai,
    Jun,
    Jul,
    Ago,
    Set,
    Out,
    Nov,
    Dez,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Fev,
        Month::Mar,
        Month::Abr,
        Month::Mai,
        Month::Jun,
        Month::Jul,
        Month::Ago,
        Month::Set,
        Month::Out,
        Month::Nov,
        Month::Dez,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Jan => "JAN",
            Self::Fev => "FEV",
            Self::Mar => "MAR",
            Self::Abr => "ABR",
            Self::Mai => "MAI",
            Self::Jun => "JUN",
            Self::Jul => "JUL",
            Self::Ago => "AGO",
            Self::Set => "SET",
            Self::Out => "OUT",
            Self::Nov => "NOV",
            Self::Dez => "DEZ",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Jan => "Janeiro",
            Self::Fev => "Fevereiro",
            Self::Mar => "Março",
            Self::Abr => "Abril",
            Self::Mai => "Maio",
            Self::Jun => "Junho",
            Self::Jul => "Julho",
            Self::Ago => "Agosto",
            Self::Set => "Setembro",
            Self::Out => "Outubro",
            Self::Nov => "Novembro",
            Self::Dez => "Dezembro",
        }
    }

    /// 1-based position in the year.
    pub fn ordinal(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Month> {
        if (1..=12).contains(&ordinal) {
            Some(Self::ALL[(ordinal - 1) as usize])
        } else {
            None
        }
    }

    /// Resolve a month code. Surrounding whitespace and case are ignored.
    pub fn from_code(code: &str) -> Option<Month> {
        let code = code.trim().to_uppercase();
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_calendar_order() {
        for (i, m) in Month::ALL.iter().enumerate() {
            assert_eq!(m.ordinal() as usize, i + 1);
            assert_eq!(Month::from_ordinal(m.ordinal()), Some(*m));
        }
        assert_eq!(Month::from_ordinal(0), None);
        assert_eq!(Month::from_ordinal(13), None);
    }

    #[test]
    fn codes_resolve_case_insensitively() {
        assert_eq!(Month::from_code("dez"), Some(Month::Dez));
        assert_eq!(Month::from_code(" Fev "), Some(Month::Fev));
        assert_eq!(Month::from_code("FEB"), None);
        assert_eq!(Month::from_code(""), None);
    }

    #[test]
    fn labels() {
        assert_eq!(Month::Mar.label(), "Março");
        assert_eq!(Month::Dez.label(), "Dezembro");
    }
}
