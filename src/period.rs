use chrono::{Duration, NaiveDate};

use crate::model::DateWindow;

/// Named dashboard windows. Every windowed period ends on `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Monthly,
    #[default]
    Quarterly,
    Semiannual,
    Annual,
    Historical,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Monthly,
        Period::Quarterly,
        Period::Semiannual,
        Period::Annual,
        Period::Historical,
    ];

    pub fn days(self) -> Option<i64> {
        match self {
            Period::Monthly => Some(30),
            Period::Quarterly => Some(90),
            Period::Semiannual => Some(180),
            Period::Annual => Some(365),
            Period::Historical => None,
        }
    }

    pub fn window(self, today: NaiveDate) -> Option<DateWindow> {
        self.days()
            .map(|d| DateWindow::new(today - Duration::days(d), today))
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Monthly => "Mensal",
            Period::Quarterly => "Trimestral",
            Period::Semiannual => "Semestral",
            Period::Annual => "Anual",
            Period::Historical => "Histórico",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Accepts English names and the Portuguese labels, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "monthly" | "month" | "mensal" => Some(Period::Monthly),
            "quarterly" | "quarter" | "trimestral" => Some(Period::Quarterly),
            "semiannual" | "semester" | "semestral" => Some(Period::Semiannual),
            "annual" | "year" | "anual" => Some(Period::Annual),
            "historical" | "all" | "historico" | "histórico" => Some(Period::Historical),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarterly_spans_ninety_days_back() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");
        let w = Period::Quarterly.window(today).expect("windowed");
        assert_eq!(w.end, today);
        assert_eq!(w.start, NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"));
    }

    #[test]
    fn historical_has_no_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");
        assert!(Period::Historical.window(today).is_none());
    }

    #[test]
    fn parse_accepts_both_languages() {
        assert_eq!(Period::parse("Mensal"), Some(Period::Monthly));
        assert_eq!(Period::parse(" annual "), Some(Period::Annual));
        assert_eq!(Period::parse("histórico"), Some(Period::Historical));
        assert_eq!(Period::parse("weekly"), None);
    }

    #[test]
    fn next_cycles_through_all() {
        let mut p = Period::Monthly;
        for _ in 0..Period::ALL.len() {
            p = p.next();
        }
        assert_eq!(p, Period::Monthly);
    }
}
