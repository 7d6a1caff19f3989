use crate::pipeline::re;

re!(
    AMOUNT_RE,
    r"(?i)(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(k)?",
);
re!(HOURLY_RE, r"(?i)per\s+hour|/\s*hr\b|hourly");

/// Outcome of parsing one salary estimate cell. All amounts are in
/// thousands of dollars per year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParsedSalary {
    pub low_k: Option<f64>,
    pub high_k: Option<f64>,
    pub avg_k: Option<f64>,
    pub hourly: bool,
}

/// Parses free-form salary text such as `$53K-$91K (Glassdoor est.)`,
/// `$85,000 - $95,000` or `$24 - $31 Per Hour`.
///
/// Hourly rates are only annualized when `hourly_annual_hours` is set;
/// otherwise the record keeps its hourly flag and null amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryParser {
    hourly_annual_hours: Option<f64>,
}

impl SalaryParser {
    pub fn new(hourly_annual_hours: Option<f64>) -> Self {
        Self {
            hourly_annual_hours,
        }
    }

    pub fn parse(&self, raw: &str) -> ParsedSalary {
        let hourly = HOURLY_RE.is_match(raw);

        let mut amounts = AMOUNT_RE.captures_iter(raw).filter_map(|caps| {
            let digits = caps.get(1)?.as_str().replace(',', "");
            let value: f64 = digits.parse().ok()?;
            Some(if caps.get(2).is_some() {
                value
            } else if value >= 1000.0 {
                // Raw dollar figures are folded down to thousands.
                value / 1000.0
            } else {
                value
            })
        });

        let (low, high) = match (amounts.next(), amounts.next()) {
            (Some(low), Some(high)) => (low, high),
            (Some(single), None) => (single, single),
            _ => {
                return ParsedSalary {
                    hourly,
                    ..ParsedSalary::default()
                }
            }
        };

        let (mut low, mut high) = if low > high { (high, low) } else { (low, high) };

        if hourly {
            let Some(hours) = self.hourly_annual_hours else {
                return ParsedSalary {
                    hourly,
                    ..ParsedSalary::default()
                };
            };
            low = low * hours / 1000.0;
            high = high * hours / 1000.0;
        }

        ParsedSalary {
            low_k: Some(low),
            high_k: Some(high),
            avg_k: Some((low + high) / 2.0),
            hourly,
        }
    }
}
