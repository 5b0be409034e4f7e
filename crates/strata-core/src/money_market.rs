//! Money-market conventions: day counts, Treasury bills and
//! bond-equivalent yields.
//!
//! Treasury bills are quoted on a discount basis over a 360-day year;
//! bond-equivalent yields restate that quote on a 365-day simple-interest
//! basis so it can be compared with coupon-bond yields.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// Date formats accepted by [`parse_date`].
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

/// Returns the number of calendar days from `start` to `end`.
///
/// Negative when `end` precedes `start`.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Parses a calendar date in ISO (`2017-09-20`), US (`9/20/2017`) or
/// compact (`20170920`) form.
pub fn parse_date(s: &str) -> CoreResult<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| CoreError::invalid_date(format!("unrecognised date '{s}'")))
}

/// Price per 100 face of a Treasury bill quoted at a discount yield.
///
/// `100 * (1 - days / 360 * discount_yield)`
#[must_use]
pub fn treasury_bill_price(discount_yield: f64, days_to_maturity: u32) -> f64 {
    100.0 * (1.0 - f64::from(days_to_maturity) / 360.0 * discount_yield)
}

/// Bond-equivalent yield of a Treasury bill quoted at a discount yield.
///
/// `365 * y / (360 - y * days)`
#[must_use]
pub fn bond_equivalent_yield(discount_yield: f64, days_to_maturity: u32) -> f64 {
    365.0 * discount_yield / (360.0 - discount_yield * f64::from(days_to_maturity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_days_between() {
        let start = parse_date("9/20/2017").unwrap();
        let end = parse_date("9/13/2018").unwrap();
        assert_eq!(days_between(start, end), 358);
        assert_eq!(days_between(end, start), -358);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2017, 9, 20).unwrap();
        assert_eq!(parse_date("2017-09-20").unwrap(), expected);
        assert_eq!(parse_date("09/20/2017").unwrap(), expected);
        assert_eq!(parse_date("20170920").unwrap(), expected);
        assert!(matches!(
            parse_date("20th Sept"),
            Err(CoreError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_treasury_bill_price() {
        assert_relative_eq!(treasury_bill_price(0.01135, 168), 99.47033333, epsilon = 1e-8);
    }

    #[test]
    fn test_bond_equivalent_yield() {
        assert_relative_eq!(
            bond_equivalent_yield(0.01135, 168),
            0.01156891557,
            epsilon = 1e-10
        );
    }
}
