//! Loan repayment schedules.
//!
//! The schedule shapes are plain arithmetic over fixed formulas; everything
//! that ends up on paper is settled through the crate's banker's-rounding
//! primitive and summed exactly as [`DecimalValue`]s. Interest accrual
//! itself runs in `f64`, matching the source formulas.

use crate::decimal::DecimalValue;
use crate::error::EncodeResult;
use chrono::{Duration, Months, NaiveDateTime};

/// Unit of the repayment term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days,
    Months,
}

/// One scheduled repayment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub principal: DecimalValue,
    pub interest: DecimalValue,
    pub total: DecimalValue,
    pub due_at: NaiveDateTime,
}

/// Exact sums over a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTotals {
    pub principal: DecimalValue,
    pub interest: DecimalValue,
    pub total: DecimalValue,
}

/// Repayment-schedule calculator.
///
/// Carries the day-count basis (360), months per year (12), settlement
/// precision (2 decimal places) and the disbursal timestamp. The start is
/// explicit; the calculator never reads a clock and never mutates itself,
/// so repeated calls see the same dates.
#[derive(Debug, Clone)]
pub struct InterestCalculator {
    base_days: u32,
    base_months: u32,
    precision: usize,
    period: Period,
    start: NaiveDateTime,
}

impl InterestCalculator {
    #[must_use]
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            base_days: 360,
            base_months: 12,
            precision: 2,
            period: Period::Days,
            start,
        }
    }

    #[must_use]
    pub fn with_base_days(mut self, days: u32) -> Self {
        self.base_days = days;
        self
    }

    #[must_use]
    pub fn with_base_months(mut self, months: u32) -> Self {
        self.base_months = months;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Settle a raw amount: banker's rounding at the configured precision.
    fn settle(&self, amount: f64) -> EncodeResult<DecimalValue> {
        let fixed = format!("{amount:.10}");
        Ok(fixed
            .parse::<DecimalValue>()?
            .round_half_to_even(self.precision))
    }

    fn settled_zero(&self) -> DecimalValue {
        DecimalValue::zero().with_scale(self.precision)
    }

    fn monthly_due(&self, month: u32) -> NaiveDateTime {
        self.start + Months::new(month)
    }

    /// Principal and all interest in one payment at the end of the term.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`](crate::EncodeError) if the computed amounts
    /// are not finite.
    pub fn one_time_repayment(
        &self,
        principal: f64,
        rate: f64,
        periods: u32,
    ) -> EncodeResult<Installment> {
        let (interest, due_at) = match self.period {
            Period::Days => (
                principal * rate / f64::from(self.base_days) * f64::from(periods),
                self.start + Duration::days(i64::from(periods)),
            ),
            Period::Months => (
                principal * rate / f64::from(self.base_months) * f64::from(periods),
                self.monthly_due(periods),
            ),
        };
        let principal = self.settle(principal)?;
        let interest = self.settle(interest)?;
        let total = principal.add(&interest);
        Ok(Installment {
            principal,
            interest,
            total,
            due_at,
        })
    }

    /// Level interest every month, principal due with the last installment.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`](crate::EncodeError) if the computed amounts
    /// are not finite.
    pub fn interest_first(
        &self,
        principal: f64,
        rate: f64,
        months: u32,
    ) -> EncodeResult<Vec<Installment>> {
        let monthly = self.settle(principal * rate / f64::from(self.base_months))?;
        let principal = self.settle(principal)?;
        let mut rows = Vec::with_capacity(months as usize);
        for month in 1..=months {
            let capital = if month == months {
                principal.clone()
            } else {
                self.settled_zero()
            };
            let total = capital.add(&monthly);
            rows.push(Installment {
                principal: capital,
                interest: monthly.clone(),
                total,
                due_at: self.monthly_due(month),
            });
        }
        Ok(rows)
    }

    /// Level principal every month, interest on the outstanding balance.
    /// The last installment settles whatever principal remains, so the
    /// schedule sums back to the loan exactly.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`](crate::EncodeError) if the computed amounts
    /// are not finite.
    pub fn equal_principal(
        &self,
        principal: f64,
        rate: f64,
        months: u32,
    ) -> EncodeResult<Vec<Installment>> {
        if months == 0 {
            return Ok(Vec::new());
        }
        let monthly_rate = rate / f64::from(self.base_months);
        let per_capital = self.settle(principal / f64::from(months))?;
        let per_capital_f = to_f64(&per_capital);
        let principal_exact = self.settle(principal)?;
        let mut paid = self.settled_zero();
        let mut rows = Vec::with_capacity(months as usize);
        for month in 1..=months {
            let interest =
                self.settle((principal - per_capital_f * f64::from(month - 1)) * monthly_rate)?;
            let capital = if month == months {
                principal_exact.subtract(&paid)
            } else {
                per_capital.clone()
            };
            let total = capital.add(&interest);
            paid = paid.add(&capital);
            rows.push(Installment {
                principal: capital,
                interest,
                total,
                due_at: self.monthly_due(month),
            });
        }
        Ok(rows)
    }

    /// Annuity schedule: the same payment every month,
    /// `p·r·(1+r)ⁿ / ((1+r)ⁿ − 1)`. The first month's interest comes off
    /// the full principal, the last month's principal settles the
    /// remainder, and in between the split follows the outstanding balance.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`](crate::EncodeError) if the computed amounts
    /// are not finite, e.g. with a zero rate.
    pub fn equal_installment(
        &self,
        principal: f64,
        rate: f64,
        months: u32,
    ) -> EncodeResult<Vec<Installment>> {
        if months == 0 {
            return Ok(Vec::new());
        }
        let monthly_rate = rate / f64::from(self.base_months);
        #[allow(clippy::cast_possible_wrap)]
        let growth = (1.0 + monthly_rate).powi(months as i32);
        let payment = self.settle(principal * monthly_rate * growth / (growth - 1.0))?;
        let principal_exact = self.settle(principal)?;
        let mut paid = self.settled_zero();
        let mut paid_f = 0.0_f64;
        let mut rows = Vec::with_capacity(months as usize);
        for month in 1..=months {
            let (capital, interest) = if month == 1 {
                let interest = self.settle(principal * monthly_rate)?;
                (payment.subtract(&interest), interest)
            } else if month == months {
                let capital = principal_exact.subtract(&paid);
                let interest = payment.subtract(&capital);
                (capital, interest)
            } else {
                let interest = self.settle((principal - paid_f) * monthly_rate)?;
                (payment.subtract(&interest), interest)
            };
            paid = paid.add(&capital);
            paid_f += to_f64(&capital);
            rows.push(Installment {
                principal: capital,
                interest,
                total: payment.clone(),
                due_at: self.monthly_due(month),
            });
        }
        Ok(rows)
    }
}

/// Exact sums of a schedule's principal, interest and total columns.
#[must_use]
pub fn totals(rows: &[Installment]) -> ScheduleTotals {
    let mut principal = DecimalValue::zero();
    let mut interest = DecimalValue::zero();
    let mut total = DecimalValue::zero();
    for row in rows {
        principal = principal.add(&row.principal);
        interest = interest.add(&row.interest);
        total = total.add(&row.total);
    }
    ScheduleTotals {
        principal,
        interest,
        total,
    }
}

fn to_f64(value: &DecimalValue) -> f64 {
    value
        .to_string()
        .parse()
        .expect("decimal display is always a valid float literal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn calc() -> InterestCalculator {
        let start = NaiveDate::from_ymd_opt(2019, 6, 8)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        InterestCalculator::new(start)
    }

    #[test]
    fn test_one_time_repayment_over_days() {
        let row = calc().one_time_repayment(10000.0, 0.12, 90).unwrap();
        assert_eq!(row.principal.to_string(), "10000.00");
        assert_eq!(row.interest.to_string(), "300.00");
        assert_eq!(row.total.to_string(), "10300.00");
        assert_eq!(row.due_at.date().to_string(), "2019-09-06");
    }

    #[test]
    fn test_one_time_repayment_over_months() {
        let row = calc()
            .with_period(Period::Months)
            .one_time_repayment(10000.0, 0.12, 6)
            .unwrap();
        assert_eq!(row.interest.to_string(), "600.00");
        assert_eq!(row.due_at.date().to_string(), "2019-12-08");
    }

    #[test]
    fn test_interest_first_defers_principal() {
        let rows = calc().interest_first(12000.0, 0.12, 3).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows[..2] {
            assert_eq!(row.principal.to_string(), "0.00");
            assert_eq!(row.interest.to_string(), "120.00");
            assert_eq!(row.total.to_string(), "120.00");
        }
        assert_eq!(rows[2].principal.to_string(), "12000.00");
        assert_eq!(rows[2].total.to_string(), "12120.00");
        assert_eq!(rows[0].due_at.date().to_string(), "2019-07-08");
        assert_eq!(rows[2].due_at.date().to_string(), "2019-09-08");
    }

    #[test]
    fn test_equal_principal_settles_exactly() {
        let rows = calc().equal_principal(1200.0, 0.12, 3).unwrap();
        let interests: Vec<String> = rows.iter().map(|r| r.interest.to_string()).collect();
        assert_eq!(interests, vec!["12.00", "8.00", "4.00"]);
        let sums = totals(&rows);
        assert_eq!(sums.principal.to_string(), "1200.00");
        assert_eq!(sums.interest.to_string(), "24.00");
    }

    #[test]
    fn test_equal_principal_last_row_absorbs_the_remainder() {
        // 1000/3 rounds to 333.33, so the last row must pay 333.34
        let rows = calc().equal_principal(1000.0, 0.12, 3).unwrap();
        assert_eq!(rows[0].principal.to_string(), "333.33");
        assert_eq!(rows[2].principal.to_string(), "333.34");
        assert_eq!(totals(&rows).principal.to_string(), "1000.00");
    }

    #[test]
    fn test_equal_installment_is_level() {
        let rows = calc().equal_installment(1200.0, 0.12, 3).unwrap();
        assert!(rows.iter().all(|r| r.total.to_string() == "408.03"));
        assert_eq!(rows[0].interest.to_string(), "12.00");
        assert_eq!(rows[0].principal.to_string(), "396.03");
        assert_eq!(totals(&rows).principal.to_string(), "1200.00");
        // each row is internally consistent
        for row in &rows {
            assert_eq!(row.principal.add(&row.interest), row.total);
        }
    }

    #[test]
    fn test_zero_months_yield_empty_schedules() {
        assert!(calc().equal_principal(1000.0, 0.12, 0).unwrap().is_empty());
        assert!(calc().equal_installment(1000.0, 0.12, 0).unwrap().is_empty());
        assert!(calc().interest_first(1000.0, 0.12, 0).unwrap().is_empty());
    }
}
