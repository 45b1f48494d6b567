//! Financial calculation utilities
//!
//! Pure formulas shared by the advice templates, projections, and the
//! calculator API endpoint.

/// Future value under periodic compounding
pub fn compound_interest(principal: f64, annual_rate: f64, years: f64, frequency: u32) -> f64 {
    let n = frequency.max(1) as f64;
    principal * (1.0 + annual_rate / n).powf(n * years)
}

/// Monthly payment for an amortized loan
pub fn loan_payment(principal: f64, annual_rate: f64, years: u32) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let num_payments = (years * 12) as f64;

    if num_payments == 0.0 {
        return principal;
    }
    if monthly_rate == 0.0 {
        return principal / num_payments;
    }

    let growth = (1.0 + monthly_rate).powf(num_payments);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Debt-to-income ratio; None when there is no income to divide by
pub fn debt_to_income(monthly_debt_payments: f64, monthly_income: f64) -> Option<f64> {
    if monthly_income <= 0.0 {
        return None;
    }
    Some(monthly_debt_payments / monthly_income)
}

pub fn emergency_fund_target(monthly_expenses: f64, months: f64) -> f64 {
    monthly_expenses * months
}

/// Retirement savings target: replacement income times 25 (the 4% rule)
pub fn retirement_needs(annual_income: f64, replacement_ratio: f64) -> f64 {
    annual_income * replacement_ratio * 25.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_interest() {
        // 1000 at 7% annually for 10 years, monthly compounding
        let fv = compound_interest(1000.0, 0.07, 10.0, 12);
        assert!((fv - 2009.66).abs() < 0.5);

        // Zero rate leaves principal unchanged
        assert!((compound_interest(1000.0, 0.0, 10.0, 12) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_loan_payment() {
        // 200k at 4% over 30 years is roughly $955/month
        let payment = loan_payment(200_000.0, 0.04, 30);
        assert!((payment - 954.83).abs() < 1.0);

        // Zero-rate loan divides evenly
        let payment = loan_payment(12_000.0, 0.0, 10);
        assert!((payment - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_debt_to_income() {
        assert_eq!(debt_to_income(1800.0, 5000.0), Some(0.36));
        assert_eq!(debt_to_income(500.0, 0.0), None);
    }

    #[test]
    fn test_retirement_needs() {
        // 80% of 100k replaced for 25 years of withdrawals
        assert!((retirement_needs(100_000.0, 0.8) - 2_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_emergency_fund_target() {
        assert_eq!(emergency_fund_target(3000.0, 6.0), 18_000.0);
    }
}
