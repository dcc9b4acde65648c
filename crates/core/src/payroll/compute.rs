//! Payslip salary computation.
//!
//! CRITICAL: all money math is `Decimal`. Net pay is clamped at zero
//! when deductions exceed gross.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized earnings for one payslip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningLines {
    /// Basic salary.
    #[serde(default)]
    pub basic: Decimal,
    /// House rent allowance.
    #[serde(default)]
    pub hra: Decimal,
    /// Conveyance allowance.
    #[serde(default)]
    pub conveyance: Decimal,
    /// Medical allowance.
    #[serde(default)]
    pub medical: Decimal,
    /// Bonus for the period.
    #[serde(default)]
    pub bonus: Decimal,
    /// Any other earnings.
    #[serde(default)]
    pub other: Decimal,
}

impl EarningLines {
    /// Sum of all earning lines.
    #[must_use]
    pub fn gross(&self) -> Decimal {
        self.basic + self.hra + self.conveyance + self.medical + self.bonus + self.other
    }
}

/// Itemized deductions for one payslip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLines {
    /// Employee provident fund contribution.
    #[serde(default)]
    pub epf: Decimal,
    /// Professional tax.
    #[serde(default)]
    pub professional_tax: Decimal,
    /// Any other deductions.
    #[serde(default)]
    pub other: Decimal,
}

impl DeductionLines {
    /// Sum of all deduction lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.epf + self.professional_tax + self.other
    }
}

/// Derived payslip figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipTotals {
    /// Sum of earnings.
    pub gross: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Gross minus deductions, clamped at zero.
    pub net: Decimal,
}

/// Computes gross, total deductions, and clamped net pay.
#[must_use]
pub fn compute_totals(earnings: &EarningLines, deductions: &DeductionLines) -> PayslipTotals {
    let gross = earnings.gross();
    let total_deductions = deductions.total();
    let net = (gross - total_deductions).max(Decimal::ZERO);

    PayslipTotals {
        gross,
        total_deductions,
        net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_gross_sums_all_lines() {
        let earnings = EarningLines {
            basic: dec!(30000),
            hra: dec!(12000),
            conveyance: dec!(1600),
            medical: dec!(1250),
            bonus: dec!(5000),
            other: dec!(150),
        };
        assert_eq!(earnings.gross(), dec!(50000));
    }

    #[test]
    fn test_deductions_sum_all_lines() {
        let deductions = DeductionLines {
            epf: dec!(1800),
            professional_tax: dec!(200),
            other: dec!(500),
        };
        assert_eq!(deductions.total(), dec!(2500));
    }

    #[test]
    fn test_net_is_gross_minus_deductions() {
        let earnings = EarningLines {
            basic: dec!(50000),
            ..Default::default()
        };
        let deductions = DeductionLines {
            epf: dec!(1800),
            professional_tax: dec!(200),
            other: Decimal::ZERO,
        };
        let totals = compute_totals(&earnings, &deductions);
        assert_eq!(totals.gross, dec!(50000));
        assert_eq!(totals.total_deductions, dec!(2000));
        assert_eq!(totals.net, dec!(48000));
    }

    #[test]
    fn test_net_clamps_at_zero() {
        let earnings = EarningLines {
            basic: dec!(1000),
            ..Default::default()
        };
        let deductions = DeductionLines {
            epf: dec!(1500),
            ..Default::default()
        };
        let totals = compute_totals(&earnings, &deductions);
        assert_eq!(totals.net, Decimal::ZERO);
    }

    #[test]
    fn test_empty_lines_are_zero() {
        let totals = compute_totals(&EarningLines::default(), &DeductionLines::default());
        assert_eq!(totals.gross, Decimal::ZERO);
        assert_eq!(totals.total_deductions, Decimal::ZERO);
        assert_eq!(totals.net, Decimal::ZERO);
    }
}
