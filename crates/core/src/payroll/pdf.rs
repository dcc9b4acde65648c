//! Payslip PDF rendering.
//!
//! Renders a single-page A4 payslip with builtin Helvetica fonts so
//! output is identical regardless of host fonts.

// Page geometry is in millimeters; money never enters float math here.
#![allow(clippy::float_arithmetic)]

use std::io::BufWriter;

use chrono::Datelike;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use rust_decimal::prelude::ToPrimitive;

use atria_shared::types::money::format_indian;

use crate::payroll::document::{PayslipDocument, month_name};
use crate::payroll::error::PayrollError;
use crate::payroll::words::amount_in_words;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Renders a payslip document into PDF bytes.
///
/// # Errors
///
/// Returns `PayrollError::Render` if font loading or serialization
/// fails; no partial output is produced.
pub fn render_payslip(slip: &PayslipDocument) -> Result<Vec<u8>, PayrollError> {
    let period_label = format!(
        "{} {}",
        month_name(slip.period.end),
        slip.period.end.year()
    );

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Payslip - {} - {period_label}", slip.employee_name),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PayrollError::Render(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PayrollError::Render(e.to_string()))?;

    // Header
    let mut y = 280.0;
    push_line(&layer, &font_bold, &slip.organization, 16.0, MARGIN_MM, y);
    push_line(&layer, &font_bold, "PAYSLIP", 20.0, 160.0, y);
    y -= 7.0;
    push_line(
        &layer,
        &font,
        &format!("Pay period: {period_label}"),
        10.0,
        MARGIN_MM,
        y,
    );
    push_line(
        &layer,
        &font,
        &format!("Pay date: {}", slip.period.pay_date),
        10.0,
        160.0,
        y,
    );
    y -= 5.0;
    divider(&layer, y);

    // Employee block
    y -= 8.0;
    push_line(&layer, &font_bold, &slip.employee_name, 12.0, MARGIN_MM, y);
    push_line(
        &layer,
        &font,
        &format!("Employee No: {}", slip.person_no),
        10.0,
        120.0,
        y,
    );
    y -= 6.0;
    if let Some(designation) = &slip.designation {
        push_line(&layer, &font, designation, 10.0, MARGIN_MM, y);
    }
    if let Some(department) = &slip.department {
        push_line(&layer, &font, department, 10.0, 120.0, y);
    }
    y -= 6.0;
    if let Some(account) = &slip.account_number {
        push_line(
            &layer,
            &font,
            &format!("Account: {account}"),
            10.0,
            MARGIN_MM,
            y,
        );
    }
    y -= 5.0;
    divider(&layer, y);

    // Two-column ledger
    y -= 10.0;
    let x_earn_label = MARGIN_MM;
    let x_earn_amount = 70.0;
    let x_ded_label = 115.0;
    let x_ded_amount = 170.0;

    push_line(&layer, &font_bold, "Earnings", 12.0, x_earn_label, y);
    push_line(&layer, &font_bold, "Deductions", 12.0, x_ded_label, y);
    y -= 7.0;

    let earnings = [
        ("Basic", slip.earnings.basic),
        ("HRA", slip.earnings.hra),
        ("Conveyance", slip.earnings.conveyance),
        ("Medical", slip.earnings.medical),
        ("Bonus", slip.earnings.bonus),
        ("Other", slip.earnings.other),
    ];
    let deductions = [
        ("EPF", slip.deductions.epf),
        ("Professional Tax", slip.deductions.professional_tax),
        ("Other", slip.deductions.other),
    ];

    let mut row_y = y;
    for (label, amount) in earnings {
        push_line(&layer, &font, label, 10.0, x_earn_label, row_y);
        push_line(
            &layer,
            &font,
            &format_indian(amount, 2),
            10.0,
            x_earn_amount,
            row_y,
        );
        row_y -= 6.0;
    }

    let mut ded_y = y;
    for (label, amount) in deductions {
        push_line(&layer, &font, label, 10.0, x_ded_label, ded_y);
        push_line(
            &layer,
            &font,
            &format_indian(amount, 2),
            10.0,
            x_ded_amount,
            ded_y,
        );
        ded_y -= 6.0;
    }

    y = row_y.min(ded_y) - 2.0;
    divider(&layer, y);

    // Totals row
    y -= 7.0;
    push_line(&layer, &font_bold, "Gross Earnings", 11.0, x_earn_label, y);
    push_line(
        &layer,
        &font_bold,
        &format_indian(slip.totals.gross, 2),
        11.0,
        x_earn_amount,
        y,
    );
    push_line(&layer, &font_bold, "Total Deductions", 11.0, x_ded_label, y);
    push_line(
        &layer,
        &font_bold,
        &format_indian(slip.totals.total_deductions, 2),
        11.0,
        x_ded_amount,
        y,
    );

    // Net pay block
    y -= 14.0;
    push_line(&layer, &font_bold, "NET PAY", 13.0, MARGIN_MM, y);
    push_line(
        &layer,
        &font_bold,
        &format!("INR {}", format_indian(slip.totals.net, 2)),
        13.0,
        70.0,
        y,
    );
    y -= 7.0;
    let net_rupees = slip.totals.net.trunc().to_u64().unwrap_or(0);
    push_line(
        &layer,
        &font,
        &amount_in_words(net_rupees),
        10.0,
        MARGIN_MM,
        y,
    );

    // Footer
    divider(&layer, 30.0);
    push_line(&layer, &font, "Authorized Signatory", 9.0, 150.0, 24.0);
    push_line(
        &layer,
        &font,
        "This is a system generated payslip.",
        8.0,
        MARGIN_MM,
        12.0,
    );

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PayrollError::Render(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| PayrollError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::compute::{DeductionLines, EarningLines, compute_totals};
    use crate::payroll::types::PayPeriod;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_slip() -> PayslipDocument {
        let earnings = EarningLines {
            basic: dec!(30000),
            hra: dec!(12000),
            conveyance: dec!(1600),
            medical: dec!(1250),
            bonus: Decimal::ZERO,
            other: Decimal::ZERO,
        };
        let deductions = DeductionLines {
            epf: dec!(1800),
            professional_tax: dec!(200),
            other: Decimal::ZERO,
        };
        let totals = compute_totals(&earnings, &deductions);

        PayslipDocument {
            organization: "Atria Technologies Pvt. Ltd.".to_string(),
            employee_name: "Jane Doe".to_string(),
            person_no: "EMP-0042".to_string(),
            designation: Some("Engineer".to_string()),
            department: Some("Platform".to_string()),
            account_number: Some("XXXX1234".to_string()),
            period: PayPeriod {
                start: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                pay_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            },
            earnings,
            deductions,
            totals,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_payslip(&sample_slip()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_zero_net_slip() {
        let mut slip = sample_slip();
        slip.earnings = EarningLines::default();
        slip.deductions = DeductionLines::default();
        slip.totals = compute_totals(&slip.earnings, &slip.deductions);
        let bytes = render_payslip(&slip).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
