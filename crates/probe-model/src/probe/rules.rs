use super::accessor::{
    extract_borrowings, extract_interest_coverage_components, extract_net_revenue,
};
use super::diagnostics::Diagnostics;
use super::document::Document;
use super::flags::Flag;

/// Minimum net revenue (5 crore) for a GREEN revenue flag. Units are the document's own.
pub const REVENUE_THRESHOLD: f64 = 50_000_000.0;

/// Highest borrowing-to-revenue ratio that still reads GREEN.
pub const BORROWING_RATIO_THRESHOLD: f64 = 0.25;

/// Minimum interest service coverage for a GREEN flag.
pub const ISCR_THRESHOLD: f64 = 2.0;

/// Added to both sides of the coverage ratio.
pub const ISCR_SMOOTHING: f64 = 1.0;

pub fn compute_total_revenue(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    let revenue = extract_net_revenue(document, index, diagnostics);
    diagnostics.info(&format!("Total revenue: {revenue}"));
    revenue
}

/// Borrowings over revenue; zero revenue or an overflow gives `0.0`.
pub fn compute_borrowing_ratio(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    let borrowings = extract_borrowings(document, index, diagnostics);
    let revenue = compute_total_revenue(document, index, diagnostics);
    let ratio = if revenue == 0.0 {
        0.0
    } else {
        borrowings / revenue
    };
    if !ratio.is_finite() {
        diagnostics.warn("Error calculating borrowing to revenue ratio: result overflows");
        return 0.0;
    }
    diagnostics.info(&format!("Borrowing to revenue ratio: {ratio}"));
    ratio
}

/// `(profit + 1) / (interest + 1)`. A zero denominator or an overflow gives `0.0`.
pub fn compute_interest_service_coverage(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    let components = extract_interest_coverage_components(document, index, diagnostics);
    let denominator = components.interest_expenses + ISCR_SMOOTHING;
    if denominator == 0.0 {
        diagnostics
            .warn("Error calculating ISCR: interest expenses of -1 leave a zero denominator");
        return 0.0;
    }

    let iscr =
        (components.profit_before_interest_tax_depreciation + ISCR_SMOOTHING) / denominator;
    if !iscr.is_finite() {
        diagnostics.warn("Error calculating ISCR: result overflows");
        return 0.0;
    }
    diagnostics.info(&format!("ISCR value: {iscr}"));
    iscr
}

pub fn classify_revenue(revenue: f64) -> Flag {
    if revenue >= REVENUE_THRESHOLD {
        Flag::Green
    } else {
        Flag::Red
    }
}

/// Breaching the threshold is caution, never RED.
pub fn classify_borrowing(ratio: f64) -> Flag {
    if ratio <= BORROWING_RATIO_THRESHOLD {
        Flag::Green
    } else {
        Flag::Amber
    }
}

pub fn classify_interest_coverage(ratio: f64) -> Flag {
    if ratio >= ISCR_THRESHOLD {
        Flag::Green
    } else {
        Flag::Red
    }
}
