//! Statement Accessor: period selection and line-item extraction.
//!
//! Every extractor is total. A data gap becomes `0.0` plus one warning on the
//! diagnostics collaborator, so ratio math downstream always has a number.

use serde_json::Value;

use super::diagnostics::Diagnostics;
use super::document::{Document, LineItem, SectionKind};

/// Why a line item could not be read at a given period.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no financial entry at index {index} ({available} available)")]
    EntryOutOfRange { index: usize, available: usize },
    #[error("financial entry has no {section} section")]
    SectionMissing { section: SectionKind },
    #[error("line item {section}.lineItems.{item} is missing")]
    LineItemMissing { section: SectionKind, item: LineItem },
    #[error("line item {section}.lineItems.{item} is not numeric")]
    NotNumeric { section: SectionKind, item: LineItem },
    #[error("sum of {first} and {second} overflows")]
    SumOverflow { first: LineItem, second: LineItem },
}

/// Interest coverage inputs read from the profit-and-loss section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoverageComponents {
    pub profit_before_interest_tax_depreciation: f64,
    pub interest_expenses: f64,
}

/// Index of the first standalone entry, falling back to `0`.
pub fn select_period(document: &Document, diagnostics: &dyn Diagnostics) -> usize {
    match document
        .entries()
        .iter()
        .position(|entry| entry.is_standalone())
    {
        Some(index) => index,
        None => {
            diagnostics.warn("No STANDALONE financial data found. Using index 0.");
            0
        }
    }
}

/// Reads one numeric line item at `index`.
pub fn line_item(document: &Document, index: usize, item: LineItem) -> Result<f64, LookupError> {
    let section = item.section();
    let entry = document
        .entry(index)
        .ok_or(LookupError::EntryOutOfRange {
            index,
            available: document.entries().len(),
        })?;
    let raw = entry
        .section(section)
        .ok_or(LookupError::SectionMissing { section })?
        .raw(item.key())
        .ok_or(LookupError::LineItemMissing { section, item })?;

    numeric(raw).ok_or(LookupError::NotNumeric { section, item })
}

/// Net revenue at `index`, or `0.0` when unavailable.
pub fn extract_net_revenue(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    line_item(document, index, LineItem::NetRevenue).unwrap_or_else(|err| {
        diagnostics.warn(&format!("Error reading net revenue: {err}"));
        0.0
    })
}

/// Long-term plus short-term borrowings at `index`. Missing either one yields `0.0`.
pub fn extract_borrowings(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    let total = line_item(document, index, LineItem::LongTermBorrowings)
        .and_then(|long_term| {
            line_item(document, index, LineItem::ShortTermBorrowings)
                .map(|short_term| long_term + short_term)
        })
        .and_then(|sum| {
            if sum.is_finite() {
                Ok(sum)
            } else {
                Err(LookupError::SumOverflow {
                    first: LineItem::LongTermBorrowings,
                    second: LineItem::ShortTermBorrowings,
                })
            }
        });

    total.unwrap_or_else(|err| {
        diagnostics.warn(&format!("Error reading borrowings: {err}"));
        0.0
    })
}

/// Profit and interest components at `index`. Missing either one yields both as `0.0`.
pub fn extract_interest_coverage_components(
    document: &Document,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> CoverageComponents {
    let components = line_item(document, index, LineItem::ProfitBeforeInterestTaxDepreciation)
        .and_then(|profit| {
            line_item(document, index, LineItem::InterestExpenses).map(|interest| {
                CoverageComponents {
                    profit_before_interest_tax_depreciation: profit,
                    interest_expenses: interest,
                }
            })
        });

    components.unwrap_or_else(|err| {
        diagnostics.warn(&format!("Error reading interest coverage components: {err}"));
        CoverageComponents::default()
    })
}

fn numeric(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| number.is_finite())
}
