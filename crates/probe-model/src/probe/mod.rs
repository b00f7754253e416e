//! Rule evaluation over a financial statement document.
//!
//! The accessor layer reads line items at the selected reporting period, the
//! rules layer turns them into ratios and flags, and [`ProbeEvaluator`] wires
//! both together behind a single stateless call.

pub mod accessor;
pub mod diagnostics;
pub mod document;
pub mod flags;
pub mod outcome;
pub mod rules;

pub use accessor::{
    extract_borrowings, extract_interest_coverage_components, extract_net_revenue, line_item,
    select_period, CoverageComponents, LookupError,
};
pub use diagnostics::{
    DiagnosticEvent, DiagnosticLevel, Diagnostics, MemoryDiagnostics, TracingDiagnostics,
};
pub use document::{
    Document, FinancialEntry, LineItem, SectionKind, StatementSection, CONSOLIDATED_NATURE,
    STANDALONE_NATURE,
};
pub use flags::Flag;
pub use outcome::{Calculations, FlagSet, ProbeResult};
pub use rules::{
    classify_borrowing, classify_interest_coverage, classify_revenue, compute_borrowing_ratio,
    compute_interest_service_coverage, compute_total_revenue, BORROWING_RATIO_THRESHOLD,
    ISCR_SMOOTHING, ISCR_THRESHOLD, REVENUE_THRESHOLD,
};

use std::sync::Arc;

/// Stateless evaluator reporting through an injected diagnostics sink.
#[derive(Debug, Clone)]
pub struct ProbeEvaluator<D = TracingDiagnostics> {
    diagnostics: Arc<D>,
}

impl Default for ProbeEvaluator<TracingDiagnostics> {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}

impl<D> ProbeEvaluator<D>
where
    D: Diagnostics + 'static,
{
    pub fn new(diagnostics: Arc<D>) -> Self {
        Self { diagnostics }
    }

    pub fn evaluate(&self, document: &Document) -> ProbeResult {
        let diagnostics: &dyn Diagnostics = &self.diagnostics;

        let index = select_period(document, diagnostics);
        diagnostics.info(&format!("Using financial data index: {index}"));

        let total_revenue = compute_total_revenue(document, index, diagnostics);
        let borrowing_to_revenue_ratio = compute_borrowing_ratio(document, index, diagnostics);
        let iscr = compute_interest_service_coverage(document, index, diagnostics);

        ProbeResult {
            flags: FlagSet {
                total_revenue: classify_revenue(total_revenue),
                borrowing_to_revenue: classify_borrowing(borrowing_to_revenue_ratio),
                iscr: classify_interest_coverage(iscr),
            },
            calculations: Calculations {
                total_revenue,
                borrowing_to_revenue_ratio,
                iscr,
            },
            financial_index_used: index,
        }
    }
}

/// Evaluates `document`, logging through `tracing`.
pub fn evaluate(document: &Document) -> ProbeResult {
    ProbeEvaluator::<TracingDiagnostics>::default().evaluate(document)
}
