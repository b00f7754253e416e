use crate::error::AppError;
use crate::upload::parse_envelope;
use clap::Args;
use probe_model::config::AppConfig;
use probe_model::probe::{
    DiagnosticEvent, DiagnosticLevel, Diagnostics, MemoryDiagnostics, ProbeEvaluator, ProbeResult,
    TracingDiagnostics,
};
use probe_model::telemetry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Statement file shaped as {"data": {"financials": [...]}}
    #[arg(default_value = "data.json")]
    pub(crate) path: PathBuf,
    /// Print the diagnostics gathered during evaluation to stderr
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs { path, explain } = args;

    let result = if explain {
        let diagnostics = Arc::new(MemoryDiagnostics::default());
        let result = evaluate_file(&path, &ProbeEvaluator::new(diagnostics.clone()))?;
        for event in diagnostics.events() {
            eprintln!("{}", render_event(&event));
        }
        eprintln!("{}", render_flags(&result));
        result
    } else {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        evaluate_file(&path, &ProbeEvaluator::<TracingDiagnostics>::default())?
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn evaluate_file<D>(
    path: &Path,
    evaluator: &ProbeEvaluator<D>,
) -> Result<ProbeResult, AppError>
where
    D: Diagnostics + 'static,
{
    let payload = std::fs::read(path)?;
    let document = parse_envelope(&payload)?;
    Ok(evaluator.evaluate(&document))
}

fn render_event(event: &DiagnosticEvent) -> String {
    let level = match event.level {
        DiagnosticLevel::Info => "info",
        DiagnosticLevel::Warn => "warn",
    };
    format!("[{level}] {}", event.message)
}

fn render_flags(result: &ProbeResult) -> String {
    let flags = &result.flags;
    format!(
        "[flags] revenue={} borrowing={} iscr={} (entry {})",
        flags.total_revenue, flags.borrowing_to_revenue, flags.iscr, result.financial_index_used
    )
}
