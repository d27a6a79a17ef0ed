use crate::config::layout::{ReconLayout, SheetLayout};
use crate::core::parser::TableParser;
use crate::core::reconcile::ReconciliationEngine;
use crate::core::report::ReportFormatter;
use crate::core::validate::check_workbook;
use crate::domain::model::{Hierarchy, ReconReport, SideSummary};
use crate::domain::sheet::{Sheet, Workbook};
use crate::utils::error::{ReconError, Result};

/// Validates, parses both sheets, reconciles and formats. Pure apart from logging.
pub fn analyze_workbook(workbook: &Workbook, layout: &ReconLayout) -> Result<ReconReport> {
    check_workbook(workbook, layout)?;

    let (reference, reference_summary) = parse_side(workbook, &layout.reference)?;
    let (truth, truth_summary) = parse_side(workbook, &layout.truth)?;

    let reconciliation = ReconciliationEngine::new(layout.policy).reconcile(&reference, &truth);
    let summary = ReportFormatter::format(&reconciliation.rooms);

    tracing::info!(
        "Reconciled {} room(s): status {}{}",
        reconciliation.rooms.len(),
        reconciliation.status,
        if reconciliation.halted { " (halted on missing room)" } else { "" }
    );

    Ok(ReconReport {
        generated_at: chrono::Utc::now(),
        status: reconciliation.status,
        halted: reconciliation.halted,
        reference: reference_summary,
        truth: truth_summary,
        rooms: reconciliation.rooms,
        summary,
    })
}

fn parse_side(workbook: &Workbook, layout: &SheetLayout) -> Result<(Hierarchy, SideSummary)> {
    let sheet: &Sheet = workbook
        .sheet(&layout.sheet)
        .ok_or_else(|| ReconError::MissingSheet {
            sheet: layout.sheet.clone(),
        })?;

    let (hierarchy, stats) = TableParser::from_layout(layout).parse_with_stats(sheet);
    tracing::info!(
        "Sheet '{}': {} room(s), {} port(s)",
        layout.sheet,
        hierarchy.len(),
        hierarchy.port_count()
    );

    let summary = SideSummary {
        sheet: layout.sheet.clone(),
        rooms: hierarchy.len(),
        ports: hierarchy.port_count(),
        stats,
    };
    Ok((hierarchy, summary))
}
