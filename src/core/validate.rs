use crate::config::layout::ReconLayout;
use crate::domain::ports::CellGrid;
use crate::domain::sheet::Workbook;
use crate::utils::error::{ReconError, Result};

/// Checks that both sheets named by the layout exist and declare a
/// non-empty range. Presence of both is checked before emptiness, and the
/// reference sheet before the truth sheet.
pub fn check_workbook(workbook: &Workbook, layout: &ReconLayout) -> Result<()> {
    let reference_name = &layout.reference.sheet;
    let truth_name = &layout.truth.sheet;

    let (reference, truth) = match (workbook.sheet(reference_name), workbook.sheet(truth_name)) {
        (Some(reference), Some(truth)) => (reference, truth),
        (None, _) => {
            return Err(ReconError::MissingSheet {
                sheet: reference_name.clone(),
            })
        }
        (_, None) => {
            return Err(ReconError::MissingSheet {
                sheet: truth_name.clone(),
            })
        }
    };

    if reference.occupied_range().is_none() {
        return Err(ReconError::EmptySheet {
            sheet: reference_name.clone(),
        });
    }
    if truth.occupied_range().is_none() {
        return Err(ReconError::EmptySheet {
            sheet: truth_name.clone(),
        });
    }
    Ok(())
}

/// Upload hook: true when the workbook can be reconciled under `layout`.
pub fn validate(workbook: &Workbook, layout: &ReconLayout) -> bool {
    match check_workbook(workbook, layout) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Workbook rejected: {}", e);
            false
        }
    }
}
