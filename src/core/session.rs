use crate::config::layout::ReconLayout;
use crate::core::analyze::analyze_workbook;
use crate::domain::model::ReconReport;
use crate::domain::sheet::Workbook;
use crate::utils::error::Result;

/// Holds the report of the most recent upload.
///
/// A new upload always drops the previous report first, so a rejected upload
/// leaves the session empty rather than showing stale results.
#[derive(Debug, Default)]
pub struct ReconSession {
    layout: ReconLayout,
    current: Option<ReconReport>,
}

impl ReconSession {
    pub fn new(layout: ReconLayout) -> Self {
        Self {
            layout,
            current: None,
        }
    }

    pub fn upload(&mut self, workbook: &Workbook) -> Result<&ReconReport> {
        self.current = None;
        let report = analyze_workbook(workbook, &self.layout)?;
        Ok(self.current.insert(report))
    }

    pub fn current(&self) -> Option<&ReconReport> {
        self.current.as_ref()
    }

    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            tracing::debug!("Session reset, report discarded");
        }
    }

    pub fn layout(&self) -> &ReconLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::Sheet;

    fn workbook(room: &str) -> Workbook {
        let reference = Sheet::from_rows(
            "原端口",
            1,
            &[
                &["表头"],
                &["表头"],
                &["", "", room, "", "S1", "P1", "在用", "L1"],
                &["", "", room, "", "S1", "P2", "空闲", ""],
            ],
        );
        let truth = Sheet::from_rows(
            "导出表",
            1,
            &[&["表头"], &[room, "S1", "P1", "", "L1"], &[room, "S1", "P2"]],
        );
        Workbook::new().with_sheet(reference).with_sheet(truth)
    }

    #[test]
    fn upload_replaces_and_reset_clears() {
        let mut session = ReconSession::default();
        assert!(session.current().is_none());

        session.upload(&workbook("R1")).unwrap();
        assert_eq!(session.current().unwrap().rooms[0].room_name(), "R1");

        session.upload(&workbook("R2")).unwrap();
        assert_eq!(session.current().unwrap().rooms.len(), 1);
        assert_eq!(session.current().unwrap().rooms[0].room_name(), "R2");

        session.reset();
        assert!(session.current().is_none());
    }

    #[test]
    fn failed_upload_leaves_no_report() {
        let mut session = ReconSession::default();
        session.upload(&workbook("R1")).unwrap();

        let broken = Workbook::new().with_sheet(Sheet::new("原端口"));
        assert!(session.upload(&broken).is_err());
        assert!(session.current().is_none());
    }
}
