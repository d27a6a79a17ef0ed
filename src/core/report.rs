use crate::domain::model::{ReconReport, RoomOutcome};
use crate::domain::ports::OutputFormat;
use crate::utils::error::Result;
use serde::Serialize;

/// Renders reconciliation results for the presentation layer.
pub struct ReportFormatter;

impl ReportFormatter {
    /// One text block per room outcome, in outcome order.
    pub fn format(rooms: &[RoomOutcome]) -> Vec<String> {
        rooms.iter().map(Self::format_room).collect()
    }

    pub fn format_room(outcome: &RoomOutcome) -> String {
        match outcome {
            RoomOutcome::Compared(r) => format!(
                "{}合计{}台分光器，合计{}个端口，其中{}个在用端口，{}个空闲端口\n匹配系统录入数据，其中录入准确{}个端口，录入有误{}个端口。",
                r.room_name, r.splitter_count, r.all_ports, r.on_count, r.off_count, r.matched, r.mismatched
            ),
            RoomOutcome::Missing { room_name } => format!("{}录入有误！", room_name),
        }
    }

    pub fn render(report: &ReconReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::render_text(report)),
            OutputFormat::Csv => Self::render_csv(report),
            OutputFormat::Json => Self::render_json(report),
        }
    }

    pub fn render_text(report: &ReconReport) -> String {
        let mut out = format!("[{}]\n", report.status);
        for block in &report.summary {
            out.push('\n');
            out.push_str(block);
            out.push('\n');
        }
        out
    }

    pub fn render_csv(report: &ReconReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for outcome in &report.rooms {
            writer.serialize(CsvRow::from(outcome))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn render_json(report: &ReconReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    room: &'a str,
    found: bool,
    splitters: Option<usize>,
    ports: Option<usize>,
    in_use: Option<usize>,
    free: Option<usize>,
    matched: Option<usize>,
    mismatched: Option<usize>,
    verdict: Option<String>,
}

impl<'a> From<&'a RoomOutcome> for CsvRow<'a> {
    fn from(outcome: &'a RoomOutcome) -> Self {
        match outcome {
            RoomOutcome::Compared(r) => Self {
                room: &r.room_name,
                found: true,
                splitters: Some(r.splitter_count),
                ports: Some(r.all_ports),
                in_use: Some(r.on_count),
                free: Some(r.off_count),
                matched: Some(r.matched),
                mismatched: Some(r.mismatched),
                verdict: Some(r.verdict().to_string()),
            },
            RoomOutcome::Missing { room_name } => Self {
                room: room_name,
                found: false,
                splitters: None,
                ports: None,
                in_use: None,
                free: None,
                matched: None,
                mismatched: None,
                verdict: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{OverallStatus, ParseStats, RoomReport, SideSummary};

    fn room(name: &str, matched: usize, mismatched: usize) -> RoomOutcome {
        RoomOutcome::Compared(RoomReport {
            room_name: name.to_string(),
            splitter_count: 3,
            all_ports: matched + mismatched,
            on_count: 5,
            off_count: 2,
            matched,
            mismatched,
        })
    }

    fn report(rooms: Vec<RoomOutcome>) -> ReconReport {
        let side = |sheet: &str| SideSummary {
            sheet: sheet.to_string(),
            rooms: 1,
            ports: 8,
            stats: ParseStats::default(),
        };
        ReconReport {
            generated_at: chrono::Utc::now(),
            status: OverallStatus::Success,
            halted: true,
            reference: side("原端口"),
            truth: side("导出表"),
            summary: ReportFormatter::format(&rooms),
            rooms,
        }
    }

    #[test]
    fn compared_room_template() {
        let blocks = ReportFormatter::format(&[room("一号机房", 6, 2)]);
        assert_eq!(
            blocks,
            vec!["一号机房合计3台分光器，合计8个端口，其中5个在用端口，2个空闲端口\n匹配系统录入数据，其中录入准确6个端口，录入有误2个端口。".to_string()]
        );
    }

    #[test]
    fn missing_room_note() {
        let blocks = ReportFormatter::format(&[RoomOutcome::Missing {
            room_name: "二号机房".to_string(),
        }]);
        assert_eq!(blocks, vec!["二号机房录入有误！".to_string()]);
    }

    #[test]
    fn text_render_leads_with_status() {
        let text = ReportFormatter::render_text(&report(vec![room("R1", 6, 2)]));
        assert!(text.starts_with("[SUCCESS]\n"));
        assert!(text.contains("R1合计3台分光器"));
    }

    #[test]
    fn csv_has_one_row_per_room() {
        let csv_text = ReportFormatter::render_csv(&report(vec![
            room("R1", 6, 2),
            RoomOutcome::Missing {
                room_name: "R2".to_string(),
            },
        ]))
        .unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(
            lines[0],
            "room,found,splitters,ports,in_use,free,matched,mismatched,verdict"
        );
        assert_eq!(lines[1], "R1,true,3,8,5,2,6,2,SUCCESS");
        assert_eq!(lines[2], "R2,false,,,,,,,");
    }

    #[test]
    fn json_carries_status_and_rooms() {
        let json = ReportFormatter::render_json(&report(vec![room("R1", 8, 0)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "SUCCESS");
        assert_eq!(value["halted"], true);
        assert_eq!(value["rooms"][0]["kind"], "compared");
        assert_eq!(value["rooms"][0]["matched"], 8);
        assert_eq!(value["reference"]["sheet"], "原端口");
    }
}
