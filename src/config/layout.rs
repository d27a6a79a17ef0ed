use crate::domain::model::PortStatus;
use crate::domain::sheet::Column;
use crate::utils::error::{ReconError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column letters assigned to the five semantic roles of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub room: Column,
    pub splitter: Column,
    pub port: Column,
    pub next: Column,
    pub status: Column,
}

impl ColumnMapping {
    /// Parses five column letters in `room, splitter, port, next, status` order.
    pub fn from_letters(letters: [&str; 5]) -> Result<Self> {
        let [room, splitter, port, next, status] = letters;
        Ok(Self {
            room: room.parse()?,
            splitter: splitter.parse()?,
            port: port.parse()?,
            next: next.parse()?,
            status: status.parse()?,
        })
    }
}

/// Literal that decides a port's status. The two source sheets use opposite
/// polarities, so the literal names which status it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMarker {
    /// Cell equal to the literal means IN_USE, anything else FREE.
    InUse(String),
    /// Cell equal to the literal means FREE, anything else IN_USE.
    Free(String),
}

impl StatusMarker {
    /// Resolves an already trimmed status cell value.
    pub fn resolve(&self, flag: &str) -> PortStatus {
        match self {
            Self::InUse(marker) if flag == marker => PortStatus::InUse,
            Self::InUse(_) => PortStatus::Free,
            Self::Free(marker) if flag == marker => PortStatus::Free,
            Self::Free(_) => PortStatus::InUse,
        }
    }

    pub fn literal(&self) -> &str {
        match self {
            Self::InUse(marker) | Self::Free(marker) => marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet: String,
    pub first_data_row: u32,
    pub columns: ColumnMapping,
    pub marker: StatusMarker,
}

impl SheetLayout {
    /// The sheet being checked: rooms in C, splitters in E, ports in F,
    /// status in G (`在用` = in use), next in H, data from row 3.
    pub fn reference() -> Self {
        Self {
            sheet: "原端口".to_string(),
            first_data_row: 3,
            columns: ColumnMapping {
                room: Column::from_index(2),
                splitter: Column::from_index(4),
                port: Column::from_index(5),
                next: Column::from_index(7),
                status: Column::from_index(6),
            },
            marker: StatusMarker::InUse("在用".to_string()),
        }
    }

    /// The system export: rooms in A, splitters in B, ports in C, next in E,
    /// status in N (`空闲` = free), data from row 2.
    pub fn truth() -> Self {
        Self {
            sheet: "导出表".to_string(),
            first_data_row: 2,
            columns: ColumnMapping {
                room: Column::from_index(0),
                splitter: Column::from_index(1),
                port: Column::from_index(2),
                next: Column::from_index(4),
                status: Column::from_index(13),
            },
            marker: StatusMarker::Free("空闲".to_string()),
        }
    }

    fn validate_as(&self, role: &str) -> Result<()> {
        validate_non_empty_string(&format!("{}.sheet", role), &self.sheet)?;
        validate_positive_number(
            &format!("{}.first_data_row", role),
            self.first_data_row as usize,
            1,
        )?;
        validate_non_empty_string(&format!("{}.marker", role), self.marker.literal())
    }
}

/// What to do when a reference room has no counterpart in the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRoomPolicy {
    /// Note the room and stop the whole pass.
    #[default]
    Halt,
    /// Note the room and keep going.
    Skip,
}

/// How per-room verdicts fold into the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// The last compared room decides.
    #[default]
    LastRoom,
    /// The worst verdict across compared rooms decides.
    Worst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub missing_room: MissingRoomPolicy,
    #[serde(default)]
    pub status: StatusPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconLayout {
    #[serde(default = "SheetLayout::reference")]
    pub reference: SheetLayout,
    #[serde(default = "SheetLayout::truth")]
    pub truth: SheetLayout,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Default for ReconLayout {
    fn default() -> Self {
        Self {
            reference: SheetLayout::reference(),
            truth: SheetLayout::truth(),
            policy: PolicyConfig::default(),
        }
    }
}

impl ReconLayout {
    /// 從 TOML 檔案載入版面設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReconError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for ReconLayout {
    fn validate(&self) -> Result<()> {
        self.reference.validate_as("reference")?;
        self.truth.validate_as("truth")?;

        if self.reference.sheet == self.truth.sheet {
            return Err(ReconError::InvalidConfigValueError {
                field: "truth.sheet".to_string(),
                value: self.truth.sheet.clone(),
                reason: "reference and truth must read different sheets".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_source_workbooks() {
        let layout = ReconLayout::default();
        assert_eq!(
            layout.reference.columns,
            ColumnMapping::from_letters(["C", "E", "F", "H", "G"]).unwrap()
        );
        assert_eq!(
            layout.truth.columns,
            ColumnMapping::from_letters(["A", "B", "C", "E", "N"]).unwrap()
        );
        assert_eq!(layout.reference.first_data_row, 3);
        assert_eq!(layout.truth.first_data_row, 2);
        assert_eq!(layout.policy.missing_room, MissingRoomPolicy::Halt);
        assert_eq!(layout.policy.status, StatusPolicy::LastRoom);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn marker_polarity() {
        let in_use = StatusMarker::InUse("在用".to_string());
        assert_eq!(in_use.resolve("在用"), PortStatus::InUse);
        assert_eq!(in_use.resolve("空闲"), PortStatus::Free);
        assert_eq!(in_use.resolve(""), PortStatus::Free);

        let free = StatusMarker::Free("空闲".to_string());
        assert_eq!(free.resolve("空闲"), PortStatus::Free);
        assert_eq!(free.resolve("在用"), PortStatus::InUse);
        assert_eq!(free.resolve(""), PortStatus::InUse);
    }

    #[test]
    fn partial_toml_keeps_missing_sections_default() {
        let toml_content = r#"
[policy]
missing_room = "skip"
status = "worst"

[truth]
sheet = "system-of-record"
first_data_row = 4
marker = { free = "idle" }

[truth.columns]
room = "A"
splitter = "B"
port = "C"
next = "D"
status = "E"
"#;
        let layout = ReconLayout::from_toml_str(toml_content).unwrap();
        assert_eq!(layout.reference, SheetLayout::reference());
        assert_eq!(layout.truth.sheet, "system-of-record");
        assert_eq!(layout.truth.first_data_row, 4);
        assert_eq!(layout.truth.marker, StatusMarker::Free("idle".to_string()));
        assert_eq!(layout.truth.columns.status.to_string(), "E");
        assert_eq!(layout.policy.missing_room, MissingRoomPolicy::Skip);
        assert_eq!(layout.policy.status, StatusPolicy::Worst);
    }

    #[test]
    fn bad_column_letter_is_rejected() {
        let toml_content = r#"
[reference]
sheet = "ref"
first_data_row = 3
marker = { in_use = "x" }

[reference.columns]
room = "C1"
splitter = "E"
port = "F"
next = "H"
status = "G"
"#;
        assert!(ReconLayout::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn validation_catches_shared_sheet_and_zero_row() {
        let mut layout = ReconLayout::default();
        layout.truth.sheet = layout.reference.sheet.clone();
        assert!(layout.validate().is_err());

        let mut layout = ReconLayout::default();
        layout.reference.first_data_row = 0;
        assert!(layout.validate().is_err());

        let mut layout = ReconLayout::default();
        layout.truth.marker = StatusMarker::Free(" ".to_string());
        assert!(layout.validate().is_err());
    }

    #[test]
    fn layout_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[policy]\nmissing_room = \"halt\"\n")
            .unwrap();

        let layout = ReconLayout::from_file(temp_file.path()).unwrap();
        assert_eq!(layout, ReconLayout::default());
    }
}
