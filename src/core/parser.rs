use crate::config::layout::{ColumnMapping, SheetLayout, StatusMarker};
use crate::domain::model::{Hierarchy, ParseStats};
use crate::domain::ports::CellGrid;

/// Turns rows of one sheet into a `Room → Splitter → Port` hierarchy.
///
/// Rows are human-maintained and expected to have gaps: a row without a room
/// is skipped, a row without a splitter or port registers only the levels it
/// has. Names are taken verbatim; `next` and the status flag are trimmed.
#[derive(Debug, Clone)]
pub struct TableParser {
    columns: ColumnMapping,
    first_data_row: u32,
    marker: StatusMarker,
}

impl TableParser {
    pub fn new(columns: ColumnMapping, first_data_row: u32, marker: StatusMarker) -> Self {
        Self {
            columns,
            first_data_row,
            marker,
        }
    }

    pub fn from_layout(layout: &SheetLayout) -> Self {
        Self::new(layout.columns, layout.first_data_row, layout.marker.clone())
    }

    pub fn parse<G: CellGrid>(&self, table: &G) -> Hierarchy {
        self.parse_with_stats(table).0
    }

    pub fn parse_with_stats<G: CellGrid>(&self, table: &G) -> (Hierarchy, ParseStats) {
        let mut hierarchy = Hierarchy::new();
        let mut stats = ParseStats::default();

        let last_row = match table.occupied_range() {
            Some(range) => range.last_row(),
            None => return (hierarchy, stats),
        };
        // 最後一列不超過起始資料列時視為沒有資料
        if last_row <= self.first_data_row {
            tracing::debug!(
                "Last occupied row {} is not past first data row {}, nothing to parse",
                last_row,
                self.first_data_row
            );
            return (hierarchy, stats);
        }

        let cols = &self.columns;
        for row in self.first_data_row..=last_row {
            stats.rows_scanned += 1;

            let room_name = match non_empty(table.cell(cols.room, row)) {
                Some(name) => name,
                None => {
                    stats.rows_without_room += 1;
                    continue;
                }
            };
            let room = hierarchy.room_entry(room_name);

            let Some(splitter_name) = non_empty(table.cell(cols.splitter, row)) else {
                continue;
            };
            let splitter = room.splitter_entry(splitter_name);

            let Some(port_name) = non_empty(table.cell(cols.port, row)) else {
                continue;
            };
            let next = table.cell(cols.next, row).map(str::trim).unwrap_or_default();
            let flag = table.cell(cols.status, row).map(str::trim).unwrap_or_default();

            if !splitter.insert_port(port_name, self.marker.resolve(flag), next) {
                stats.duplicate_ports += 1;
                tracing::trace!(
                    "Row {}: port {}/{}/{} already recorded, keeping first occurrence",
                    row,
                    splitter.room,
                    splitter.name,
                    port_name
                );
            }
        }

        tracing::debug!(
            "Parsed {} rooms, {} ports from {} rows ({} without room, {} duplicate ports)",
            hierarchy.len(),
            hierarchy.port_count(),
            stats.rows_scanned,
            stats.rows_without_room,
            stats.duplicate_ports
        );

        (hierarchy, stats)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
