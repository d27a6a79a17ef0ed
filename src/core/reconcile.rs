use crate::config::layout::{MissingRoomPolicy, PolicyConfig, StatusPolicy};
use crate::domain::model::{
    Hierarchy, OverallStatus, PortStatus, Reconciliation, Room, RoomOutcome, RoomReport,
};

/// Diffs a reference hierarchy against the source of truth, room by room.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    policy: PolicyConfig,
}

impl ReconciliationEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Compares every reference room, in reference order.
    ///
    /// With [`MissingRoomPolicy::Halt`] the first reference room absent from
    /// `truth` ends the pass: it is reported as missing and later rooms are
    /// not visited. With [`StatusPolicy::LastRoom`] the last compared room's
    /// verdict becomes the overall status; no compared room leaves it PERFECT.
    pub fn reconcile(&self, reference: &Hierarchy, truth: &Hierarchy) -> Reconciliation {
        let mut status = OverallStatus::Perfect;
        let mut rooms = Vec::with_capacity(reference.len());
        let mut halted = false;

        for reference_room in reference.rooms() {
            let Some(truth_room) = truth.room(&reference_room.name) else {
                rooms.push(RoomOutcome::Missing {
                    room_name: reference_room.name.clone(),
                });
                if self.policy.missing_room == MissingRoomPolicy::Halt {
                    tracing::warn!(
                        "Room '{}' is missing from the source of truth; stopping before {} remaining room(s)",
                        reference_room.name,
                        reference.len() - rooms.len()
                    );
                    halted = true;
                    break;
                }
                tracing::warn!("Room '{}' is missing from the source of truth", reference_room.name);
                continue;
            };

            let report = compare_room(reference_room, truth_room);
            let verdict = report.verdict();
            tracing::debug!(
                "Room '{}': {}/{} ports matched ({})",
                report.room_name,
                report.matched,
                report.all_ports,
                verdict
            );

            status = match self.policy.status {
                StatusPolicy::LastRoom => verdict,
                // PERFECT < SUCCESS < ERROR
                StatusPolicy::Worst => status.max(verdict),
            };
            rooms.push(RoomOutcome::Compared(report));
        }

        Reconciliation {
            status,
            rooms,
            halted,
        }
    }
}

/// Counts one room's ports. A reference splitter missing from the truth room
/// marks all its ports mismatched without classifying them as in use or free.
pub fn compare_room(reference: &Room, truth: &Room) -> RoomReport {
    let mut report = RoomReport {
        room_name: reference.name.clone(),
        splitter_count: reference.splitters.len(),
        all_ports: 0,
        on_count: 0,
        off_count: 0,
        matched: 0,
        mismatched: 0,
    };

    for splitter in reference.splitters.values() {
        report.all_ports += splitter.ports.len();

        let Some(truth_splitter) = truth.splitter(&splitter.name) else {
            tracing::trace!(
                "Splitter {}/{} not in source of truth, {} port(s) mismatched",
                splitter.room,
                splitter.name,
                splitter.ports.len()
            );
            report.mismatched += splitter.ports.len();
            continue;
        };

        for port in splitter.ports.values() {
            match port.status {
                PortStatus::InUse => report.on_count += 1,
                PortStatus::Free => report.off_count += 1,
            }

            let agrees = truth_splitter
                .port(&port.name)
                .is_some_and(|other| other.status == port.status && other.next == port.next);
            if agrees {
                report.matched += 1;
            } else {
                report.mismatched += 1;
            }
        }
    }

    report
}
