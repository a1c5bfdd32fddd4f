use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::{EmployeeId, ShiftId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Submitting,
    Submitted,
    Error,
}

/// Transient per-(employee, shift) submission badges. A status is visible
/// for `ttl` after it was last set and then reads as cleared, whatever it
/// was.
#[derive(Debug)]
pub struct SubmitStatusBoard {
    ttl: Duration,
    entries: HashMap<(EmployeeId, ShiftId), (SubmitStatus, Instant)>,
}

impl SubmitStatusBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn set(
        &mut self,
        employee_id: &EmployeeId,
        shift_id: &ShiftId,
        status: SubmitStatus,
        now: Instant,
    ) {
        self.prune(now);
        self.entries
            .insert((employee_id.clone(), shift_id.clone()), (status, now));
    }

    pub fn get(
        &self,
        employee_id: &EmployeeId,
        shift_id: &ShiftId,
        now: Instant,
    ) -> Option<SubmitStatus> {
        self.entries
            .get(&(employee_id.clone(), shift_id.clone()))
            .filter(|(_, set_at)| now.duration_since(*set_at) < self.ttl)
            .map(|(status, _)| *status)
    }

    fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, set_at)| now.duration_since(*set_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
