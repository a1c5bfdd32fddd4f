use std::collections::HashMap;

use super::{Employee, Shift, ShiftId};

/// Local copy of a restaurant's shifts and employees in two layers.
///
/// The confirmed layer is the last full snapshot delivered by a change feed.
/// The overlay holds shifts this process has just written, applied before
/// the feed catches up. Every arrival, snapshot or local write, takes the
/// next sequence number, and the latest arrival wins: a shift snapshot drops
/// every overlay entry that came before it, even when that snapshot was
/// produced before the local write reached the store.
#[derive(Debug, Default)]
pub struct LayeredSnapshot {
    shifts: Vec<Shift>,
    employees: Vec<Employee>,
    overlay: HashMap<ShiftId, Pending>,
    next_seq: u64,
}

#[derive(Debug)]
struct Pending {
    // `None` marks a local delete.
    shift: Option<Shift>,
    seq: u64,
}

impl LayeredSnapshot {
    pub fn new(shifts: Vec<Shift>, employees: Vec<Employee>) -> Self {
        let mut snapshot = Self::default();
        snapshot.apply_shift_snapshot(shifts);
        snapshot.apply_employee_snapshot(employees);
        snapshot
    }

    fn stamp(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn apply_shift_snapshot(&mut self, shifts: Vec<Shift>) {
        let seq = self.stamp();
        self.shifts = shifts;
        self.overlay.retain(|_, pending| pending.seq > seq);
    }

    pub fn apply_employee_snapshot(&mut self, employees: Vec<Employee>) {
        self.stamp();
        self.employees = employees;
    }

    /// Records a shift as written by this process ahead of the feed.
    pub fn apply_local(&mut self, shift: Shift) {
        let seq = self.stamp();
        let id = shift.id.clone();
        self.overlay.insert(
            id,
            Pending {
                shift: Some(shift),
                seq,
            },
        );
    }

    /// Records a shift as deleted by this process ahead of the feed.
    pub fn apply_local_delete(&mut self, shift_id: &ShiftId) {
        let seq = self.stamp();
        self.overlay
            .insert(shift_id.clone(), Pending { shift: None, seq });
    }

    /// Shifts as they should be shown: confirmed copies, replaced or hidden
    /// by overlay entries. Overlay entries for shifts missing from the
    /// confirmed layer are appended.
    pub fn shifts(&self) -> Vec<Shift> {
        let mut shifts: Vec<Shift> = self
            .shifts
            .iter()
            .filter_map(|shift| match self.overlay.get(&shift.id) {
                Some(pending) => pending.shift.clone(),
                None => Some(shift.clone()),
            })
            .collect();

        let mut extra: Vec<&Pending> = self
            .overlay
            .iter()
            .filter(|(id, _)| !self.shifts.iter().any(|s| &s.id == *id))
            .map(|(_, pending)| pending)
            .collect();
        extra.sort_by_key(|pending| pending.seq);
        shifts.extend(extra.into_iter().filter_map(|p| p.shift.clone()));
        shifts
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn pending_count(&self) -> usize {
        self.overlay.len()
    }
}
