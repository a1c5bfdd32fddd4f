use serde::{Deserialize, Serialize};

use super::{Shift, ShiftDate, ShiftId, ShiftType};

/// One of the three fixed per-day slots a manager edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub shift_type: ShiftType,
    pub shift_id: Option<ShiftId>,
    pub needed_employees: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayEditAction {
    Create(Shift),
    Overwrite(Shift),
    Delete(ShiftId),
}

/// Editing session for one day: morning, noon and evening, each bound to the
/// first existing shift of that type on the date. A needed count of zero
/// means "no shift", so saving zero over an existing shift deletes it along
/// with its requests and assignments.
#[derive(Debug, Clone)]
pub struct DayEdit {
    date: ShiftDate,
    slots: Vec<(DaySlot, Option<Shift>)>,
}

impl DayEdit {
    pub fn open(date: ShiftDate, shifts: &[Shift]) -> Self {
        let slots = ShiftType::ALL
            .iter()
            .map(|shift_type| {
                let existing = shifts
                    .iter()
                    .find(|s| s.date == date && &s.shift_type == shift_type)
                    .cloned();
                let slot = DaySlot {
                    shift_type: *shift_type,
                    shift_id: existing.as_ref().map(|s| s.id.clone()),
                    needed_employees: existing
                        .as_ref()
                        .map_or(0, |s| s.needed_employees),
                };
                (slot, existing)
            })
            .collect();

        Self { date, slots }
    }

    pub fn date(&self) -> &ShiftDate {
        &self.date
    }

    pub fn slots(&self) -> Vec<DaySlot> {
        self.slots.iter().map(|(slot, _)| slot.clone()).collect()
    }

    pub fn set_needed(&mut self, shift_type: ShiftType, needed: u32) {
        if let Some((slot, _)) = self
            .slots
            .iter_mut()
            .find(|(slot, _)| slot.shift_type == shift_type)
        {
            slot.needed_employees = needed;
        }
    }

    /// What saving the edit does to the store, slot by slot.
    pub fn plan(&self) -> Vec<DayEditAction> {
        self.slots
            .iter()
            .filter_map(|(slot, existing)| match existing {
                Some(shift) if slot.needed_employees == 0 => {
                    Some(DayEditAction::Delete(shift.id.clone()))
                }
                Some(shift) => Some(DayEditAction::Overwrite(Shift {
                    needed_employees: slot.needed_employees,
                    ..shift.clone()
                })),
                None if slot.needed_employees > 0 => {
                    Some(DayEditAction::Create(Shift::new(
                        self.date.clone(),
                        slot.shift_type,
                        slot.needed_employees,
                    )))
                }
                None => None,
            })
            .collect()
    }
}
