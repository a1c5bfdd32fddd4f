use std::collections::BTreeSet;

use super::{EmployeeId, Shift, ShiftDate};

/// Dates that have at least one shift document, in calendar order.
pub fn scheduled_dates(shifts: &[Shift]) -> Vec<ShiftDate> {
    sorted_dates(shifts.iter())
}

/// Dates with at least one shift still asking for staff.
pub fn open_dates(shifts: &[Shift]) -> Vec<ShiftDate> {
    sorted_dates(shifts.iter().filter(|s| s.needed_employees > 0))
}

/// Dates on which `employee_id` has a pending request.
pub fn registered_dates(
    shifts: &[Shift],
    employee_id: &EmployeeId,
) -> Vec<ShiftDate> {
    sorted_dates(shifts.iter().filter(|s| s.has_request_from(employee_id)))
}

/// The shifts on `date`, morning first.
pub fn shifts_on(shifts: &[Shift], date: &ShiftDate) -> Vec<Shift> {
    let mut on_date: Vec<Shift> =
        shifts.iter().filter(|s| &s.date == date).cloned().collect();
    on_date.sort_by_key(|s| s.shift_type.rank());
    on_date
}

fn sorted_dates<'a>(shifts: impl Iterator<Item = &'a Shift>) -> Vec<ShiftDate> {
    let unique: BTreeSet<&ShiftDate> = shifts.map(|s| &s.date).collect();
    let mut dates: Vec<ShiftDate> = unique.into_iter().cloned().collect();
    // unparseable dates last
    dates.sort_by_key(|d| (d.calendar_date().is_none(), d.calendar_date()));
    dates
}
