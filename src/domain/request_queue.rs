use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::{Employee, EmployeeId, Shift, ShiftDate, ShiftId, ShiftType};

/// One pending (employee, shift) request as the manager sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    pub employee_name: String,
    pub employee_id: EmployeeId,
    pub date: ShiftDate,
    pub shift_type: ShiftType,
    pub shift_id: ShiftId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestQueue {
    pub requests: Vec<ShiftRequest>,
    pub fully_staffed: BTreeMap<ShiftDate, bool>,
}

impl RequestQueue {
    pub fn contains(
        &self,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> bool {
        self.requests.iter().any(|r| {
            &r.shift_id == shift_id && &r.employee_id == employee_id
        })
    }
}

/// Derives the manager's request queue from a shifts snapshot and an
/// employees snapshot.
///
/// Emits one entry per id in each shift's `requests`, dropping ids with no
/// matching employee. Entries are ordered by calendar date, then morning,
/// noon, evening; dates that do not parse go last. Entries sharing a date
/// and shift type keep no particular order.
///
/// A date is fully staffed when the shifts on it need at least one person
/// and exactly as many are assigned as needed.
pub fn reconcile(shifts: &[Shift], employees: &[Employee]) -> RequestQueue {
    let names: HashMap<&EmployeeId, String> = employees
        .iter()
        .map(|employee| (&employee.id, employee.display_name()))
        .collect();

    let names = &names;

    let mut requests: Vec<ShiftRequest> = shifts
        .iter()
        .flat_map(move |shift| {
            shift.requests.iter().filter_map(move |employee_id| {
                let employee_name = names.get(employee_id)?.clone();
                Some(ShiftRequest {
                    employee_name,
                    employee_id: employee_id.clone(),
                    date: shift.date.clone(),
                    shift_type: shift.shift_type,
                    shift_id: shift.id.clone(),
                })
            })
        })
        .collect();

    requests.sort_by_cached_key(|request| {
        (
            DateKey(request.date.calendar_date()),
            request.shift_type.rank(),
        )
    });

    RequestQueue {
        requests,
        fully_staffed: fully_staffed_by_date(shifts),
    }
}

fn fully_staffed_by_date(shifts: &[Shift]) -> BTreeMap<ShiftDate, bool> {
    let mut totals: BTreeMap<ShiftDate, (u64, u64)> = BTreeMap::new();
    for shift in shifts {
        let (needed, assigned) = totals.entry(shift.date.clone()).or_default();
        *needed += u64::from(shift.needed_employees);
        *assigned += shift.assigned_employees.len() as u64;
    }

    totals
        .into_iter()
        .map(|(date, (needed, assigned))| {
            (date, needed > 0 && needed == assigned)
        })
        .collect()
}

/// Parsed dates first, in calendar order, then unparseable ones.
#[derive(PartialEq, Eq)]
struct DateKey(Option<NaiveDate>);

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
