use super::{EmployeeId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A (date, type) staffing slot needing `needed_employees` people.
///
/// `requests` and `assigned_employees` are meant to be disjoint and
/// `assigned_employees.len() <= needed_employees`, but neither is enforced:
/// an employee may request a shift that is already full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub date: ShiftDate,
    pub shift_type: ShiftType,
    pub needed_employees: u32,
    #[serde(default)]
    pub assigned_employees: Vec<EmployeeId>,
    #[serde(default)]
    pub requests: Vec<EmployeeId>,
}

impl Shift {
    /// A fresh shift with no requests and nobody assigned.
    pub fn new(date: ShiftDate, shift_type: ShiftType, needed: u32) -> Self {
        Self {
            id: ShiftId::default(),
            date,
            shift_type,
            needed_employees: needed,
            assigned_employees: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn has_request_from(&self, employee_id: &EmployeeId) -> bool {
        self.requests.contains(employee_id)
    }

    /// Moves `employee_id` from `requests` into `assigned_employees`.
    /// Returns false, leaving the shift unchanged, if there was no such
    /// request.
    pub fn accept_request(&mut self, employee_id: &EmployeeId) -> bool {
        if !self.has_request_from(employee_id) {
            return false;
        }
        self.requests.retain(|id| id != employee_id);
        self.assigned_employees.push(employee_id.clone());
        true
    }

    /// Drops every request from `employee_id`. Returns whether any existed.
    pub fn reject_request(&mut self, employee_id: &EmployeeId) -> bool {
        let before = self.requests.len();
        self.requests.retain(|id| id != employee_id);
        before != self.requests.len()
    }

    /// Adds a request with set-union semantics.
    pub fn add_request(&mut self, employee_id: &EmployeeId) {
        if !self.has_request_from(employee_id) {
            self.requests.push(employee_id.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(Uuid);

impl ShiftId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid shift ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ShiftId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for ShiftId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Noon,
    Evening,
}

impl ShiftType {
    /// Every shift type, in the order a day runs.
    pub const ALL: [ShiftType; 3] =
        [ShiftType::Morning, ShiftType::Noon, ShiftType::Evening];

    /// Position within a day, used to order shifts sharing a date.
    pub fn rank(&self) -> u8 {
        match self {
            ShiftType::Morning => 1,
            ShiftType::Noon => 2,
            ShiftType::Evening => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "morning",
            ShiftType::Noon => "noon",
            ShiftType::Evening => "evening",
        }
    }
}

impl FromStr for ShiftType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" | "Morning" => Ok(ShiftType::Morning),
            "noon" | "Noon" => Ok(ShiftType::Noon),
            "evening" | "Evening" => Ok(ShiftType::Evening),
            _ => Err(ValidationError::new(format!("Invalid shift type: {s}"))),
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];
const CANONICAL_FORMAT: &str = "%-m/%-d/%Y";

/// Calendar date of a shift as a locale-formatted string (`1/1/2025`).
/// Every accepted spelling is rewritten to that one form, so equality on
/// the string is equality of days. Ordering goes through
/// [`ShiftDate::calendar_date`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShiftDate(String);

impl ShiftDate {
    pub fn parse(date: &str) -> Result<Self, ValidationError> {
        let date = date.trim();
        match parse_calendar_date(date) {
            Some(day) => Ok(Self(day.format(CANONICAL_FORMAT).to_string())),
            None => Err(ValidationError::new(format!(
                "Invalid shift date: {date}"
            ))),
        }
    }

    /// The string as stored, without validation. Used when reading
    /// documents back. Dates that parse are still canonicalized.
    pub fn from_stored(date: String) -> Self {
        Self::parse(&date).unwrap_or(Self(date))
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.0)
    }
}

impl AsRef<String> for ShiftDate {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for ShiftDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
