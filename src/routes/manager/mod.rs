mod calendar;
mod days;
mod employees;
mod requests;
mod shifts;

pub use calendar::*;
pub use days::*;
pub use employees::*;
pub use requests::*;
pub use shifts::*;
