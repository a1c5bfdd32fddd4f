mod calendar;
mod days;
mod employees;
mod shifts;
