pub mod data_stores;
mod day_schedule;
mod request_lifecycle;
mod restaurant_view;

pub use day_schedule::*;
pub use request_lifecycle::*;
pub use restaurant_view::*;
