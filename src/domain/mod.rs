mod calendar;
mod change_feed;
mod credential_hash;
mod data_stores;
mod day_edit;
mod employee;
mod employee_id;
mod error;
mod layered_snapshot;
mod password;
mod person_name;
mod request_queue;
mod restaurant;
mod restaurant_code;
mod restaurant_id;
mod session;
mod shift;
mod submit_status;
mod username;


pub use calendar::*;
pub use change_feed::*;
pub use credential_hash::*;
pub use data_stores::*;
pub use day_edit::*;
pub use employee::*;
pub use employee_id::*;
pub use error::*;
pub use layered_snapshot::*;
pub use password::*;
pub use person_name::*;
pub use request_queue::*;
pub use restaurant::*;
pub use restaurant_code::*;
pub use restaurant_id::*;
pub use session::*;
pub use shift::*;
pub use submit_status::*;
pub use username::*;
