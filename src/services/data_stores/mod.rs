mod hashmap_banned_token_store;
mod hashmap_employee_store;
mod hashmap_restaurant_store;
mod hashmap_shift_store;
mod postgres_employee_store;
mod postgres_restaurant_store;
mod postgres_shift_store;
mod redis_banned_token_store;

pub use hashmap_banned_token_store::*;
pub use hashmap_employee_store::*;
pub use hashmap_restaurant_store::*;
pub use hashmap_shift_store::*;
pub use postgres_employee_store::*;
pub use postgres_restaurant_store::*;
pub use postgres_shift_store::*;
pub use redis_banned_token_store::*;
