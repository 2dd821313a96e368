pub mod api;
pub mod date_utils;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use api::ApiClient;
pub use store::{ScheduleStore, StoreError};
