pub mod daily;

pub use daily::{DailyObservation, API_DATE_FORMAT};
