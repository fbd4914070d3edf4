pub mod time;

pub use time::{now_utc, older_than, parse_timestamp};
