pub mod activity;
pub mod page;
pub mod sensor;
pub mod station;
pub mod weather;
