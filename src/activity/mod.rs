pub mod messages;
pub mod scorer;
