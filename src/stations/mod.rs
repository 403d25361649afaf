pub mod catalog;
pub mod cursor;
pub mod error;
pub mod score;
pub mod suggest;
