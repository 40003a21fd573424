pub mod database;
pub mod number;
