pub mod aggregate;
pub mod config;
pub mod driver;
pub mod error;
pub mod locations;
pub mod output;
pub mod row;
pub mod value;
