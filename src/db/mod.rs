pub mod connection;
pub mod portfolios;

pub use connection::{init_db, Database};
