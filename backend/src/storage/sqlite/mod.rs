pub mod db;
pub mod repositories;

pub use db::SqliteConnection;
pub use repositories::*;
