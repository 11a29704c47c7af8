pub mod db;
pub mod es;
pub mod history;
pub mod models;
pub mod nfts;
pub mod outbox;
pub mod schema;
pub mod users;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
