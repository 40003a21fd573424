mod dynamodb;
mod memory;
mod postgres;

pub use dynamodb::DynamoStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;
