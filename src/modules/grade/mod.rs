pub mod repository;
pub mod routes;
pub mod store;
pub mod summary;
