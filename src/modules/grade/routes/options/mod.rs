mod service;
mod types;

pub use service::service;
