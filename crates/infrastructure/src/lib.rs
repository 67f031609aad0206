//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_request_repository;
mod in_memory_object_store;
mod postgres_access_request_repository;
mod static_bucket_catalog;
mod system_clock;

pub use in_memory_access_request_repository::InMemoryAccessRequestRepository;
pub use in_memory_object_store::InMemoryObjectStore;
pub use postgres_access_request_repository::PostgresAccessRequestRepository;
pub use static_bucket_catalog::StaticBucketCatalog;
pub use system_clock::SystemClock;
