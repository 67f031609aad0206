pub mod access_requests;
pub mod buckets;
pub mod health;
pub mod objects;
pub mod regions;
