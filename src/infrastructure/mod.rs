//! Adapters behind the domain ports: the HTTP bank client and the stores.

pub mod bank;
pub mod cached;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
