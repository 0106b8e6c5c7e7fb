mod memory_catalog_store;

pub use memory_catalog_store::MemoryCatalogStore;
