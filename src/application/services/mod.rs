//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, BitmapDecoder)
//! but are themselves concrete structs, not traits.

mod catalog;

pub use catalog::{CatalogService, LoadedCatalog};
