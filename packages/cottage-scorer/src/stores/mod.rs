//! Storage for labeled calibration examples.
//!
//! Available backends:
//! - `ExampleStore` - CSV file loaded into an immutable in-memory snapshot

pub mod examples;

pub use examples::ExampleStore;
