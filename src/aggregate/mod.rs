//! Turning raw GeoNames records into typed tables
//!
//! Both aggregators map every raw record to one row, substituting empty
//! text or NaN for anything the record lacks, and build the table once.

pub mod geo;
pub mod weather;

pub use geo::build_candidate_table;
pub use weather::build_reading_table;
