// Account domain module
// Value objects for the registered-user aggregate

pub mod value_objects;

pub use value_objects::{BusinessType, Email};
