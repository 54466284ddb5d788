// Business info domain module
// Value objects for the public business profile

pub mod value_objects;

pub use value_objects::{DayHours, WorkingHours};
