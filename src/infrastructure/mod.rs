// Infrastructure layer module
// Database adapters implementing the domain repository interfaces

pub mod repositories;
