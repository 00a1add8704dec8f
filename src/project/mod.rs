//! Project parameter structures and batch loading

mod data;
pub mod loader;

pub use data::{ProjectParameters, RawProjectInput};
pub use loader::{load_default_projects, load_projects, load_projects_from_reader, ProjectRecord};
