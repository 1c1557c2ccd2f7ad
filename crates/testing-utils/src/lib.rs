pub mod bin;
pub mod registry;
