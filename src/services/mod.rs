pub mod catalog;
pub mod sorting;
