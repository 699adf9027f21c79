//! Parser module for Java test files

pub mod java;
pub mod lower;

pub use java::JavaParser;
pub use lower::lower_unit;
