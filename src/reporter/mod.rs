//! Report rendering

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::{render, render_many, JsonReport};
