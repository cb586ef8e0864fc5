//! chanterm library exports for testing

pub mod core;
pub mod monitor;
pub mod tui;

#[cfg(test)]
pub mod test_support;
