//! # Integration Tests
//!
//! Drive the fully wired `GameContainer` the way the demo binary does and
//! observe it through presenters and the bus.

pub mod harness;

#[cfg(test)]
mod flows;
#[cfg(test)]
mod notifications;
#[cfg(test)]
mod properties;
