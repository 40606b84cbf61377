#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod tree;
