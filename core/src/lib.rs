#![no_std]

extern crate alloc;

pub use cell::*;
pub use clue::*;
pub use codec::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use level::*;
pub use types::*;

mod cell;
mod clue;
mod codec;
mod engine;
mod error;
mod generator;
mod geometry;
mod level;
mod types;
