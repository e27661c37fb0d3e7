//! Price feed generation

mod synthetic;

pub use synthetic::{generate_random_walk, generate_random_walk_between};
