use crate::*;
pub use random::*;

mod random;

pub trait LevelGenerator {
    fn generate<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Result<Level>;
}
