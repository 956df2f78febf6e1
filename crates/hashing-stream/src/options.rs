use std::fmt;

use crate::HashAlgorithm;

/// Which way bytes flow through a channel. Fixed for the channel's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Reading,
    Writing,
}

impl Direction {
    pub fn can_read(&self) -> bool { matches!(self, Direction::Reading) }

    pub fn can_write(&self) -> bool { matches!(self, Direction::Writing) }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Reading => f.write_str("reading"),
            Direction::Writing => f.write_str("writing"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HashingOptions {
    direction: Direction,
    algorithm: HashAlgorithm,
}

impl HashingOptions {
    pub fn new() -> Self { Self::default() }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn get_direction(&self) -> Direction { self.direction }

    pub fn get_algorithm(&self) -> HashAlgorithm { self.algorithm }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = HashingOptions::new();
        assert_eq!(options.get_direction(), Direction::Reading);
        assert_eq!(options.get_algorithm(), HashAlgorithm::Sha256);
    }

    #[test]
    fn test_chained_setters() {
        let options = HashingOptions::new()
            .direction(Direction::Writing)
            .algorithm(HashAlgorithm::Sha512);
        assert_eq!(options.get_direction(), Direction::Writing);
        assert_eq!(options.get_algorithm(), HashAlgorithm::Sha512);
        assert!(options.get_direction().can_write());
        assert!(!options.get_direction().can_read());
    }
}
