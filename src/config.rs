//! Construction parameters for containers and hash containers.

use crate::error::{ContainerError, Result};

/// Smallest automatic growth increment.
pub const MIN_AUTO_INCREMENT: usize = 10;

/// Default initial capacity of a container.
pub const DEFAULT_CAPACITY: usize = 10;

/// Sizing of a single container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Slots allocated up front. Must be at least 1.
    pub initial_capacity: usize,
    /// Slots added whenever the container is full. `0` selects
    /// `max(10, initial_capacity / 2)`.
    pub growth_increment: usize,
}

impl ContainerConfig {
    pub const fn new(initial_capacity: usize, growth_increment: usize) -> Self {
        Self {
            initial_capacity,
            growth_increment,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ContainerError::InvalidArgument(
                "initial capacity must be at least 1",
            ));
        }
        Ok(())
    }

    /// Growth increment with the automatic default resolved.
    pub const fn effective_increment(&self) -> usize {
        if self.growth_increment != 0 {
            return self.growth_increment;
        }
        let half = self.initial_capacity / 2;
        if half > MIN_AUTO_INCREMENT {
            half
        } else {
            MIN_AUTO_INCREMENT
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, 0)
    }
}

/// Sizing of a single-key hash container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    /// Number of buckets; fixed for the container's lifetime.
    pub buckets: usize,
    /// Sizing of every bucket.
    pub bucket: ContainerConfig,
}

impl HashConfig {
    pub const fn new(buckets: usize, bucket: ContainerConfig) -> Self {
        Self { buckets, bucket }
    }

    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            return Err(ContainerError::InvalidArgument(
                "bucket count must be at least 1",
            ));
        }
        self.bucket.validate()
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self::new(27, ContainerConfig::new(50, 25))
    }
}

/// Sizing of a double-key hash container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DblHashConfig {
    /// Number of level-1 buckets.
    pub level1: usize,
    /// Number of level-2 buckets inside each level-1 bucket.
    pub level2: usize,
    /// Sizing of every level-2 bucket.
    pub bucket: ContainerConfig,
}

impl DblHashConfig {
    pub const fn new(level1: usize, level2: usize, bucket: ContainerConfig) -> Self {
        Self {
            level1,
            level2,
            bucket,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.level1 == 0 || self.level2 == 0 {
            return Err(ContainerError::InvalidArgument(
                "bucket counts must be at least 1",
            ));
        }
        self.bucket.validate()
    }
}

impl Default for DblHashConfig {
    fn default() -> Self {
        Self::new(27, 27, ContainerConfig::new(20, 10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automatic_increment() {
        assert_eq!(ContainerConfig::new(4, 0).effective_increment(), 10);
        assert_eq!(ContainerConfig::new(100, 0).effective_increment(), 50);
        assert_eq!(ContainerConfig::new(100, 7).effective_increment(), 7);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(ContainerConfig::new(0, 5).validate().is_err());
        assert!(HashConfig::new(0, ContainerConfig::default())
            .validate()
            .is_err());
        assert!(DblHashConfig::new(3, 0, ContainerConfig::default())
            .validate()
            .is_err());
        assert!(DblHashConfig::default().validate().is_ok());
    }
}
