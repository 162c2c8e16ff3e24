//! Immutable simulation constants

use glam::Vec2;

use crate::config::{ConfigError, WorldConfig};

/// Table-wide constants, fixed once the simulation is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    size: Vec2,
    dt: f32,
    friction: f32,
    gravity: Vec2,
}

impl World {
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            size: config.size,
            dt: config.dt,
            friction: config.friction,
            gravity: config.gravity,
        })
    }

    /// Table size in pixels
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Fixed timestep (seconds)
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_from_config() {
        let world = World::new(&WorldConfig::default()).unwrap();
        assert_eq!(world.dt(), 0.005);
        assert_eq!(world.friction(), 0.2);
        assert_eq!(world.size(), Vec2::new(1200.0, 600.0));
    }

    #[test]
    fn test_world_rejects_non_positive_dt() {
        let config = WorldConfig {
            dt: -1.0,
            ..WorldConfig::default()
        };
        assert!(World::new(&config).is_err());
    }
}
