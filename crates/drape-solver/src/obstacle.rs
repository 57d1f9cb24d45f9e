//! Analytic repulsive obstacles.
//!
//! An obstacle pushes away any particle closer than its `size` with a
//! penalty force `stiffness × penetration` along its outward normal.
//! Obstacles never move and hold no state besides their geometry.

use drape_math::Vec3;
use serde::{Deserialize, Serialize};

/// Distance metric and normal field of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Euclidean distance; `size` is the radius.
    Sphere,
    /// Chebyshev (L∞) distance; `size` is the half-width of an axis-aligned cube.
    Box,
}

/// A fixed analytic collision volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub size: f32,
    pub stiffness: f32,
    pub shape: ObstacleShape,
}

impl Obstacle {
    /// Sphere of `radius` centred at `position`.
    pub fn sphere(position: Vec3, radius: f32, stiffness: f32) -> Self {
        Self {
            position,
            size: radius,
            stiffness,
            shape: ObstacleShape::Sphere,
        }
    }

    /// Axis-aligned cube of half-width `half_width` centred at `position`.
    pub fn cube(position: Vec3, half_width: f32, stiffness: f32) -> Self {
        Self {
            position,
            size: half_width,
            stiffness,
            shape: ObstacleShape::Box,
        }
    }

    /// Distance from the obstacle centre to `point` under the shape's metric.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        let d = point - self.position;
        match self.shape {
            ObstacleShape::Sphere => d.length(),
            ObstacleShape::Box => d.abs().max_element(),
        }
    }

    /// Outward unit normal at `point`.
    ///
    /// For a box this is the signed axis of the dominant component of
    /// `point - position`; ties prefer X, then Z, then Y.
    pub fn normal(&self, point: Vec3) -> Vec3 {
        let d = point - self.position;
        match self.shape {
            ObstacleShape::Sphere => d.normalize_or_zero(),
            ObstacleShape::Box => {
                let a = d.abs();
                let sign = |v: f32| if v >= 0.0 { 1.0 } else { -1.0 };
                if a.x >= a.y {
                    if a.x >= a.z {
                        Vec3::X * sign(d.x)
                    } else {
                        Vec3::Z * sign(d.z)
                    }
                } else if a.y > a.z {
                    Vec3::Y * sign(d.y)
                } else {
                    Vec3::Z * sign(d.z)
                }
            }
        }
    }

    /// Penalty force on a particle at `point`; zero outside the obstacle.
    #[inline]
    pub fn repulsion(&self, point: Vec3) -> Vec3 {
        let penetration = self.size - self.distance(point);
        if penetration > 0.0 {
            self.stiffness * penetration * self.normal(point)
        } else {
            Vec3::ZERO
        }
    }
}
