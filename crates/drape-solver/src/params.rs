//! Parameter derivation helpers.
//!
//! Stiffness and damping are expressed per unit of the integration rate
//! `fe = 1 / h`, so the same normalized `k`/`z` stay stable when the
//! sub-stepping rate changes.

use drape_types::Scalar;

/// `K(k, fe, m) = fe² k / m`.
#[inline]
pub fn link_stiffness(k: Scalar, fe: Scalar, mass: Scalar) -> Scalar {
    fe * fe * k / mass
}

/// `Z(z, fe, m) = fe z / m`.
#[inline]
pub fn link_damping(z: Scalar, fe: Scalar, mass: Scalar) -> Scalar {
    fe * z / mass
}

/// Obstacle penalty stiffness for rate `fe`: `fe²`.
#[inline]
pub fn obstacle_stiffness(fe: Scalar) -> Scalar {
    fe * fe
}
