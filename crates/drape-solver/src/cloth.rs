//! Cloth network construction from a regular grid mesh.
//!
//! Every particle is linked to its structural neighbours (one hop
//! horizontally/vertically), its shear neighbours (one hop diagonally)
//! and its bend neighbours (two hops horizontally, vertically and
//! diagonally). Without bend links the sheet buckles; without shear
//! links it collapses sideways.

use drape_mesh::Vertex;
use drape_types::{DrapeError, DrapeResult, ParticleId};
use tracing::debug;

use crate::config::ClothConfig;
use crate::link::Link;
use crate::params::{link_damping, link_stiffness};
use crate::particle::Particle;
use crate::system::ParticleSystem;

/// Rebuilds `system` as a cloth matching a `divisions_w × divisions_h` grid mesh.
///
/// `vertices` must be the row-major `(divisions_w + 1) * (divisions_h + 1)`
/// layout produced by [`drape_mesh::generators::plane`]; particle `i`
/// starts at vertex `i`. The last row is pinned as fixed anchors. All
/// links are spring-dampers whose rest length is the initial vertex
/// distance, with coefficients from `K(k, fe, m)` and `Z(z, fe, m)`.
///
/// Existing particles and links are discarded; obstacles are kept.
pub fn init_cloth_from_mesh(
    system: &mut ParticleSystem,
    vertices: &[Vertex],
    divisions_w: u32,
    divisions_h: u32,
    fe: f32,
    cloth: &ClothConfig,
) -> DrapeResult<()> {
    if divisions_w == 0 || divisions_h == 0 {
        return Err(DrapeError::InvalidConfig(format!(
            "cloth grid needs at least one division per axis, got {divisions_w}x{divisions_h}"
        )));
    }

    let w = divisions_w as usize + 1;
    let h = divisions_h as usize + 1;
    if vertices.len() != w * h {
        return Err(DrapeError::InvalidMesh(format!(
            "cloth grid {}x{} expects {} vertices, got {}",
            divisions_w,
            divisions_h,
            w * h,
            vertices.len()
        )));
    }

    system.particles.clear();
    system.links.clear();

    for (i, vertex) in vertices.iter().enumerate() {
        let particle = if i / w == h - 1 {
            Particle::fixed_point(vertex.position)
        } else {
            Particle::free(vertex.position, cloth.particle_mass)
        };
        system.add_particle(particle);
    }

    let k = link_stiffness(cloth.stiffness, fe, cloth.particle_mass);
    let z = link_damping(cloth.damping, fe, cloth.particle_mass);

    let mut connect = |a: usize, b: usize| {
        let rest = system.particles[a].position.distance(system.particles[b].position);
        system.links.push(Link::spring_damper(
            ParticleId(a as u32),
            ParticleId(b as u32),
            k,
            rest,
            z,
        ));
    };

    for y in 0..h {
        for x in 0..w {
            let index = y * w + x;

            // Bend: two hops down / right, and the two-hop diagonals.
            if y > 1 {
                let down = index - 2 * w;
                connect(index, down);
                if x + 2 < w {
                    connect(index, down + 2);
                }
            }
            if x + 2 < w {
                let side = index + 2;
                connect(index, side);
                if y + 2 < h {
                    connect(index, side + 2 * w);
                }
            }

            // Structural and shear: one hop down / right, and the diagonals.
            if y > 0 {
                let down = index - w;
                connect(index, down);
                if x + 1 < w {
                    connect(index, down + 1);
                }
            }
            if x + 1 < w {
                let side = index + 1;
                connect(index, side);
                if y + 1 < h {
                    connect(index, side + w);
                }
            }
        }
    }

    debug!(
        particles = system.particles.len(),
        links = system.links.len(),
        k,
        z,
        "built cloth network"
    );

    Ok(())
}
