//! Integration tests for drape-solver.

use drape_math::Vec3;
use drape_mesh::generators::plane;
use drape_solver::params::{link_damping, link_stiffness, obstacle_stiffness};
use drape_solver::{
    init_cloth_from_mesh, ClothConfig, EnvironmentForces, Execution, Link, LinkKind, Obstacle,
    Particle, ParticleRule, ParticleSystem, SolverConfig,
};
use drape_types::ParticleId;

fn two_body(link: fn(ParticleId, ParticleId) -> Link, free_at: Vec3) -> ParticleSystem {
    let mut system = ParticleSystem::new();
    let a = system.add_particle(Particle::fixed_point(Vec3::ZERO));
    let b = system.add_particle(Particle::free(free_at, 1.0));
    system.add_link(link(a, b));
    system
}

fn hanging_cloth(divisions: u32, fe: f32) -> ParticleSystem {
    let mesh = plane(1.0, 1.0, divisions, divisions);
    let mut system = ParticleSystem::new();
    init_cloth_from_mesh(
        &mut system,
        &mesh.vertices,
        divisions,
        divisions,
        fe,
        &ClothConfig::default(),
    )
    .unwrap();
    system
}

// ─── Particle Tests ───────────────────────────────────────────

#[test]
fn free_particle_symplectic_euler() {
    let mut p = Particle::free(Vec3::ZERO, 2.0);
    p.force = Vec3::new(4.0, 0.0, 0.0);
    p.update(0.5);
    // v += F/m dt = 1.0 ; x += v dt = 0.5
    assert_eq!(p.velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(p.position, Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(p.force, Vec3::ZERO);
}

#[test]
fn fixed_particle_clears_state() {
    let mut p = Particle::fixed_point(Vec3::ONE);
    p.velocity = Vec3::X;
    p.force = Vec3::Y * 100.0;
    p.update(0.1);
    assert_eq!(p.rule, ParticleRule::Fixed);
    assert_eq!(p.position, Vec3::ONE);
    assert_eq!(p.velocity, Vec3::ZERO);
    assert_eq!(p.force, Vec3::ZERO);
}

#[test]
fn fixed_point_is_bit_identical_under_all_forces() {
    for execution in [Execution::Sequential, Execution::Parallel] {
        let mut system = two_body(|a, b| Link::spring(a, b, 500.0, 0.2), Vec3::new(0.3, -1.0, 0.1));
        let anchor = Vec3::new(0.0, 0.0, 0.0);
        // The anchor sits deep inside both obstacles.
        system.add_obstacle(Obstacle::sphere(Vec3::new(0.05, 0.0, 0.0), 1.0, 1.0e4));
        system.add_obstacle(Obstacle::cube(Vec3::new(0.0, 0.1, 0.0), 0.5, 1.0e4));
        let env = EnvironmentForces::default();

        for _ in 0..500 {
            system.step(0.001, &env, execution);
        }
        let p = system.particle(ParticleId(0));
        assert_eq!(p.position.to_array(), anchor.to_array());
        assert_eq!(p.velocity, Vec3::ZERO);
        assert_eq!(p.force, Vec3::ZERO);
    }
}

// ─── Link Tests ───────────────────────────────────────────────

#[test]
fn spring_force_pulls_towards_rest_length() {
    let system = two_body(|a, b| Link::spring(a, b, 10.0, 1.0), Vec3::new(0.0, -3.0, 0.0));
    let f = system.links[0].force(&system.particles);
    // p1 = anchor at origin, separation axis p1 - p2 = +Y, stretched by 2.
    assert!((f - Vec3::new(0.0, -20.0, 0.0)).length() < 1e-5);
}

#[test]
fn damper_opposes_axial_relative_velocity_only() {
    let mut system = two_body(|a, b| Link::damper(a, b, 2.0), Vec3::new(1.0, 0.0, 0.0));
    system.particles[1].velocity = Vec3::new(3.0, 5.0, 0.0);
    let f = system.links[0].force(&system.particles);
    // Relative velocity p1 - p2 = (-3, -5, 0); axis (-1, 0, 0); axial part 3.
    assert!((f - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-5);
    assert_eq!(system.links[0].kind, LinkKind::Damper);
}

#[test]
fn coincident_endpoints_produce_no_force() {
    let system = two_body(|a, b| Link::spring_damper(a, b, 10.0, 0.0, 1.0), Vec3::ZERO);
    assert_eq!(system.links[0].force(&system.particles), Vec3::ZERO);
}

#[test]
fn spring_reaches_rest_length_equilibrium() {
    let fe = 100.0;
    let k = link_stiffness(0.2, fe, 1.0);
    let z = link_damping(0.3, fe, 1.0);

    let mut system = ParticleSystem::new();
    let anchor = system.add_particle(Particle::fixed_point(Vec3::ZERO));
    let bob = system.add_particle(Particle::free(Vec3::new(0.0, -1.5, 0.4), 1.0));
    system.add_link(Link::spring_damper(anchor, bob, k, 1.0, z));

    for _ in 0..3000 {
        system.step(1.0 / fe, &EnvironmentForces::none(), Execution::Sequential);
    }

    let distance = system.particle(bob).position.length();
    assert!((distance - 1.0).abs() < 1e-4, "distance = {distance}");
    assert!(system.kinetic_energy() < 1e-8);
}

// ─── Obstacle Tests ───────────────────────────────────────────

#[test]
fn sphere_obstacle_pushes_outward() {
    let sphere = Obstacle::sphere(Vec3::ZERO, 1.0, 100.0);
    let f = sphere.repulsion(Vec3::new(0.0, 0.75, 0.0));
    assert!((f - Vec3::new(0.0, 25.0, 0.0)).length() < 1e-4);
    assert_eq!(sphere.repulsion(Vec3::new(0.0, 1.5, 0.0)), Vec3::ZERO);
}

#[test]
fn box_obstacle_uses_dominant_axis() {
    let cube = Obstacle::cube(Vec3::ZERO, 1.0, 10.0);
    assert!((cube.distance(Vec3::new(0.2, -0.9, 0.5)) - 0.9).abs() < 1e-6);
    assert_eq!(cube.normal(Vec3::new(0.2, -0.9, 0.5)), -Vec3::Y);
    assert_eq!(cube.normal(Vec3::new(0.5, 0.5, 0.1)), Vec3::X);
    assert_eq!(cube.normal(Vec3::new(0.1, 0.5, 0.5)), Vec3::Z);

    let f = cube.repulsion(Vec3::new(0.0, 0.0, -0.5));
    assert!((f - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
}

#[test]
fn obstacle_supports_resting_particle() {
    let fe = 500.0;
    let mut system = ParticleSystem::new();
    system.add_particle(Particle::free(Vec3::new(0.0, 1.0, 0.0), 1.0));
    system.add_obstacle(Obstacle::sphere(Vec3::ZERO, 1.0, obstacle_stiffness(fe)));

    let env = EnvironmentForces::gravity_only(9.81);
    for _ in 0..2000 {
        system.step(1.0 / fe, &env, Execution::Sequential);
    }
    // Hovers on the surface, penetrating by about g / stiffness.
    let y = system.particles[0].position.y;
    assert!(y > 0.999 && y < 1.0 + 1e-4, "y = {y}");
}

// ─── Parameter Tests ──────────────────────────────────────────

#[test]
fn parameter_helpers() {
    assert!((link_stiffness(0.2, 100.0, 2.0) - 1000.0).abs() < 1e-3);
    assert!((link_damping(0.03, 100.0, 1.0) - 3.0).abs() < 1e-5);
    assert!((obstacle_stiffness(60.0) - 3600.0).abs() < 1e-3);
}

#[test]
fn environment_force() {
    let env = EnvironmentForces::default();
    assert!((env.force() - Vec3::new(12.0, -9.81, 5.0)).length() < 1e-5);
    assert_eq!(EnvironmentForces::none().force(), Vec3::ZERO);
}

// ─── Cloth Tests ──────────────────────────────────────────────

#[test]
fn cloth_topology() {
    let mesh = plane(1.0, 1.0, 4, 3);
    let mut system = ParticleSystem::new();
    init_cloth_from_mesh(&mut system, &mesh.vertices, 4, 3, 100.0, &ClothConfig::default()).unwrap();

    assert_eq!(system.particles.len(), 20);
    // Top row (last 5 particles) are anchors, everything else is free.
    let fixed: Vec<usize> = (0..20).filter(|&i| system.particles[i].is_fixed()).collect();
    assert_eq!(fixed, vec![15, 16, 17, 18, 19]);

    // W = 5, H = 4: structural 31, shear 24, bend 22 + 12 diagonal.
    assert_eq!(system.links.len(), 89);
    assert!(system.links.iter().all(|l| l.kind == LinkKind::SpringDamper));
}

#[test]
fn cloth_starts_at_rest() {
    let system = hanging_cloth(5, 100.0);
    for link in &system.links {
        assert!(link.force(&system.particles).length() < 1e-4);
        assert!(link.rest_length > 0.0);
    }
}

#[test]
fn cloth_rejects_mismatched_grid() {
    let mesh = plane(1.0, 1.0, 4, 4);
    let mut system = ParticleSystem::new();
    let cloth = ClothConfig::default();
    assert!(init_cloth_from_mesh(&mut system, &mesh.vertices, 4, 3, 100.0, &cloth).is_err());
    assert!(init_cloth_from_mesh(&mut system, &mesh.vertices, 0, 4, 100.0, &cloth).is_err());
}

#[test]
fn cloth_rebuild_discards_previous_network() {
    let mut system = hanging_cloth(3, 100.0);
    system.add_obstacle(Obstacle::sphere(Vec3::ZERO, 0.2, 1.0));
    let mesh = plane(1.0, 1.0, 2, 2);
    init_cloth_from_mesh(&mut system, &mesh.vertices, 2, 2, 100.0, &ClothConfig::default()).unwrap();
    assert_eq!(system.particles.len(), 9);
    assert_eq!(system.obstacles.len(), 1);
}

#[test]
fn hanging_cloth_sags_under_gravity() {
    let fe = 1000.0;
    let mut system = hanging_cloth(8, fe);
    let before = system.positions();
    let env = EnvironmentForces::gravity_only(9.81);

    for _ in 0..500 {
        system.step(1.0 / fe, &env, Execution::Parallel);
    }

    let after = system.positions();
    assert!(after.iter().all(|p| p.is_finite()));
    // Anchors never move; the bottom row stretches downwards.
    for i in 72..81 {
        assert_eq!(after[i], before[i]);
    }
    assert!(after[4].y < before[4].y);
}

#[test]
fn wind_pushes_cloth_out_of_plane() {
    let fe = 1000.0;
    let mut system = hanging_cloth(8, fe);
    let env = EnvironmentForces::default();

    for _ in 0..300 {
        system.step(1.0 / fe, &env, Execution::Parallel);
    }

    let bottom = system.particles[4].position;
    assert!(bottom.is_finite());
    assert!(bottom.z > 0.0);
}

#[test]
fn parallel_step_matches_sequential() {
    let fe = 1000.0;
    let mut seq = hanging_cloth(10, fe);
    // Just clear of the sheet; the wind pushes the cloth into it.
    seq.add_obstacle(Obstacle::sphere(Vec3::new(0.0, -0.3, 0.32), 0.3, obstacle_stiffness(fe)));
    let mut par = seq.clone();
    let env = EnvironmentForces::default();

    for _ in 0..200 {
        seq.step(1.0 / fe, &env, Execution::Sequential);
        par.step(1.0 / fe, &env, Execution::Parallel);
    }

    for (a, b) in seq.particles.iter().zip(&par.particles) {
        assert_eq!(a.position.to_array(), b.position.to_array());
        assert_eq!(a.velocity.to_array(), b.velocity.to_array());
    }
}

#[test]
fn empty_network_is_a_no_op() {
    let mut system = ParticleSystem::new();
    let result = system.step(0.01, &EnvironmentForces::default(), Execution::Parallel);
    assert_eq!(result.particles, 0);
    assert_eq!(result.links, 0);
}

#[test]
fn applied_force_acts_for_one_step() {
    let mut system = ParticleSystem::new();
    let free = system.add_particle(Particle::free(Vec3::ZERO, 2.0));
    let anchor = system.add_particle(Particle::fixed_point(Vec3::ONE));
    system.apply_force(free, Vec3::new(4.0, 0.0, 0.0));
    system.apply_force(anchor, Vec3::new(4.0, 0.0, 0.0));

    let env = EnvironmentForces::none();
    system.step(0.5, &env, Execution::Sequential);
    assert_eq!(system.particle(free).velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(system.particle(free).position, Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(system.particle(anchor).position, Vec3::ONE);

    // The accumulator is consumed; the particle now coasts.
    system.step(0.5, &env, Execution::Sequential);
    assert_eq!(system.particle(free).velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(system.particle(free).position, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn clear_empties_the_network() {
    let mut system = hanging_cloth(3, 100.0);
    system.add_obstacle(Obstacle::sphere(Vec3::ZERO, 0.2, 1.0));
    system.clear();
    assert!(system.particles.is_empty());
    assert!(system.links.is_empty());
    assert!(system.obstacles.is_empty());

    let result = system.step(0.01, &EnvironmentForces::default(), Execution::Sequential);
    assert_eq!(result.particles, 0);
}

#[test]
fn write_positions_into_mesh() {
    let mut mesh = plane(1.0, 1.0, 3, 3);
    let mut system = hanging_cloth(3, 100.0);
    system.particles[0].position = Vec3::new(7.0, 8.0, 9.0);
    system.write_positions(&mut mesh).unwrap();
    assert_eq!(mesh.position(0), Vec3::new(7.0, 8.0, 9.0));

    let mut small = plane(1.0, 1.0, 1, 1);
    assert!(system.write_positions(&mut small).is_err());
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_default() {
    let config = SolverConfig::default();
    assert!((config.h() - 0.001).abs() < 1e-9);
    assert_eq!(config.execution, Execution::Parallel);
    assert!(config.validate().is_ok());
}

#[test]
fn config_presets() {
    assert_eq!(SolverConfig::still_air().environment.wind, Vec3::ZERO);
    assert_eq!(SolverConfig::debug().execution, Execution::Sequential);
}

#[test]
fn config_validation() {
    let mut config = SolverConfig::default();
    config.fe = 0.0;
    assert!(config.validate().is_err());

    let mut config = SolverConfig::default();
    config.cloth.particle_mass = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn config_serialization() {
    let config = SolverConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let recovered: SolverConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(recovered.fe, config.fe);
    assert_eq!(recovered.environment, config.environment);

    let partial: SolverConfig = toml::from_str("fe = 250.0\nexecution = \"sequential\"").unwrap();
    assert_eq!(partial.fe, 250.0);
    assert_eq!(partial.execution, Execution::Sequential);
    assert_eq!(partial.cloth, ClothConfig::default());
}

#[test]
fn config_partial_nested_tables() {
    let text = "[cloth]\nstiffness = 0.5\n\n[environment]\ngravity = 4.0\n";
    let config: SolverConfig = toml::from_str(text).unwrap();
    assert_eq!(config.cloth.stiffness, 0.5);
    assert_eq!(config.cloth.damping, ClothConfig::default().damping);
    assert_eq!(config.environment.gravity, 4.0);
    assert_eq!(config.environment.wind, EnvironmentForces::default().wind);
}

#[test]
fn network_snapshot_round_trip() {
    let mut system = hanging_cloth(3, 100.0);
    system.add_obstacle(Obstacle::cube(Vec3::new(0.0, 0.0, 0.5), 0.2, 10.0));
    let json = serde_json::to_string(&system).unwrap();
    let recovered: ParticleSystem = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.particles.len(), 16);
    assert_eq!(recovered.links, system.links);
    assert_eq!(recovered.obstacles, system.obstacles);
}
