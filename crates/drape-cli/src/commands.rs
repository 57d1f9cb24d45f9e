//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;

use drape_bench::config::SceneConfig;
use drape_bench::metrics::BenchmarkMetrics;
use drape_bench::runner::{BenchmarkRunner, SceneRunner};
use drape_bench::scenarios::{Scenario, ScenarioKind};
use drape_mesh::TriangleMesh;
use drape_telemetry::{EventBus, JsonLinesSink};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run a scene from a config file.
pub fn simulate(
    config_path: &str,
    frames: Option<u32>,
    events_path: Option<&str>,
    no_steps: bool,
    output_path: Option<&str>,
) -> CommandResult {
    println!("Drape Simulation");
    println!("────────────────");
    println!("Config: {config_path}");

    let mut config = SceneConfig::load(config_path)?;
    if let Some(frames) = frames {
        config.frames = frames;
    }

    // The binary installs no tracing subscriber, so events are only kept
    // when written to a file.
    let mut bus = EventBus::new();
    if let Some(path) = events_path {
        let file = BufWriter::new(File::create(path)?);
        bus.add_sink(Box::new(JsonLinesSink::new(file)));
    }
    if no_steps {
        bus.mute("step_completed");
    }

    let mut runner = SceneRunner::new(&config)?;
    println!(
        "Scene:  {} ({} particles, {} links, {} strand points)",
        config.name,
        runner.system().particles.len(),
        runner.system().links.len(),
        runner.strand_points().len(),
    );
    println!(
        "Frames: {} × {} substeps (fe = {})",
        config.frames, config.substeps, config.solver.fe
    );
    println!();

    let metrics = runner.run(&mut bus)?;
    bus.finalize();
    print_metrics(&metrics);

    println!();
    for (name, count) in bus.tally() {
        let note = if bus.is_muted(name) { " (muted)" } else { "" };
        println!("  {name:<20} {count}{note}");
    }
    if let Some(path) = events_path {
        println!("Events written to: {path}");
    }
    if let Some(path) = output_path {
        std::fs::write(path, serde_json::to_string(runner.mesh())?)?;
        println!("Mesh written to: {path}");
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CommandResult {
    println!("Drape Benchmark Suite");
    println!("═════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut bus = EventBus::new();
    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        let c = &scenario.config;
        println!(
            "Running: {} ({}x{} cloth, {} strands, {} frames)",
            kind.name(),
            c.cloth.divisions_w,
            c.cloth.divisions_h,
            c.strands.count,
            c.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario, &mut bus)
            .map_err(|e| format!("Benchmark failed: {e}"))?;
        print_metrics(&metrics);
        all_metrics.push(metrics);
    }

    match output_path {
        Some(path) if path.ends_with(".json") => {
            std::fs::write(path, BenchmarkMetrics::to_json(&all_metrics)?)?;
            println!("Results written to: {path}");
        }
        Some(path) => {
            std::fs::write(path, BenchmarkMetrics::to_csv(&all_metrics))?;
            println!("Results written to: {path}");
        }
        None => {
            println!("CSV Output:");
            println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
        }
    }

    Ok(())
}

/// Print a canonical scenario's config.
pub fn config(scenario_name: &str) -> CommandResult {
    let kind: ScenarioKind = scenario_name.parse()?;
    print!("{}", Scenario::from_kind(kind).config.to_toml_string()?);
    Ok(())
}

/// Validate a scene config or mesh.
///
/// A failed check is returned as an error so the process exits non-zero.
pub fn validate(path: &str) -> CommandResult {
    println!("Drape Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = SceneConfig::load(path)?;
        config.validate()?;
        println!("✅ Config is valid.");
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: TriangleMesh = serde_json::from_str(&content)?;
        mesh.validate()?;
        println!(
            "✅ Mesh is valid ({} verts, {} tris).",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    } else {
        return Err(format!("unsupported file format: {path} (use .toml or .json)").into());
    }

    Ok(())
}

fn print_metrics(metrics: &BenchmarkMetrics) {
    println!("  Wall time:     {:.3}s", metrics.total_wall_time);
    println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
    println!("  Avg deform:    {:.3}ms", metrics.avg_deform_time * 1000.0);
    println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
    println!("  Max displace:  {:.4}m", metrics.max_displacement);
    println!("  Strand move:   {:.4}m", metrics.max_strand_displacement);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("drape-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn validate_accepts_canonical_scene() {
        let text = Scenario::sphere_drape().config.to_toml_string().unwrap();
        let path = write_temp("valid.toml", &text);
        assert!(validate(&path).is_ok());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn validate_fails_on_invalid_scene() {
        let path = write_temp("zero-substeps.toml", "substeps = 0\n");
        let err = validate(&path).unwrap_err();
        assert!(err.to_string().contains("substeps"), "{err}");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn validate_fails_on_invalid_mesh() {
        let mut mesh = drape_mesh::generators::plane(1.0, 1.0, 1, 1);
        mesh.indices.push(0);
        let path = write_temp("bad-mesh.json", &serde_json::to_string(&mesh).unwrap());
        assert!(validate(&path).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn validate_rejects_unknown_extension() {
        assert!(validate("scene.yaml").is_err());
    }
}
