//! Benchmark metrics collected during a scene run.

use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// Metrics collected from a scene run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scene name.
    pub scenario: String,
    pub particle_count: usize,
    pub link_count: usize,
    pub triangle_count: usize,
    /// Auxiliary points bound to the cloth.
    pub strand_points: usize,
    pub frames: u32,
    /// Solver steps per frame.
    pub substeps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    /// Average wall-clock time of the deform call (seconds).
    pub avg_deform_time: f64,
    /// Final kinetic energy of the cloth.
    pub final_kinetic_energy: f64,
    /// Maximum cloth particle displacement from its initial position.
    pub max_displacement: f32,
    /// Maximum strand point displacement from its bound rest position.
    pub max_strand_displacement: f32,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,particles,links,triangles,strand_points,frames,substeps,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,avg_deform_ms,final_ke,max_displacement,max_strand_displacement".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6}",
            self.scenario,
            self.particle_count,
            self.link_count,
            self.triangle_count,
            self.strand_points,
            self.frames,
            self.substeps,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.avg_deform_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_strand_displacement,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Pretty-printed JSON array.
    pub fn to_json(metrics: &[BenchmarkMetrics]) -> DrapeResult<String> {
        serde_json::to_string_pretty(metrics).map_err(|e| DrapeError::Serialization(e.to_string()))
    }
}
