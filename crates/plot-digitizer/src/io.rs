//! JSON configuration, reports, and trajectory export.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::core::{
    parse_points, CalibrationError, Correspondences, DigitizeResult, DigitizerParams,
    PointParseError, Trajectory,
};

#[derive(thiserror::Error, Debug)]
pub enum DigitizeIoError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Point(#[from] PointParseError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Configuration for one digitization job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigitizeConfig {
    pub image_path: String,
    /// Data-space points as `"x,y"`.
    pub points: Vec<String>,
    /// Pixel locations of `points` as `"x,y"` (cv convention). May be shorter
    /// than `points`; the rest is requested from a point provider.
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub params: DigitizerParams,
    /// Trajectory file; `None` prints CSV to stdout.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub debug_dir: Option<String>,
}

impl DigitizeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DigitizeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DigitizeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parse `points` and `locations` into a (possibly incomplete) correspondence set.
    pub fn correspondences(&self) -> Result<Correspondences, DigitizeIoError> {
        let data = parse_points(&self.points)?;
        let pixel = parse_points(&self.locations)?;
        Ok(Correspondences::partial(data, pixel)?)
    }
}

/// On-disk trajectory encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryFormat {
    /// `x,y` header followed by one row per sample.
    Csv,
    /// Pretty JSON array of `[x, y]` pairs.
    Json,
}

impl TrajectoryFormat {
    /// `.json` selects JSON; anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

pub fn write_trajectory_csv<W: Write>(mut out: W, trajectory: &Trajectory) -> io::Result<()> {
    writeln!(out, "x,y")?;
    for (x, y) in trajectory.xy() {
        writeln!(out, "{x},{y}")?;
    }
    out.flush()
}

pub fn write_trajectory_json<W: Write>(
    mut out: W,
    trajectory: &Trajectory,
) -> Result<(), DigitizeIoError> {
    let pairs: Vec<[f64; 2]> = trajectory.xy().into_iter().map(|(x, y)| [x, y]).collect();
    serde_json::to_writer_pretty(&mut out, &pairs)?;
    writeln!(out)?;
    Ok(())
}

/// Write `trajectory` to `path`, choosing the encoding from the extension.
pub fn write_trajectory(
    path: impl AsRef<Path>,
    trajectory: &Trajectory,
) -> Result<(), DigitizeIoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = io::BufWriter::new(fs::File::create(path)?);
    match TrajectoryFormat::from_path(path) {
        TrajectoryFormat::Csv => write_trajectory_csv(file, trajectory)?,
        TrajectoryFormat::Json => write_trajectory_json(file, trajectory)?,
    }
    Ok(())
}

/// Full run report: inputs, calibration, classification, and samples.
#[derive(Debug, Serialize)]
pub struct DigitizeReport<'a> {
    pub image_path: &'a str,
    pub correspondences: &'a Correspondences,
    pub result: &'a DigitizeResult,
}

impl DigitizeReport<'_> {
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DigitizeIoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
