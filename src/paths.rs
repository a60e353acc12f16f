//! # Analysis directory layout
//!
//! This module defines the **standard data locations** used across the
//! `anisomap` tools:
//!
//! - [`InputPaths`] - fixed, read-only project locations holding the
//!   published maps, simulation, and power-spectrum products.
//! - [`OutputPaths`] - per-user scratch locations where a rerun of the
//!   analysis writes its own maps and figures.
//!
//! The output layout is parameterized by username. The username is recorded
//! once (by the `init_paths` tool) in the user's configuration directory and
//! loaded back by every other tool; running without a recorded username is
//! an initialization error that aborts the process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use anisomap::paths::OutputPaths;
//!
//! # fn run() -> Result<(), anisomap::AnisomapError> {
//! let output = OutputPaths::load()?;
//! println!("maps are written under {}", output.maps_out);
//! # Ok(()) }
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::anisomap_errors::AnisomapError;
use crate::constants::{DATA_ANA_ROOT, DATA_USER_ROOT};

/// Filename of the recorded username inside the config directory.
const USER_RECORD: &str = "user";

/// Read-only project locations for input data. These paths should not change.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Project data root for the anisotropy analysis.
    pub root: Utf8PathBuf,
    /// Published detector-level merged maps.
    pub maps: Utf8PathBuf,
    /// Published per-configuration maps.
    pub cfg_maps: Utf8PathBuf,
    /// Simulation products.
    pub sim: Utf8PathBuf,
    /// Reference simulation histogram.
    pub sim_hist: Utf8PathBuf,
    /// Angular power spectra.
    pub aps: Utf8PathBuf,
}

impl InputPaths {
    pub fn new() -> Self {
        let root = Utf8PathBuf::from(DATA_ANA_ROOT);
        let sim = root.join("twelve_year/sim");
        Self {
            maps: root.join("twelve_year/maps/merged"),
            cfg_maps: root.join("twelve_year/maps"),
            sim_hist: sim.join("IC86_20904_hist.npy"),
            sim,
            aps: root.join("twelve_year/powerspec"),
            root,
        }
    }
}

impl Default for InputPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-user locations for output data, for reruns of the analysis.
///
/// These can be changed if you want a different storage structure.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Daily and merged map storage.
    pub maps_out: Utf8PathBuf,
    /// Simulation output.
    pub sim_out: Utf8PathBuf,
    /// Figures.
    pub figs: Utf8PathBuf,
    /// Angular power spectrum output.
    pub aps_out: Utf8PathBuf,
}

impl OutputPaths {
    /// Output layout rooted in a user's scratch area.
    pub fn for_user(user: &str) -> Self {
        let base = Utf8PathBuf::from(format!("{DATA_USER_ROOT}/{user}/anisotropy"));
        Self {
            maps_out: base.join("maps/maps_12yr_N10"),
            sim_out: base.join("sim"),
            figs: base.join("figures_12yr"),
            aps_out: base.join("powerspec"),
        }
    }

    /// Output layout for the recorded username.
    ///
    /// Return
    /// ----------
    /// * The layout, or [`AnisomapError::UninitializedUser`] when no
    ///   username has been recorded yet.
    pub fn load() -> Result<Self, AnisomapError> {
        Ok(Self::for_user(&recorded_user()?))
    }

    /// Directories managed by `init_paths`, in creation order.
    pub fn managed_dirs(&self) -> Vec<Utf8PathBuf> {
        vec![
            self.maps_out.clone(),
            self.sim_out.clone(),
            self.figs.clone(),
            self.figs.join("annual"),
            self.aps_out.clone(),
        ]
    }
}

fn config_base() -> Result<Utf8PathBuf, AnisomapError> {
    let base = dirs::config_dir().ok_or(AnisomapError::MissingConfigDir)?;
    let base = Utf8PathBuf::from_path_buf(base)
        .map_err(|p| AnisomapError::Utf8PathError(p.display().to_string()))?;
    Ok(base.join("anisomap"))
}

/// Record the analysis username in the user's configuration directory.
pub fn record_user(user: &str) -> Result<Utf8PathBuf, AnisomapError> {
    record_user_at(&config_base()?, user)
}

/// Load the recorded analysis username.
pub fn recorded_user() -> Result<String, AnisomapError> {
    recorded_user_at(&config_base()?)
}

/// [`record_user`] against an explicit config directory.
pub fn record_user_at(base: &Utf8Path, user: &str) -> Result<Utf8PathBuf, AnisomapError> {
    fs::create_dir_all(base)?;
    let record = base.join(USER_RECORD);
    fs::write(&record, user.trim())?;
    Ok(record)
}

/// [`recorded_user`] against an explicit config directory.
pub fn recorded_user_at(base: &Utf8Path) -> Result<String, AnisomapError> {
    let record = base.join(USER_RECORD);
    if !record.is_file() {
        return Err(AnisomapError::UninitializedUser);
    }
    Ok(fs::read_to_string(&record)?.trim().to_string())
}
