//! Directory reconciliation between local and project map storage.
//!
//! Merged maps live in two places: the user's scratch area, where the
//! analysis writes them, and the read-managed project directory they are
//! published to. This module lists the analysis-relevant maps on both
//! sides, reports filenames present in only one of them, and can copy the
//! ones missing from the destination.
//!
//! Energy-binned variants of the anti/ext/solar maps are not part of the
//! analysis and are excluded from the comparison.

use std::collections::BTreeSet;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use glob::glob;

use crate::anisomap_errors::AnisomapError;

/// Filenames present on one side of a comparison but not the other.
///
/// Both lists are sorted. Swapping the compared directories swaps the two
/// lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Present in the destination but missing from the source.
    pub missing_src: Vec<String>,
    /// Present in the source but missing from the destination.
    pub missing_dst: Vec<String>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.missing_src.is_empty() && self.missing_dst.is_empty()
    }
}

/// Whether a map file takes part in the analysis.
///
/// Energy-binned maps are kept only for the sidereal time frame.
pub fn keeps_for_analysis(name: &str) -> bool {
    !name.contains("GeV") || name.contains("sid")
}

/// Sorted basenames of the analysis-relevant maps in a directory.
///
/// A missing directory reads as an empty listing.
pub fn analysis_maps(dir: &Utf8Path) -> Result<Vec<String>, AnisomapError> {
    let mut names = Vec::new();
    for entry in glob(&format!("{dir}/*.fits"))? {
        let path = Utf8PathBuf::from_path_buf(entry?)
            .map_err(|p| AnisomapError::Utf8PathError(p.display().to_string()))?;
        if let Some(name) = path.file_name() {
            if keeps_for_analysis(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Set difference of two filename listings, both ways.
pub fn compare(src_names: &[String], dst_names: &[String]) -> ReconcileReport {
    let src: BTreeSet<&str> = src_names.iter().map(String::as_str).collect();
    let dst: BTreeSet<&str> = dst_names.iter().map(String::as_str).collect();
    ReconcileReport {
        missing_src: dst.difference(&src).map(|s| s.to_string()).collect(),
        missing_dst: src.difference(&dst).map(|s| s.to_string()).collect(),
    }
}

/// Copy the named files from the source directory to the destination.
pub fn copy_missing(
    src_dir: &Utf8Path,
    dst_dir: &Utf8Path,
    names: &[String],
) -> Result<(), AnisomapError> {
    for name in names {
        fs::copy(src_dir.join(name), dst_dir.join(name))?;
    }
    Ok(())
}
