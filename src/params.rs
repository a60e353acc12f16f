//! Filename conventions for daily and merged sky maps.
//!
//! A map file is named `{config}_{params...}_{date}.fits`, where the leading
//! token is the detector configuration and the trailing token, when present,
//! is the observation date. The helpers here recover the parameter key and
//! the calendar year a configuration belongs to.

use camino::Utf8Path;

use crate::anisomap_errors::AnisomapError;
use crate::constants::ParamKey;

/// Extract the map parameters other than date and detector configuration.
///
/// The filename stem is split on `_`; the first token (configuration) is
/// always dropped, and the last token (date) is dropped when `strip_date`
/// is set. The remaining tokens are rejoined with `_`. The path component
/// and the extension are ignored.
///
/// Arguments
/// -----------------
/// * `path`: map file path, assumed well formed.
/// * `strip_date`: drop the trailing date token (daily maps carry one,
///   merged maps do not).
///
/// Return
/// ----------
/// * The parameter key shared by all maps of the same kind.
pub fn map_params(path: &Utf8Path, strip_date: bool) -> ParamKey {
    let stem = path.file_stem().unwrap_or_default();
    let mut tokens: Vec<&str> = stem.split('_').collect();
    if strip_date {
        tokens.pop();
    }
    if !tokens.is_empty() {
        tokens.remove(0);
    }
    tokens.join("_")
}

/// Calendar year a detector configuration started taking data.
///
/// The early configurations predate the year-tagged naming scheme and are
/// looked up explicitly; every later configuration ends in its year.
///
/// Arguments
/// -----------------
/// * `config`: configuration label (e.g. `IC59`, `IC86-2013`).
///
/// Return
/// ----------
/// * The starting year, or [`AnisomapError::InvalidConfig`] when no year
///   can be read off the label.
pub fn calendar_year(config: &str) -> Result<i32, AnisomapError> {
    match config {
        "IC59" => Ok(2009),
        "IC79" => Ok(2010),
        _ => config
            .get(config.len().saturating_sub(4)..)
            .and_then(|tail| tail.parse::<i32>().ok())
            .ok_or_else(|| AnisomapError::InvalidConfig(config.to_string())),
    }
}
