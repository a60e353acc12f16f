//! Daily map discovery and selection.
//!
//! The merge drivers work from a master list of per-day map files living in
//! per-configuration subdirectories of a storage prefix
//! (`{prefix}/{config}/{config}_{params...}_{YYYY-MM-DD}.fits`). This module
//! builds that list and narrows it down by detector configuration or by
//! calendar-year window.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use glob::glob;
use itertools::Itertools;
use regex::Regex;

use crate::anisomap_errors::AnisomapError;
use crate::constants::ConfigName;
use crate::params::calendar_year;

/// Daily map files end in an ISO date token.
static DAILY_MAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d{4}-\d{2}-\d{2}\.fits$").expect("daily map regex"));

/// Year-tagged configurations embedded in file paths.
static IC86_CONFIG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"IC86-\d{4}").expect("config regex"));

fn into_utf8(path: std::path::PathBuf) -> Result<Utf8PathBuf, AnisomapError> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| AnisomapError::Utf8PathError(p.display().to_string()))
}

/// Collect every daily map file below a storage prefix, sorted.
///
/// Scans one level of subdirectories and keeps only files whose name ends in
/// a date token, so merged maps living next to the daily ones are ignored.
pub fn collect_daily_maps(prefix: &Utf8Path) -> Result<Vec<Utf8PathBuf>, AnisomapError> {
    let mut files = Vec::new();
    for entry in glob(&format!("{prefix}/*/*.fits"))? {
        let path = into_utf8(entry?)?;
        if DAILY_MAP_RE.is_match(path.as_str()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Observation date of a daily map, read off the trailing filename token.
pub fn daily_date(path: &Utf8Path) -> Option<NaiveDate> {
    let token = path.file_stem()?.rsplit('_').next()?;
    NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
}

/// Unique year-tagged configurations appearing in a file listing, sorted.
pub fn discover_configs(files: &[Utf8PathBuf]) -> Vec<ConfigName> {
    files
        .iter()
        .filter_map(|f| IC86_CONFIG_RE.find(f.as_str()))
        .map(|m| m.as_str().to_string())
        .unique()
        .sorted()
        .collect()
}

/// Half-open calendar-year window for a configuration.
///
/// The window runs from `{year}-{start_mmdd}` inclusive to
/// `{year + 1}-{start_mmdd}` exclusive, where the year is derived from the
/// configuration label.
pub fn calendar_window(
    config: &str,
    start_mmdd: &str,
) -> Result<(NaiveDate, NaiveDate), AnisomapError> {
    let year = calendar_year(config)?;
    let start = NaiveDate::parse_from_str(&format!("{year}-{start_mmdd}"), "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(&format!("{}-{start_mmdd}", year + 1), "%Y-%m-%d")?;
    Ok((start, end))
}

/// Daily maps whose date falls inside a half-open window.
pub fn in_window(files: &[Utf8PathBuf], window: (NaiveDate, NaiveDate)) -> Vec<Utf8PathBuf> {
    let (start, end) = window;
    files
        .iter()
        .filter(|f| matches!(daily_date(f), Some(d) if start <= d && d < end))
        .cloned()
        .collect()
}

/// Files whose path mentions a configuration label.
pub fn with_config(files: &[Utf8PathBuf], config: &str) -> Vec<Utf8PathBuf> {
    files
        .iter()
        .filter(|f| f.as_str().contains(config))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, File};

    fn fake(paths: &[&str]) -> Vec<Utf8PathBuf> {
        paths.iter().map(Utf8PathBuf::from).collect()
    }

    #[test]
    fn daily_date_reads_trailing_token() {
        let path = Utf8Path::new("/maps/IC86-2011/IC86-2011_sid_2011-07-02.fits");
        assert_eq!(
            daily_date(path),
            Some(NaiveDate::from_ymd_opt(2011, 7, 2).unwrap())
        );
        assert_eq!(daily_date(Utf8Path::new("IC86-2011_sid.fits")), None);
    }

    #[test]
    fn configs_are_unique_and_sorted() {
        let files = fake(&[
            "IC86-2012/IC86-2012_sid_2012-06-01.fits",
            "IC86-2011/IC86-2011_sid_2011-06-01.fits",
            "IC86-2011/IC86-2011_solar_2011-06-02.fits",
        ]);
        assert_eq!(discover_configs(&files), vec!["IC86-2011", "IC86-2012"]);
    }

    #[test]
    fn window_is_half_open() {
        let window = calendar_window("IC86-2011", "05-13").unwrap();
        let files = fake(&[
            "d/IC86-2011_sid_2011-05-12.fits",
            "d/IC86-2011_sid_2011-05-13.fits",
            "d/IC86-2012_sid_2012-05-12.fits",
            "d/IC86-2012_sid_2012-05-13.fits",
        ]);
        let selected = in_window(&files, window);
        assert_eq!(
            selected,
            fake(&[
                "d/IC86-2011_sid_2011-05-13.fits",
                "d/IC86-2012_sid_2012-05-12.fits",
            ])
        );
    }

    #[test]
    fn legacy_config_window_uses_lookup_year() {
        let (start, _) = calendar_window("IC59", "05-13").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2009, 5, 13).unwrap());
    }

    #[test]
    fn daily_listing_skips_merged_maps() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        create_dir_all(base.join("IC86-2011")).unwrap();
        for name in [
            "IC86-2011/IC86-2011_sid_2011-06-02.fits",
            "IC86-2011/IC86-2011_sid_2011-06-01.fits",
            "IC86-2011/IC86-2011_sid.fits",
        ] {
            File::create(base.join(name)).unwrap();
        }

        let files = collect_daily_maps(&base).unwrap();
        let names: Vec<_> = files.iter().filter_map(|f| f.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "IC86-2011_sid_2011-06-01.fits",
                "IC86-2011_sid_2011-06-02.fits",
            ]
        );
    }
}
