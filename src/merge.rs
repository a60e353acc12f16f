//! # Map merging: grouping, accumulation, and drivers
//!
//! High-level facilities to **group** sky-map files by their parameter key
//! and **sum** their pixel channels into consolidated maps. The central type
//! is [`ChannelSum`], an elementwise accumulator sized from the first
//! contribution; the public drivers wrap it with the overwrite policy and
//! the output naming conventions.
//!
//! ## Overview
//! -----------------
//! * [`merge_maps`] - sum one list of files into one output map, honoring
//!   the overwrite policy.
//! * [`group_by_params`] - bucket files by their date-stripped (or kept)
//!   parameter key.
//! * [`merge_by_params`] - one merged map per key for a configuration,
//!   written as `{out_dir}/{config}_{key}.fits`.
//! * [`project_merge`] - re-merge already-merged per-configuration maps into
//!   detector-level maps, `{prefix}/merged/{detector}_{key}.fits`.
//!
//! ## Semantics
//! -----------------
//! * An existing output with overwrite disabled is left untouched and the
//!   merge is skipped ([`MergeOutcome::SkippedExisting`]).
//! * An existing output with overwrite enabled is deleted before any input
//!   is read.
//! * An empty input list writes nothing ([`MergeOutcome::NoInput`]).
//! * Channel sums are elementwise, commutative, and associative, so the
//!   result does not depend on input order.
//! * A channel-count or pixel-count mismatch aborts the whole merge with an
//!   error; no partial output is written.
//!
//! ## Feature Flags
//! -----------------
//! * `progress` - a live progress bar over the grouped drivers.

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use glob::glob;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::anisomap_errors::AnisomapError;
use crate::constants::{ParamKey, MERGED_DIR};
use crate::map_file::{read_channels, write_channels};
use crate::params::map_params;

/// What a merge call did with its output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Output already existed and overwrite was disabled; nothing was read.
    SkippedExisting,
    /// The input list was empty; nothing was written.
    NoInput,
    /// The output was written from this many input files.
    Written { inputs: usize },
}

/// Elementwise accumulator over a fixed set of pixel channels.
///
/// The channel shapes are taken from the first contribution; every later
/// contribution must match them exactly.
#[derive(Debug, Default)]
pub struct ChannelSum {
    channels: Vec<Vec<f64>>,
}

impl ChannelSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one map's channels into the running sums.
    ///
    /// Arguments
    /// -----------------
    /// * `label`: name reported in mismatch errors, usually the file path.
    /// * `input`: pixel arrays, one per channel.
    ///
    /// Return
    /// ----------
    /// * `Ok(())`, or a mismatch error naming the offending channel.
    pub fn add(&mut self, label: &str, input: &[Vec<f64>]) -> Result<(), AnisomapError> {
        if self.channels.is_empty() {
            self.channels = input.iter().map(|c| vec![0.0; c.len()]).collect();
        } else if input.len() != self.channels.len() {
            return Err(AnisomapError::ChannelCountMismatch {
                file: label.to_string(),
                expected: self.channels.len(),
                found: input.len(),
            });
        }
        for (channel, (acc, new)) in self.channels.iter_mut().zip(input).enumerate() {
            if new.len() != acc.len() {
                return Err(AnisomapError::PixelCountMismatch {
                    file: label.to_string(),
                    channel,
                    expected: acc.len(),
                    found: new.len(),
                });
            }
            for (a, v) in acc.iter_mut().zip(new) {
                *a += v;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }
}

/// Sum a list of map files into one output map.
///
/// Reads the first `nchannels` channels of every input, accumulates their
/// elementwise sums, and writes the result to `out`. See the module header
/// for the overwrite and empty-input semantics.
///
/// Arguments
/// -----------------
/// * `files`: input maps believed to share a parameter key.
/// * `out`: output map path.
/// * `overwrite`: replace an existing output instead of skipping.
/// * `nchannels`: number of leading channels to merge.
pub fn merge_maps(
    files: &[Utf8PathBuf],
    out: &Utf8Path,
    overwrite: bool,
    nchannels: usize,
) -> Result<MergeOutcome, AnisomapError> {
    if out.is_file() {
        if !overwrite {
            return Ok(MergeOutcome::SkippedExisting);
        }
        fs::remove_file(out)?;
    }

    println!("Working on {}", out.file_name().unwrap_or(out.as_str()));
    println!("{} files found...", files.len());
    if files.is_empty() {
        return Ok(MergeOutcome::NoInput);
    }

    let mut sum = ChannelSum::new();
    for file in files {
        println!("Loading {}", file.file_name().unwrap_or(file.as_str()));
        let channels = read_channels(file, nchannels)?;
        sum.add(file.as_str(), &channels)?;
    }

    write_channels(out, &sum.into_channels())?;
    Ok(MergeOutcome::Written {
        inputs: files.len(),
    })
}

/// Bucket files by parameter key, in key order.
pub fn group_by_params(
    files: &[Utf8PathBuf],
    strip_date: bool,
) -> BTreeMap<ParamKey, Vec<Utf8PathBuf>> {
    let mut groups: BTreeMap<ParamKey, Vec<Utf8PathBuf>> = BTreeMap::new();
    for file in files {
        groups
            .entry(map_params(file, strip_date))
            .or_default()
            .push(file.clone());
    }
    groups
}

#[cfg(feature = "progress")]
fn group_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total.max(1));
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} merged maps")
            .expect("indicatif template"),
    );
    pb
}

fn merge_grouped(
    groups: BTreeMap<ParamKey, Vec<Utf8PathBuf>>,
    out_dir: &Utf8Path,
    tag: &str,
    overwrite: bool,
    nchannels: usize,
) -> Result<Vec<(Utf8PathBuf, MergeOutcome)>, AnisomapError> {
    #[cfg(feature = "progress")]
    let pb = group_bar(groups.len() as u64);

    let mut results = Vec::with_capacity(groups.len());
    for (key, group) in groups {
        let out = out_dir.join(format!("{tag}_{key}.fits"));
        let outcome = merge_maps(&group, &out, overwrite, nchannels)?;
        results.push((out, outcome));
        #[cfg(feature = "progress")]
        pb.inc(1);
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();
    Ok(results)
}

/// Merge daily maps of one configuration, one output per parameter key.
///
/// Files are grouped by their date-stripped key and each group is summed
/// into `{out_dir}/{config}_{key}.fits`.
///
/// Return
/// ----------
/// * Every output path with its [`MergeOutcome`], in key order.
pub fn merge_by_params(
    files: &[Utf8PathBuf],
    out_dir: &Utf8Path,
    config: &str,
    overwrite: bool,
    nchannels: usize,
) -> Result<Vec<(Utf8PathBuf, MergeOutcome)>, AnisomapError> {
    merge_grouped(group_by_params(files, true), out_dir, config, overwrite, nchannels)
}

/// Re-merge per-configuration maps into detector-level maps.
///
/// Collects `{prefix}/merged/{detector}-*.fits`, drops files matching any
/// `omit` substring, groups by parameter key (merged names carry no date
/// token, so the key keeps every trailing token), and sums each group into
/// `{prefix}/merged/{detector}_{key}.fits`, always overwriting.
///
/// Arguments
/// -----------------
/// * `detector`: detector label prefixing the collected files (e.g. `IC86`).
/// * `prefix`: map storage location holding the `merged` subdirectory.
/// * `omit`: substrings of configurations to leave out of the sum.
/// * `nchannels`: number of leading channels to merge.
pub fn project_merge(
    detector: &str,
    prefix: &Utf8Path,
    omit: &[String],
    nchannels: usize,
) -> Result<Vec<(Utf8PathBuf, MergeOutcome)>, AnisomapError> {
    let merged_dir = prefix.join(MERGED_DIR);

    let mut files = Vec::new();
    for entry in glob(&format!("{merged_dir}/{detector}-*.fits"))? {
        let path = Utf8PathBuf::from_path_buf(entry?)
            .map_err(|p| AnisomapError::Utf8PathError(p.display().to_string()))?;
        files.push(path);
    }
    files.sort();
    files.retain(|f| !omit.iter().any(|tag| f.as_str().contains(tag.as_str())));

    merge_grouped(group_by_params(&files, false), &merged_dir, detector, true, nchannels)
}
