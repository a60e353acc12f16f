//! HEALPix map file access.
//!
//! Thin wrapper around [`healpix_fits`] that reads and writes the pixel
//! channels of a FITS-encoded sky map. All encoding and decoding is
//! delegated to the library; the only check performed here is that the
//! requested channel count comes back from disk.
//!
//! Maps are stored RING-ordered, one binary-table column per channel in
//! HDU 1, using the healpy column naming convention
//! (see [`CHANNEL_COLUMNS`](crate::constants::CHANNEL_COLUMNS)).

use camino::Utf8Path;
use healpix_fits::{read_map, write_map};

use crate::anisomap_errors::AnisomapError;
use crate::constants::CHANNEL_COLUMNS;

/// Column names for the first `nchannels` channels of a map.
fn channel_columns(nchannels: usize) -> Result<Vec<&'static str>, AnisomapError> {
    if nchannels > CHANNEL_COLUMNS.len() {
        return Err(AnisomapError::UnsupportedChannelCount(
            nchannels,
            CHANNEL_COLUMNS.len(),
        ));
    }
    Ok(CHANNEL_COLUMNS[..nchannels].to_vec())
}

/// Read the first `nchannels` pixel arrays of a map file.
///
/// Arguments
/// -----------------
/// * `path`: the FITS file to read.
/// * `nchannels`: number of leading channels to load.
///
/// Return
/// ----------
/// * One pixel array per channel, in storage order.
pub fn read_channels(
    path: &Utf8Path,
    nchannels: usize,
) -> Result<Vec<Vec<f64>>, AnisomapError> {
    let columns = channel_columns(nchannels)?;
    let channels = read_map::<f64>(path.as_str(), &columns, 1);
    if channels.len() != nchannels {
        return Err(AnisomapError::ChannelCountMismatch {
            file: path.to_string(),
            expected: nchannels,
            found: channels.len(),
        });
    }
    Ok(channels)
}

/// Write pixel arrays to a map file, replacing any existing file.
///
/// The parent directory is created when missing.
pub fn write_channels(path: &Utf8Path, channels: &[Vec<f64>]) -> Result<(), AnisomapError> {
    channel_columns(channels.len())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let views: Vec<&[f64]> = channels.iter().map(Vec::as_slice).collect();
    write_map(path.as_str(), &views, false, true);
    Ok(())
}
