use anisomap::map_file::{read_channels, write_channels};
use anisomap::merge::{merge_by_params, merge_maps, project_merge, MergeOutcome};
use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

const NPIX: usize = 12;
const NCHANNELS: usize = 3;

fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

/// Writes a map whose channel k is filled with `scale * (k + 1)`.
fn write_test_map(path: &Utf8Path, scale: f64) {
    let channels: Vec<Vec<f64>> = (0..NCHANNELS)
        .map(|k| vec![scale * (k + 1) as f64; NPIX])
        .collect();
    write_channels(path, &channels).unwrap();
}

#[test]
fn merged_channels_hold_elementwise_sums() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);

    let files = vec![root.join("a.fits"), root.join("b.fits"), root.join("c.fits")];
    write_test_map(&files[0], 1.0);
    write_test_map(&files[1], 2.0);
    write_test_map(&files[2], 4.0);

    let out = root.join("merged.fits");
    let outcome = merge_maps(&files, &out, false, NCHANNELS).unwrap();
    assert_eq!(outcome, MergeOutcome::Written { inputs: 3 });

    let merged = read_channels(&out, NCHANNELS).unwrap();
    for (k, channel) in merged.iter().enumerate() {
        assert_eq!(channel.len(), NPIX);
        for value in channel {
            assert_relative_eq!(*value, 7.0 * (k + 1) as f64);
        }
    }
}

#[test]
fn merge_is_input_order_independent() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);

    let files = vec![root.join("a.fits"), root.join("b.fits")];
    write_test_map(&files[0], 1.0);
    write_test_map(&files[1], 3.0);
    let reversed: Vec<_> = files.iter().rev().cloned().collect();

    let forward_out = root.join("forward.fits");
    let backward_out = root.join("backward.fits");
    merge_maps(&files, &forward_out, false, NCHANNELS).unwrap();
    merge_maps(&reversed, &backward_out, false, NCHANNELS).unwrap();

    assert_eq!(
        read_channels(&forward_out, NCHANNELS).unwrap(),
        read_channels(&backward_out, NCHANNELS).unwrap()
    );
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);

    let input = root.join("a.fits");
    write_test_map(&input, 5.0);

    let out = root.join("merged.fits");
    write_test_map(&out, 1.0);

    let outcome = merge_maps(&[input.clone()], &out, false, NCHANNELS).unwrap();
    assert_eq!(outcome, MergeOutcome::SkippedExisting);

    // Still the original content, not the would-be merge result
    let kept = read_channels(&out, NCHANNELS).unwrap();
    assert_relative_eq!(kept[0][0], 1.0);

    let outcome = merge_maps(&[input], &out, true, NCHANNELS).unwrap();
    assert_eq!(outcome, MergeOutcome::Written { inputs: 1 });
    let replaced = read_channels(&out, NCHANNELS).unwrap();
    assert_relative_eq!(replaced[0][0], 5.0);
}

#[test]
fn empty_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);

    let out = root.join("merged.fits");
    let outcome = merge_maps(&[], &out, false, NCHANNELS).unwrap();
    assert_eq!(outcome, MergeOutcome::NoInput);
    assert!(!out.exists());
}

#[test]
fn daily_maps_merge_per_parameter_key() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);

    let daily = [
        ("IC86-2011_24H_sid_2011-06-01.fits", 1.0),
        ("IC86-2011_24H_sid_2011-06-02.fits", 2.0),
        ("IC86-2011_24H_solar_2011-06-01.fits", 10.0),
    ];
    let files: Vec<Utf8PathBuf> = daily
        .iter()
        .map(|(name, scale)| {
            let path = root.join("IC86-2011").join(name);
            write_test_map(&path, *scale);
            path
        })
        .collect();

    let merged_dir = root.join("merged");
    let results =
        merge_by_params(&files, &merged_dir, "IC86-2011", false, NCHANNELS).unwrap();

    let outputs: Vec<_> = results.iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(
        outputs,
        vec![
            merged_dir.join("IC86-2011_24H_sid.fits"),
            merged_dir.join("IC86-2011_24H_solar.fits"),
        ]
    );

    let sid = read_channels(&outputs[0], NCHANNELS).unwrap();
    assert_relative_eq!(sid[0][0], 3.0);
    let solar = read_channels(&outputs[1], NCHANNELS).unwrap();
    assert_relative_eq!(solar[0][0], 10.0);
}

#[test]
fn detector_merge_spans_configurations() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);
    let merged_dir = root.join("merged");

    write_test_map(&merged_dir.join("IC86-2011_24H_sid.fits"), 1.0);
    write_test_map(&merged_dir.join("IC86-2012_24H_sid.fits"), 2.0);

    let results = project_merge("IC86", &root, &[], NCHANNELS).unwrap();
    assert_eq!(results.len(), 1);

    let (out, outcome) = &results[0];
    assert_eq!(*out, merged_dir.join("IC86_24H_sid.fits"));
    assert_eq!(*outcome, MergeOutcome::Written { inputs: 2 });

    let merged = read_channels(out, NCHANNELS).unwrap();
    assert_relative_eq!(merged[0][0], 3.0);
}

#[test]
fn detector_merge_honors_omit_list() {
    let dir = TempDir::new().unwrap();
    let root = utf8_root(&dir);
    let merged_dir = root.join("merged");

    write_test_map(&merged_dir.join("IC86-2011_24H_sid.fits"), 1.0);
    write_test_map(&merged_dir.join("IC86-2012_24H_sid.fits"), 2.0);

    let omit = vec!["IC86-2012".to_string()];
    let results = project_merge("IC86", &root, &omit, NCHANNELS).unwrap();
    assert_eq!(results.len(), 1);

    let merged = read_channels(&results[0].0, NCHANNELS).unwrap();
    assert_relative_eq!(merged[0][0], 1.0);
}
