//! Merges raw daily map files into complete configuration maps, then into
//! detector-level maps (e.g. all of IC86).

use camino::Utf8PathBuf;
use clap::Parser;

use anisomap::constants::{DEFAULT_START_DATE, DETECTOR_MERGE_DIR, MAP_CHANNELS, MERGED_DIR};
use anisomap::merge::{merge_by_params, project_merge};
use anisomap::paths::OutputPaths;
use anisomap::selection::{
    calendar_window, collect_daily_maps, discover_configs, in_window, with_config,
};
use anisomap::AnisomapError;

#[derive(Parser, Debug)]
#[command(about = "Creates merged map files")]
struct Args {
    /// Specify which detector configurations to merge (optional)
    #[arg(short, long, num_args = 0..)]
    configs: Option<Vec<String>>,

    /// Month and day (MM-DD) at which to start the calendar year
    #[arg(long, default_value = DEFAULT_START_DATE)]
    start_date: String,

    /// Recreate maps for the 6-year paper selection
    #[arg(long)]
    sixyear: bool,

    /// Merge detector years instead of calendar years
    #[arg(long)]
    detector_year: bool,

    /// Map storage location
    #[arg(long)]
    prefix: Option<Utf8PathBuf>,

    /// Overwrite existing merged maps
    #[arg(long)]
    overwrite: bool,
}

fn main() -> Result<(), AnisomapError> {
    let args = Args::parse();

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None => OutputPaths::load()?.maps_out,
    };

    // Collect all daily map files
    let mut master = collect_daily_maps(&prefix)?;

    // Default behavior: merge all IC86 detector configurations
    let configs = match args.configs {
        Some(configs) => configs,
        None if args.sixyear => Vec::new(),
        None => {
            master = with_config(&master, "IC86");
            discover_configs(&master)
        }
    };

    for cfg in &configs {
        let files = if args.sixyear || args.detector_year {
            with_config(&master, cfg)
        } else {
            in_window(&master, calendar_window(cfg, &args.start_date)?)
        };

        let out_dir = if args.detector_year {
            prefix.join(DETECTOR_MERGE_DIR)
        } else {
            prefix.join(MERGED_DIR)
        };
        merge_by_params(&files, &out_dir, cfg, args.overwrite, MAP_CHANNELS)?;
    }

    // Detector-level merge across configurations
    let (detectors, omit) = if args.sixyear {
        let mut omit = vec!["IC86_".to_string()];
        omit.extend((2015..2020).map(|year| format!("IC86-{year}")));
        (vec!["IC".to_string()], omit)
    } else {
        (vec!["IC86".to_string()], Vec::new())
    };

    for detector in &detectors {
        project_merge(detector, &prefix, &omit, MAP_CHANNELS)?;
    }

    Ok(())
}
