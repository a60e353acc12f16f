//! Identifies maps missing from either the local or the project storage and
//! optionally copies the missing ones into the project directory.

use clap::Parser;

use anisomap::paths::{InputPaths, OutputPaths};
use anisomap::reconcile::{analysis_maps, compare, copy_missing};
use anisomap::AnisomapError;

#[derive(Parser, Debug)]
#[command(about = "Identify and copy missing maps")]
struct Args {
    /// Detector configuration (IC86-2011|IC86-2012|...)
    #[arg(short, long, num_args = 1.., required = true)]
    config: Vec<String>,

    /// Copy missing files from local storage to the project directory
    #[arg(long)]
    copy: bool,
}

fn main() -> Result<(), AnisomapError> {
    let args = Args::parse();

    let src_root = OutputPaths::load()?.maps_out;
    let dst_root = InputPaths::new().cfg_maps;

    for cfg in &args.config {
        println!("\nWorking on {cfg}...");

        let src_names = analysis_maps(&src_root.join(cfg))?;
        let dst_names = analysis_maps(&dst_root.join(cfg))?;
        let report = compare(&src_names, &dst_names);

        // Missing entries in local storage are unusual, always alert
        if !report.missing_src.is_empty() {
            println!("  Files missing in src directory:");
            for name in &report.missing_src {
                println!("    {name}");
            }
        }

        if !report.missing_dst.is_empty() {
            if args.copy {
                println!("  Copying the following files...");
                for name in &report.missing_dst {
                    println!("    {name}");
                }
                copy_missing(&src_root.join(cfg), &dst_root.join(cfg), &report.missing_dst)?;
            } else {
                println!("  Files missing in dst directory:");
                for name in &report.missing_dst {
                    println!("    {name}");
                }
            }
        }

        if report.is_clean() {
            println!("  All files match!");
        }
    }
    println!();

    Ok(())
}
