//! Records the analysis username and creates the per-user output directory
//! structure under /data/user.

use clap::Parser;

use anisomap::paths::{record_user, OutputPaths};
use anisomap::AnisomapError;

#[derive(Parser, Debug)]
#[command(about = "Establishes paths for the 12-year anisotropy analysis")]
struct Args {
    /// Username for path creation (ex: fmcnally)
    #[arg(short, long)]
    user: String,
}

fn main() -> Result<(), AnisomapError> {
    let args = Args::parse();

    let record = record_user(&args.user)?;
    println!("Recorded analysis user in {record}");

    // Create desired directories for output (if they don't exist)
    let output = OutputPaths::for_user(&args.user);
    for dir in output.managed_dirs() {
        if dir.exists() {
            println!("Path {dir} already exists. Skipping...");
            continue;
        }
        std::fs::create_dir_all(&dir)?;
        println!("Newly established path: {dir}");
    }

    Ok(())
}
