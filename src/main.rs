use clap::{Parser, Subcommand};
use image_curator::curate::{self, CurateOptions};
use image_curator::naming::REPORT_FILENAME;
use image_curator::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-curator")]
#[command(about = "Curate and optimize category images for the web")]
#[command(long_about = "\
Curate and optimize category images for the web

For every configured category, candidate images are taken from Unsplash
(when an access key is configured) and topped up with placeholder images.
Each one is downloaded, flattened onto white, fitted inside the web spec
bounds, and encoded as WebP.

Output directory after a run:

  <output>/
  ├── digital_art_1.webp           # Optimized images, <category>_<n>.webp
  ├── digital_art_2.webp
  ├── digital_art_metadata.json    # Per-category source and spec details
  ├── ...
  └── curation_report.json         # Totals and all results

Failed downloads and undecodable images are reported and skipped; the run
always finishes with a report.

Run 'image-curator gen-config' to generate a documented curator.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used if it does not exist)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Output directory for images and metadata
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, optimize, and record images for each category
    Curate {
        /// Only curate this category (repeatable)
        #[arg(long = "category", value_name = "KEY")]
        categories: Vec<String>,

        /// Images per category (defaults to images_per_category from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,
    },
    /// Validate the config and list its categories
    Categories,
    /// Print a stock curator.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Curate { categories, count } => {
            let curator_config = config::load_config(&cli.config)?;
            let options = CurateOptions {
                count: count.map(|n| n as usize),
                only: categories,
                ..CurateOptions::new(&cli.output)
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_curate_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = curate::curate(&curator_config, &options, Some(tx));
            printer.join().ok();

            let report = result?;
            output::print_report(&report, &cli.output.join(REPORT_FILENAME));
        }
        Command::Categories => {
            let curator_config = config::load_config(&cli.config)?;
            output::print_categories(&curator_config);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
