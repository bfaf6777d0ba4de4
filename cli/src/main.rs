//! Tools for building routing benchmarks: sample request logs by trip distance, fetch routes,
//! and convert the responses to GPX or Shapefiles. These are bundled as a single executable.

#[macro_use]
extern crate log;

mod configuration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use structopt::StructOpt;

use geom::DistanceBands;
use gpolyio::RoutePaths;
use sampler::SampleOptions;

use crate::configuration::Configuration;

#[derive(StructOpt)]
#[structopt(name = "gpolygpx", about = "Routing benchmark multi-tool")]
enum Command {
    /// Picks a sample of request URLs out of a log, stratified by the distance between each
    /// request's endpoints. Writes one file per distance band next to the input.
    Sample {
        /// A log with one request URL per line
        #[structopt()]
        input: String,
        /// Embedded in every output filename
        #[structopt(long, default_value = "sample")]
        tag: String,
        /// Comma-separated distance breakpoints in kilometers. 0 is implied.
        #[structopt(long, default_value = "50,150,300,600")]
        repartition: String,
        /// How many URLs to pick in total
        #[structopt(long, default_value = "250")]
        count: usize,
        /// Only consider lines containing this
        #[structopt(long)]
        pattern: Option<String>,
        /// A seed for generating random numbers. Uses entropy if omitted.
        #[structopt(long)]
        rng_seed: Option<u64>,
    },
    /// Fetches one route and saves the raw JSON response, named after its endpoints
    Gpoly {
        /// The path and query of a request, like `/route?from=2.35,48.85&to=5.37,43.29`
        #[structopt()]
        url: String,
        /// Where to write the response. Defaults to the current directory.
        #[structopt(long, default_value = ".")]
        output_dir: String,
        /// Overrides the routing host from gpolygpx.toml
        #[structopt(long)]
        host: Option<String>,
    },
    /// Converts one routing response to a GPX file
    Gpx {
        /// A JSON routing response
        #[structopt()]
        input: String,
        /// Defaults to the input's directory
        #[structopt(long)]
        output_dir: Option<String>,
        /// Slash-separated path to the encoded polyline within the response
        #[structopt(long)]
        json_path: Option<String>,
    },
    /// Converts one routing response to a Shapefile. The response must have a time and length.
    Shp {
        /// A JSON routing response
        #[structopt()]
        input: String,
        /// Defaults to the input's directory
        #[structopt(long)]
        output: Option<String>,
        #[structopt(long)]
        geom_path: Option<String>,
        #[structopt(long)]
        time_path: Option<String>,
        #[structopt(long)]
        length_path: Option<String>,
        /// Written to the `cat` attribute
        #[structopt(long)]
        category: Option<String>,
    },
    /// Converts every response matching a glob into one GPX file. Broken files are skipped.
    Gpoly2gpx {
        /// Quote this, like `'responses/*.json'`
        #[structopt()]
        pattern: String,
        /// The GPX file to write
        #[structopt(long)]
        output: String,
        /// How many files to read at once
        #[structopt(long)]
        concurrency: Option<usize>,
        #[structopt(long)]
        json_path: Option<String>,
    },
    /// Converts every response matching a glob into one Shapefile. Broken files are skipped.
    Gpoly2shp {
        #[structopt()]
        pattern: String,
        /// The .shp file to write
        #[structopt(long)]
        output: String,
        #[structopt(long)]
        concurrency: Option<usize>,
        #[structopt(long)]
        geom_path: Option<String>,
        #[structopt(long)]
        time_path: Option<String>,
        #[structopt(long)]
        length_path: Option<String>,
        #[structopt(long)]
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    gpolyutil::logger::setup();
    let config = configuration::load_configuration();

    match Command::from_args() {
        Command::Sample {
            input,
            tag,
            repartition,
            count,
            pattern,
            rng_seed,
        } => {
            let bands = DistanceBands::parse(&repartition)
                .with_context(|| format!("--repartition {}", repartition))?;
            let mut opts = SampleOptions::new(bands);
            opts.tag = tag;
            opts.count = count;
            opts.pattern = pattern;
            let mut rng = match rng_seed {
                Some(seed) => XorShiftRng::seed_from_u64(seed),
                None => XorShiftRng::from_entropy(),
            };
            let written = sampler::run(&input, &opts, &mut rng)
                .with_context(|| format!("sampling {}", input))?;
            for path in written {
                println!("{}", path);
            }
        }
        Command::Gpoly {
            url,
            output_dir,
            host,
        } => {
            let host = host.unwrap_or(config.host);
            let output = gpolyio::fetch_route(&url, &output_dir, &host)
                .with_context(|| format!("fetching {}{}", host, url))?;
            println!("{}", output);
        }
        Command::Gpx {
            input,
            output_dir,
            json_path,
        } => {
            let paths = override_paths(&config, json_path, None, None);
            let output = gpolyio::gpoly2gpx(&input, output_dir.as_deref(), &paths, &config.author)
                .with_context(|| format!("converting {}", input))?;
            println!("{}", output);
        }
        Command::Shp {
            input,
            output,
            geom_path,
            time_path,
            length_path,
            category,
        } => {
            let paths = override_paths(&config, geom_path, time_path, length_path);
            let output = gpolyio::gpoly2shp(&input, output.as_deref(), &paths, category)
                .with_context(|| format!("converting {}", input))?;
            println!("{}", output);
        }
        Command::Gpoly2gpx {
            pattern,
            output,
            concurrency,
            json_path,
        } => {
            let paths = override_paths(&config, json_path, None, None);
            // Partial failures are logged by the batch and don't change the exit code
            gpolyio::gpolyfiles2gpx(
                &pattern,
                &output,
                &paths,
                concurrency.unwrap_or(config.concurrency),
                &config.author,
            )?;
            println!("{}", output);
        }
        Command::Gpoly2shp {
            pattern,
            output,
            concurrency,
            geom_path,
            time_path,
            length_path,
            category,
        } => {
            let paths = override_paths(&config, geom_path, time_path, length_path);
            gpolyio::gpolyfiles2shp(
                &pattern,
                &output,
                &paths,
                concurrency.unwrap_or(config.concurrency),
                category,
            )?;
            println!("{}", output);
        }
    }
    Ok(())
}

fn override_paths(
    config: &Configuration,
    geom: Option<String>,
    time: Option<String>,
    length: Option<String>,
) -> RoutePaths {
    let mut paths = config.paths.clone();
    if let Some(geom) = geom {
        paths.geom = geom;
    }
    if let Some(time) = time {
        paths.time = time;
    }
    if let Some(length) = length {
        paths.length = length;
    }
    paths
}
