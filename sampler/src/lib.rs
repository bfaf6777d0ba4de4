//! Picks a sample of request URLs out of a log, stratified by how far apart each request's
//! `from` and `to` points are.

#[macro_use]
extern crate log;

mod classify;
mod rewrite;
mod stratify;

use std::io::Write;
use std::path::Path;

use rand::Rng;

use geom::DistanceBands;
use gpolyutil::{prettyprint_usize, Result, Timer};

pub use crate::classify::{classify_url, endpoints};
pub use crate::rewrite::{complete_url, DEFAULT_KEEP_KEYS, DEFAULT_SUFFIX};
pub use crate::stratify::SampleSet;

pub const DEFAULT_BREAKPOINTS: &str = "50,150,300,600";
pub const DEFAULT_COUNT: usize = 250;
pub const DEFAULT_TAG: &str = "sample";

pub struct SampleOptions {
    /// Embedded in every output filename
    pub tag: String,
    pub bands: DistanceBands,
    /// How many URLs to pick in total
    pub count: usize,
    /// Only consider log lines containing this
    pub pattern: Option<String>,
}

impl SampleOptions {
    pub fn new(bands: DistanceBands) -> SampleOptions {
        SampleOptions {
            tag: DEFAULT_TAG.to_string(),
            bands,
            count: DEFAULT_COUNT,
            pattern: None,
        }
    }
}

/// Reads a log with one URL per line, and writes one file per distance band next to it, named
/// `{input stem}-{tag}-{lo}_{hi}-{n}{input extension}`. Returns the paths written.
pub fn run<R: Rng>(input: &str, opts: &SampleOptions, rng: &mut R) -> Result<Vec<String>> {
    let mut timer = Timer::new(&format!("sample {}", input));

    timer.start("classify");
    let contents = fs_err::read_to_string(input)?;
    let mut set = SampleSet::new(opts.bands.clone());
    let mut num_lines = 0;
    let mut skipped = 0;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(ref pattern) = opts.pattern {
            if !line.contains(pattern.as_str()) {
                continue;
            }
        }
        num_lines += 1;

        let result = complete_url(line, DEFAULT_KEEP_KEYS, DEFAULT_SUFFIX)
            .and_then(|url| set.add(url));
        if let Err(err) = result {
            skipped += 1;
            debug!("Skipping {}: {}", line, err);
        }
    }
    timer.stop("classify");
    if skipped > 0 {
        timer.warn(format!(
            "Skipped {} / {} URLs that couldn't be classified",
            prettyprint_usize(skipped),
            prettyprint_usize(num_lines)
        ));
    }

    let path = Path::new(input);
    let stem = match path.extension() {
        Some(_) => path.with_extension("").display().to_string(),
        None => input.to_string(),
    };
    let extension = path
        .extension()
        .map(|x| format!(".{}", x.to_string_lossy()))
        .unwrap_or_default();

    let mut written = Vec::new();
    for (band, urls) in set.draw(opts.count, rng) {
        let output = format!(
            "{}-{}-{}-{}{}",
            stem,
            opts.tag,
            band,
            urls.len(),
            extension
        );
        let mut file = fs_err::File::create(&output)?;
        file.write_all(urls.join("\n").as_bytes())?;
        written.push(output);
    }
    Ok(written)
}
