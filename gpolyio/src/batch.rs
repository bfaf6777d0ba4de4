use geom::Route;
use gpolyutil::{Error, Result, Timer};

use crate::{load_route, RoutePaths};

/// What happened to every file of a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub total: usize,
    /// Successfully decoded routes with the file each came from, in the order they finished
    /// loading, which usually isn't the input order. Every route is named after its file.
    pub routes: Vec<(String, Route)>,
    /// The file that failed and why
    pub failed: Vec<(String, Error)>,
}

impl BatchOutcome {
    /// A `PartialBatchFailure` describing the failed files, if there are any.
    pub fn failure(&self) -> Option<Error> {
        if self.failed.is_empty() {
            return None;
        }
        Some(Error::PartialBatchFailure {
            total: self.total,
            failed: self.failed.iter().map(|(path, _)| path.clone()).collect(),
        })
    }
}

/// Lists the files matching a glob pattern, sorted.
pub fn expand_pattern(pattern: &str) -> Result<Vec<String>> {
    let paths = glob::glob(pattern).map_err(|err| Error::malformed(pattern, err.to_string()))?;
    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path.display().to_string());
                }
            }
            // Unreadable directories along the way
            Err(err) => warn!("Skipping {}: {}", err.path().display(), err),
        }
    }
    files.sort();
    Ok(files)
}

/// Reads and decodes every file on a pool of `concurrency` workers. A file that can't be read or
/// decoded is logged and skipped; it never stops the rest of the batch.
pub fn load_routes(
    files: Vec<String>,
    paths: &RoutePaths,
    concurrency: usize,
    timer: &mut Timer,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        total: files.len(),
        routes: Vec::new(),
        failed: Vec::new(),
    };

    timer.parallelize_unordered(
        "load routes",
        concurrency,
        files,
        |path| {
            let result = load_route(&path, paths);
            (path, result)
        },
        |timer, (path, result)| {
            debug!("Handling {}", path);
            match result {
                Ok(route) => {
                    let route = route.named(path.clone());
                    outcome.routes.push((path, route));
                }
                Err(err) => {
                    timer.warn(format!("{} generated an error: {}", path, err));
                    outcome.failed.push((path, err));
                }
            }
        },
    );

    outcome
}
