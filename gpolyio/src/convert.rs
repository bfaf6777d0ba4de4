use std::path::{Path, PathBuf};

use geom::{LonLat, Route};
use gpolyutil::{basename, prettyprint_usize, split_url, Error, Result, Timer};

use crate::{
    expand_pattern, fetch_json, load_routes, read_json, route_from_json, write_gpx, write_json,
    write_shapefile, Author, BatchOutcome, RoutePaths, ShpFeature,
};

/// `{dir}/{stem of input}.{extension}`, where `dir` defaults to the input's directory.
pub fn output_path(input: &str, output_dir: Option<&str>, extension: &str) -> String {
    let dir = match output_dir {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(input)
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default(),
    };
    dir.join(format!("{}.{}", basename(input), extension))
        .display()
        .to_string()
}

/// Downloads a route from `host + path` and saves the raw response as
/// `{output_dir}/from__{start}__to__{end}.json`, naming the endpoints by their `from` and `to`
/// query parameters. Returns the path written.
pub fn fetch_route(path: &str, output_dir: &str, host: &str) -> Result<String> {
    let abs_url = format!("{}{}", host, path);
    let query = split_url(&abs_url, |key| key == "from" || key == "to")?;
    let mut endpoints = Vec::new();
    for key in ["from", "to"] {
        let raw = query
            .get(key)
            .ok_or_else(|| Error::malformed(&abs_url, format!("no {} parameter", key)))?;
        endpoints.push(LonLat::format_coord(raw, ',', "_")?);
    }

    let doc = match fetch_json(&abs_url) {
        Ok(doc) => doc,
        Err(err) => {
            error!("\n`--> url {}\n`--> response {}", abs_url, err);
            return Err(err);
        }
    };

    let output = Path::new(output_dir)
        .join(format!("from__{}__to__{}.json", endpoints[0], endpoints[1]))
        .display()
        .to_string();
    write_json(&output, &doc)?;
    Ok(output)
}

/// Converts one routing response to a GPX file with a single route. A response without a
/// polyline is fatal. Returns the path written.
pub fn gpoly2gpx(
    input: &str,
    output_dir: Option<&str>,
    paths: &RoutePaths,
    author: &Author,
) -> Result<String> {
    let doc = read_json(input)?;
    let route = match route_from_json(&doc, input, paths) {
        Ok(route) => route,
        Err(err) => {
            error!("Bad input from file {}\n`--> response {}", input, doc);
            return Err(err);
        }
    };
    debug!(
        "{} has {} points over {}",
        input,
        prettyprint_usize(route.points.len()),
        route.length()
    );

    let output = output_path(input, output_dir, "gpx");
    write_gpx(&output, &[route], author)?;
    Ok(output)
}

/// Converts one routing response to a Shapefile with a single feature. The polyline, time and
/// length are all required. Returns the path written.
pub fn gpoly2shp(
    input: &str,
    output: Option<&str>,
    paths: &RoutePaths,
    category: Option<String>,
) -> Result<String> {
    let doc = read_json(input)?;
    let route = match route_from_json(&doc, input, paths) {
        Ok(route) => route,
        Err(err) => {
            error!("Bad input from file {}\n`--> response {}", input, doc);
            return Err(err);
        }
    };
    let missing = |path: &str| {
        error!("Bad input from file {}\n`--> response {}", input, doc);
        Error::MissingField {
            source_name: input.to_string(),
            path: path.to_string(),
        }
    };
    let seconds = route.summary.seconds.ok_or_else(|| missing(&paths.time))?;
    let meters = route.summary.meters.ok_or_else(|| missing(&paths.length))?;

    let output = match output {
        Some(x) => x.to_string(),
        None => output_path(input, None, "shp"),
    };
    write_shapefile(&output, &[ShpFeature::new(&route, seconds, meters, category)?])?;
    Ok(output)
}

fn load_batch(pattern: &str, paths: &RoutePaths, concurrency: usize) -> Result<BatchOutcome> {
    let files = expand_pattern(pattern)?;
    if files.is_empty() {
        warn!("Nothing matches {}", pattern);
    }
    let mut timer = Timer::new(&format!("convert {}", pattern));
    Ok(load_routes(files, paths, concurrency, &mut timer))
}

fn report(outcome: &BatchOutcome, written: usize) {
    info!(
        "Converted {} / {} files",
        prettyprint_usize(written),
        prettyprint_usize(outcome.total)
    );
    if let Some(err) = outcome.failure() {
        warn!("{}", err);
    }
}

/// Converts every file matching a glob pattern into one GPX file, one route per file. Files
/// that fail are logged and skipped. The routes appear in the order they finished loading.
pub fn gpolyfiles2gpx(
    pattern: &str,
    output: &str,
    paths: &RoutePaths,
    concurrency: usize,
    author: &Author,
) -> Result<BatchOutcome> {
    let outcome = load_batch(pattern, paths, concurrency)?;
    let routes: Vec<Route> = outcome
        .routes
        .iter()
        .map(|(_, route)| route.clone())
        .collect();
    write_gpx(output, &routes, author)?;
    report(&outcome, outcome.routes.len());
    Ok(outcome)
}

/// Converts every file matching a glob pattern into one Shapefile, one feature per file. Like
/// `gpolyfiles2gpx`, failures are skipped. Missing time or length are written as 0.
pub fn gpolyfiles2shp(
    pattern: &str,
    output: &str,
    paths: &RoutePaths,
    concurrency: usize,
    category: Option<String>,
) -> Result<BatchOutcome> {
    let mut outcome = load_batch(pattern, paths, concurrency)?;

    let mut features = Vec::new();
    let mut kept = Vec::new();
    for (path, route) in outcome.routes.drain(..) {
        if route.summary.seconds.is_none() || route.summary.meters.is_none() {
            warn!("{} has no time or length; writing 0", path);
        }
        match ShpFeature::new(
            &route,
            route.summary.seconds.unwrap_or(0),
            route.summary.meters.unwrap_or(0),
            category.clone(),
        ) {
            Ok(feature) => {
                features.push(feature);
                kept.push((path, route));
            }
            Err(err) => {
                warn!("{} generated an error: {}", path, err);
                outcome.failed.push((path, err));
            }
        }
    }
    outcome.routes = kept;

    write_shapefile(output, &features)?;
    report(&outcome, features.len());
    Ok(outcome)
}
