use std::fs;
use std::path::Path;

use serde::Deserialize;

use gpolyio::{Author, RoutePaths, DEFAULT_CONCURRENCY};

pub const CONFIG_PATH: &str = "gpolygpx.toml";
pub const DEFAULT_HOST: &str = "http://routemm.mappyrecette.net";

/// Defaults for the command-line flags. Explicit flags always win.
#[derive(Debug, PartialEq)]
pub struct Configuration {
    pub host: String,
    pub author: Author,
    pub concurrency: usize,
    pub paths: RoutePaths,
}

#[derive(Deserialize)]
struct RawConfiguration {
    pub host: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub concurrency: Option<usize>,
    pub geom_path: Option<String>,
    pub time_path: Option<String>,
    pub length_path: Option<String>,
    pub name_path: Option<String>,
}

/// Reads `gpolygpx.toml` from the current directory, if it exists.
pub fn load_configuration() -> Configuration {
    load_from(CONFIG_PATH)
}

fn load_from<P: AsRef<Path>>(path: P) -> Configuration {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => match toml::from_str::<RawConfiguration>(&text) {
            Ok(config) => fill_in_defaults(config),
            Err(err) => {
                warn!("Ignoring {}: {}", path.display(), err);
                default_configuration()
            }
        },
        Err(_) => default_configuration(),
    }
}

fn default_configuration() -> Configuration {
    Configuration {
        host: DEFAULT_HOST.to_string(),
        author: Author::default(),
        concurrency: DEFAULT_CONCURRENCY,
        paths: RoutePaths::default(),
    }
}

fn fill_in_defaults(config: RawConfiguration) -> Configuration {
    let mut result = default_configuration();

    result.host = config.host.unwrap_or(result.host);
    result.author = Author {
        name: config.author_name,
        email: config.author_email,
    };
    result.concurrency = config.concurrency.unwrap_or(result.concurrency);
    result.paths.geom = config.geom_path.unwrap_or(result.paths.geom);
    result.paths.time = config.time_path.unwrap_or(result.paths.time);
    result.paths.length = config.length_path.unwrap_or(result.paths.length);
    result.paths.name = config.name_path;

    result
}
