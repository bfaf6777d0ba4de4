use std::io::BufWriter;
use std::path::Path;

use gpx::{Gpx, GpxVersion, Metadata, Person, Waypoint};

use geom::Route;
use gpolyutil::{Error, Result};

/// Who gets credit in the GPX metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Builds a GPX document with one `<rte>` per route, in the order given.
pub fn to_gpx(routes: &[Route], author: &Author) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("gpolygpx".to_string()),
        ..Default::default()
    };
    if author.name.is_some() || author.email.is_some() {
        gpx.metadata = Some(Metadata {
            author: Some(Person {
                name: author.name.clone(),
                email: author.email.clone(),
                ..Default::default()
            }),
            ..Default::default()
        });
    }

    for route in routes {
        gpx.routes.push(gpx::Route {
            name: route.name.clone(),
            description: route.summary.describe(),
            points: route
                .points
                .iter()
                .map(|pt| Waypoint::new(geo::Point::from(*pt)))
                .collect(),
            ..Default::default()
        });
    }
    gpx
}

pub fn write_gpx<P: AsRef<Path>>(path: P, routes: &[Route], author: &Author) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    let file = fs_err::File::create(path)?;
    gpx::write(&to_gpx(routes, author), BufWriter::new(file)).map_err(|err| Error::Write {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}
