use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polyline, Writer};

use geom::{LonLat, Route};
use gpolyutil::{Error, Result};

/// One LineString feature with its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ShpFeature {
    pub points: Vec<LonLat>,
    pub seconds: i64,
    pub meters: i64,
    pub category: Option<String>,
}

impl ShpFeature {
    /// Fails if the route has fewer than 2 points, since that's not a line. The summary
    /// attributes must already be resolved by the caller.
    pub fn new(
        route: &Route,
        seconds: i64,
        meters: i64,
        category: Option<String>,
    ) -> Result<ShpFeature> {
        if route.points.len() < 2 {
            return Err(Error::malformed(
                route.name.clone().unwrap_or_else(|| "route".to_string()),
                format!("a line needs at least 2 points, not {}", route.points.len()),
            ));
        }
        Ok(ShpFeature {
            points: route.points.clone(),
            seconds,
            meters,
            category,
        })
    }

    fn record(&self) -> Record {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        let mut record = Record::default();
        record.insert(
            "seconds".to_string(),
            FieldValue::Numeric(Some(self.seconds as f64)),
        );
        record.insert(
            "meters".to_string(),
            FieldValue::Numeric(Some(self.meters as f64)),
        );
        record.insert("x_start".to_string(), FieldValue::Numeric(Some(first.x())));
        record.insert("y_start".to_string(), FieldValue::Numeric(Some(first.y())));
        record.insert("x_end".to_string(), FieldValue::Numeric(Some(last.x())));
        record.insert("y_end".to_string(), FieldValue::Numeric(Some(last.y())));
        record.insert(
            "cat".to_string(),
            FieldValue::Character(self.category.clone()),
        );
        record
    }
}

fn field_name(name: &str) -> Result<FieldName> {
    FieldName::try_from(name).map_err(|err| Error::Write {
        path: name.to_string(),
        reason: format!("bad field name: {:?}", err),
    })
}

/// Writes a LineString layer (plus the .shx index and .dbf attribute table beside it) with the
/// schema `{seconds, meters, x_start, y_start, x_end, y_end, cat}`.
pub fn write_shapefile<P: AsRef<Path>>(path: P, features: &[ShpFeature]) -> Result<()> {
    let path = path.as_ref();
    let write_err = |reason: String| Error::Write {
        path: path.display().to_string(),
        reason,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    let table = TableWriterBuilder::new()
        .add_numeric_field(field_name("seconds")?, 10, 0)
        .add_numeric_field(field_name("meters")?, 10, 0)
        .add_numeric_field(field_name("x_start")?, 18, 7)
        .add_numeric_field(field_name("y_start")?, 18, 7)
        .add_numeric_field(field_name("x_end")?, 18, 7)
        .add_numeric_field(field_name("y_end")?, 18, 7)
        .add_character_field(field_name("cat")?, 80);
    let mut writer = Writer::from_path(path, table).map_err(|err| write_err(err.to_string()))?;

    for feature in features {
        let line = Polyline::new(
            feature
                .points
                .iter()
                .map(|pt| Point::new(pt.x(), pt.y()))
                .collect(),
        );
        writer
            .write_shape_and_record(&line, &feature.record())
            .map_err(|err| write_err(err.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_need_two_points() {
        let route = Route::new(vec![LonLat::new(1.0, 2.0)]).named("short.json".to_string());
        match ShpFeature::new(&route, 1, 2, None) {
            Err(Error::MalformedInput { input, .. }) => assert_eq!("short.json", input),
            x => panic!("expected MalformedInput, got {:?}", x),
        }
    }

    #[test]
    fn endpoints_in_the_record() {
        let route = Route::new(vec![
            LonLat::new(1.0, 2.0),
            LonLat::new(3.0, 4.0),
            LonLat::new(5.0, 6.0),
        ]);
        let record = ShpFeature::new(&route, 60, 1000, Some("urban".to_string()))
            .unwrap()
            .record();
        assert_eq!(
            Some(&FieldValue::Numeric(Some(1.0))),
            record.get("x_start")
        );
        assert_eq!(Some(&FieldValue::Numeric(Some(6.0))), record.get("y_end"));
        assert_eq!(
            Some(&FieldValue::Numeric(Some(60.0))),
            record.get("seconds")
        );
        assert_eq!(
            Some(&FieldValue::Character(Some("urban".to_string()))),
            record.get("cat")
        );
    }
}
