use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::json;

use gpolyio::{Author, RoutePaths};
use gpolyutil::Error;

const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

fn write(path: &Path, contents: String) {
    std::fs::write(path, contents).unwrap();
}

fn response(polyline: &str, seconds: i64, meters: i64) -> String {
    json!({
        "routes": {"route": {
            "polyline-definition": {"polyline": polyline},
            "summary": {"time": seconds, "length": meters},
        }},
    })
    .to_string()
}

fn read_gpx(path: &str) -> gpx::Gpx {
    gpx::read(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn batch_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    for idx in 0..3 {
        write(
            &dir.path().join(format!("good{}.json", idx)),
            response(REFERENCE, 100 * idx, 1000 * idx),
        );
    }
    // No polyline field
    write(
        &dir.path().join("missing.json"),
        json!({"routes": {"route": {}}}).to_string(),
    );
    // Not even JSON
    write(&dir.path().join("corrupt.json"), "{\"routes\": ".to_string());
    // Doesn't match the pattern
    write(&dir.path().join("notes.txt"), "ignore me".to_string());

    let pattern = dir.path().join("*.json").display().to_string();
    let output = dir.path().join("out/all.gpx").display().to_string();
    let outcome =
        gpolyio::gpolyfiles2gpx(&pattern, &output, &RoutePaths::default(), 4, &Author::default())
            .unwrap();

    assert_eq!(5, outcome.total);
    assert_eq!(3, outcome.routes.len());
    assert_eq!(2, outcome.failed.len());
    let mut failed: Vec<String> = outcome
        .failed
        .iter()
        .map(|(path, _)| gpolyutil::basename(path))
        .collect();
    failed.sort();
    assert_eq!(vec!["corrupt", "missing"], failed);
    assert!(matches!(
        outcome.failure(),
        Some(Error::PartialBatchFailure { total: 5, .. })
    ));

    let gpx = read_gpx(&output);
    assert_eq!(3, gpx.routes.len());
    let mut names: Vec<String> = gpx
        .routes
        .iter()
        .map(|r| gpolyutil::basename(r.name.clone().unwrap()))
        .collect();
    names.sort();
    assert_eq!(vec!["good0", "good1", "good2"], names);
    for rte in &gpx.routes {
        let lats: Vec<f64> = rte.points.iter().map(|wpt| wpt.point().y()).collect();
        assert_eq!(3, lats.len());
        assert!((lats[0] - 38.5).abs() < 1e-6);
        assert!((lats[1] - 40.7).abs() < 1e-6);
        assert!((lats[2] - 43.252).abs() < 1e-6);
    }
}

#[test]
fn batch_with_no_failures() {
    let dir = tempfile::tempdir().unwrap();
    for idx in 0..10 {
        write(
            &dir.path().join(format!("{}.json", idx)),
            response(REFERENCE, 1, 1),
        );
    }
    let pattern = dir.path().join("*.json").display().to_string();
    let output = dir.path().join("all.gpx").display().to_string();
    let outcome =
        gpolyio::gpolyfiles2gpx(&pattern, &output, &RoutePaths::default(), 3, &Author::default())
            .unwrap();
    assert_eq!(10, outcome.routes.len());
    assert!(outcome.failure().is_none());
    assert_eq!(10, read_gpx(&output).routes.len());
}

#[test]
fn bad_pattern() {
    assert!(matches!(
        gpolyio::expand_pattern("[unclosed"),
        Err(Error::MalformedInput { .. })
    ));
}

#[test]
fn single_gpx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trip.json");
    write(&input, response(REFERENCE, 735, 10234));

    let out_dir = dir.path().join("gpx");
    let output = gpolyio::gpoly2gpx(
        input.to_str().unwrap(),
        Some(out_dir.to_str().unwrap()),
        &RoutePaths::default(),
        &Author {
            name: Some("Route Tester".to_string()),
            email: Some("tester@example.com".to_string()),
        },
    )
    .unwrap();
    assert_eq!(out_dir.join("trip.gpx").display().to_string(), output);

    let gpx = read_gpx(&output);
    assert_eq!(1, gpx.routes.len());
    let pts: Vec<(f64, f64)> = gpx.routes[0]
        .points
        .iter()
        .map(|wpt| (wpt.point().x(), wpt.point().y()))
        .collect();
    let expected = [(-120.2, 38.5), (-120.95, 40.7), (-126.453, 43.252)];
    for (pt, expected) in pts.iter().zip(expected.iter()) {
        assert!((pt.0 - expected.0).abs() < 1e-6 && (pt.1 - expected.1).abs() < 1e-6);
    }
}

#[test]
fn single_gpx_missing_polyline_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trip.json");
    write(&input, json!({"routes": []}).to_string());
    assert!(matches!(
        gpolyio::gpoly2gpx(
            input.to_str().unwrap(),
            None,
            &RoutePaths::default(),
            &Author::default()
        ),
        Err(Error::MissingField { .. })
    ));
    assert!(!dir.path().join("trip.gpx").exists());
}

#[test]
fn single_shapefile() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trip.json");
    write(&input, response(REFERENCE, 735, 10234));

    let output = gpolyio::gpoly2shp(
        input.to_str().unwrap(),
        None,
        &RoutePaths::default(),
        Some("long".to_string()),
    )
    .unwrap();
    assert_eq!(dir.path().join("trip.shp").display().to_string(), output);

    let features = shapefile::read_as::<_, shapefile::Polyline, shapefile::dbase::Record>(&output)
        .unwrap();
    assert_eq!(1, features.len());
    let (line, record) = &features[0];
    let pts = &line.parts()[0];
    assert_eq!(3, pts.len());
    assert!((pts[0].x - -120.2).abs() < 1e-6);
    assert!((pts[2].y - 43.252).abs() < 1e-6);
    assert_eq!(
        Some(&shapefile::dbase::FieldValue::Numeric(Some(735.0))),
        record.get("seconds")
    );
    assert_eq!(
        Some(&shapefile::dbase::FieldValue::Numeric(Some(10234.0))),
        record.get("meters")
    );
}

#[test]
fn single_shapefile_needs_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trip.json");
    write(
        &input,
        json!({"routes": {"route": {"polyline-definition": {"polyline": REFERENCE}}}})
            .to_string(),
    );
    match gpolyio::gpoly2shp(input.to_str().unwrap(), None, &RoutePaths::default(), None) {
        Err(Error::MissingField { path, .. }) => {
            assert_eq!(gpolyio::DEFAULT_TIME_PATH, path);
        }
        x => panic!("expected MissingField, got {:?}", x),
    }
}

#[test]
fn batch_shapefile() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("a.json"), response(REFERENCE, 10, 20));
    write(&dir.path().join("b.json"), response(REFERENCE, 30, 40));
    // A single point isn't a line
    write(&dir.path().join("c.json"), response("_p~iF~ps|U", 1, 1));
    write(&dir.path().join("d.json"), "[]".to_string());

    let pattern = dir.path().join("*.json").display().to_string();
    let output = dir.path().join("all.shp").display().to_string();
    let outcome =
        gpolyio::gpolyfiles2shp(&pattern, &output, &RoutePaths::default(), 2, None).unwrap();
    assert_eq!(4, outcome.total);
    assert_eq!(2, outcome.routes.len());
    assert_eq!(2, outcome.failed.len());

    let features = shapefile::read_as::<_, shapefile::Polyline, shapefile::dbase::Record>(&output)
        .unwrap();
    assert_eq!(2, features.len());
}

fn named_response(polyline: &str, label: &str) -> String {
    json!({
        "routes": {"route": {
            "label": label,
            "polyline-definition": {"polyline": polyline},
            "summary": {"time": 1, "length": 1},
        }},
    })
    .to_string()
}

fn labeled_paths() -> RoutePaths {
    RoutePaths {
        name: Some("routes/route/label".to_string()),
        ..Default::default()
    }
}

#[test]
fn batch_routes_are_named_after_their_file() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("a.json"), named_response(REFERENCE, "same label"));
    write(&dir.path().join("b.json"), named_response(REFERENCE, "same label"));

    let pattern = dir.path().join("*.json").display().to_string();
    let output = dir.path().join("all.gpx").display().to_string();
    let outcome =
        gpolyio::gpolyfiles2gpx(&pattern, &output, &labeled_paths(), 2, &Author::default())
            .unwrap();

    let mut sources: Vec<String> = outcome
        .routes
        .iter()
        .map(|(path, route)| {
            assert_eq!(Some(path.clone()), route.name);
            gpolyutil::basename(path)
        })
        .collect();
    sources.sort();
    assert_eq!(vec!["a", "b"], sources);

    let mut names: Vec<String> = read_gpx(&output)
        .routes
        .iter()
        .map(|r| gpolyutil::basename(r.name.clone().unwrap()))
        .collect();
    names.sort();
    assert_eq!(vec!["a", "b"], names);
}

#[test]
fn batch_shapefile_reports_failed_files() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("good.json"), named_response(REFERENCE, "to work"));
    // A single point isn't a line, and the response names it something unrelated to the file
    write(
        &dir.path().join("short.json"),
        named_response("_p~iF~ps|U", "to the gym"),
    );

    let pattern = dir.path().join("*.json").display().to_string();
    let output = dir.path().join("all.shp").display().to_string();
    let outcome =
        gpolyio::gpolyfiles2shp(&pattern, &output, &labeled_paths(), 2, None).unwrap();

    assert_eq!(1, outcome.routes.len());
    assert_eq!("good", gpolyutil::basename(&outcome.routes[0].0));
    assert_eq!(1, outcome.failed.len());
    assert_eq!(
        dir.path().join("short.json").display().to_string(),
        outcome.failed[0].0
    );
    match outcome.failure() {
        Some(Error::PartialBatchFailure { total, failed }) => {
            assert_eq!(2, total);
            assert_eq!(vec![dir.path().join("short.json").display().to_string()], failed);
        }
        x => panic!("expected PartialBatchFailure, got {:?}", x),
    }
}
