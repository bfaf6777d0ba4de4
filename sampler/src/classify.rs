use geom::{DistanceBands, LonLat};
use gpolyutil::{split_url, Error, Result};

/// The `from` and `to` query parameters of a URL, each given as `lon,lat`.
pub fn endpoints(url: &str) -> Result<(LonLat, LonLat)> {
    let split = split_url(url, |key| key == "from" || key == "to")?;
    let mut pts = Vec::new();
    for key in ["from", "to"] {
        let raw = split
            .get(key)
            .ok_or_else(|| Error::malformed(url, format!("no {} parameter", key)))?;
        pts.push(LonLat::parse_xy(raw, ',')?);
    }
    Ok((pts[0], pts[1]))
}

/// Returns the index of the band containing the great-circle distance between a URL's
/// endpoints.
pub fn classify_url(url: &str, bands: &DistanceBands) -> Result<usize> {
    let (from, to) = endpoints(url)?;
    Ok(bands.classify_idx(from.gps_dist(to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Paris
    const ORIGIN: (f64, f64) = (2.3522, 48.8566);

    // A point roughly `km` north of ORIGIN
    fn url_at(km: f64) -> String {
        let lat = ORIGIN.1 + km / 111.195;
        format!(
            "/1.0/route?from={},{}&to={},{}&wt=json",
            ORIGIN.0, ORIGIN.1, ORIGIN.0, lat
        )
    }

    #[test]
    fn scenario() {
        let bands = DistanceBands::parse("50,150,300,600").unwrap();
        assert_eq!(0, classify_url(&url_at(10.0), &bands).unwrap());
        assert_eq!(1, classify_url(&url_at(80.0), &bands).unwrap());
        assert_eq!(4, classify_url(&url_at(1000.0), &bands).unwrap());
        assert_eq!(2, classify_url(&url_at(200.0), &bands).unwrap());
        assert_eq!(3, classify_url(&url_at(450.0), &bands).unwrap());
    }

    #[test]
    fn same_point() {
        let bands = DistanceBands::parse("50").unwrap();
        assert_eq!(0, classify_url("/r?from=1,2&to=1,2", &bands).unwrap());
    }

    #[test]
    fn antipodal_endpoints() {
        let bands = DistanceBands::parse("50,150,300,600").unwrap();
        assert_eq!(
            4,
            classify_url(
                "/r?from=0.00026,-44.99991&to=-179.99974,44.99991",
                &bands
            )
            .unwrap()
        );
        assert_eq!(4, classify_url("/r?from=0,90&to=0,-90", &bands).unwrap());
    }

    #[test]
    fn out_of_range_coordinates() {
        let bands = DistanceBands::parse("50,150,300,600").unwrap();
        for url in ["/r?from=0,95&to=180,85", "/r?from=181,0&to=0,0"] {
            assert!(
                matches!(classify_url(url, &bands), Err(Error::MalformedInput { .. })),
                "{} should be malformed",
                url
            );
        }
    }

    #[test]
    fn malformed() {
        let bands = DistanceBands::parse("50,150").unwrap();
        for url in [
            "/r?from=1,2",
            "/r?to=1,2",
            "/r?from=1&to=1,2",
            "/r?from=a,b&to=1,2",
            "/r",
            "http://[::1/r?from=1,2&to=3,4",
        ] {
            assert!(
                matches!(classify_url(url, &bands), Err(Error::MalformedInput { .. })),
                "{} should be malformed",
                url
            );
        }
    }
}
