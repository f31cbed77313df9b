//! Conversion of British National Grid coordinates (OSGB36, EPSG:27700)
//! to WGS84 longitude/latitude (EPSG:4326).
//!
//! The grid is an inverse transverse Mercator on the Airy 1830 ellipsoid,
//! followed by a 7 parameters Helmert datum shift to WGS84, with the parameters
//! of the proj definition
//! `+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000
//! +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489`.
//!
//! The formulas are the ones of the Ordnance Survey guide
//! "A guide to coordinate systems in Great Britain".

use geo::Point;

/// A conversion from projected coordinates to WGS84
pub trait Reproject: Sync {
    /// returns a point with x = longitude and y = latitude, in degrees
    fn reproject(&self, easting: f64, northing: f64) -> Point<f64>;
}

struct Ellipsoid {
    a: f64,
    b: f64,
}

const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6_377_563.396,
    b: 6_356_256.909,
};

const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.0,
    b: 6_378_137.0 * (1.0 - 1.0 / 298.257_223_563),
};

impl Ellipsoid {
    fn e2(&self) -> f64 {
        1.0 - (self.b * self.b) / (self.a * self.a)
    }

    /// geodetic coordinates (radians, on the ellipsoid surface) to earth centered cartesian
    fn to_cartesian(&self, lat: f64, lon: f64) -> [f64; 3] {
        let e2 = self.e2();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let nu = self.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        [
            nu * cos_lat * lon.cos(),
            nu * cos_lat * lon.sin(),
            (1.0 - e2) * nu * sin_lat,
        ]
    }

    /// earth centered cartesian to geodetic (radians), the height is dropped
    fn to_geodetic(&self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let e2 = self.e2();
        let p = x.hypot(y);
        let mut lat = z.atan2(p * (1.0 - e2));
        for _ in 0..MAX_ITERATIONS {
            let sin_lat = lat.sin();
            let nu = self.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            let next = (z + e2 * nu * sin_lat).atan2(p);
            let converged = (next - lat).abs() < 1e-12;
            lat = next;
            if converged {
                break;
            }
        }
        (lat, y.atan2(x))
    }
}

const MAX_ITERATIONS: usize = 50;

/// Transverse Mercator projection parameters
struct TransverseMercator {
    ellipsoid: Ellipsoid,
    scale_factor: f64,
    lat_origin: f64,
    lon_origin: f64,
    false_easting: f64,
    false_northing: f64,
}

impl TransverseMercator {
    fn n(&self) -> f64 {
        let Ellipsoid { a, b } = self.ellipsoid;
        (a - b) / (a + b)
    }

    /// developed meridional arc from the origin latitude to `lat`
    fn meridional_arc(&self, lat: f64) -> f64 {
        let n = self.n();
        let (n2, n3) = (n * n, n * n * n);
        let d = lat - self.lat_origin;
        let s = lat + self.lat_origin;
        self.ellipsoid.b
            * self.scale_factor
            * ((1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3) * d
                - (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * d.sin() * s.cos()
                + (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * d).sin() * (2.0 * s).cos()
                - 35.0 / 24.0 * n3 * (3.0 * d).sin() * (3.0 * s).cos())
    }

    /// grid coordinates (metres) to geodetic coordinates (radians) on the projection ellipsoid
    fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let Ellipsoid { a, .. } = self.ellipsoid;
        let f0 = self.scale_factor;
        let e2 = self.ellipsoid.e2();

        let mut lat = self.lat_origin;
        let mut m = 0.0;
        for _ in 0..MAX_ITERATIONS {
            lat += (northing - self.false_northing - m) / (a * f0);
            m = self.meridional_arc(lat);
            // 0.01mm
            if (northing - self.false_northing - m).abs() < 1e-5 {
                break;
            }
        }

        let (sin_lat, cos_lat) = lat.sin_cos();
        let tan_lat = lat.tan();
        let (t2, t4, t6) = (tan_lat.powi(2), tan_lat.powi(4), tan_lat.powi(6));
        let nu = a * f0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let rho = a * f0 * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);
        let eta2 = nu / rho - 1.0;

        let vii = tan_lat / (2.0 * rho * nu);
        let viii = tan_lat / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * t2 + eta2 - 9.0 * t2 * eta2);
        let ix = tan_lat / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * t2 + 45.0 * t4);
        let x = 1.0 / (cos_lat * nu);
        let xi = 1.0 / (cos_lat * 6.0 * nu.powi(3)) * (nu / rho + 2.0 * t2);
        let xii = 1.0 / (cos_lat * 120.0 * nu.powi(5)) * (5.0 + 28.0 * t2 + 24.0 * t4);
        let xiia = 1.0 / (cos_lat * 5040.0 * nu.powi(7))
            * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

        let de = easting - self.false_easting;
        let lat = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
        let lon = self.lon_origin + x * de - xi * de.powi(3) + xii * de.powi(5)
            - xiia * de.powi(7);
        (lat, lon)
    }
}

/// 7 parameters Helmert transformation, position vector convention
struct Helmert {
    /// translations in metres
    t: [f64; 3],
    /// rotations in arc seconds
    r: [f64; 3],
    /// scale in parts per million
    s: f64,
}

impl Helmert {
    fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let arcsec = std::f64::consts::PI / (180.0 * 3600.0);
        let [rx, ry, rz] = [self.r[0] * arcsec, self.r[1] * arcsec, self.r[2] * arcsec];
        let m = 1.0 + self.s * 1e-6;
        [
            self.t[0] + m * (x - rz * y + ry * z),
            self.t[1] + m * (rz * x + y - rx * z),
            self.t[2] + m * (-ry * x + rx * y + z),
        ]
    }
}

/// Ordnance Survey National Grid to WGS84
pub struct BritishNationalGrid {
    projection: TransverseMercator,
    to_wgs84: Helmert,
}

impl Default for BritishNationalGrid {
    fn default() -> Self {
        BritishNationalGrid {
            projection: TransverseMercator {
                ellipsoid: AIRY_1830,
                scale_factor: 0.999_601_271_7,
                lat_origin: 49f64.to_radians(),
                lon_origin: (-2f64).to_radians(),
                false_easting: 400_000.0,
                false_northing: -100_000.0,
            },
            to_wgs84: Helmert {
                t: [446.448, -125.157, 542.06],
                r: [0.15, 0.247, 0.842],
                s: -20.489,
            },
        }
    }
}

impl BritishNationalGrid {
    /// OSGB36 longitude/latitude in degrees, before the datum shift
    pub fn to_osgb36(&self, easting: f64, northing: f64) -> Point<f64> {
        let (lat, lon) = self.projection.inverse(easting, northing);
        Point::new(lon.to_degrees(), lat.to_degrees())
    }
}

impl Reproject for BritishNationalGrid {
    fn reproject(&self, easting: f64, northing: f64) -> Point<f64> {
        let (lat, lon) = self.projection.inverse(easting, northing);
        let cartesian = self.projection.ellipsoid.to_cartesian(lat, lon);
        let (lat, lon) = WGS84.to_geodetic(self.to_wgs84.apply(cartesian));
        Point::new(lon.to_degrees(), lat.to_degrees())
    }
}
