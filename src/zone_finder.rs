use crate::zone_ext::ZoneExt;
use geo::Point;
use zonemap_model::Zone;

/// Find the zone of a point.
///
/// Zones can overlap, the first zone in load order wins.
pub struct ZoneFinder<'a> {
    zones: &'a [Zone],
}

impl<'a> ZoneFinder<'a> {
    pub fn new(zones: &'a [Zone]) -> Self {
        ZoneFinder { zones }
    }

    pub fn find_zone(&self, point: &Point<f64>) -> Option<&'a Zone> {
        self.zones.iter().find(|z| z.covers(point))
    }
}
