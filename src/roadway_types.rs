use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Road classes shown on RTDS tiles, combined with `|`.
///
/// ```
/// use translink::RoadwayTypes;
///
/// let types = RoadwayTypes::HIGHWAY | RoadwayTypes::ARTERIAL;
/// assert_eq!(types.bits(), 5);
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct RoadwayTypes(u8);

impl RoadwayTypes {
    pub const ARTERIAL: RoadwayTypes = RoadwayTypes(1);
    pub const MAJOR_ROAD_NETWORK: RoadwayTypes = RoadwayTypes(2);
    pub const HIGHWAY: RoadwayTypes = RoadwayTypes(4);
    pub const ALL: RoadwayTypes = RoadwayTypes(7);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: RoadwayTypes) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RoadwayTypes {
    type Output = RoadwayTypes;

    fn bitor(self, rhs: RoadwayTypes) -> RoadwayTypes {
        RoadwayTypes(self.0 | rhs.0)
    }
}

impl BitOrAssign for RoadwayTypes {
    fn bitor_assign(&mut self, rhs: RoadwayTypes) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for RoadwayTypes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine() {
        let mut types = RoadwayTypes::MAJOR_ROAD_NETWORK;
        types |= RoadwayTypes::HIGHWAY;
        assert_eq!(types.to_string(), "6");
        assert!(types.contains(RoadwayTypes::HIGHWAY));
        assert!(!types.contains(RoadwayTypes::ARTERIAL));
        assert_eq!(
            RoadwayTypes::ARTERIAL | RoadwayTypes::MAJOR_ROAD_NETWORK | RoadwayTypes::HIGHWAY,
            RoadwayTypes::ALL
        );
    }
}
