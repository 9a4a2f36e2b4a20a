//! Core data types for OpenSky state vectors.

/// Origin of a state vector's position report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PositionSource {
    AdsB = 0,
    Asterix = 1,
    Mlat = 2,
    Flarm = 3,
    Unknown = 255,
}

impl From<u8> for PositionSource {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::AdsB,
            1 => Self::Asterix,
            2 => Self::Mlat,
            3 => Self::Flarm,
            _ => Self::Unknown,
        }
    }
}

/// ADS-B emitter category of the aircraft.
///
/// Only reported when the query requests extended state vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AircraftCategory {
    NoInformation = 0,
    NoCategoryInformation = 1,
    Light = 2,
    Small = 3,
    Large = 4,
    HighVortexLarge = 5,
    Heavy = 6,
    HighPerformance = 7,
    Rotorcraft = 8,
    Glider = 9,
    LighterThanAir = 10,
    Parachutist = 11,
    Ultralight = 12,
    Reserved = 13,
    UnmannedAerialVehicle = 14,
    SpaceVehicle = 15,
    EmergencyVehicle = 16,
    ServiceVehicle = 17,
    PointObstacle = 18,
    ClusterObstacle = 19,
    LineObstacle = 20,
}

impl From<u8> for AircraftCategory {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::NoInformation,
            1 => Self::NoCategoryInformation,
            2 => Self::Light,
            3 => Self::Small,
            4 => Self::Large,
            5 => Self::HighVortexLarge,
            6 => Self::Heavy,
            7 => Self::HighPerformance,
            8 => Self::Rotorcraft,
            9 => Self::Glider,
            10 => Self::LighterThanAir,
            11 => Self::Parachutist,
            12 => Self::Ultralight,
            14 => Self::UnmannedAerialVehicle,
            15 => Self::SpaceVehicle,
            16 => Self::EmergencyVehicle,
            17 => Self::ServiceVehicle,
            18 => Self::PointObstacle,
            19 => Self::ClusterObstacle,
            20 => Self::LineObstacle,
            _ => Self::Reserved,
        }
    }
}

/// One aircraft's reported position, velocity and status at a point in time.
///
/// Field nullability mirrors the feed's own "unknown" semantics: `None`
/// means the feed reported no value, which is distinct from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// ICAO 24-bit transponder address, lowercase hex.
    pub icao24: String,
    /// Callsign (8 chars), if one has been received.
    pub callsign: Option<String>,
    /// Country name inferred from the ICAO 24-bit address.
    pub origin_country: String,
    /// Unix timestamp (seconds) of the last position report.
    pub time_position: Option<u64>,
    /// Unix timestamp (seconds) of the last message of any kind.
    pub last_contact: u64,
    /// WGS-84 longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// WGS-84 latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,
    /// Whether the position came from a surface position report.
    pub on_ground: bool,
    /// Velocity over ground in m/s.
    pub velocity: Option<f64>,
    /// True track in decimal degrees clockwise from north.
    pub true_track: Option<f64>,
    /// Vertical rate in m/s, positive when climbing.
    pub vertical_rate: Option<f64>,
    /// IDs of the receivers that contributed to this state vector.
    /// `None` unless the request filtered by sensor.
    pub sensors: Option<Vec<u32>>,
    /// Geometric altitude in meters.
    pub geo_altitude: Option<f64>,
    /// Transponder code (squawk).
    pub squawk: Option<String>,
    /// Whether the flight status indicates the special purpose indicator.
    pub spi: bool,
    /// Origin of this state's position report.
    pub position_source: PositionSource,
    /// Emitter category, present only in extended responses.
    pub category: Option<AircraftCategory>,
}
