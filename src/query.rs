//! Query filters and coordinate validation for state vector requests.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid latitude {0}, must be within -90 to 90")]
    Latitude(f64),
    #[error("invalid longitude {0}, must be within -180 to 180")]
    Longitude(f64),
}

/// Check that a latitude is within the WGS-84 range.
pub fn validate_latitude(v: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&v) {
        return Err(ValidationError::Latitude(v));
    }
    Ok(())
}

/// Check that a longitude is within the WGS-84 range.
pub fn validate_longitude(v: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&v) {
        return Err(ValidationError::Longitude(v));
    }
    Ok(())
}

/// Bounding box for geographic queries, WGS-84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Global bounding box covering the entire world.
    pub const GLOBAL: Self = Self {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Create a bounding box from coordinates.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Validate all four bounds. Nothing is serialized until every bound
    /// has passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_latitude(self.lat_min)?;
        validate_latitude(self.lat_max)?;
        validate_longitude(self.lon_min)?;
        validate_longitude(self.lon_max)?;
        Ok(())
    }
}

/// Filter for a state vector query. All fields are optional; the default
/// filter returns every aircraft currently tracked.
#[derive(Debug, Clone, Default)]
pub struct StateFilter {
    /// Unix timestamp (seconds) to retrieve states for. Current time if unset.
    pub time: Option<u64>,
    /// ICAO 24-bit transponder addresses (hex strings) to filter by.
    pub icao24: Vec<String>,
    /// Geographic area to filter by.
    pub bounding_box: Option<BoundingBox>,
    /// Request extended state vectors carrying the aircraft category.
    pub include_category: bool,
}

impl StateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_icao24(mut self, addr: impl Into<String>) -> Self {
        self.icao24.push(addr.into());
        self
    }

    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    pub fn with_category(mut self) -> Self {
        self.include_category = true;
        self
    }

    /// Serialize the filter into wire query parameters.
    ///
    /// Fails before producing any parameter when a bounding box is out of
    /// range, so a locally-detectable bad request never reaches the network.
    pub fn to_query_params(&self) -> Result<Vec<(&'static str, String)>, ValidationError> {
        if let Some(bbox) = &self.bounding_box {
            bbox.validate()?;
        }

        let mut params = Vec::new();

        if let Some(time) = self.time {
            params.push(("time", time.to_string()));
        }

        for addr in &self.icao24 {
            params.push(("icao24", addr.clone()));
        }

        if let Some(bbox) = &self.bounding_box {
            params.push(("lamin", bbox.lat_min.to_string()));
            params.push(("lamax", bbox.lat_max.to_string()));
            params.push(("lomin", bbox.lon_min.to_string()));
            params.push(("lomax", bbox.lon_max.to_string()));
        }

        if self.include_category {
            params.push(("extended", "1".to_string()));
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_range() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert_eq!(
            validate_latitude(90.1),
            Err(ValidationError::Latitude(90.1))
        );
        assert_eq!(
            validate_latitude(-90.1),
            Err(ValidationError::Latitude(-90.1))
        );
    }

    #[test]
    fn test_longitude_range() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert_eq!(
            validate_longitude(180.5),
            Err(ValidationError::Longitude(180.5))
        );
        assert_eq!(
            validate_longitude(-180.5),
            Err(ValidationError::Longitude(-180.5))
        );
    }

    #[test]
    fn test_empty_filter_has_no_params() {
        let params = StateFilter::new().to_query_params().unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_bounding_box_params_order() {
        // Switzerland
        let filter = StateFilter::new()
            .with_bounding_box(BoundingBox::new(45.8389, 47.8229, 5.9962, 10.5226));
        let params = filter.to_query_params().unwrap();
        assert_eq!(
            params,
            vec![
                ("lamin", "45.8389".to_string()),
                ("lamax", "47.8229".to_string()),
                ("lomin", "5.9962".to_string()),
                ("lomax", "10.5226".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_bounding_box_produces_no_params() {
        let filter = StateFilter::new()
            .with_time(1458564121)
            .with_bounding_box(BoundingBox::new(200.0, 47.8229, 5.9962, 10.5226));
        assert_eq!(
            filter.to_query_params(),
            Err(ValidationError::Latitude(200.0))
        );
    }

    #[test]
    fn test_repeated_icao24_and_flags() {
        let filter = StateFilter::new()
            .with_time(1458564121)
            .with_icao24("3c6444")
            .with_icao24("4b1806")
            .with_category();
        let params = filter.to_query_params().unwrap();
        assert_eq!(
            params,
            vec![
                ("time", "1458564121".to_string()),
                ("icao24", "3c6444".to_string()),
                ("icao24", "4b1806".to_string()),
                ("extended", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_global_bbox_is_valid() {
        assert!(BoundingBox::GLOBAL.validate().is_ok());
    }
}
