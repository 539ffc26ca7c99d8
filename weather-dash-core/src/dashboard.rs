use chrono::{DateTime, Utc};

use crate::{
    error::UpstreamError,
    model::{Coordinates, Location, WeatherBundle},
    source::WeatherSource,
};

/// Client-side view state: the active location and the last bundle fetched
/// for it.
///
/// Refreshing takes `&mut self`, so at most one fetch can be in flight per
/// dashboard.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    location: Location,
    loading: bool,
    data: Option<WeatherBundle>,
    fetched_at: Option<DateTime<Utc>>,
}

impl Dashboard {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn data(&self) -> Option<&WeatherBundle> {
        self.data.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Fetch for `coords` (or the current location when `None`) and replace
    /// the stored bundle. On failure the previous bundle is kept.
    pub async fn refresh(
        &mut self,
        source: &dyn WeatherSource,
        coords: Option<Coordinates>,
    ) -> Result<&WeatherBundle, UpstreamError> {
        if let Some(coords) = coords {
            self.location.coordinates = coords;
        }

        self.loading = true;
        let result = source.fetch_weather(self.location.coordinates).await;
        self.loading = false;

        match result {
            Ok(bundle) => {
                self.fetched_at = Some(Utc::now());
                Ok(self.data.insert(bundle))
            }
            Err(err) => {
                tracing::warn!(
                    location = %self.location.name,
                    error = %err,
                    "failed to refresh weather"
                );
                Err(err)
            }
        }
    }
}
