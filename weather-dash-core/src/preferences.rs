//! User display preferences, persisted through a swappable key-value store.

use std::{collections::BTreeMap, fs, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::PreferenceError,
    units::{TemperatureUnit, WindSpeedUnit},
};

pub const WIND_UNIT_KEY: &str = "weather-settings-wind-unit";
pub const TEMPERATURE_UNIT_KEY: &str = "weather-settings-temperature-unit";

/// String-keyed persistence backing the preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Must be durable (or at least visible to later `get` calls) when it
    /// returns.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat TOML table on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|err| PreferenceError::Parse(path.clone(), err))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(PreferenceError::Io(path, err)),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| PreferenceError::Io(parent.to_path_buf(), err))?;
        }

        let contents = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents).map_err(|err| PreferenceError::Io(self.path.clone(), err))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let previous = self.values.insert(key.to_string(), value.to_string());

        if let Err(err) = self.persist() {
            // Keep memory in line with what is on disk.
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(err);
        }

        tracing::debug!(key, value, path = %self.path.display(), "preference saved");
        Ok(())
    }
}

/// The two unit choices, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    pub wind_speed_unit: WindSpeedUnit,
    pub temperature_unit: TemperatureUnit,
}

/// Typed access to the unit preferences stored in `S`.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn wind_speed_unit(&self) -> Result<WindSpeedUnit, PreferenceError> {
        self.read(WIND_UNIT_KEY)
    }

    pub fn set_wind_speed_unit(&mut self, unit: WindSpeedUnit) -> Result<(), PreferenceError> {
        self.store.set(WIND_UNIT_KEY, unit.as_str())
    }

    pub fn temperature_unit(&self) -> Result<TemperatureUnit, PreferenceError> {
        self.read(TEMPERATURE_UNIT_KEY)
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) -> Result<(), PreferenceError> {
        self.store.set(TEMPERATURE_UNIT_KEY, unit.as_str())
    }

    pub fn snapshot(&self) -> Result<UserPreferences, PreferenceError> {
        Ok(UserPreferences {
            wind_speed_unit: self.wind_speed_unit()?,
            temperature_unit: self.temperature_unit()?,
        })
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read<T>(&self, key: &str) -> Result<T, PreferenceError>
    where
        T: FromStr<Err = PreferenceError> + Default,
    {
        match self.store.get(key)? {
            Some(raw) => raw.parse(),
            None => Ok(T::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_preferences_use_defaults() {
        let prefs = Preferences::new(MemoryStore::default());

        let snapshot = prefs.snapshot().unwrap();
        assert_eq!(snapshot.wind_speed_unit, WindSpeedUnit::KilometresPerHour);
        assert_eq!(snapshot.temperature_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn writes_are_visible_to_later_reads() {
        let mut prefs = Preferences::new(MemoryStore::default());

        prefs.set_wind_speed_unit(WindSpeedUnit::Beaufort).unwrap();
        assert_eq!(prefs.wind_speed_unit().unwrap(), WindSpeedUnit::Beaufort);
        // The other field is independent.
        assert_eq!(prefs.temperature_unit().unwrap(), TemperatureUnit::Celsius);

        prefs.set_temperature_unit(TemperatureUnit::Kelvin).unwrap();
        assert_eq!(prefs.temperature_unit().unwrap(), TemperatureUnit::Kelvin);
    }

    #[test]
    fn stored_values_use_the_wire_names() {
        let mut prefs = Preferences::new(MemoryStore::default());
        prefs.set_wind_speed_unit(WindSpeedUnit::MetresPerSecond).unwrap();
        prefs.set_temperature_unit(TemperatureUnit::Fahrenheit).unwrap();

        let store = prefs.into_inner();
        assert_eq!(store.get(WIND_UNIT_KEY).unwrap().as_deref(), Some("m/s"));
        assert_eq!(
            store.get(TEMPERATURE_UNIT_KEY).unwrap().as_deref(),
            Some("fahrenheit")
        );
    }

    #[test]
    fn corrupt_stored_value_is_an_error() {
        let mut store = MemoryStore::default();
        store.set(WIND_UNIT_KEY, "warp").unwrap();

        let prefs = Preferences::new(store);
        let err = prefs.wind_speed_unit().unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidValue { .. }));
        assert!(prefs.snapshot().is_err());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut prefs = Preferences::new(FileStore::open(&path).unwrap());
        prefs.set_wind_speed_unit(WindSpeedUnit::Knots).unwrap();
        prefs.set_temperature_unit(TemperatureUnit::Kelvin).unwrap();

        let reopened = Preferences::new(FileStore::open(&path).unwrap());
        let snapshot = reopened.snapshot().unwrap();
        assert_eq!(snapshot.wind_speed_unit, WindSpeedUnit::Knots);
        assert_eq!(snapshot.temperature_unit, TemperatureUnit::Kelvin);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("weather-settings-wind-unit"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.toml")).unwrap();

        assert_eq!(store.get(WIND_UNIT_KEY).unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_rejects_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, PreferenceError::Parse(..)));
    }
}
