use crate::adapters::{SequentialIdGenerator, UuidIdGenerator};
use crate::config::seed::{sample_fleet, FleetSeed};
use crate::core::store::FleetStore;
use crate::domain::model::{Booking, Route, Van};
use crate::domain::ports::IdGenerator;
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

pub const ID_STRATEGIES: [&str; 2] = ["uuid", "sequential"];
pub const SEED_MODES: [&str; 3] = ["sample", "empty", "inline"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub fleet: FleetSection,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Inline seed entities, used when `fleet.seed = "inline"`.
    #[serde(default)]
    pub vans: Vec<Van>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSection {
    pub name: Option<String>,
    pub id_strategy: Option<String>,
    pub seed: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl FleetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FleetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 有指定檔案就讀檔，否則使用預設值 (範例車隊、uuid)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FleetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLEET_NAME})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FleetError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn fleet_name(&self) -> &str {
        self.fleet.name.as_deref().unwrap_or("Van Fleet")
    }

    pub fn id_strategy(&self) -> &str {
        self.fleet.id_strategy.as_deref().unwrap_or("uuid")
    }

    /// 未指定時: 有 inline 資料就用 inline，否則用範例車隊
    pub fn seed_mode(&self) -> &str {
        match self.fleet.seed.as_deref() {
            Some(mode) => mode,
            None if !self.inline_seed_is_empty() => "inline",
            None => "sample",
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn log_format(&self) -> &str {
        self.logging.format.as_deref().unwrap_or("compact")
    }

    fn inline_seed_is_empty(&self) -> bool {
        self.vans.is_empty() && self.routes.is_empty() && self.bookings.is_empty()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_one_of("fleet.id_strategy", self.id_strategy(), &ID_STRATEGIES)?;
        validate_one_of("fleet.seed", self.seed_mode(), &SEED_MODES)?;
        validate_one_of("logging.format", self.log_format(), &LOG_FORMATS)?;
        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        if self.seed_mode() != "inline" {
            if !self.inline_seed_is_empty() {
                tracing::warn!(
                    "Inline [[vans]]/[[routes]]/[[bookings]] are ignored unless fleet.seed = \"inline\""
                );
            }
            return Ok(());
        }

        check_unique_ids("vans", self.vans.iter().map(|van| &van.id))?;
        check_unique_ids("routes", self.routes.iter().map(|route| &route.id))?;
        check_unique_ids("bookings", self.bookings.iter().map(|booking| &booking.id))?;
        Ok(())
    }

    pub fn seed(&self) -> FleetSeed {
        match self.seed_mode() {
            "inline" => FleetSeed {
                vans: self.vans.clone(),
                routes: self.routes.clone(),
                bookings: self.bookings.clone(),
            },
            "empty" => FleetSeed::default(),
            _ => sample_fleet(),
        }
    }

    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.id_strategy() {
            "sequential" => Box::new(SequentialIdGenerator::new()),
            _ => Box::new(UuidIdGenerator),
        }
    }

    /// 依設定建立 store；先驗證再建立
    pub fn build_store(&self) -> Result<FleetStore> {
        self.validate_config()?;
        let seed = self.seed();
        tracing::info!(
            fleet = self.fleet_name(),
            seed = self.seed_mode(),
            ids = self.id_strategy(),
            vans = seed.vans.len(),
            routes = seed.routes.len(),
            bookings = seed.bookings.len(),
            "Building fleet store"
        );
        Ok(seed.into_store(self.id_generator()))
    }
}

fn check_unique_ids<'a, I, T>(section: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a T>,
    T: Eq + Hash + std::fmt::Display + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FleetError::ConfigValidationError {
                field: section.to_string(),
                message: format!("Duplicate id '{}'", id),
            });
        }
    }
    Ok(())
}

impl Validate for FleetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VanId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const INLINE: &str = r#"
[fleet]
name = "Test Fleet"
id_strategy = "sequential"

[[vans]]
id = "van-100"
name = "Shuttle"
licensePlate = "SHT-0001"
capacity = 4
occupiedSeats = 1
status = "available"
coordinates = { latitude = 37.0, longitude = -122.0 }

[[bookings]]
id = "booking-100"
vanId = "van-100"
seatNumber = 2
passengerName = "Dana"
passengerContact = "dana@example.com"
bookingDate = "2025-05-03T09:30:00Z"
status = "confirmed"
"#;

    #[test]
    fn test_defaults_use_sample_fleet() {
        let config = FleetConfig::from_toml_str("").unwrap();
        assert_eq!(config.seed_mode(), "sample");
        assert_eq!(config.id_strategy(), "uuid");
        assert_eq!(config.log_format(), "compact");
        assert!(config.validate().is_ok());
        assert_eq!(config.build_store().unwrap().vans().len(), 3);
    }

    #[test]
    fn test_inline_seed_is_inferred() {
        let config = FleetConfig::from_toml_str(INLINE).unwrap();
        assert_eq!(config.seed_mode(), "inline");
        assert_eq!(config.fleet_name(), "Test Fleet");

        let store = config.build_store().unwrap();
        let van = store.van(&VanId::new("van-100")).unwrap();
        assert_eq!(van.occupied_seats, 1);
        assert!(van.route.is_none());
        assert_eq!(store.bookings().len(), 1);
    }

    #[test]
    fn test_sequential_ids_follow_sample_fleet() {
        let config = FleetConfig::from_toml_str("[fleet]\nid_strategy = \"sequential\"\n").unwrap();
        let mut store = config.build_store().unwrap();

        let van_id = store.add_van(crate::domain::model::VanDraft::new(
            "Shuttle",
            "SHT-0002",
            4,
            crate::domain::model::Coordinates::new(37.0, -122.0),
        ));
        assert_eq!(van_id.as_str(), "van-004");

        let booking_id = store.add_booking(crate::domain::model::BookingDraft::new(
            van_id, 1, "Eve", "eve@example.com",
        ));
        assert_eq!(booking_id.as_str(), "booking-004");
    }

    #[test]
    fn test_duplicate_inline_ids_rejected() {
        let doubled = format!(
            "{}\n[[vans]]\nid = \"van-100\"\nname = \"Again\"\nlicensePlate = \"X\"\ncapacity = 2\noccupiedSeats = 0\nstatus = \"available\"\ncoordinates = {{ latitude = 0.0, longitude = 0.0 }}\n",
            INLINE
        );
        let config = FleetConfig::from_toml_str(&doubled).unwrap();
        assert!(matches!(
            config.validate(),
            Err(FleetError::ConfigValidationError { ref field, .. }) if field == "vans"
        ));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let config = FleetConfig::from_toml_str("[fleet]\nid_strategy = \"random\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(FleetError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VAN_FLEET_TEST_NAME", "Bay Shuttles");

        let config = FleetConfig::from_toml_str("[fleet]\nname = \"${VAN_FLEET_TEST_NAME}\"\n").unwrap();
        assert_eq!(config.fleet_name(), "Bay Shuttles");

        std::env::remove_var("VAN_FLEET_TEST_NAME");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[fleet]\nseed = \"empty\"\n\n[logging]\nformat = \"json\"\n")
            .unwrap();

        let config = FleetConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_format(), "json");
        assert!(config.build_store().unwrap().vans().is_empty());
    }
}
