use std::fs;

use serde::Deserialize;

use crate::{
    ingestion::cache::SourceLocation,
    structures::{Schedule, TransportMode, parse_clock_time},
};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub build: BuildConfig,
    #[serde(default)]
    pub default_routing: RoutingDefaultConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    pub inputs: Vec<Ingestor>,
    pub output: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "ingestor")]
pub enum Ingestor {
    #[serde(rename = "csv/road")]
    CsvRoad(CsvIngestor),
    #[serde(rename = "csv/route")]
    CsvRoute(CsvIngestor),
}

#[derive(Debug, Deserialize)]
pub struct CsvIngestor {
    pub url: String,
    pub phase: Option<u8>,
    pub mode: ModeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    pub name: String,
    pub fare_rate: f64,
    pub speed: f64,
    #[serde(default)]
    pub interval: f64,
    #[serde(default = "default_service_hours")]
    pub service_hours: [u8; 2],
}

fn default_service_hours() -> [u8; 2] {
    [0, 24]
}

#[derive(Debug, Deserialize)]
pub struct RoutingDefaultConfig {
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_start_time() -> String {
    "09:00".to_string()
}

fn default_currency() -> String {
    "BDT".to_string()
}

impl Default for RoutingDefaultConfig {
    fn default() -> Self {
        RoutingDefaultConfig {
            start_time: default_start_time(),
            currency: default_currency(),
        }
    }
}

impl RoutingDefaultConfig {
    pub fn start_minutes(&self) -> Result<f64, String> {
        parse_clock_time(&self.start_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
        }
    }
}

impl ModeConfig {
    pub fn to_transport_mode(&self) -> Result<TransportMode, String> {
        let [start_hour, end_hour] = self.service_hours;
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(format!("Mode '{}' needs a positive speed", self.name));
        }
        if !(self.fare_rate.is_finite() && self.fare_rate >= 0.0) {
            return Err(format!("Mode '{}' has a negative fare rate", self.name));
        }
        if !(self.interval.is_finite() && self.interval >= 0.0) {
            return Err(format!("Mode '{}' has a negative interval", self.name));
        }
        if start_hour > end_hour || end_hour > 24 {
            return Err(format!(
                "Mode '{}' has invalid service hours {start_hour}-{end_hour}",
                self.name
            ));
        }

        Ok(TransportMode {
            name: self.name.clone(),
            fare_rate: self.fare_rate,
            speed: self.speed,
            schedule: Schedule::new(self.interval, start_hour, end_hour),
        })
    }
}

impl Ingestor {
    fn inner(&self) -> &CsvIngestor {
        match self {
            Ingestor::CsvRoad(c) | Ingestor::CsvRoute(c) => c,
        }
    }

    pub fn label(&self) -> &str {
        &self.inner().mode.name
    }

    pub fn url(&self) -> &str {
        &self.inner().url
    }

    pub fn mode(&self) -> &ModeConfig {
        &self.inner().mode
    }

    pub fn location(&self) -> Result<SourceLocation, String> {
        SourceLocation::parse(self.url()).map_err(|e| format!("{e} (in '{}')", self.label()))
    }

    pub fn phase(&self) -> u8 {
        match self {
            Ingestor::CsvRoad(i) => i.phase.unwrap_or(0),
            Ingestor::CsvRoute(i) => i.phase.unwrap_or(1),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config: {e}"))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_yml::from_str(content).map_err(|e| format!("Failed to parse config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const SAMPLE: &str = r#"
build:
  output: graph.bin
  inputs:
    - ingestor: csv/route
      url: path:data/metro.csv
      mode:
        name: Metro
        fare_rate: 5
        speed: 15
        interval: 5
        service_hours: [1, 23]
    - ingestor: csv/road
      url: path:data/roads.csv
      mode:
        name: Car
        fare_rate: 20
        speed: 20
"#;

    #[test]
    fn parses_sample() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.build.output, "graph.bin");
        assert_eq!(config.build.inputs.len(), 2);

        let metro = &config.build.inputs[0];
        assert_eq!(metro.label(), "Metro");
        assert_eq!(metro.phase(), 1);
        assert!(matches!(
            metro.location(),
            Ok(SourceLocation::Local(ref p)) if p == Path::new("data/metro.csv")
        ));

        let car = config.build.inputs[1].mode().to_transport_mode().unwrap();
        assert_eq!(config.build.inputs[1].phase(), 0);
        assert!(car.schedule.is_unscheduled());
        assert_eq!(car.schedule.end_hour, 24);
    }

    #[test]
    fn defaults_apply() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.default_routing.start_minutes(), Ok(540.0));
        assert_eq!(config.default_routing.currency, "BDT");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn rejects_unknown_scheme() {
        let config = Config::parse(&SAMPLE.replace("path:data/roads.csv", "ftp://x")).unwrap();
        assert!(config.build.inputs[1].location().is_err());
    }

    #[test]
    fn rejects_invalid_modes() {
        let mode = ModeConfig {
            name: "Broken".to_string(),
            fare_rate: 1.0,
            speed: 0.0,
            interval: 0.0,
            service_hours: [0, 24],
        };
        assert!(mode.to_transport_mode().is_err());

        let mode = ModeConfig {
            speed: 10.0,
            service_hours: [22, 7],
            ..mode
        };
        assert!(mode.to_transport_mode().is_err());
    }
}
