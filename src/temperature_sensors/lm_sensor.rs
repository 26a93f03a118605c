use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use lm_sensors::{
    LMSensors, SubFeatureRef,
    value::{Kind as ValueKind, Value},
};
use log::info;
use tokio::sync::Mutex;

use crate::{config::Config, sensors::TemperatureSensor};

/// Wrapper for the lm-sensors library handle.
pub struct LMSensorsRef(pub LMSensors);

// SAFETY: libsensors (>= 3.6) guards all sensor access with an internal global mutex.
//         The `SubFeatureRef::value()` call is read-only.
//         Therefore, moving this pointer across threads cannot cause data races.
unsafe impl Send for LMSensorsRef {}
unsafe impl Sync for LMSensorsRef {}

/// Global lm-sensors instance, initialized once at startup.
pub static LMSENSORS: LazyLock<Option<LMSensorsRef>> =
    LazyLock::new(|| match lm_sensors::Initializer::default().initialize() {
        Ok(sensors) => {
            log::info!("lm-sensors initialized successfully");
            Some(LMSensorsRef(sensors))
        }
        Err(e) => {
            log::warn!("lm-sensors not available: {e}");
            None
        }
    });

struct Sensor {
    key: String,
    subf: SubFeatureRef<'static>,
}

// SAFETY: see LMSensorsRef above; the subfeature reference is only read.
unsafe impl Send for Sensor {}
unsafe impl Sync for Sensor {}

/// CPU temperature source backed by lm-sensors.
pub struct LmSensorSource(Arc<Mutex<Sensor>>);

impl LmSensorSource {
    /// Resolves the configured chip prefix and feature label to a readable
    /// temperature subfeature. Absence of either is a startup error.
    pub fn discover(lmsensors: &'static LMSensors, cfg: &Config) -> Result<Self> {
        let chip_ref = lmsensors
            .chip_iter(None)
            .find(|c| {
                c.name()
                    .map(|n| n.starts_with(&cfg.sensor_chip))
                    .unwrap_or(false)
            })
            .with_context(|| format!("sensor chip '{}' not detected", cfg.sensor_chip))?;
        let feat_ref = chip_ref
            .feature_iter()
            .find(|f| f.label().map(|l| l == cfg.sensor_feature).unwrap_or(false))
            .with_context(|| {
                format!(
                    "feature '{}' not found on chip '{}'",
                    cfg.sensor_feature, cfg.sensor_chip
                )
            })?;
        let subf = feat_ref
            .sub_feature_iter()
            .find(|s| matches!(s.kind(), Some(ValueKind::TemperatureInput)))
            .with_context(|| {
                format!("feature '{}' has no temperature input", cfg.sensor_feature)
            })?;

        let key = format!("{}:{}", cfg.sensor_chip, cfg.sensor_feature);
        info!("Found temperature sensor: {key}");

        Ok(Self(Arc::new(Mutex::new(Sensor { key, subf }))))
    }
}

#[async_trait]
impl TemperatureSensor for LmSensorSource {
    async fn read_temperature(&self) -> Result<f32> {
        match self.0.lock().await.subf.value()? {
            Value::TemperatureInput(t) => Ok(t as f32),
            _ => Err(anyhow!("non-temperature value")),
        }
    }

    async fn sensor_name(&self) -> Option<String> {
        Some(self.0.lock().await.key.clone())
    }
}
