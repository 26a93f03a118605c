//! Application entry point and builder pattern implementation.

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    controller::LightingController,
    devices::process::CommandZone,
    error::Error,
    sensors::TemperatureSensor,
    temperature_sensors::lm_sensor::{LMSENSORS, LmSensorSource},
};

/// Ties the configuration, the sensor and the zone handles together and runs
/// the sampling loop until completion or SIGINT.
///
/// # Example
///
/// ```no_run
/// use thermoglowd::application::Application;
///
/// # async fn example() -> anyhow::Result<()> {
/// Application::builder()
///     .with_intervals(2.0, 10.0)
///     .build()
///     .await?
///     .run()
///     .await
/// # }
/// ```
pub struct Application {
    controller: LightingController,
}

impl Application {
    /// Creates a new ApplicationBuilder for constructing Application instances.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// Runs the controller until SIGINT or one-shot completion.
    pub async fn run(mut self) -> Result<()> {
        let cancel = CancellationToken::new();
        let signal_token = cancel.clone();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("SIGINT received, shutting down");
                signal_token.cancel();
            }
        });

        self.controller.run(cancel).await
    }
}

/// Builder for [`Application`] instances.
///
/// The sensor can be substituted before `build`, which keeps hardware out of
/// tests; zone handles always come from the configured command templates.
pub struct ApplicationBuilder {
    config: Config,
    interval: f64,
    aura_interval: f64,
    sensor: Option<Box<dyn TemperatureSensor>>,
}

impl ApplicationBuilder {
    fn new() -> Self {
        Self {
            config: Config::default(),
            interval: 2.0,
            aura_interval: 10.0,
            sensor: None,
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the cooler and motherboard update intervals in seconds.
    pub fn with_intervals(mut self, interval: f64, aura_interval: f64) -> Self {
        self.interval = interval;
        self.aura_interval = aura_interval;
        self
    }

    /// Injects a temperature sensor instead of discovering one via lm-sensors.
    pub fn with_sensor(mut self, sensor: Box<dyn TemperatureSensor>) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Builds the Application, acquiring the sensor and zone handles once.
    /// They are held for the process lifetime.
    pub async fn build(self) -> Result<Application> {
        self.config.validate().context("invalid configuration")?;

        let sensor = match self.sensor {
            Some(sensor) => sensor,
            None => {
                let lms = LMSENSORS.as_ref().ok_or_else(|| {
                    Error::SensorUnavailable("lm-sensors is not available".to_string())
                })?;
                let source = LmSensorSource::discover(&lms.0, &self.config)
                    .context("temperature sensor discovery failed")?;
                Box::new(source) as Box<dyn TemperatureSensor>
            }
        };

        if let Some(name) = sensor.sensor_name().await {
            info!("using temperature sensor {name}");
        }

        let ring = Box::new(CommandZone::new(self.config.ring_zone.clone()));
        let logo = Box::new(CommandZone::new(self.config.logo_zone.clone()));
        let aura = Box::new(CommandZone::new(self.config.aura_zone.clone()));

        let controller = LightingController::new(
            self.config,
            sensor,
            ring,
            logo,
            aura,
            self.interval,
            self.aura_interval,
        )?;

        Ok(Application { controller })
    }
}
