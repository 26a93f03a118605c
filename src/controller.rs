//! The sampling loop: temperature in, zone colors out.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use log::{error, info};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    brightness::{DayCurve, device_range, fractional_hour},
    color::{ColorRamp, Rgb},
    config::Config,
    devices::LedZone,
    error::Error,
    sensors::TemperatureSensor,
};

/// Drives the cooler and motherboard zones from temperature and time-of-day.
///
/// The sensor and the zone handles are injected at construction and held for
/// the controller's lifetime. Each cycle reads the CPU temperature, maps it
/// onto the color ramp, scales the result by the daylight brightness and
/// dispatches it to the cooler's ring zone; the logo and motherboard zones get
/// their fixed colors scaled the same way. The motherboard zone refreshes only
/// every Nth cycle. A negative interval selects one-shot mode: exactly one
/// dispatch cycle, no sleep.
///
/// A failed sensor read aborts the loop; a failed zone dispatch is logged and
/// retried implicitly on the next cycle. Zone dispatch carries no timeout, so
/// a hung control utility stalls the loop until it exits.
pub struct LightingController {
    config: Config,
    ramp: ColorRamp,
    day: DayCurve,
    sensor: Box<dyn TemperatureSensor>,
    ring: Box<dyn LedZone>,
    logo: Box<dyn LedZone>,
    aura: Box<dyn LedZone>,
    interval: f64,
    aura_every: u64,
    cycle: u64,
}

impl std::fmt::Debug for LightingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightingController")
            .field("config", &self.config)
            .field("interval", &self.interval)
            .field("aura_every", &self.aura_every)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl LightingController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        sensor: Box<dyn TemperatureSensor>,
        ring: Box<dyn LedZone>,
        logo: Box<dyn LedZone>,
        aura: Box<dyn LedZone>,
        interval: f64,
        aura_interval: f64,
    ) -> Result<Self, Error> {
        config.validate()?;
        let ramp = config.color_ramp()?;
        let day = config.day_curve()?;

        let aura_every = if interval > 0.0 {
            ((aura_interval / interval).round() as u64).max(1)
        } else {
            1
        };

        Ok(Self {
            config,
            ramp,
            day,
            sensor,
            ring,
            logo,
            aura,
            interval,
            aura_every,
            cycle: 0,
        })
    }

    /// Runs until cancelled, or for exactly one cycle in one-shot mode.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        loop {
            self.run_cycle(fractional_hour(Local::now())).await?;

            if self.interval < 0.0 {
                info!("one-shot update complete");
                return Ok(());
            }

            tokio::select! {
                () = cancel.cancelled() => {
                    info!("lighting loop cancelled");
                    return Ok(());
                }
                () = sleep(Duration::from_secs_f64(self.interval)) => {}
            }

            self.cycle += 1;
        }
    }

    /// One full dispatch cycle at the given fractional hour.
    async fn run_cycle(&mut self, hour: f32) -> Result<(), Error> {
        let temperature = self
            .sensor
            .read_temperature()
            .await
            .map_err(|e| Error::SensorUnavailable(e.to_string()))?;

        let ratio = self.day.ratio_at(hour);
        let cooler_level = device_range(&self.config, true, false)?.level_at(ratio);

        info!(
            "cycle {}: {temperature:.1} °C, day ratio {ratio:.2}",
            self.cycle
        );

        let ring_color = self.ramp.color_at(temperature).scaled(cooler_level);
        self.dispatch(&*self.ring, ring_color).await;

        let logo_color = self.config.logo_color.scaled(cooler_level);
        self.dispatch(&*self.logo, logo_color).await;

        if self.cycle % self.aura_every == 0 {
            let aura_level = device_range(&self.config, false, true)?.level_at(ratio);
            let aura_color = self.config.aura_color.scaled(aura_level);
            self.dispatch(&*self.aura, aura_color).await;
        }

        Ok(())
    }

    /// Dispatch failures are logged and skipped; the next cycle retries.
    async fn dispatch(&self, zone: &dyn LedZone, color: Rgb) {
        if let Err(e) = zone.apply(color).await {
            error!("zone '{}' update failed: {e}", zone.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{devices::MockLedZone, sensors::MockTemperatureSensor};
    use mockall::predicate::eq;

    fn sensor_reading(temperature: f32) -> Box<MockTemperatureSensor> {
        let mut sensor = MockTemperatureSensor::new();
        sensor
            .expect_read_temperature()
            .returning(move || Ok(temperature));
        Box::new(sensor)
    }

    fn accepting_zone(times: usize) -> Box<MockLedZone> {
        let mut zone = MockLedZone::new();
        zone.expect_apply().times(times).returning(|_| Ok(()));
        Box::new(zone)
    }

    #[tokio::test]
    async fn one_shot_dispatches_each_zone_exactly_once() {
        let mut controller = LightingController::new(
            Config::default(),
            sensor_reading(45.5),
            accepting_zone(1),
            accepting_zone(1),
            accepting_zone(1),
            -1.0,
            -1.0,
        )
        .unwrap();

        controller.run(CancellationToken::new()).await.unwrap();
    }

    #[tokio::test]
    async fn night_cycle_scales_colors_to_the_floor() {
        // At 02:00 the day ratio is 0, so the cooler runs at its 0.4 floor:
        // ramp(45.5) = (202, 58, 102) scaled to (81, 23, 41).
        let mut ring = MockLedZone::new();
        ring.expect_apply()
            .with(eq(Rgb::new(81, 23, 41)))
            .times(1)
            .returning(|_| Ok(()));

        let mut logo = MockLedZone::new();
        logo.expect_apply()
            .with(eq(Rgb::new(60, 47, 82)))
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = LightingController::new(
            Config::default(),
            sensor_reading(45.5),
            Box::new(ring),
            Box::new(logo),
            accepting_zone(1),
            -1.0,
            -1.0,
        )
        .unwrap();

        controller.run_cycle(2.0).await.unwrap();
    }

    #[tokio::test]
    async fn midday_cycle_runs_at_full_cooler_brightness() {
        let mut ring = MockLedZone::new();
        ring.expect_apply()
            .with(eq(Rgb::new(202, 58, 102)))
            .times(1)
            .returning(|_| Ok(()));

        let mut logo = MockLedZone::new();
        logo.expect_apply()
            .with(eq(Rgb::from_hex(0x9575CD)))
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = LightingController::new(
            Config::default(),
            sensor_reading(45.5),
            Box::new(ring),
            Box::new(logo),
            accepting_zone(1),
            -1.0,
            -1.0,
        )
        .unwrap();

        controller.run_cycle(13.5).await.unwrap();
    }

    #[tokio::test]
    async fn aura_refreshes_every_nth_cycle() {
        // interval 1s, aura interval 3s: cycles 0 and 3 touch the aura zone.
        let mut controller = LightingController::new(
            Config::default(),
            sensor_reading(40.0),
            accepting_zone(4),
            accepting_zone(4),
            accepting_zone(2),
            1.0,
            3.0,
        )
        .unwrap();
        assert_eq!(controller.aura_every, 3);

        for cycle in 0..4 {
            controller.cycle = cycle;
            controller.run_cycle(12.0).await.unwrap();
        }
    }

    #[tokio::test]
    async fn sensor_failure_is_fatal_and_typed() {
        let mut sensor = MockTemperatureSensor::new();
        sensor
            .expect_read_temperature()
            .returning(|| Err(anyhow::anyhow!("chip vanished")));

        let mut controller = LightingController::new(
            Config::default(),
            Box::new(sensor),
            Box::new(MockLedZone::new()),
            Box::new(MockLedZone::new()),
            Box::new(MockLedZone::new()),
            -1.0,
            -1.0,
        )
        .unwrap();

        let err = controller.run_cycle(12.0).await.unwrap_err();
        assert!(matches!(err, Error::SensorUnavailable(_)));
    }

    #[tokio::test]
    async fn failed_zone_dispatch_does_not_abort_the_cycle() {
        let mut ring = MockLedZone::new();
        ring.expect_apply().times(1).returning(|_| {
            Err(Error::DeviceCommand {
                zone: "ring".to_string(),
                code: Some(1),
            })
        });
        ring.expect_name().return_const("ring".to_string());

        let mut controller = LightingController::new(
            Config::default(),
            sensor_reading(45.5),
            Box::new(ring),
            accepting_zone(1),
            accepting_zone(1),
            -1.0,
            -1.0,
        )
        .unwrap();

        controller.run_cycle(12.0).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_configuration_is_rejected_at_construction() {
        let config = Config {
            temp_min: 53.0,
            temp_max: 38.0,
            ..Default::default()
        };

        let err = LightingController::new(
            config,
            Box::new(MockTemperatureSensor::new()),
            Box::new(MockLedZone::new()),
            Box::new(MockLedZone::new()),
            Box::new(MockLedZone::new()),
            2.0,
            10.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
