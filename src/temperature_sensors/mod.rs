pub mod lm_sensor;
