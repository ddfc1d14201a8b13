pub mod percentage;
pub mod telemetry;
