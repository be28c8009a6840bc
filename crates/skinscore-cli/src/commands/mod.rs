//! Command implementations for the skinscore CLI.

mod analyze;
mod calibrate;
mod calibration;
mod init;

pub use analyze::cmd_analyze;
pub use calibrate::cmd_calibrate;
pub use calibration::cmd_show_calibration;
pub use init::cmd_init;
