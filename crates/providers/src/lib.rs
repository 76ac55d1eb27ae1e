//! # Providers
//!
//! Concrete implementations of the sensor and cycle provider traits:
//!
//! - [`SysfsGpio`]: digital inputs via the sysfs GPIO interface
//! - [`LibcameraCapture`]: stills via the `libcamera-still` CLI
//! - [`GcsStorage`]: uploads to a Google Cloud Storage bucket
//! - [`TwilioMessenger`]: WhatsApp notifications via the Twilio REST API
//!
//! The [`mock`] module carries in-memory stand-ins for integration tests.

pub mod camera;
pub mod gpio;
pub mod messaging;
pub mod mock;
pub mod storage;

pub use camera::LibcameraCapture;
pub use gpio::SysfsGpio;
pub use messaging::TwilioMessenger;
pub use storage::GcsStorage;
