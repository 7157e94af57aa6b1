//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements | Connects to                 |
//! |---------------|------------|-----------------------------|
//! | `command_adc` | AdcPort    | `tshwctl --adc`             |
//! | `sysfs_gpio`  | GpioPort   | `/sys/class/gpio`           |
//! | `delay`       | DelayNs    | `std::thread::sleep`        |
//! | `log_sink`    | EventSink  | `log` facade / console      |
//! | `daemon`      | -          | `daemon(3)`                 |

pub mod command_adc;
#[cfg(feature = "daemon")]
pub mod daemon;
pub mod delay;
pub mod log_sink;
pub mod sysfs_gpio;
