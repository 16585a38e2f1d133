//! Provide a serial interface for the VirtualBench.

use std::time::Duration;

use benchlink::{Instrument, InstrumentError, SerialInterface};
use serialport::SerialPort;

/// A SerialInterface for the VirtualBench.
///
/// Builds a BenchLink SerialInterface with the correct settings for communication with the
/// VirtualBench.
#[derive(Debug)]
pub struct SerialInterfaceVirtualBench {}

impl SerialInterfaceVirtualBench {
    /// Try to create an Instrument interface with a simple serial port configuration.
    ///
    /// This is analog to the `simple` method of the `SerialInterface` struct in `BenchLink`,
    /// however, it sets the data bits and stop bits for communication with the VirtualBench.
    /// The default timeout is set to 3 seconds.
    ///
    /// Arguments:
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    pub fn simple(port: &str) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        let port = serialport::new(port, 115_200)
            .timeout(timeout)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One);
        SerialInterface::full(port)
    }
}
