//! Provide a serial interface for the cDAQ chassis.

use std::time::Duration;

use benchlink::{Instrument, InstrumentError, SerialInterface};
use serialport::SerialPort;

/// A SerialInterface for the cDAQ chassis carrying the 9211 module.
///
/// Builds a BenchLink SerialInterface with the correct settings for communication with the
/// chassis.
#[derive(Debug)]
pub struct SerialInterfaceCdaq9211 {}

impl SerialInterfaceCdaq9211 {
    /// Try to create an Instrument interface with a simple serial port configuration.
    ///
    /// This is analog to the `simple` method of the `SerialInterface` struct in `BenchLink`,
    /// however, it sets the data bits and stop bits for communication with the chassis. The
    /// default timeout is set to 3 seconds.
    ///
    /// Arguments:
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB1"` or `"COM4"`.
    pub fn simple(port: &str) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        let port = serialport::new(port, 9600)
            .timeout(timeout)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One);
        SerialInterface::full(port)
    }
}
