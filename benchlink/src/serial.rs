//! This module provides constructors for instruments controlled via a serial port.
//!
//! It builds a blocking [`Instrument`] on top of the `serialport` crate.

use std::time::Duration;

use serialport::{SerialPort, SerialPortBuilder};

use crate::{Instrument, InstrumentError};

/// Constructors for blocking serial port instruments using the `serialport` crate.
#[derive(Debug)]
pub struct SerialInterface {}

impl SerialInterface {
    /// Create an [`Instrument`] with a simple serial port configuration.
    ///
    /// The serial port is opened with the default `serialport` settings (eight data bits, no
    /// parity, one stop bit) and a timeout of 3 seconds. If your device needs a different
    /// configuration, use [`SerialInterface::full`] with your own
    /// [`serialport::SerialPortBuilder`].
    ///
    /// # Arguments
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    /// * `baud_rate` - The baud rate for the communication.
    pub fn simple(
        port: &str,
        baud_rate: u32,
    ) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        Self::full(serialport::new(port, baud_rate).timeout(timeout))
    }

    /// Create an [`Instrument`] from a fully configured [`serialport::SerialPortBuilder`].
    ///
    /// # Arguments
    /// * `spb` - A `SerialPortBuilder` that configures port name, baud rate, parity, stop
    ///   bits, data bits, and timeout.
    pub fn full(spb: SerialPortBuilder) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let port = spb.open()?;
        let timeout = port.timeout();
        Ok(Instrument::new(port, timeout))
    }
}
