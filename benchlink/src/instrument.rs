//! This module provides the main implementation for the Instrument Interface trait.
//!
//! It can be called with any type that implements [`std::io::Read`] and [`std::io::Write`],
//! such as [`std::net::TcpStream`] or [`serialport::SerialPort`].

use std::time::Duration;

use crate::{InstrumentError, InstrumentInterface};

/// A general instrument interface that can be built with any port that implements
/// [`std::io::Read`] and [`std::io::Write`].
///
/// This struct can be used to communicate with instruments over various interfaces. Handy
/// shortcuts for creating serial and TCP/IP instances are provided as well. However, this
/// general implementation can also be used with any other port type that is not provided by
/// BenchLink.
///
/// # Example
///
/// The following shows a simple example on how to create an [`Instrument`] interface from
/// your own port that implements [`std::io::Read`] and [`std::io::Write`]. Of course, to
/// just use a simple [`std::net::TcpStream`] as shown here, you can also use the
/// [`crate::TcpIpInterface`].
///
/// ```no_run
/// use std::{net::TcpStream, time::Duration};
///
/// use benchlink::Instrument;
///
/// let my_port = TcpStream::connect("192.168.10.1:8000").unwrap();
/// let interface = Instrument::new(my_port, Duration::from_secs(3));
/// ```
pub struct Instrument<P: std::io::Read + std::io::Write> {
    port: P,
    terminator: String,
    timeout: Duration,
}

impl<P: std::io::Read + std::io::Write> Instrument<P> {
    /// Create a new instance of [`Instrument`] with a given port and timeout.
    ///
    /// The terminator is by default set to `"\n"`, but can be changed using the
    /// `set_terminator` function. Note that the terminator is automatically appended to
    /// commands and reading responses will read until the terminator is found.
    pub fn new(port: P, timeout: Duration) -> Self {
        Self {
            port,
            terminator: "\n".to_string(),
            timeout,
        }
    }
}

impl<P: std::io::Read + std::io::Write> InstrumentInterface for Instrument<P> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        self.port.read_exact(buf)?;
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn get_terminator(&self) -> &str {
        self.terminator.as_str()
    }

    fn set_terminator(&mut self, terminator: &str) {
        self.terminator = terminator.to_string();
    }

    fn get_timeout(&self) -> Duration {
        self.timeout
    }
}
