//! BenchLink: talk to your bench instruments from Rust.
//!
//! The BenchLink library provides standardized interfaces for instrument drivers that
//! communicate with their hardware by exchanging terminator-delimited ASCII commands. It
//! provides the [`InstrumentInterface`] trait, a generic [`Instrument`] implementation for
//! anything that implements [`std::io::Read`] and [`std::io::Write`], and convenience
//! constructors for serial and TCP/IP attached devices. A scripted
//! [`LoopbackInterfaceString`] is included so that drivers can be tested without hardware.
//!
//! # Currently implemented interfaces
//! - Serial (blocking) using the [`serialport`] crate, behind the `serial` feature.
//! - TCP/IP (blocking) using [`std::net::TcpStream`].
//!
//! # Writing a driver
//!
//! A driver should be generic over `T: InstrumentInterface` and wrap the interface in an
//! `Arc<Mutex<T>>` so that subsystem or channel handles can share it across threads. All
//! fallible operations return [`InstrumentError`], which propagates nicely with the `?`
//! operator. See the `ni_virtualbench` and `ni_cdaq9211` crates in this workspace for
//! complete drivers written on top of BenchLink.

#![warn(missing_docs)]

mod instrument;
mod loopback;
#[cfg(feature = "serial")]
mod serial;
mod tcp_ip;

pub use instrument::Instrument;
pub use loopback::LoopbackInterfaceString;
#[cfg(feature = "serial")]
pub use serial::SerialInterface;
pub use tcp_ip::TcpIpInterface;

use std::time::{Duration, Instant};

use thiserror::Error;

/// The error enum for all instruments.
///
/// For any command sending or querying, your instrument should return either an empty result
/// or a result with the query where this error is the alternative. [`InstrumentError`] makes
/// it easy to propagate command and query errors forward with the `?` operator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstrumentError {
    /// The channel or line index requested is out of range. The error contains the index
    /// requested and the number of channels that are available.
    #[error(
        "Channel with index {idx} is out of range. Number of channels available: {nof_channels}"
    )]
    ChannelIndexOutOfRange {
        /// Index of the channel that is out of range.
        idx: usize,
        /// Total number of channels.
        nof_channels: usize,
    },
    /// A given float value is out of the specified range. The error contains the value that
    /// was sent, the minimum value that is allowed, and the maximum value that is allowed.
    #[error("Float value {value} is out of range. Allowed range is [{min}, {max}]")]
    FloatValueOutOfRange {
        /// The value that is out of range.
        value: f64,
        /// The minimum value that is allowed.
        min: f64,
        /// The maximum value that is allowed.
        max: f64,
    },
    /// A given integer value is out of the specified range. The error contains the value that
    /// was sent, the minimum value that is allowed, and the maximum value that is allowed.
    #[error("Integer value {value} is out of range. Allowed range is [{min}, {max}]")]
    IntValueOutOfRange {
        /// The value that is out of range.
        value: i64,
        /// The minimum value that is allowed.
        min: i64,
        /// The maximum value that is allowed.
        max: i64,
    },
    /// Error when an invalid argument is passed to a function. This error contains only an
    /// error message that is intended for the user.
    #[error("{0}")]
    InvalidArgument(String),
    /// Error when reading from/writing to an interface. See [`std::io::Error`] for details.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Instrument status is not okay, e.g., a reading reported a sentinel value that flags a
    /// hardware condition. This error contains a string that is displayed to the user as is,
    /// so make sure it is descriptive enough, i.e., "Thermocouple open on channel 2".
    #[error("{0}")]
    InstrumentStatus(String),
    /// Instrument response could not be parsed because it was unexpected by the driver. This
    /// error contains the response that was received from the instrument.
    #[error("Response from instrument could not be parsed. Response was: {0}")]
    ResponseParseError(String),
    #[cfg(feature = "serial")]
    /// Serial port errors can occur when opening a serial interface. See the
    /// [`serialport::Error`] documentation for more information.
    #[error(transparent)]
    Serialport(#[from] serialport::Error),
    /// Timeout occurred while waiting for a response from the instrument. The error contains
    /// the timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response from the instrument. Timeout was set to {0:?}."
    )]
    Timeout(Duration),
    /// Timeout occurred while waiting for a response to a query. The error contains the query
    /// that was sent and the timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response to query: {query}. Timeout was set to {timeout:?}."
    )]
    TimeoutQuery {
        /// The query that timed out.
        query: String,
        /// The timeout that was set.
        timeout: Duration,
    },
}

/// The `InstrumentInterface` trait defines the interface for controlling instruments.
///
/// Implementors only need to provide the raw byte-level `read_exact` and `write_raw`
/// methods, plus terminator and timeout handling if the defaults do not fit. Command
/// sending and querying are provided on top of these.
pub trait InstrumentInterface {
    /// Read exactly enough bytes from the instrument to fill the given buffer.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError>;

    /// Write raw bytes to the instrument and flush the interface.
    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError>;

    /// Get the terminator that is appended to commands and ends responses.
    fn get_terminator(&self) -> &str {
        "\n"
    }

    /// Set the terminator of the interface from a `&str`.
    ///
    /// # Arguments:
    /// - `_terminator` - A string slice that will be used as the terminator for commands.
    fn set_terminator(&mut self, _terminator: &str) {}

    /// Get the timeout for responses from the instrument.
    fn get_timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Send a command to the instrument.
    ///
    /// This function takes the command, appends the terminator, and writes it to the
    /// instrument. The interface is flushed to ensure that the command is sent immediately.
    ///
    /// # Arguments:
    /// - `cmd` - A string slice that will be sent to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let full_cmd = format!("{cmd}{}", self.get_terminator());
        self.write_raw(full_cmd.as_bytes())
    }

    /// Read from the instrument until the terminator is encountered.
    ///
    /// The response is read byte by byte until it ends with the terminator. If no terminator
    /// is encountered before the timeout is reached, a [`InstrumentError::Timeout`] is
    /// returned. If a non-UTF-8 byte is received, a warning is logged and the byte is
    /// skipped. The returned response is trimmed of whitespace and the terminator.
    fn read_until_terminator(&mut self) -> Result<String, InstrumentError> {
        let terminator = self.get_terminator().to_string();
        let timeout = self.get_timeout();

        let mut response = String::new();
        let mut single_buf = [0u8];

        let tic = Instant::now();
        while tic.elapsed() < timeout {
            self.read_exact(&mut single_buf)?;
            if let Ok(val) = std::str::from_utf8(&single_buf) {
                response.push_str(val);
            } else {
                log::warn!("Received invalid UTF-8 data: {single_buf:?}");
            }
            if response.ends_with(&terminator) {
                return Ok(response.trim().to_string());
            }
        }

        Err(InstrumentError::Timeout(timeout))
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// This function uses `sendcmd` to send the command and then reads the response with
    /// `read_until_terminator`. A timeout while reading is reported as a
    /// [`InstrumentError::TimeoutQuery`] that contains the query that was sent.
    ///
    /// # Arguments
    /// * `cmd` - The command to send to the instrument for which we expect a response.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.sendcmd(cmd)?;
        match self.read_until_terminator() {
            Err(InstrumentError::Timeout(timeout)) => Err(InstrumentError::TimeoutQuery {
                query: cmd.to_string(),
                timeout,
            }),
            other => other,
        }
    }
}
