//! This module provides constructors for instruments controlled via TCP/IP.
//!
//! It builds a blocking [`Instrument`] on top of the [`std::net::TcpStream`] struct.

use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::{Instrument, InstrumentError};

/// Constructors for blocking TCP/IP instruments using the [`std::net::TcpStream`] struct.
#[derive(Debug)]
pub struct TcpIpInterface {}

impl TcpIpInterface {
    /// Try to create a new TCP/IP [`Instrument`].
    ///
    /// A read and write timeout of three seconds is set on the stream. We do not want to
    /// infinitely block, as this is not wanted for instrument communications, especially
    /// when they are blocking.
    ///
    /// # Arguments
    /// * `sock_addr` - Socket address, e.g., `"192.168.10.1:5025"`.
    pub fn try_new<A: ToSocketAddrs>(
        sock_addr: A,
    ) -> Result<Instrument<TcpStream>, InstrumentError> {
        let stream = TcpStream::connect(sock_addr)?;
        let timeout = Duration::from_secs(3);
        stream.set_write_timeout(Some(timeout))?;
        stream.set_read_timeout(Some(timeout))?;
        Ok(Instrument::new(stream, timeout))
    }
}
