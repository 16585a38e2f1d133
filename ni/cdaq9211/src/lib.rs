//! A rust driver for an NI 9211 thermocouple module in a cDAQ chassis.
//!
//! The module has four thermocouple inputs. Each input is represented by a [`Channel`] that
//! can be cloned and moved into a thread, which is what the bundled [`TempLogger`] does to
//! record temperatures in the background while a measurement sequence runs.
//!
//! # Example
//!
//! This example shows the usage via the serial interface.
//! ```no_run
//! use ni_cdaq9211::{Cdaq9211, SerialInterfaceCdaq9211};
//!
//! // The port where the cDAQ is connected to
//! let port = "/dev/ttyUSB1";
//!
//! let interface = SerialInterfaceCdaq9211::simple(port).expect("Failed to open serial port");
//! let mut inst = Cdaq9211::try_new(interface).unwrap();
//!
//! // Query the name of the instrument
//! println!("{}", inst.get_name().unwrap());
//!
//! // Print the temperature values of channels 0 and 2
//! let mut ch0 = inst.get_channel(0).unwrap();
//! let mut ch2 = inst.get_channel(2).unwrap();
//! println!("Channel 0 temperature: {:?}", ch0.get_temperature());
//! println!("Channel 2 temperature: {:?}", ch2.get_temperature());
//! ```

#![warn(missing_docs)]

mod interface;
mod logger;

pub use interface::SerialInterfaceCdaq9211;
pub use logger::{TempLogError, TempLogger};

use std::sync::{Arc, Mutex};

use benchlink::{InstrumentError, InstrumentInterface};
use measurements::Temperature;

/// A rust driver for the 9211 thermocouple module.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Cdaq9211<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    num_channels: usize,
}

impl<T: InstrumentInterface> Cdaq9211<T> {
    /// Create a new Cdaq9211 instance with the given instrument interface.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`]
    ///   trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let interface = Arc::new(Mutex::new(interface));

        Ok(Cdaq9211 {
            interface,
            num_channels: 4,
        })
    }

    /// Get a new channel with a given index.
    ///
    /// Please note that channels are zero-indexed.
    pub fn get_channel(&mut self, idx: usize) -> Result<Channel<T>, InstrumentError> {
        if idx >= self.num_channels {
            return Err(InstrumentError::ChannelIndexOutOfRange {
                idx,
                nof_channels: self.num_channels,
            });
        }
        Ok(Channel::new(idx, Arc::clone(&self.interface)))
    }

    /// Query the name of the instrument.
    ///
    /// Returns a comma-separated string of manufacturer, chassis model, module model, and
    /// firmware version.
    pub fn get_name(&mut self) -> Result<String, InstrumentError> {
        let resp = self.query("*IDN?")?;
        Ok(resp.trim().to_string())
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Cdaq9211<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            num_channels: self.num_channels,
        }
    }
}

/// Channel structure representing a single thermocouple input of the module.
///
/// **This structure can only be created through the [`Cdaq9211`] struct.**
pub struct Channel<T: InstrumentInterface> {
    idx: usize,
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Channel<T> {
    /// Get a new channel for the given instrument interface.
    ///
    /// This function can only be called from inside of the [`Cdaq9211`] struct.
    fn new(idx: usize, interface: Arc<Mutex<T>>) -> Self {
        Channel { idx, interface }
    }

    /// Get the current temperature reading of this channel.
    ///
    /// The module reports the reading in degrees Celsius. If the thermocouple is open or
    /// not connected, the module answers `OTD` and an instrument status error is returned.
    pub fn get_temperature(&mut self) -> Result<Temperature, InstrumentError> {
        let resp = self.query(&format!("MEAS:TEMP? {}", self.idx))?;
        if resp.trim() == "OTD" {
            return Err(InstrumentError::InstrumentStatus(format!(
                "Open thermocouple detected on channel {}",
                self.idx
            )));
        }
        let val = resp
            .trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))?;
        Ok(Temperature::from_celsius(val))
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            interface: self.interface.clone(),
        }
    }
}
