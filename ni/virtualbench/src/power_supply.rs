//! The DC power supply subsystem of the VirtualBench.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use benchlink::{InstrumentError, InstrumentInterface};
use measurements::{Current, Voltage};

/// The output channels of the DC power supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsChannel {
    /// The +6V channel (0 to 6 V, up to 1 A).
    P6V,
    /// The +25V channel (0 to 25 V, up to 0.5 A).
    P25V,
    /// The -25V channel (-25 to 0 V, up to 0.5 A).
    N25V,
}

impl PsChannel {
    /// Convert the channel to the identifier used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            PsChannel::P6V => "+6V",
            PsChannel::P25V => "+25V",
            PsChannel::N25V => "-25V",
        }
    }

    /// Allowed voltage range of this channel in volts.
    fn voltage_range(&self) -> (f64, f64) {
        match self {
            PsChannel::P6V => (0.0, 6.0),
            PsChannel::P25V => (0.0, 25.0),
            PsChannel::N25V => (-25.0, 0.0),
        }
    }

    /// Allowed current limit range of this channel in amperes.
    fn current_range(&self) -> (f64, f64) {
        match self {
            PsChannel::P6V => (0.0, 1.0),
            PsChannel::P25V => (0.0, 0.5),
            PsChannel::N25V => (0.0, 0.5),
        }
    }
}

impl Display for PsChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_cmd_str())
    }
}

/// The DC power supply subsystem of the VirtualBench.
///
/// **This structure can only be created through the
/// [`VirtualBench`](crate::VirtualBench) struct.**
pub struct PowerSupply<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> PowerSupply<T> {
    /// Get a new power supply handle for the given instrument interface.
    pub(crate) fn new(interface: Arc<Mutex<T>>) -> Self {
        PowerSupply { interface }
    }

    /// Configure the voltage and current limit for the specified output channel.
    ///
    /// The requested values are validated against the channel's hardware range before
    /// anything is sent to the instrument.
    ///
    /// # Arguments
    /// * `channel` - The channel to configure.
    /// * `voltage_level` - Voltage to set.
    /// * `current_limit` - Current limit to set.
    pub fn configure_voltage_output(
        &mut self,
        channel: PsChannel,
        voltage_level: Voltage,
        current_limit: Current,
    ) -> Result<(), InstrumentError> {
        let volts = voltage_level.as_volts();
        let (vmin, vmax) = channel.voltage_range();
        if volts < vmin || volts > vmax {
            return Err(InstrumentError::FloatValueOutOfRange {
                value: volts,
                min: vmin,
                max: vmax,
            });
        }

        let amps = current_limit.as_amperes();
        let (imin, imax) = channel.current_range();
        if amps < imin || amps > imax {
            return Err(InstrumentError::FloatValueOutOfRange {
                value: amps,
                min: imin,
                max: imax,
            });
        }

        self.sendcmd(&format!(
            "PS:CONF {},{volts:.3},{amps:.3}",
            channel.as_cmd_str()
        ))
    }

    /// Enable or disable all outputs of the DC power supply.
    ///
    /// The VirtualBench switches all three channels together, individual channels cannot be
    /// enabled on their own.
    pub fn enable_all_outputs(&mut self, enable: bool) -> Result<(), InstrumentError> {
        let value = if enable { "1" } else { "0" };
        self.sendcmd(&format!("PS:OUTP {value}"))
    }

    /// Query whether the outputs are currently enabled.
    pub fn outputs_enabled(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query("PS:OUTP?")?;
        match resp.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(InstrumentError::ResponseParseError(resp)),
        }
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for PowerSupply<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
