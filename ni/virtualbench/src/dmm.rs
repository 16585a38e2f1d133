//! The digital multimeter subsystem of the VirtualBench.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use benchlink::{InstrumentError, InstrumentInterface};
use measurements::Voltage;

/// The measurement functions of the DMM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmmFunction {
    /// DC voltage measurement.
    DcVolts,
    /// AC voltage measurement.
    AcVolts,
    /// DC current measurement.
    DcCurrent,
    /// AC current measurement.
    AcCurrent,
    /// Resistance measurement.
    Resistance,
    /// Diode test.
    Diode,
}

impl DmmFunction {
    /// Convert the function to the identifier used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            DmmFunction::DcVolts => "DCV",
            DmmFunction::AcVolts => "ACV",
            DmmFunction::DcCurrent => "DCI",
            DmmFunction::AcCurrent => "ACI",
            DmmFunction::Resistance => "RES",
            DmmFunction::Diode => "DIOD",
        }
    }
}

impl Display for DmmFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DmmFunction::DcVolts => write!(f, "DC voltage"),
            DmmFunction::AcVolts => write!(f, "AC voltage"),
            DmmFunction::DcCurrent => write!(f, "DC current"),
            DmmFunction::AcCurrent => write!(f, "AC current"),
            DmmFunction::Resistance => write!(f, "Resistance"),
            DmmFunction::Diode => write!(f, "Diode"),
        }
    }
}

/// The digital multimeter subsystem of the VirtualBench.
///
/// **This structure can only be created through the
/// [`VirtualBench`](crate::VirtualBench) struct.**
pub struct Dmm<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Dmm<T> {
    /// Get a new DMM handle for the given instrument interface.
    pub(crate) fn new(interface: Arc<Mutex<T>>) -> Self {
        Dmm { interface }
    }

    /// Configure the measurement function of the DMM.
    ///
    /// # Arguments
    /// * `function` - The measurement function to configure.
    /// * `auto_range` - Whether the instrument should pick the range itself.
    /// * `manual_range` - The manual range in the function's base unit (volts, amperes, or
    ///   ohms). Also used as the starting point when auto-ranging.
    pub fn configure_measurement(
        &mut self,
        function: DmmFunction,
        auto_range: bool,
        manual_range: f64,
    ) -> Result<(), InstrumentError> {
        if manual_range <= 0.0 {
            return Err(InstrumentError::InvalidArgument(format!(
                "Manual range must be positive, got {manual_range}"
            )));
        }
        let auto = if auto_range { "1" } else { "0" };
        self.sendcmd(&format!(
            "DMM:CONF {},{auto},{manual_range:.3}",
            function.as_cmd_str()
        ))
    }

    /// Take a reading with the currently configured function.
    ///
    /// The value is returned in the function's base unit.
    pub fn read(&mut self) -> Result<f64, InstrumentError> {
        let resp = self.query("DMM:READ?")?;
        resp.trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Measure a DC voltage with auto-ranging over the 10 V range.
    pub fn measure_dc_voltage(&mut self) -> Result<Voltage, InstrumentError> {
        self.configure_measurement(DmmFunction::DcVolts, true, 10.0)?;
        Ok(Voltage::from_volts(self.read()?))
    }

    /// Measure an AC voltage with auto-ranging over the 10 V range.
    pub fn measure_ac_voltage(&mut self) -> Result<Voltage, InstrumentError> {
        self.configure_measurement(DmmFunction::AcVolts, true, 10.0)?;
        Ok(Voltage::from_volts(self.read()?))
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

impl<T: InstrumentInterface> Clone for Dmm<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
