//! A rust driver for an NI VirtualBench combo instrument.
//!
//! The VirtualBench bundles a DC power supply, a digital multimeter, a mixed-signal
//! oscilloscope, and digital I/O lines behind a single connection. This driver exposes one
//! [`VirtualBench`] handle from which the individual subsystems are obtained. All subsystem
//! handles share the same interface and can be cloned cheaply, so they can be moved into
//! threads.
//!
//! The instrument speaks a newline-terminated ASCII command set:
//!
//! | Subsystem    | Commands                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | Common       | `*IDN?`                                                         |
//! | Power supply | `PS:CONF <ch>,<volts>,<amps>`, `PS:OUTP <0\|1>`, `PS:OUTP?`     |
//! | DMM          | `DMM:CONF <func>,<auto>,<range>`, `DMM:READ?`                   |
//! | MSO          | `MSO:CHAN ...`, `MSO:TIM ...`, `MSO:TRIG:IMM`, `MSO:RUN`,       |
//! |              | `MSO:STOP`, `MSO:DATA?`                                         |
//! | Digital I/O  | `DIO:DIR <line>,<dir>`, `DIO:READ? <lines>`, `DIO:WRIT ...`     |
//!
//! # Example
//!
//! This example shows the usage via the serial interface.
//! ```no_run
//! use std::time::Duration;
//!
//! use measurements::{Current, Voltage};
//! use ni_virtualbench::{MsoChannel, PsChannel, SerialInterfaceVirtualBench, VirtualBench};
//!
//! // The port where the VirtualBench is connected to
//! let port = "/dev/ttyUSB0";
//!
//! let interface = SerialInterfaceVirtualBench::simple(port).expect("Failed to open serial port");
//! let mut bench = VirtualBench::try_new(interface).unwrap();
//!
//! // Query the name of the instrument
//! println!("{}", bench.get_name().unwrap());
//!
//! // Power the device under test from the +6V rail
//! let mut ps = bench.power_supply();
//! ps.configure_voltage_output(
//!     PsChannel::P6V,
//!     Voltage::from_volts(3.3),
//!     Current::from_amperes(0.5),
//! )
//! .unwrap();
//! ps.enable_all_outputs(true).unwrap();
//!
//! // Record one second of data on MSO channel 1
//! let signal = bench
//!     .mso()
//!     .record_signal(
//!         MsoChannel::Ch1,
//!         Duration::from_secs(1),
//!         100_000.0,
//!         Voltage::from_volts(5.0),
//!         Voltage::from_volts(0.0),
//!     )
//!     .unwrap();
//! println!("Recorded {} samples", signal.len());
//!
//! bench.release();
//! ```

#![warn(missing_docs)]

mod digital_io;
mod dmm;
mod interface;
mod mso;
mod power_supply;

pub use digital_io::{DigitalIo, LineDirection};
pub use dmm::{Dmm, DmmFunction};
pub use interface::SerialInterfaceVirtualBench;
pub use mso::{AnalogAcquisition, Coupling, Mso, MsoChannel, ProbeAttenuation, SamplingMode};
pub use power_supply::{PowerSupply, PsChannel};

use std::sync::{Arc, Mutex};

use benchlink::{InstrumentError, InstrumentInterface};

/// A rust driver for the VirtualBench combo instrument.
///
/// The struct itself only answers identification queries and hands out subsystem handles.
/// All actual instrument functionality lives on the subsystems, see [`PowerSupply`],
/// [`Dmm`], [`Mso`], and [`DigitalIo`]. See the top-level documentation for an example on
/// how to use this driver.
pub struct VirtualBench<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> VirtualBench<T> {
    /// Create a new VirtualBench instance with the given instrument interface.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`]
    ///   trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let interface = Arc::new(Mutex::new(interface));
        Ok(VirtualBench { interface })
    }

    /// Query the name of the instrument.
    ///
    /// Returns a comma-separated string of manufacturer, model, serial number, and firmware
    /// version.
    pub fn get_name(&mut self) -> Result<String, InstrumentError> {
        let resp = {
            let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
            intf.query("*IDN?")?
        };
        Ok(resp.trim().to_string())
    }

    /// Get a handle to the DC power supply subsystem.
    pub fn power_supply(&mut self) -> PowerSupply<T> {
        PowerSupply::new(Arc::clone(&self.interface))
    }

    /// Get a handle to the digital multimeter subsystem.
    pub fn dmm(&mut self) -> Dmm<T> {
        Dmm::new(Arc::clone(&self.interface))
    }

    /// Get a handle to the mixed-signal oscilloscope subsystem.
    pub fn mso(&mut self) -> Mso<T> {
        Mso::new(Arc::clone(&self.interface))
    }

    /// Get a handle to the digital I/O subsystem.
    pub fn digital_io(&mut self) -> DigitalIo<T> {
        DigitalIo::new(Arc::clone(&self.interface))
    }

    /// Put the bench into a safe state before disconnecting.
    ///
    /// This disables all power supply outputs and stops a running MSO acquisition. The
    /// release is best-effort: failures are logged but not returned, so it can always be
    /// called on the way out.
    pub fn release(&mut self) {
        if let Err(err) = self.power_supply().enable_all_outputs(false) {
            log::warn!("Could not disable power supply outputs: {err}");
        }
        if let Err(err) = self.mso().stop() {
            log::warn!("Could not stop the MSO: {err}");
        }
        log::info!("VirtualBench released.");
    }
}

impl<T: InstrumentInterface> Clone for VirtualBench<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
