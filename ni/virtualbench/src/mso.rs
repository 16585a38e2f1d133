//! The mixed-signal oscilloscope subsystem of the VirtualBench.
//!
//! Only the analog channels are currently implemented. A full acquisition is the usual
//! five-step sequence: configure the analog channel(s), configure the timing, arm an
//! immediate trigger, run, and read the data back. The [`Mso::record_signal`] and
//! [`Mso::record_two_signals`] conveniences issue that sequence in one call.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
    time::Duration,
};

use benchlink::{InstrumentError, InstrumentInterface};
use measurements::Voltage;

/// The analog input channels of the MSO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsoChannel {
    /// Analog channel 1.
    Ch1,
    /// Analog channel 2.
    Ch2,
}

impl MsoChannel {
    /// Convert the channel to the identifier used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            MsoChannel::Ch1 => "1",
            MsoChannel::Ch2 => "2",
        }
    }
}

impl Display for MsoChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CH{}", self.as_cmd_str())
    }
}

/// The probe attenuation setting of an analog channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeAttenuation {
    /// 1x probe.
    X1,
    /// 10x probe.
    X10,
}

impl ProbeAttenuation {
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            ProbeAttenuation::X1 => "1",
            ProbeAttenuation::X10 => "10",
        }
    }
}

/// The input coupling setting of an analog channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// AC coupling.
    Ac,
    /// DC coupling.
    Dc,
}

impl Coupling {
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            Coupling::Ac => "AC",
            Coupling::Dc => "DC",
        }
    }
}

/// The sampling mode used for an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Real-time sampling, one trigger fills the whole record.
    RealTime,
    /// Equivalent-time sampling for repetitive signals.
    EquivalentTime,
}

impl SamplingMode {
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            SamplingMode::RealTime => "RT",
            SamplingMode::EquivalentTime => "ET",
        }
    }
}

/// The result of one analog acquisition.
///
/// The samples of all enabled channels come back interleaved with the given stride, i.e.,
/// with two enabled channels the data is `ch1[0], ch2[0], ch1[1], ch2[1], ...` and the
/// stride is 2. Use [`AnalogAcquisition::channel_signal`] to pull out the ordered samples of
/// a single channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogAcquisition {
    stride: usize,
    t0: f64,
    samples: Vec<f64>,
}

impl AnalogAcquisition {
    /// Parse an acquisition from a `MSO:DATA?` response.
    ///
    /// The response format is `<stride>;<t0>;<v,v,v,...>`. An empty data section is a valid
    /// acquisition with zero samples.
    pub(crate) fn from_response(resp: &str) -> Result<Self, InstrumentError> {
        let parts: Vec<&str> = resp.split(';').collect();
        if parts.len() != 3 {
            return Err(InstrumentError::ResponseParseError(resp.to_string()));
        }

        let stride = parts[0]
            .trim()
            .parse::<usize>()
            .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))?;
        if stride == 0 {
            return Err(InstrumentError::ResponseParseError(resp.to_string()));
        }

        let t0 = parts[1]
            .trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))?;

        let data = parts[2].trim();
        let samples = if data.is_empty() {
            Vec::new()
        } else {
            data.split(',')
                .map(|s| s.trim().parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))?
        };

        if samples.len() % stride != 0 {
            return Err(InstrumentError::ResponseParseError(resp.to_string()));
        }

        Ok(AnalogAcquisition {
            stride,
            t0,
            samples,
        })
    }

    /// The interleave stride, equal to the number of enabled analog channels.
    ///
    /// The stride of a parsed acquisition is always at least 1.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The timestamp of the first sample, in seconds relative to the trigger.
    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// The interleaved amplitude samples in volts.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Get the ordered samples of a single channel from the interleaved record.
    ///
    /// # Arguments
    /// * `idx` - The zero-indexed position of the channel within the acquisition. This is
    ///   the position among the enabled channels, not the front-panel channel number.
    pub fn channel_signal(&self, idx: usize) -> Result<Vec<f64>, InstrumentError> {
        if idx >= self.stride {
            return Err(InstrumentError::ChannelIndexOutOfRange {
                idx,
                nof_channels: self.stride,
            });
        }
        Ok(self
            .samples
            .iter()
            .skip(idx)
            .step_by(self.stride)
            .copied()
            .collect())
    }

    /// The number of samples each channel contributed to the acquisition.
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.stride
    }
}

/// The mixed-signal oscilloscope subsystem of the VirtualBench.
///
/// **This structure can only be created through the
/// [`VirtualBench`](crate::VirtualBench) struct.**
pub struct Mso<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Mso<T> {
    /// Get a new MSO handle for the given instrument interface.
    pub(crate) fn new(interface: Arc<Mutex<T>>) -> Self {
        Mso { interface }
    }

    /// Configure an analog input channel.
    ///
    /// # Arguments
    /// * `channel` - The channel to configure.
    /// * `enabled` - Whether the channel takes part in acquisitions.
    /// * `vertical_range` - The full vertical range, must be positive.
    /// * `vertical_offset` - The vertical offset.
    /// * `probe_attenuation` - The probe attenuation of the connected probe.
    /// * `coupling` - The input coupling.
    pub fn configure_analog_channel(
        &mut self,
        channel: MsoChannel,
        enabled: bool,
        vertical_range: Voltage,
        vertical_offset: Voltage,
        probe_attenuation: ProbeAttenuation,
        coupling: Coupling,
    ) -> Result<(), InstrumentError> {
        let range = vertical_range.as_volts();
        if range <= 0.0 {
            return Err(InstrumentError::InvalidArgument(format!(
                "Vertical range must be positive, got {range} V"
            )));
        }
        let enabled = if enabled { "1" } else { "0" };
        self.sendcmd(&format!(
            "MSO:CHAN {},{enabled},{range:.3},{offset:.3},{atten},{coupling}",
            channel.as_cmd_str(),
            offset = vertical_offset.as_volts(),
            atten = probe_attenuation.as_cmd_str(),
            coupling = coupling.as_cmd_str(),
        ))
    }

    /// Configure the acquisition timing.
    ///
    /// # Arguments
    /// * `sample_rate` - The sample rate in Hz, must be positive.
    /// * `acquisition_time` - The length of the record to acquire.
    /// * `pretrigger_time` - How much of the record lies before the trigger point.
    /// * `sampling_mode` - Real-time or equivalent-time sampling.
    pub fn configure_timing(
        &mut self,
        sample_rate: f64,
        acquisition_time: Duration,
        pretrigger_time: Duration,
        sampling_mode: SamplingMode,
    ) -> Result<(), InstrumentError> {
        if sample_rate <= 0.0 {
            return Err(InstrumentError::InvalidArgument(format!(
                "Sample rate must be positive, got {sample_rate} Hz"
            )));
        }
        self.sendcmd(&format!(
            "MSO:TIM {sample_rate:.1},{acq:.6},{pre:.9},{mode}",
            acq = acquisition_time.as_secs_f64(),
            pre = pretrigger_time.as_secs_f64(),
            mode = sampling_mode.as_cmd_str(),
        ))
    }

    /// Arm an immediate trigger, so the next run starts acquiring right away.
    pub fn configure_immediate_trigger(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("MSO:TRIG:IMM")
    }

    /// Start an acquisition.
    pub fn run(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("MSO:RUN")
    }

    /// Stop a running acquisition.
    pub fn stop(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("MSO:STOP")
    }

    /// Read the analog data of the last acquisition.
    pub fn read_analog(&mut self) -> Result<AnalogAcquisition, InstrumentError> {
        let resp = self.query("MSO:DATA?")?;
        let acq = AnalogAcquisition::from_response(&resp)?;
        log::debug!(
            "Read analog acquisition: stride {}, {} samples per channel",
            acq.stride,
            acq.samples_per_channel()
        );
        Ok(acq)
    }

    /// Record a signal on a single analog channel.
    ///
    /// This runs the full acquisition sequence on the given channel with a 1x probe, DC
    /// coupling, a 1 ns pretrigger, and real-time sampling, and returns the ordered
    /// amplitude samples.
    ///
    /// # Arguments
    /// * `channel` - The channel to record from.
    /// * `duration` - The time to record the signal for.
    /// * `sample_rate` - The sample rate in Hz.
    /// * `vertical_range` - The vertical range.
    /// * `vertical_offset` - The vertical offset.
    pub fn record_signal(
        &mut self,
        channel: MsoChannel,
        duration: Duration,
        sample_rate: f64,
        vertical_range: Voltage,
        vertical_offset: Voltage,
    ) -> Result<Vec<f64>, InstrumentError> {
        log::debug!(
            "Recording {channel} at {sample_rate} Hz for {duration:?}, expecting {} samples",
            (sample_rate * duration.as_secs_f64()) as usize
        );
        self.configure_analog_channel(
            channel,
            true,
            vertical_range,
            vertical_offset,
            ProbeAttenuation::X1,
            Coupling::Dc,
        )?;
        self.configure_timing(
            sample_rate,
            duration,
            Duration::from_nanos(1),
            SamplingMode::RealTime,
        )?;
        self.configure_immediate_trigger()?;
        self.run()?;
        let acq = self.read_analog()?;
        acq.channel_signal(0)
    }

    /// Record the signals on both analog channels at once.
    ///
    /// Both channels are configured with the same vertical settings, and the interleaved
    /// record is split into the two ordered signals `(channel 1, channel 2)`.
    pub fn record_two_signals(
        &mut self,
        duration: Duration,
        sample_rate: f64,
        vertical_range: Voltage,
        vertical_offset: Voltage,
    ) -> Result<(Vec<f64>, Vec<f64>), InstrumentError> {
        log::debug!(
            "Recording CH1 and CH2 at {sample_rate} Hz for {duration:?}, expecting {} samples each",
            (sample_rate * duration.as_secs_f64()) as usize
        );
        for channel in [MsoChannel::Ch1, MsoChannel::Ch2] {
            self.configure_analog_channel(
                channel,
                true,
                vertical_range,
                vertical_offset,
                ProbeAttenuation::X1,
                Coupling::Dc,
            )?;
        }
        self.configure_timing(
            sample_rate,
            duration,
            Duration::from_nanos(1),
            SamplingMode::RealTime,
        )?;
        self.configure_immediate_trigger()?;
        self.run()?;
        let acq = self.read_analog()?;
        Ok((acq.channel_signal(0)?, acq.channel_signal(1)?))
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

impl<T: InstrumentInterface> Clone for Mso<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
