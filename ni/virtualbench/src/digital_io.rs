//! The digital I/O subsystem of the VirtualBench.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use benchlink::{InstrumentError, InstrumentInterface};

/// The number of digital I/O lines on the instrument.
const NUM_LINES: usize = 8;

/// The direction a digital line can be configured to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    /// The line is read by the instrument.
    Input,
    /// The line is driven by the instrument.
    Output,
}

impl LineDirection {
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            LineDirection::Input => "IN",
            LineDirection::Output => "OUT",
        }
    }
}

impl Display for LineDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineDirection::Input => write!(f, "Input"),
            LineDirection::Output => write!(f, "Output"),
        }
    }
}

/// The digital I/O subsystem of the VirtualBench.
///
/// Lines are zero-indexed. **This structure can only be created through the
/// [`VirtualBench`](crate::VirtualBench) struct.**
pub struct DigitalIo<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    num_lines: usize,
}

impl<T: InstrumentInterface> DigitalIo<T> {
    /// Get a new digital I/O handle for the given instrument interface.
    pub(crate) fn new(interface: Arc<Mutex<T>>) -> Self {
        DigitalIo {
            interface,
            num_lines: NUM_LINES,
        }
    }

    /// Configure the direction of a digital line.
    ///
    /// # Arguments
    /// * `line` - The zero-indexed line to configure.
    /// * `direction` - The direction to configure the line to.
    pub fn configure_line_direction(
        &mut self,
        line: usize,
        direction: LineDirection,
    ) -> Result<(), InstrumentError> {
        self.check_line(line)?;
        self.sendcmd(&format!("DIO:DIR {line},{}", direction.as_cmd_str()))
    }

    /// Read the state of a single digital line.
    ///
    /// Returns `true` if the line is high, otherwise `false`.
    pub fn read_line(&mut self, line: usize) -> Result<bool, InstrumentError> {
        self.check_line(line)?;
        let resp = self.query(&format!("DIO:READ? {line}"))?;
        parse_line_state(resp.trim()).ok_or(InstrumentError::ResponseParseError(resp))
    }

    /// Read the state of several digital lines at once.
    ///
    /// The states are returned in the order the lines were requested. At least one line must
    /// be requested.
    pub fn read_lines(&mut self, lines: &[usize]) -> Result<Vec<bool>, InstrumentError> {
        if lines.is_empty() {
            return Err(InstrumentError::InvalidArgument(
                "At least one line must be requested".to_string(),
            ));
        }
        for &line in lines {
            self.check_line(line)?;
        }
        let line_list = lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>()
            .join(",");
        let resp = self.query(&format!("DIO:READ? {line_list}"))?;

        let states: Option<Vec<bool>> = resp.split(',').map(|s| parse_line_state(s.trim())).collect();
        match states {
            Some(states) if states.len() == lines.len() => Ok(states),
            _ => Err(InstrumentError::ResponseParseError(resp)),
        }
    }

    /// Drive a digital line high or low.
    ///
    /// The line must have been configured as an output before.
    ///
    /// # Arguments
    /// * `line` - The zero-indexed line to drive.
    /// * `value` - The value to drive (true for high, false for low).
    pub fn write_line(&mut self, line: usize, value: bool) -> Result<(), InstrumentError> {
        self.check_line(line)?;
        let value = if value { "1" } else { "0" };
        self.sendcmd(&format!("DIO:WRIT {line},{value}"))
    }

    /// Validate a line index against the number of lines on the instrument.
    fn check_line(&self, line: usize) -> Result<(), InstrumentError> {
        if line >= self.num_lines {
            return Err(InstrumentError::ChannelIndexOutOfRange {
                idx: line,
                nof_channels: self.num_lines,
            });
        }
        Ok(())
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

impl<T: InstrumentInterface> Clone for DigitalIo<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            num_lines: self.num_lines,
        }
    }
}

/// Parse a single "0"/"1" line state.
fn parse_line_state(s: &str) -> Option<bool> {
    match s {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
