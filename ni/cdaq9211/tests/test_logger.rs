//! Tests for the background temperature logger.
//!
//! The loopback interface is not suitable here because the number of readings depends on
//! timing, so these tests use small local interfaces that answer every query the same way.

use std::{collections::VecDeque, fs, thread, time::Duration};

use rstest::*;

use benchlink::{InstrumentError, InstrumentInterface};

use ni_cdaq9211::{Cdaq9211, TempLogError, TempLogger};

/// An interface that answers every query with the same response line.
struct RepeatingInterface {
    response: &'static str,
    curr_bytes: VecDeque<u8>,
}

impl RepeatingInterface {
    fn new(response: &'static str) -> Self {
        RepeatingInterface {
            response,
            curr_bytes: VecDeque::new(),
        }
    }
}

impl InstrumentInterface for RepeatingInterface {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        for byte in buf.iter_mut() {
            if self.curr_bytes.is_empty() {
                self.curr_bytes = format!("{}\n", self.response).into_bytes().into();
            }
            *byte = self
                .curr_bytes
                .pop_front()
                .expect("Buffer was just refilled");
        }
        Ok(())
    }

    fn write_raw(&mut self, _data: &[u8]) -> Result<(), InstrumentError> {
        Ok(())
    }
}

/// The logger polls in the background and writes one Celsius value per row.
#[rstest]
fn test_logger_writes_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temperatures.csv");

    let mut inst = Cdaq9211::try_new(RepeatingInterface::new("23.5")).unwrap();
    let channel = inst.get_channel(0).unwrap();

    let logger = TempLogger::start(channel, Duration::from_millis(5), &path).unwrap();
    thread::sleep(Duration::from_millis(40));
    let rows = logger.stop().unwrap();

    assert!(rows >= 1);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), rows);
    for line in lines {
        assert_eq!(line.parse::<f64>().unwrap(), 23.5);
    }
}

/// A failed reading terminates the worker and the error is surfaced on stop.
#[rstest]
fn test_logger_surfaces_reading_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temperatures.csv");

    let mut inst = Cdaq9211::try_new(RepeatingInterface::new("OTD")).unwrap();
    let channel = inst.get_channel(0).unwrap();

    let logger = TempLogger::start(channel, Duration::from_millis(5), &path).unwrap();
    thread::sleep(Duration::from_millis(20));
    assert!(matches!(
        logger.stop(),
        Err(TempLogError::Instrument(InstrumentError::InstrumentStatus(_)))
    ));
}

/// An unwritable log path surfaces before the worker thread is spawned.
#[rstest]
fn test_logger_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("temperatures.csv");

    let mut inst = Cdaq9211::try_new(RepeatingInterface::new("23.5")).unwrap();
    let channel = inst.get_channel(0).unwrap();

    assert!(matches!(
        TempLogger::start(channel, Duration::from_millis(5), &path),
        Err(TempLogError::Csv(_))
    ));
}
