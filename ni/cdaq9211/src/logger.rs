//! A background temperature logger.
//!
//! The logger spawns one worker thread that polls a [`Channel`] at a fixed interval and
//! appends every reading to a single-column CSV file, one Celsius value per row, in
//! acquisition order. The thread is stopped cooperatively through a shared flag and joined
//! when [`TempLogger::stop`] is called.

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use benchlink::{InstrumentError, InstrumentInterface};
use thiserror::Error;

use crate::Channel;

/// The errors the temperature logger might return.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TempLogError {
    /// Error while writing the CSV log file. See [`csv::Error`] for details.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Error while reading from the module. See [`InstrumentError`] for details.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

/// A background temperature logger for one thermocouple channel.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use ni_cdaq9211::{Cdaq9211, SerialInterfaceCdaq9211, TempLogger};
///
/// let interface = SerialInterfaceCdaq9211::simple("/dev/ttyUSB1").unwrap();
/// let mut inst = Cdaq9211::try_new(interface).unwrap();
/// let channel = inst.get_channel(0).unwrap();
///
/// let logger = TempLogger::start(channel, Duration::from_secs(1), "temperatures.csv").unwrap();
///
/// // ... run the measurement sequence on the main thread ...
///
/// let rows = logger.stop().unwrap();
/// println!("Logged {rows} temperature readings");
/// ```
pub struct TempLogger {
    handle: JoinHandle<Result<usize, TempLogError>>,
    stop: Arc<AtomicBool>,
}

impl TempLogger {
    /// Start logging the given channel to a CSV file.
    ///
    /// The CSV file is created (or truncated) right away, so path problems surface before
    /// the worker thread is spawned. The worker takes one reading per interval; a failed
    /// reading or write terminates the worker, and the error is reported by
    /// [`TempLogger::stop`].
    ///
    /// # Arguments
    /// * `channel` - The thermocouple channel to poll.
    /// * `interval` - The time between two readings.
    /// * `path` - File path of the CSV log.
    pub fn start<T, P>(
        mut channel: Channel<T>,
        interval: Duration,
        path: P,
    ) -> Result<Self, TempLogError>
    where
        T: InstrumentInterface + Send + 'static,
        P: AsRef<Path>,
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        log::info!("Starting temperature logging, one reading every {interval:?}");
        let handle = thread::spawn(move || {
            let mut rows = 0_usize;
            while !stop_flag.load(Ordering::Relaxed) {
                let temperature = channel.get_temperature()?;
                wtr.write_record([temperature.as_celsius().to_string()])?;
                wtr.flush().map_err(csv::Error::from)?;
                rows += 1;
                thread::sleep(interval);
            }
            Ok(rows)
        });

        Ok(TempLogger { handle, stop })
    }

    /// Stop the logger and wait for the worker thread to finish.
    ///
    /// Returns the number of rows that were written to the log file, or the error that
    /// terminated the worker early.
    pub fn stop(self) -> Result<usize, TempLogError> {
        self.stop.store(true, Ordering::Relaxed);
        let result = self
            .handle
            .join()
            .expect("Logger thread should not panic");
        if let Ok(rows) = &result {
            log::info!("Temperature logging stopped after {rows} readings");
        }
        result
    }
}
