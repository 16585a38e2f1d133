//! Helpers to save, load, and plot acquired signals.
//!
//! A signal is an ordered slice of floating-point amplitude samples, as returned by one
//! acquisition call of an instrument driver. The sample rate is not stored with the data;
//! where it matters, the caller supplies it.
//!
//! The on-disk format is a single-column CSV file with one value per row, no header, in
//! acquisition order.
//!
//! # Example
//!
//! ```no_run
//! let signal = vec![0.0, 0.5, 1.0, 0.5, 0.0];
//!
//! sigio::plot_signal(&signal, Some(1000.0), "My Signal");
//! sigio::save_signal_csv("signal.csv", &signal).unwrap();
//!
//! let read_back = sigio::load_signal_csv("signal.csv").unwrap();
//! assert_eq!(read_back, signal);
//! ```

#![warn(missing_docs)]

use std::path::Path;

use textplots::{Chart, Plot, Shape};
use thiserror::Error;

/// Errors that can occur when saving or loading signals.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignalError {
    /// Error while reading or writing the CSV file. See [`csv::Error`] for details.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A row of the CSV file could not be parsed as a sample. The error contains the row
    /// that could not be parsed.
    #[error("CSV row could not be parsed as a sample: {0}")]
    RowParseError(String),
}

/// Save a signal to a CSV file at the given path.
///
/// One value is written per row, no header, in the order the samples were acquired.
///
/// # Arguments
/// * `path` - File path to save the CSV to.
/// * `signal` - The signal samples.
pub fn save_signal_csv<P: AsRef<Path>>(path: P, signal: &[f64]) -> Result<(), SignalError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for value in signal {
        wtr.write_record([value.to_string()])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Load a signal from a single-column CSV file at the given path.
///
/// # Arguments
/// * `path` - File path to load the CSV from.
pub fn load_signal_csv<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, SignalError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut signal = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = record.get(0).unwrap_or_default();
        let value = field
            .trim()
            .parse::<f64>()
            .map_err(|_| SignalError::RowParseError(field.to_string()))?;
        signal.push(value);
    }
    Ok(signal)
}

/// Plot a signal as a line chart in the terminal.
///
/// If a sample rate is provided, the x axis is the time in seconds, otherwise it is the
/// sample index. Nothing is plotted for an empty signal.
///
/// # Arguments
/// * `signal` - The signal samples.
/// * `sample_rate` - Optional sample rate in Hz.
/// * `title` - Title that is printed above the chart.
pub fn plot_signal(signal: &[f64], sample_rate: Option<f64>, title: &str) {
    if signal.is_empty() {
        println!("{title}: no samples to plot");
        return;
    }

    let to_x = |i: usize| match sample_rate {
        Some(rate) => i as f32 / rate as f32,
        None => i as f32,
    };
    let plot_data: Vec<(f32, f32)> = signal
        .iter()
        .enumerate()
        .map(|(i, &value)| (to_x(i), value as f32))
        .collect();

    let x_max = to_x(signal.len() - 1);
    println!("{title}");
    match sample_rate {
        Some(_) => println!("x: time (s), y: amplitude"),
        None => println!("x: sample, y: amplitude"),
    }
    Chart::new(120, 40, 0.0, x_max.max(1e-9))
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}

/// Build the time axis for a signal of the given length and sample rate.
///
/// Returns the acquisition instant of every sample in seconds, i.e., `i / sample_rate`.
pub fn time_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / sample_rate).collect()
}
