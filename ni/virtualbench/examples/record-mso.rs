//! Record a signal on MSO channel 1, plot it, and dump it to a CSV file.

use std::time::Duration;

use measurements::Voltage;
use ni_virtualbench::{MsoChannel, SerialInterfaceVirtualBench, VirtualBench};

const PORT: &str = "/dev/ttyUSB0";
const SAMPLE_RATE: f64 = 100_000.0;
const MEAS_TIME: Duration = Duration::from_secs(3);
const OUTPUT: &str = "mso_signal.csv";

fn main() {
    env_logger::init();

    let interface = SerialInterfaceVirtualBench::simple(PORT).expect("Failed to open serial port");
    let mut bench = VirtualBench::try_new(interface).unwrap();

    let signal = bench
        .mso()
        .record_signal(
            MsoChannel::Ch1,
            MEAS_TIME,
            SAMPLE_RATE,
            Voltage::from_volts(0.1),
            Voltage::from_volts(0.0),
        )
        .unwrap();
    println!("Recorded {} samples", signal.len());

    sigio::plot_signal(&signal, Some(SAMPLE_RATE), "MSO Signal");
    sigio::save_signal_csv(OUTPUT, &signal).unwrap();
    println!("Signal saved to {OUTPUT}");

    bench.release();
}
