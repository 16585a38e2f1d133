use std::thread;
use std::time::Duration;

use measurements::{Current, Voltage};
use ni_cdaq9211::{Cdaq9211, SerialInterfaceCdaq9211, TempLogger};
use ni_virtualbench::{PsChannel, SerialInterfaceVirtualBench, VirtualBench};

const VB_PORT: &str = "/dev/ttyUSB0";
const CDAQ_PORT: &str = "/dev/ttyUSB1";

/// Heater voltages for the hot and cold phases of one cycle.
const HOT_VOLTS: f64 = 12.0;
const COLD_VOLTS: f64 = 0.0;
const CURRENT_LIMIT_A: f64 = 0.5;

const NUM_CYCLES: usize = 5;
const PHASE_DURATION: Duration = Duration::from_secs(300);
const LOG_INTERVAL: Duration = Duration::from_secs(1);
const LOG_FILE: &str = "temperatures.csv";

fn main() {
    env_logger::init();

    let interface = SerialInterfaceVirtualBench::simple(VB_PORT).unwrap();
    let mut bench = VirtualBench::try_new(interface).unwrap();
    println!("Bench: {}", bench.get_name().unwrap());

    let interface = SerialInterfaceCdaq9211::simple(CDAQ_PORT).unwrap();
    let mut cdaq = Cdaq9211::try_new(interface).unwrap();
    println!("Temperature module: {}", cdaq.get_name().unwrap());

    // Log the sample temperature in the background while the cycle runs on the main thread.
    let channel = cdaq.get_channel(0).unwrap();
    let logger = TempLogger::start(channel, LOG_INTERVAL, LOG_FILE).unwrap();

    let mut supply = bench.power_supply();
    supply
        .configure_voltage_output(
            PsChannel::P25V,
            Voltage::from_volts(COLD_VOLTS),
            Current::from_amperes(CURRENT_LIMIT_A),
        )
        .unwrap();
    supply.enable_all_outputs(true).unwrap();

    for cycle in 0..NUM_CYCLES {
        println!("Cycle {}: heating", cycle + 1);
        supply
            .configure_voltage_output(
                PsChannel::P25V,
                Voltage::from_volts(HOT_VOLTS),
                Current::from_amperes(CURRENT_LIMIT_A),
            )
            .unwrap();
        thread::sleep(PHASE_DURATION);

        println!("Cycle {}: cooling", cycle + 1);
        supply
            .configure_voltage_output(
                PsChannel::P25V,
                Voltage::from_volts(COLD_VOLTS),
                Current::from_amperes(CURRENT_LIMIT_A),
            )
            .unwrap();
        thread::sleep(PHASE_DURATION);
    }

    let rows = logger.stop().unwrap();
    println!("Logged {rows} temperature readings to {LOG_FILE}");

    bench.release();
    println!("All done.");
}
