//! Tests for the cDAQ 9211 thermocouple module driver.

use rstest::*;

use benchlink::{InstrumentError, LoopbackInterfaceString};

use ni_cdaq9211::*;

// Type alias for the loopback interface with the Cdaq9211 driver.
type Cdaq9211Lbk = Cdaq9211<LoopbackInterfaceString>;

/// Function that creates a new Cdaq9211 instance with the given input and output commands.
fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> Cdaq9211Lbk {
    let term = "\n";
    let h2i: Vec<String> = host2inst.iter().map(|s| s.to_string()).collect();
    let i2h: Vec<String> = inst2host.iter().map(|s| s.to_string()).collect();
    let interface = LoopbackInterfaceString::new(h2i, i2h, term);
    Cdaq9211::try_new(interface).unwrap()
}

#[fixture]
fn emp_inst() -> Cdaq9211Lbk {
    crt_inst(vec![], vec![])
}

/// Empty initialization should always pass.
#[rstest]
fn test_initialization(_emp_inst: Cdaq9211Lbk) {}

/// Get the name from the instrument.
#[rstest]
fn test_get_name() {
    let mut inst = crt_inst(vec!["*IDN?"], vec!["NI,cDAQ-9171,9211,1.2"]);
    assert_eq!(inst.get_name().unwrap(), "NI,cDAQ-9171,9211,1.2");
}

/// Get the temperature for each of the four channels.
#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_channel_get_temperature(#[case] ch_num: usize) {
    let mut inst = crt_inst(vec![&format!("MEAS:TEMP? {ch_num}")], vec!["21.50"]);
    let mut ch = inst.get_channel(ch_num).unwrap();
    let temp = ch.get_temperature().unwrap();
    assert_eq!(temp.as_celsius(), 21.5);
}

/// An open thermocouple is reported as an instrument status error.
#[rstest]
fn test_channel_get_temperature_open_thermocouple() {
    let mut inst = crt_inst(vec!["MEAS:TEMP? 2"], vec!["OTD"]);
    let mut ch = inst.get_channel(2).unwrap();
    match ch.get_temperature() {
        Err(InstrumentError::InstrumentStatus(msg)) => {
            assert!(msg.contains("channel 2"));
        }
        _ => panic!("Expected InstrumentStatus error"),
    }
}

/// A non-numeric reading cannot be parsed.
#[rstest]
fn test_channel_get_temperature_parse_error() {
    let mut inst = crt_inst(vec!["MEAS:TEMP? 0"], vec!["nan?"]);
    let mut ch = inst.get_channel(0).unwrap();
    assert!(matches!(
        ch.get_temperature(),
        Err(InstrumentError::ResponseParseError(_))
    ));
}

/// Channel indices beyond the module are rejected.
#[rstest]
fn test_get_channel_out_of_range(mut emp_inst: Cdaq9211Lbk) {
    match emp_inst.get_channel(4) {
        Err(InstrumentError::ChannelIndexOutOfRange { idx, nof_channels }) => {
            assert_eq!(idx, 4);
            assert_eq!(nof_channels, 4);
        }
        _ => panic!("Expected ChannelIndexOutOfRange error"),
    }
}

/// Ensure cloning an instrument and a channel works correctly.
#[rstest]
fn test_cloning(mut emp_inst: Cdaq9211Lbk) {
    let _ = emp_inst.clone();
    let ch = emp_inst.get_channel(1).unwrap();
    let _ = ch.clone();
}
