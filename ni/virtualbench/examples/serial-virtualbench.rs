use ni_virtualbench::{LineDirection, SerialInterfaceVirtualBench, VirtualBench};

fn main() {
    env_logger::init();

    let port = "/dev/ttyUSB0";

    // Get our serial instrument interface
    let interface = SerialInterfaceVirtualBench::simple(port).expect("Failed to open serial port");

    // Now we can open the VirtualBench with the serial interface.
    let mut bench = VirtualBench::try_new(interface).unwrap();
    println!("Instrument ID: {}", bench.get_name().unwrap());

    // Take a DC voltage reading with the DMM
    let voltage = bench.dmm().measure_dc_voltage().unwrap();
    println!("DMM reading: {voltage}");

    // Read digital line 0
    let mut dio = bench.digital_io();
    dio.configure_line_direction(0, LineDirection::Input).unwrap();
    println!("Line 0 is high: {}", dio.read_line(0).unwrap());

    bench.release();
}
