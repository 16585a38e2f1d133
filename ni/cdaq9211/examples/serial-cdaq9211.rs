use ni_cdaq9211::{Cdaq9211, SerialInterfaceCdaq9211};

fn main() {
    let port = "/dev/ttyUSB1";

    // Get our serial instrument interface
    let serial_inst = SerialInterfaceCdaq9211::simple(port).expect("Failed to open serial port");

    // Now we can open the cDAQ with the serial interface.
    let mut inst = Cdaq9211::try_new(serial_inst).unwrap();
    println!("Instrument ID: {}", inst.get_name().unwrap());

    // Query and print the temperature of all four thermocouple inputs
    for idx in 0..4 {
        let mut ch = inst.get_channel(idx).unwrap();
        println!("Channel {idx} temperature: {:?}", ch.get_temperature());
    }
}
