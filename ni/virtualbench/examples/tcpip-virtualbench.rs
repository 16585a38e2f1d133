use benchlink::TcpIpInterface;
use ni_virtualbench::VirtualBench;

fn main() {
    env_logger::init();

    // The VirtualBench can also be attached over ethernet.
    let interface = TcpIpInterface::try_new("192.168.10.20:5025").expect("Failed to connect");

    let mut bench = VirtualBench::try_new(interface).unwrap();
    println!("Instrument ID: {}", bench.get_name().unwrap());

    let mut ps = bench.power_supply();
    println!("Outputs enabled: {}", ps.outputs_enabled().unwrap());

    bench.release();
}
