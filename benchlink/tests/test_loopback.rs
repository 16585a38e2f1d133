//! Test cases for the [`LoopbackInterfaceString`].

use rstest::*;

use benchlink::{InstrumentInterface, LoopbackInterfaceString};

/// A function that creates a new `LoopbackInterfaceString` with the given input and output
/// vectors.
fn crt_lbk(from_host: Vec<&str>, from_inst: Vec<&str>) -> LoopbackInterfaceString {
    let h2i: Vec<String> = from_host.iter().map(|s| s.to_string()).collect();
    let i2h: Vec<String> = from_inst.iter().map(|s| s.to_string()).collect();
    LoopbackInterfaceString::new(h2i, i2h, "\n")
}

/// Create a loopback interface that contains no commands.
#[fixture]
fn emp_lbk() -> LoopbackInterfaceString {
    crt_lbk(vec![], vec![])
}

/// Ensure `finalize` method passes if an empty loopback interface is used.
#[rstest]
fn finalize_test(mut emp_lbk: LoopbackInterfaceString) {
    emp_lbk.finalize();
}

/// Ensure `finalize` method panics if host commands are left in the loopback interface.
#[rstest]
#[should_panic]
fn finalize_test_panic_from_host() {
    let mut lbk = crt_lbk(vec!["cmd"], vec![]);
    lbk.finalize();
}

/// Ensure `finalize` method panics if instrument responses are left in the loopback
/// interface.
#[rstest]
#[should_panic]
fn finalize_test_panic_from_inst() {
    let mut lbk = crt_lbk(vec![], vec!["resp"]);
    lbk.finalize();
}

#[rstest]
fn sendcmd() {
    let mut lbk = crt_lbk(vec!["cmd1", "cmd2"], vec![]);
    lbk.sendcmd("cmd1").unwrap();
    lbk.sendcmd("cmd2").unwrap();
    lbk.finalize();
}

#[rstest]
#[should_panic]
fn sendcmd_mismatch() {
    let mut lbk = crt_lbk(vec!["cmd1"], vec![]);
    let _ = lbk.sendcmd("cmd3");
}

#[rstest]
fn terminator(mut emp_lbk: LoopbackInterfaceString) {
    assert_eq!(emp_lbk.get_terminator(), "\n");
    emp_lbk.set_terminator("\r\n");
    assert_eq!(emp_lbk.get_terminator(), "\r\n");
}

#[rstest]
fn query() {
    let mut lbk = crt_lbk(vec!["cmd1", "cmd2"], vec!["resp1", "resp2"]);
    let resp1 = lbk.query("cmd1").unwrap();
    assert_eq!(resp1, "resp1");
    let resp2 = lbk.query("cmd2").unwrap();
    assert_eq!(resp2, "resp2");
    lbk.finalize();
}
