#![allow(dead_code)]

use std::path::PathBuf;

use ls8::{VmError, VmOptions, VM};


pub const HLT: u8 = 0b00000001;
pub const LDI: u8 = 0b10000010;
pub const PRN: u8 = 0b01000111;
pub const MUL: u8 = 0b10100010;
pub const ADD: u8 = 0b10100000;
pub const PUSH: u8 = 0b01000101;
pub const POP: u8 = 0b01000110;
pub const CALL: u8 = 0b01010000;
pub const RET: u8 = 0b00010001;
pub const CMP: u8 = 0b10100111;
pub const JMP: u8 = 0b01010100;
pub const JEQ: u8 = 0b01010101;
pub const JNE: u8 = 0b01010110;


pub fn program_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("programs").join(name)
}


pub fn machine(code: &[u8]) -> VM<Vec<u8>> {
    let mut vm = VM::new(VmOptions::default(), Vec::new());
    vm.load(code).expect("program fits in memory");
    vm
}


/// Run `code` to completion and return the printed lines.
pub fn run(code: &[u8]) -> (Result<(), VmError>, Vec<String>) {
    let mut vm = machine(code);
    let result = vm.run();
    let output = String::from_utf8(vm.into_output()).expect("output is utf-8");
    (result, output.lines().map(str::to_string).collect())
}
