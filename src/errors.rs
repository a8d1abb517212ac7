use std::io;
use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use ls8lib::{Address, ByteCodes, ExitCodes};


pub type VmResult<T> = Result<T, VmError>;
pub type LoadResult<T> = Result<T, LoadError>;


/// Fatal conditions raised while the machine is executing. None of them is recoverable.
#[derive(Debug, Error)]
pub enum VmError {

    #[error("memory address {0:#04x} is out of bounds")]
    OutOfBounds(Address),

    #[error("register index {0} does not exist")]
    InvalidRegister(u8),

    #[error("illegal instruction {opcode:#010b} at address {pc:#04x}")]
    IllegalInstruction { opcode: u8, pc: Address },

    #[error("{0} is not an ALU operation")]
    UnsupportedAluOp(ByteCodes),

    /// A push with the stack pointer already at address 0.
    #[error("stack overflow: cannot push below address 0x00")]
    StackOverflow,

    /// A pop with the stack pointer already at the last memory cell.
    #[error("stack underflow: stack pointer would move past address 0xff")]
    StackUnderflow,

    #[error("could not write output: {0}")]
    Output(#[from] io::Error),

}

impl VmError {

    pub fn exit_code(&self) -> ExitCodes {
        match self {
            VmError::IllegalInstruction { .. } => ExitCodes::IllegalInstruction,
            VmError::Output(_) => ExitCodes::IoError,
            _ => ExitCodes::MachineFault,
        }
    }

}


/// Failures while turning a program file into a memory image.
#[derive(Debug, Error)]
pub enum LoadError {

    #[error("program file \"{}\" not found", .0.display())]
    NotFound(PathBuf),

    #[error("could not read program file \"{}\": {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("line {line}: \"{token}\" is not an 8-digit binary literal")]
    MalformedLiteral { line: usize, token: String },

    #[error("program is {size} bytes long but memory only holds {capacity}")]
    ProgramTooLarge { size: usize, capacity: usize },

}

impl LoadError {

    pub fn exit_code(&self) -> ExitCodes {
        match self {
            LoadError::NotFound(_) => ExitCodes::FileNotFound,
            LoadError::Io { .. } => ExitCodes::IoError,
            LoadError::MalformedLiteral { .. }
            | LoadError::ProgramTooLarge { .. } => ExitCodes::MalformedProgram,
        }
    }

}


/// Print the error on stderr and terminate the process with its exit code.
pub fn fatal(message: impl std::fmt::Display, code: ExitCodes) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(code.into());
}
