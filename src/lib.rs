//! An interpreter for the LS-8, an 8-bit machine with 256 bytes of memory and eight registers.

pub mod alu;
pub mod errors;
pub mod exec;
pub mod flags;
pub mod loader;
pub mod memory;
pub mod registers;

pub use errors::{LoadError, VmError};
pub use exec::{State, VmOptions, VM};
pub use ls8lib::{ByteCodes, ExitCodes};
