use std::path::PathBuf;

use clap::Parser;


#[derive(Parser)]
#[clap(author, about, version)]
pub struct CliParser {

    /// The LS-8 program file to execute.
    #[clap(required = true)]
    pub input_file: PathBuf,

    /// Set the initial stack pointer address.
    #[clap(short='s', long, value_parser = parse_address)]
    pub stack_start: Option<u8>,

    /// Print the machine state before every instruction.
    #[clap(short='t', long)]
    pub trace: bool,

    /// Execute in verbose mode.
    #[clap(short='v', long)]
    pub verbose: bool,

}


/// Accepts decimal or `0x`-prefixed hexadecimal.
fn parse_address(arg: &str) -> Result<u8, String> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => arg.parse::<u8>(),
    };
    parsed.map_err(|err| format!("\"{arg}\" is not a valid address: {err}"))
}
