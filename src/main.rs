mod cli_parser;

use std::io;

use clap::error::ErrorKind;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use cli_parser::CliParser;
use ls8::errors;
use ls8::{loader, ExitCodes, VmOptions, VM};
use ls8lib::DEFAULT_STACK_START;


fn main() {

    let args = CliParser::try_parse().unwrap_or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            err.print().ok();
            std::process::exit(ExitCodes::Usage.into());
        }
    });

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .unwrap_or_else(|err| errors::fatal(err, ExitCodes::IoError));

    let program = loader::load_program(&args.input_file)
        .unwrap_or_else(|err| errors::fatal(&err, err.exit_code()));

    let options = VmOptions {
        stack_start: args.stack_start.unwrap_or(DEFAULT_STACK_START),
        trace: args.trace,
    };

    let mut vm = VM::new(options, io::stdout().lock());

    vm.load(&program)
        .unwrap_or_else(|err| errors::fatal(&err, err.exit_code()));

    if let Err(err) = vm.run() {
        errors::fatal(&err, err.exit_code());
    }

}
