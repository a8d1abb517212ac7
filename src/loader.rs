use std::fs;
use std::io;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use ls8lib::MEMORY_SIZE;

use crate::errors::{LoadError, LoadResult};


lazy_static! {

    static ref BYTE_REGEX: Regex = Regex::new(
        r"^[01]{8}$"
    ).unwrap();

}


/// Everything after a `#` is a comment.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line
    }
}


/// Parse LS-8 program text: one 8-digit binary literal per line, `#` comments, blank lines ignored.
pub fn parse_program(source: &str) -> LoadResult<Vec<u8>> {

    let mut program = Vec::new();

    for (line_index, line) in source.lines().enumerate() {

        let token = strip_comment(line).trim();
        if token.is_empty() {
            continue;
        }

        if !BYTE_REGEX.is_match(token) {
            return Err(LoadError::MalformedLiteral { line: line_index + 1, token: token.to_string() });
        }

        // Eight binary digits always fit in a byte.
        let byte = u8::from_str_radix(token, 2)
            .map_err(|_| LoadError::MalformedLiteral { line: line_index + 1, token: token.to_string() })?;
        program.push(byte);
    }

    if program.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge { size: program.len(), capacity: MEMORY_SIZE });
    }

    Ok(program)
}


/// Read and parse a program file.
pub fn load_program(file_path: &Path) -> LoadResult<Vec<u8>> {

    let source = fs::read_to_string(file_path)
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(file_path.to_path_buf()),
            _ => LoadError::Io { path: file_path.to_path_buf(), source: err },
        })?;

    let program = parse_program(&source)?;
    debug!("Parsed {} bytes from \"{}\"", program.len(), file_path.display());
    Ok(program)
}
