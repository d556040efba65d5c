use filedirect::perms;

use crate::error::{Error, Result};
use crate::utils;

/// Convert a permission value, auto-detecting the direction: all-octal-digit
/// input is rendered symbolically, anything else is read as a symbolic
/// string and printed as octal.
pub fn run(matches: &clap::ArgMatches) -> Result<()> {
    let value = matches
        .value_of("value")
        .ok_or_else(|| Error::CliInputError("A mode value is required.".to_string()))?;

    if !value.is_empty() && value.chars().all(|c| ('0'..='7').contains(&c)) {
        let mode = utils::parse_octal(value)?;
        // Rendered as a regular file; the input carries no filetype bits.
        println!("{}", perms::to_symbolic(0o100000 | (mode & 0o7777)));
    } else {
        println!("{:04o}", perms::to_octal(value));
    }
    Ok(())
}
