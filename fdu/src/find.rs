use filedirect::direct::{FilesystemDirect, FilesystemProvider};

use crate::error::{Error, Result};
use crate::utils;

pub fn run(matches: &clap::ArgMatches) -> Result<()> {
    let folder = matches.value_of("folder").unwrap();

    let mut fs = FilesystemDirect::new();
    fs.verbose = utils::is_debug_enabled();
    match fs.find_folder(folder) {
        Some(resolved) => {
            println!("{}", resolved);
            Ok(())
        }
        None => Err(Error::NotFound(folder.to_string())),
    }
}
