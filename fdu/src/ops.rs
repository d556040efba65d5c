use std::path::Path;

use filedirect::direct::{FilesystemDirect, FilesystemProvider};

use crate::debug_eprintln;
use crate::error::{Error, Result};
use crate::utils;

pub fn chmod(matches: &clap::ArgMatches) -> Result<()> {
    let mode = utils::parse_octal(matches.value_of("mode").unwrap())?;
    let path = matches.value_of("path").unwrap();
    let recursive = matches.is_present("recursive");

    let fs = FilesystemDirect::new();
    debug_eprintln!("chmod {:o} {} (recursive: {})", mode, path, recursive);
    if !fs.ch_mod(Path::new(path), Some(mode), recursive) {
        return Err(Error::OperationFailed(format!("chmod {}", path)));
    }
    Ok(())
}

pub fn chown(matches: &clap::ArgMatches) -> Result<()> {
    let owner = matches.value_of("owner").unwrap();
    let path = matches.value_of("path").unwrap();
    let recursive = matches.is_present("recursive");

    let fs = FilesystemDirect::new();
    if !fs.ch_own(Path::new(path), owner, recursive) {
        return Err(Error::OperationFailed(format!("chown {} {}", owner, path)));
    }
    Ok(())
}

pub fn chgrp(matches: &clap::ArgMatches) -> Result<()> {
    let group = matches.value_of("group").unwrap();
    let path = matches.value_of("path").unwrap();
    let recursive = matches.is_present("recursive");

    let fs = FilesystemDirect::new();
    if !fs.ch_grp(Path::new(path), group, recursive) {
        return Err(Error::OperationFailed(format!("chgrp {} {}", group, path)));
    }
    Ok(())
}

pub fn copy(matches: &clap::ArgMatches) -> Result<()> {
    let source = matches.value_of("source").unwrap();
    let destination = matches.value_of("destination").unwrap();
    let overwrite = matches.is_present("overwrite");
    let mode = match matches.value_of("mode") {
        Some(value) => Some(utils::parse_octal(value)?),
        None => None,
    };

    let fs = FilesystemDirect::new();
    if !fs.copy(Path::new(source), Path::new(destination), overwrite, mode) {
        return Err(Error::OperationFailed(format!(
            "cp {} {} (destination may already exist; see --overwrite)",
            source, destination
        )));
    }
    Ok(())
}

pub fn rename(matches: &clap::ArgMatches) -> Result<()> {
    let source = matches.value_of("source").unwrap();
    let destination = matches.value_of("destination").unwrap();
    let overwrite = matches.is_present("overwrite");

    let fs = FilesystemDirect::new();
    if !fs.move_path(Path::new(source), Path::new(destination), overwrite) {
        return Err(Error::OperationFailed(format!(
            "mv {} {} (destination may already exist; see --overwrite)",
            source, destination
        )));
    }
    Ok(())
}

pub fn remove(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();
    let recursive = matches.is_present("recursive");

    let fs = FilesystemDirect::new();
    if !fs.delete(Path::new(path), recursive, None) {
        return Err(Error::OperationFailed(format!("rm {}", path)));
    }
    Ok(())
}

pub fn make_dir(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();
    let mode = match matches.value_of("mode") {
        Some(value) => Some(utils::parse_octal(value)?),
        None => None,
    };

    let fs = FilesystemDirect::new();
    if !fs.mk_dir(Path::new(path), mode, None, None) {
        return Err(Error::OperationFailed(format!("mkdir {}", path)));
    }
    Ok(())
}

pub fn touch(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();

    let fs = FilesystemDirect::new();
    if !fs.touch(Path::new(path), None, None) {
        return Err(Error::OperationFailed(format!("touch {}", path)));
    }
    Ok(())
}
