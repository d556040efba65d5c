use std::collections::BTreeMap;
use std::path::Path;

use chrono::DateTime;

use filedirect::direct::{FilesystemDirect, FilesystemProvider};
use filedirect::entry::PathEntry;

use crate::error::{Error, Result};

pub fn run(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();
    let include_hidden = !matches.is_present("no-hidden");
    let recursive = matches.is_present("recursive");

    let fs = FilesystemDirect::new();
    let list = fs
        .directory_list(Path::new(path), include_hidden, recursive)
        .ok_or_else(|| Error::NotFound(format!("Cannot list {}", path)))?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    print_listing(&list, "");
    Ok(())
}

fn print_listing(list: &BTreeMap<String, PathEntry>, prefix: &str) {
    for entry in list.values() {
        println!(
            "{} {:>8} {:>8} {:>9} {} {}{}",
            entry.permission_h,
            entry.owner.as_deref().unwrap_or("-"),
            entry.group.as_deref().unwrap_or("-"),
            entry.size,
            format_mtime(entry.last_modified),
            prefix,
            entry.name,
        );
        if let Some(children) = &entry.children {
            if !children.is_empty() {
                let nested = format!("{}{}/", prefix, entry.name);
                print_listing(children, &nested);
            }
        }
    }
}

fn format_mtime(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(datetime) => datetime.format("%b %e %H:%M").to_string(),
        None => "-".to_string(),
    }
}
