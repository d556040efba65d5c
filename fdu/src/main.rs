extern crate fdu;

fn main() -> Result<(), fdu::error::Error> {
    let matches = fdu::cli::parse_flags();

    fdu::utils::initialize_debug_from_args(&matches);

    match matches.subcommand() {
        ("ls", Some(cmd)) => fdu::listing::run(cmd)?,
        ("mode", Some(cmd)) => fdu::modes::run(cmd)?,
        ("chmod", Some(cmd)) => fdu::ops::chmod(cmd)?,
        ("chown", Some(cmd)) => fdu::ops::chown(cmd)?,
        ("chgrp", Some(cmd)) => fdu::ops::chgrp(cmd)?,
        ("cp", Some(cmd)) => fdu::ops::copy(cmd)?,
        ("mv", Some(cmd)) => fdu::ops::rename(cmd)?,
        ("rm", Some(cmd)) => fdu::ops::remove(cmd)?,
        ("mkdir", Some(cmd)) => fdu::ops::make_dir(cmd)?,
        ("touch", Some(cmd)) => fdu::ops::touch(cmd)?,
        ("find", Some(cmd)) => fdu::find::run(cmd)?,
        ("session", Some(cmd)) => fdu::sessions::run(cmd)?,
        _ => println!("No subcommand given. Use --help for details."),
    }

    Ok(())
}
