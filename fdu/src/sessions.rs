use filedirect::session::{SessionFileStore, SessionHandler};

use crate::error::{Error, Result};

pub fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("gc", Some(cmd)) => gc(cmd),
        _ => Err(Error::CliInputError(
            "Invalid 'session' subcommand. Use --help for details.".to_string(),
        )),
    }
}

fn gc(matches: &clap::ArgMatches) -> Result<()> {
    let cache_root = matches.value_of("cache-root").unwrap();
    let save_path = matches.value_of("save-path").unwrap_or("");
    let max_lifetime: u64 = matches
        .value_of("max-lifetime")
        .unwrap()
        .parse()
        .map_err(|_| Error::CliInputError("max-lifetime must be a number of seconds".to_string()))?;

    let mut store = SessionFileStore::new(cache_root)?;
    store.open(save_path, "fdu")?;
    if !store.gc(max_lifetime) {
        return Err(Error::OperationFailed(
            "session garbage collection".to_string(),
        ));
    }
    println!("Session garbage collection complete.");
    Ok(())
}
