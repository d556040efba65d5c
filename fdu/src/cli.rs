use clap;

pub fn parse_flags<'a>() -> clap::ArgMatches<'a> {
    clap::App::new("fdu")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Direct filesystem utility (listing, permissions, folder discovery, session storage)")
        .arg(clap::Arg::from_usage("-d --debug 'Enable debug output'").global(true))
        .subcommand(
            clap::SubCommand::with_name("ls")
                .about("List a directory (or a single file's entry)")
                .args_from_usage(
                    "<path>            'Path to list'
                     -r --recursive    'Recurse into subdirectories'
                     --no-hidden       'Skip dot entries'
                     --json            'Emit the listing as JSON'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("mode")
                .about("Convert between octal and symbolic permissions")
                .arg(
                    clap::Arg::with_name("value")
                        .help("Octal mode (e.g. 644) or symbolic string (e.g. drwxr-xr-x)")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("chmod")
                .about("Change permissions")
                .args_from_usage(
                    "<mode>            'Octal mode to apply'
                     <path>            'Target path'
                     -r --recursive    'Apply to every entry below'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("chown")
                .about("Change the owner")
                .args_from_usage(
                    "<owner>           'User name or numeric uid'
                     <path>            'Target path'
                     -r --recursive    'Apply to every entry below'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("chgrp")
                .about("Change the group")
                .args_from_usage(
                    "<group>           'Group name or numeric gid'
                     <path>            'Target path'
                     -r --recursive    'Apply to every entry below'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("cp")
                .about("Copy a file")
                .args_from_usage(
                    "<source>          'Source path'
                     <destination>     'Destination path'
                     --overwrite       'Allow overwriting the destination'
                     --mode [mode]     'Octal mode for the copy'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("mv")
                .about("Move a file (rename, with copy+delete fallback)")
                .args_from_usage(
                    "<source>          'Source path'
                     <destination>     'Destination path'
                     --overwrite       'Allow overwriting the destination'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("rm")
                .about("Delete a file or directory tree")
                .args_from_usage(
                    "<path>            'Path to delete'
                     -r --recursive    'Delete directory contents too'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("mkdir")
                .about("Create a directory")
                .args_from_usage(
                    "<path>            'Directory to create'
                     --mode [mode]     'Octal mode (default 755)'",
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("touch")
                .about("Create a file or refresh its timestamps")
                .args_from_usage("<path> 'Path to touch'"),
        )
        .subcommand(
            clap::SubCommand::with_name("find")
                .about("Locate a folder, searching outward from the working directory")
                .args_from_usage("<folder> 'Folder path to locate'"),
        )
        .subcommand(
            clap::SubCommand::with_name("session")
                .about("Session file store maintenance")
                .subcommand(
                    clap::SubCommand::with_name("gc")
                        .about("Remove session files older than the given lifetime")
                        .args_from_usage(
                            "--cache-root <dir>        'Cache root holding the Session directory'
                             --save-path [rel]         'Save path below the Session directory'
                             --max-lifetime <seconds>  'Maximum session age in seconds'",
                        ),
                ),
        )
        .get_matches()
}
