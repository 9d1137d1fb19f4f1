//! CLI support for non-command bits

use crate::cli;
use crate::cli::common::{resolve_program, Command};
use crate::project;
use clap::{AppSettings, Arg, ArgSettings};
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!().setting(AppSettings::SubcommandRequiredElseHelp);
    app = app.arg(
        Arg::with_name("program")
            .long("program")
            .value_name("myapp")
            .takes_value(true)
            .help("Which program in the project to analyze")
            .set(ArgSettings::Global),
    );
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name("avrdis.json")
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();
    let (command, submatches) = matches.subcommand();
    let submatches = submatches.ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "Please enter a command")
    })?;
    let command = Command::from_str(command).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "Unknown command")
    })?;

    let project_filename = matches
        .value_of("project")
        .or_else(|| submatches.value_of("project"));
    let version = matches
        .value_of("program")
        .or_else(|| submatches.value_of("program"));
    let prog = resolve_program(
        project_filename,
        version,
        &project::Program::from_arg_matches(submatches),
    )?;

    match command {
        Command::Disassemble => cli::dis(&prog)?,
        Command::Scan => cli::scan(&prog)?,
    };

    Ok(())
}
