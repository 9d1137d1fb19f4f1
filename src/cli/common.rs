//! Common utilities for command implementations

use crate::memory::{ihex, Image};
use crate::project::{Program, Project};
use clap::{App, Arg, SubCommand};
use std::io;
use std::str::FromStr;

/// Project file read when none is named on the command line.
const DEFAULT_PROJECT: &str = "avrdis.json";

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Disassemble,
    Scan,
}

impl Command {
    /// Enumerate all commands that avrdis recognizes.
    pub fn enumerate() -> Vec<Self> {
        vec![Command::Disassemble, Command::Scan]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Disassemble => Program::configure_app(
                SubCommand::with_name("dis").about("Disassemble an image into assembly source"),
            )
            .arg(
                Arg::with_name("listing")
                    .short("l")
                    .long("listing")
                    .help("Prefix each line with its word address and raw word"),
            ),
            Command::Scan => Program::configure_app(
                SubCommand::with_name("scan").about("List the labels and data regions of an image"),
            ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "dis" => Ok(Command::Disassemble),
            "scan" => Ok(Command::Scan),
            _ => Err(()),
        }
    }
}

/// Work out the program to analyze.
///
/// Settings come from the named program in the project file (or the first
/// one, if none is named), overridden by whatever was given on the command
/// line. The default project file need not exist; one named explicitly must.
pub fn resolve_program(
    project_filename: Option<&str>,
    name: Option<&str>,
    cli_prog: &Program,
) -> io::Result<Program> {
    let project = match project_filename {
        Some(filename) => Project::read(filename)?,
        None => match Project::read(DEFAULT_PROJECT) {
            Ok(project) => project,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Project::default(),
            Err(e) => return Err(e),
        },
    };

    let base = match name {
        Some(name) => project.program(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("The specified program {} does not exist.", name),
            )
        })?,
        None => project
            .default_program()
            .map(|(_, prog)| prog.clone())
            .unwrap_or_default(),
    };

    Ok(base.apply_override(cli_prog))
}

/// Read the program's image file.
pub fn load_image(prog: &Program) -> io::Result<Image> {
    let path = prog.iter_images().next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "Did not specify an image")
    })?;

    ihex::read_file(path).map_err(|e| {
        let e = io::Error::from(e);

        io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
    })
}
