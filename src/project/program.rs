//! Program identifier

use crate::analysis::AddressRange;
use clap::{App, Arg, ArgMatches};
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Everything needed to disassemble one firmware image.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    #[serde(default)]
    images: Vec<PathBuf>,

    #[serde(default)]
    listing: Option<bool>,

    /// Ranges to disassemble even if they look like data.
    #[serde(default)]
    enable: Vec<AddressRange>,
}

fn validate_range(s: String) -> Result<(), String> {
    AddressRange::from_str(&s)
        .map(|_| ())
        .map_err(|_| format!("{} is not a valid BEGIN:END address range", s))
}

impl Program {
    /// Add the arguments describing a program to a subcommand.
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .value_name("image.hex")
                .index(1)
                .help("The Intel HEX image to analyze"),
        )
        .arg(
            Arg::with_name("enable")
                .short("e")
                .long("enable")
                .value_name("BEGIN:END")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(validate_range)
                .help("Word address range to disassemble even if it looks like data"),
        )
    }

    /// Construct a Program from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Program {
        Program {
            images: args
                .value_of("image")
                .map_or(Vec::new(), |s| vec![PathBuf::from(s)]),
            listing: match args.is_present("listing") {
                true => Some(true),
                false => None,
            },
            enable: args.values_of("enable").map_or(Vec::new(), |v| {
                v.filter_map(|s| AddressRange::from_str(s).ok()).collect()
            }),
        }
    }

    /// List all the image files related to a given program.
    pub fn iter_images(&self) -> impl Iterator<Item = &Path> {
        self.images.iter().map(|p| p.as_path())
    }

    /// Make relative image paths relative to `base` instead.
    pub fn resolve_images(&mut self, base: &Path) {
        for image in self.images.iter_mut() {
            if let Ok(relative) = RelativePathBuf::from_path(image.as_path()) {
                *image = relative.to_path(base);
            }
        }
    }

    pub fn is_listing(&self) -> bool {
        self.listing.unwrap_or(false)
    }

    pub fn enabled_ranges(&self) -> &[AddressRange] {
        &self.enable
    }

    /// Overlay another program's settings onto this one.
    ///
    /// Anything `other` specifies wins.
    pub fn apply_override(&self, other: &Program) -> Program {
        Program {
            images: match other.images.len() {
                0 => self.images.clone(),
                _ => other.images.clone(),
            },
            listing: other.listing.or(self.listing),
            enable: match other.enable.len() {
                0 => self.enable.clone(),
                _ => other.enable.clone(),
            },
        }
    }
}
