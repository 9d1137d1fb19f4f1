//! Project configuration file representation

use crate::project::program::Program;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::{fs, io};

/// In-memory representation of the current project configuration.
///
/// This file is typically read from a file named `avrdis.json`, and it
/// contains information on all of the programs in the project.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Project {
    programs: BTreeMap<String, Program>,
}

impl Project {
    pub fn read<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
        let filename = filename.as_ref();
        let project_file = fs::File::open(filename)?;
        let project: Self = serde_json::from_reader(io::BufReader::new(project_file))?;

        Ok(project.resolve(filename.parent().unwrap_or_else(|| Path::new(""))))
    }

    /// Make each program's image paths relative to `base`.
    fn resolve(mut self, base: &Path) -> Self {
        for prog in self.programs.values_mut() {
            prog.resolve_images(base);
        }

        self
    }

    /// Get the program with the given name within the project.
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Get the project's default program.
    ///
    /// This is the first program in name order.
    pub fn default_program(&self) -> Option<(&String, &Program)> {
        self.programs.iter().next()
    }

    #[cfg(test)]
    pub fn from_json(json: &str, base: &Path) -> serde_json::Result<Self> {
        let project: Self = serde_json::from_str(json)?;

        Ok(project.resolve(base))
    }
}
