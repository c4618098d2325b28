/*  Copyright (C) 2012-2023 by László Nagy
    This file is part of Bear.

    Bear is a tool to generate compilation database for clang tooling.

    Bear is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    Bear is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::path::PathBuf;

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::template::{Argument, PerFileTemplate, StaticRecord, Templates};

// Represents the application configuration.
//
// Every attribute is optional, the missing ones are taken from the
// built-in templates.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Configuration {
    // relative path is resolved against the current working directory
    pub directory: Option<PathBuf>,
    // will default to ".c"
    pub source_suffix: Option<String>,
    pub per_file: Option<PerFile>,
    pub trailing: Option<Trailing>,
}

// Controls how the record of a single source file looks like.
//
// The arguments are strings, where "{source}", "{object}" and "{dependency}"
// stand for the source file name, the object file and the dependency file
// names. The latter two are placed into the configured directories.
#[derive(Debug, Deserialize, PartialEq)]
pub struct PerFile {
    pub arguments: Option<Vec<Argument>>,
    // will default to "obj"
    pub object_directory: Option<PathBuf>,
    // will default to ".deps"
    pub dependency_directory: Option<PathBuf>,
}

// Controls the record which is appended after the source file records.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Trailing {
    pub arguments: Option<Vec<String>>,
    pub file: Option<PathBuf>,
}

impl Configuration {
    /// Merge the configured values over the built-in templates.
    pub fn templates(self) -> Result<Templates, std::io::Error> {
        let mut templates = Templates::default();

        if let Some(directory) = self.directory {
            templates.directory = directory.absolutize()?.to_path_buf();
        }
        if let Some(suffix) = self.source_suffix {
            templates.source_suffix = suffix;
        }
        if let Some(per_file) = self.per_file {
            let PerFileTemplate { arguments, object_directory, dependency_directory } = templates.per_file;
            templates.per_file = PerFileTemplate {
                arguments: per_file.arguments.unwrap_or(arguments),
                object_directory: per_file.object_directory.unwrap_or(object_directory),
                dependency_directory: per_file.dependency_directory.unwrap_or(dependency_directory),
            };
        }
        if let Some(trailing) = self.trailing {
            let StaticRecord { arguments, file } = templates.trailing;
            templates.trailing = StaticRecord {
                arguments: trailing.arguments.unwrap_or(arguments),
                file: trailing.file.unwrap_or(file),
            };
        }

        Ok(templates)
    }
}

pub mod io {
    use std::io::stdin;

    use thiserror::Error;

    use super::*;

    /// This error type encompasses any error that can be returned by this module.
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("IO error")]
        IoError(#[from] std::io::Error),
        #[error("Syntax error")]
        SyntaxError(#[from] serde_json::Error),
    }

    /// Load the content of the given file and parse it as Configuration.
    pub fn from_file(file: &std::path::Path) -> Result<Configuration, Error> {
        let reader = std::fs::OpenOptions::new().read(true).open(file)?;
        let result = from_reader(reader)?;

        Ok(result)
    }

    pub fn from_stdin() -> Result<Configuration, Error> {
        let reader = stdin();
        let result = from_reader(reader)?;

        Ok(result)
    }

    /// Load the content of the given stream and parse it as Configuration.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Configuration, serde_json::Error> {
        serde_json::from_reader(reader)
    }

}
