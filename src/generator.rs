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

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use json_compilation_db::Entry;
use thiserror::Error;

use crate::record::CompilationRecord;
use crate::template::Templates;

/// This error type encompasses any error that can be returned by this module.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to list directory: {path:?}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write file: {path:?}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Produces the compilation database of a directory.
pub struct Generator {
    templates: Templates,
}

impl Generator {
    pub fn new(templates: Templates) -> Self {
        Generator { templates }
    }

    /// Create one record for each source file in the given directory (in the
    /// order the filesystem lists them) and the static record as last.
    ///
    /// Only the entry names are checked, subdirectories are not visited.
    pub fn records(&self, source_dir: &Path) -> Result<Vec<CompilationRecord>, Error> {
        let into_error = |source| Error::Filesystem { path: source_dir.to_path_buf(), source };

        let mut records = vec![];
        for entry in std::fs::read_dir(source_dir).map_err(into_error)? {
            let entry = entry.map_err(into_error)?;
            match entry.file_name().into_string() {
                Ok(name) if self.templates.matches(&name) => {
                    log::debug!("source file found: {}", name);
                    records.push(self.templates.per_file_record(&name));
                }
                Ok(name) =>
                    log::trace!("entry is not a source file: {}", name),
                Err(name) =>
                    log::warn!("entry name is not valid UTF-8, skipped: {:?}", name),
            }
        }
        records.push(self.templates.static_record());

        log::debug!("Created {} records from {:?}.", records.len(), source_dir);
        Ok(records)
    }

    /// Write the records of the given directory into the output file.
    ///
    /// The output is fully replaced. Returns the number of records written.
    pub fn generate(&self, source_dir: &Path, output: &Path) -> Result<usize, Error> {
        let records = self.records(source_dir)?;
        let count = records.len();

        let into_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| Error::Io { path, source }
        };

        match output.to_str() {
            Some("-") | Some("/dev/stdout") =>
                write(records, stdout().lock()).map_err(into_error(output))?,
            _ => {
                let mut temp = output.as_os_str().to_owned();
                temp.push(".tmp");
                let temp = PathBuf::from(temp);

                let file = File::create(&temp).map_err(into_error(&temp))?;
                let result = write_file(records, file)
                    .map_err(into_error(&temp))
                    .and_then(|_| std::fs::rename(&temp, output).map_err(into_error(output)));
                // Don't leave the partial output behind.
                if result.is_err() {
                    if let Err(error) = std::fs::remove_file(&temp) {
                        log::warn!("Failed to remove file {:?}: {}", temp, error);
                    }
                }
                result?;
            }
        }

        Ok(count)
    }
}

// The file is closed when this returns.
fn write_file(records: Vec<CompilationRecord>, file: File) -> Result<(), std::io::Error> {
    let mut buffer = BufWriter::new(file);
    write(records, &mut buffer)?;
    buffer.flush()
}

/// Serialize the records as JSON compilation database.
pub fn write(records: Vec<CompilationRecord>, writer: impl Write) -> Result<(), std::io::Error> {
    let entries = records.into_iter().map(Entry::from);
    json_compilation_db::write(writer, entries)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error))
}
