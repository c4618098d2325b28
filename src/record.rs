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

use json_compilation_db::Entry;

/// Represents a single compiler invocation of the compilation database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationRecord {
    pub directory: PathBuf,
    pub arguments: Vec<String>,
    pub file: PathBuf,
}

// The output field is not part of our records, it won't be emitted.
impl From<CompilationRecord> for Entry {
    fn from(value: CompilationRecord) -> Self {
        Entry {
            file: value.file,
            arguments: value.arguments,
            directory: value.directory,
            output: None,
        }
    }
}

impl From<Entry> for CompilationRecord {
    fn from(value: Entry) -> Self {
        CompilationRecord {
            directory: value.directory,
            arguments: value.arguments,
            file: value.file,
        }
    }
}
