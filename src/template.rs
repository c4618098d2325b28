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

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::record::CompilationRecord;

/// One element of the per-file argument list.
///
/// The placeholder variants are filled with names derived from the source
/// file when the template is instantiated, literals are copied as they are.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum Argument {
    Literal(String),
    Source,
    Object,
    Dependency,
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        match value.as_str() {
            "{source}" =>
                Argument::Source,
            "{object}" =>
                Argument::Object,
            "{dependency}" =>
                Argument::Dependency,
            _ =>
                Argument::Literal(value),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::from(value.to_string())
    }
}

/// Describes how to compile a single source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerFileTemplate {
    pub arguments: Vec<Argument>,
    pub object_directory: PathBuf,
    pub dependency_directory: PathBuf,
}

/// The record which is appended after the per-file records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticRecord {
    pub arguments: Vec<String>,
    pub file: PathBuf,
}

/// Everything needed to produce the records of one run.
///
/// The working directory is shared by both templates, so every record of
/// a run reports the same directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Templates {
    pub directory: PathBuf,
    pub source_suffix: String,
    pub per_file: PerFileTemplate,
    pub trailing: StaticRecord,
}

impl Templates {
    pub fn matches(&self, name: &str) -> bool {
        name.ends_with(self.source_suffix.as_str())
    }

    /// Create the record of the given source file.
    pub fn per_file_record(&self, name: &str) -> CompilationRecord {
        let stem = name.strip_suffix(self.source_suffix.as_str())
            .unwrap_or(name);
        let object = derived_path(&self.per_file.object_directory, stem, "o");
        let dependency = derived_path(&self.per_file.dependency_directory, stem, "d");

        let arguments = self.per_file.arguments.iter()
            .map(|argument| match argument {
                Argument::Literal(value) => value.clone(),
                Argument::Source => name.to_string(),
                Argument::Object => object.clone(),
                Argument::Dependency => dependency.clone(),
            })
            .collect();

        CompilationRecord {
            directory: self.directory.clone(),
            arguments,
            file: PathBuf::from(name),
        }
    }

    pub fn static_record(&self) -> CompilationRecord {
        CompilationRecord {
            directory: self.directory.clone(),
            arguments: self.trailing.arguments.clone(),
            file: self.trailing.file.clone(),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        DEFAULT_TEMPLATES.clone()
    }
}

fn derived_path(directory: &Path, stem: &str, extension: &str) -> String {
    directory.join(format!("{}.{}", stem, extension))
        .to_string_lossy()
        .into_owned()
}

lazy_static! {
    // Freestanding x86-64 kernel build.
    static ref DEFAULT_TEMPLATES: Templates = Templates {
        directory: PathBuf::from("/Users/martinboros/git/SignalOS"),
        source_suffix: String::from(".c"),
        per_file: PerFileTemplate {
            arguments: vec![
                "x86_64-unknown-linux-gnu-cc", "", "-I.", "-m64",
                "-mno-red-zone", "-mno-mmx", "-mno-sse", "-mno-sse2", "-mno-sse3", "-mno-3dnow",
                "-ffreestanding", "-fno-omit-frame-pointer", "-fno-pic",
                "-Wall", "-W", "-Wshadow", "-Wno-format", "-Wno-unused-parameter",
                "-Wstack-usage=1024", "-fno-stack-protector", "-std=gnu11", "-gdwarf",
                "-MD", "-MF", "{dependency}", "-MP", "",
                "-Os", "-fomit-frame-pointer", "-DWEENSYOS_KERNEL",
                "-c", "{source}", "-o", "{object}",
            ]
                .into_iter()
                .map(Argument::from)
                .collect(),
            object_directory: PathBuf::from("obj"),
            dependency_directory: PathBuf::from(".deps"),
        },
        // The last flag is a single argument.
        trailing: StaticRecord {
            arguments: vec!["gcc-14", "-Wall", "-I.", "-W-std=gnu++1z"]
                .into_iter()
                .map(String::from)
                .collect(),
            file: PathBuf::from("build/mkbootdisk.cc"),
        },
    };
}
