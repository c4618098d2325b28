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

use std::ffi::OsString;

use anyhow::Result;
use clap::{command, Arg, ArgAction, Command};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use compdb::convert;

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Error)
        .init()?;

    let arguments = parse(std::env::args_os());

    // Malformed input is reported, but it's not a failure of the program.
    match convert::run(&arguments) {
        Ok(conversion) => println!("{}", conversion),
        Err(error) => println!("{}", error),
    }

    Ok(())
}

// Every token is taken as data, the argument count is checked by us.
fn cli() -> Command {
    command!()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("number")
                .action(ArgAction::Append)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

fn parse(arguments: impl Iterator<Item = OsString>) -> Vec<String> {
    cli().get_matches_from(escaped(arguments))
        .get_many::<String>("number")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

// Put the end-of-options marker in front of the user arguments, so a "--"
// given by the user is taken as a value too.
fn escaped(arguments: impl Iterator<Item = OsString>) -> Vec<OsString> {
    let mut arguments = arguments;
    let mut result: Vec<OsString> = arguments.next().into_iter().collect();
    result.push(OsString::from("--"));
    result.extend(arguments);
    result
}
