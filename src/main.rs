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

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, command};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use compdb::configuration::{io, Configuration};
use compdb::generator::Generator;
use compdb::template::Templates;

fn main() -> Result<()> {
    let arguments = Arguments::parse().validate()?;
    let application = Application::configure(arguments)?;
    application.run()?;

    Ok(())
}

#[derive(Debug, PartialEq)]
struct Arguments {
    output: String,
    config: Option<String>,
    verbose: u8,
}

impl Arguments {
    fn parse() -> Self {
        let matches = command!()
            .args(&[
                arg!(-o --output <FILE> "Path of the result file")
                    .default_value("compile_commands.json")
                    .hide_default_value(false),
                arg!(-c --config <FILE> "Path of the config file"),
                arg!(-v --verbose ... "Sets the level of verbosity")
                    .action(ArgAction::Count),
            ])
            .get_matches();

        Arguments {
            output: matches.get_one::<String>("output")
                .expect("output is defaulted")
                .clone(),
            config: matches.get_one::<String>("config")
                .map(String::to_string),
            verbose: matches.get_count("verbose"),
        }
    }

    fn validate(self) -> Result<Self> {
        if self.output.is_empty() {
            return Err(anyhow!("Output file name can't be empty."));
        }

        Ok(self)
    }

    fn prepare_logging(&self) -> Result<()> {
        let level = match &self.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let mut logger = SimpleLogger::new()
            .with_level(level);
        if level <= LevelFilter::Debug {
            logger = logger.with_local_timestamps()
        }
        logger.init()?;

        Ok(())
    }

    fn configuration(&self) -> Result<Configuration> {
        let configuration = match self.config.as_deref() {
            Some("-") | Some("/dev/stdin") =>
                io::from_stdin()
                    .context("Failed to read configuration from stdin")?,
            Some(file) =>
                io::from_file(Path::new(file))
                    .with_context(|| format!("Failed to read configuration from file: {}", file))?,
            None =>
                Configuration::default(),
        };
        Ok(configuration)
    }
}

#[derive(Debug, PartialEq)]
struct Application {
    arguments: Arguments,
    templates: Templates,
}

impl Application {
    fn configure(arguments: Arguments) -> Result<Self> {
        arguments.prepare_logging()?;

        let templates = arguments.configuration()?
            .templates()
            .context("Failed to resolve the project directory")?;
        log::debug!("{:?}", templates);

        Ok(Application { arguments, templates })
    }

    fn run(self) -> Result<()> {
        let output = self.arguments.output;
        let generator = Generator::new(self.templates);

        // The source files are taken from the current working directory.
        let count = generator.generate(Path::new("."), Path::new(&output))
            .with_context(|| format!("Failed to generate compilation database: {}", output))?;
        log::info!("{} entries written into {}", count, output);

        Ok(())
    }
}
