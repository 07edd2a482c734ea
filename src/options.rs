use std::path::PathBuf;

use log::LevelFilter;
use simplelog::Config;
use structopt::StructOpt;

use crate::input::LoadSelection;
use crate::model::{
    LoadResistanceRange, SourceParameters, DEFAULT_INTERNAL_RESISTANCE, DEFAULT_LOAD_RESISTANCE,
    DEFAULT_OPEN_CIRCUIT_VOLTAGE, DEFAULT_SAMPLE_COUNT,
};
#[cfg(feature = "png")]
use crate::render::PngRenderer;
use crate::render::{CsvRenderer, Renderers};
use crate::Result;

pub trait Opt {
    fn initialize_logging(&self) -> Result<()>;
}

#[derive(StructOpt, Debug, Clone, Copy, PartialEq)]
pub struct SelectionOpt {
    /// Slider position [Ω]
    #[structopt(long = "slider", default_value = "2.5")]
    pub slider: f64,
    /// Value typed into the entry field [Ω]
    #[structopt(long = "entry", default_value = "2.5")]
    pub entry: f64,
    /// Use the entry value instead of the slider
    #[structopt(long = "set")]
    pub set: bool,
}

impl From<SelectionOpt> for LoadSelection {
    fn from(opt: SelectionOpt) -> Self {
        LoadSelection::new(opt.slider, opt.entry, opt.set)
    }
}

#[derive(StructOpt, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Evaluate a single load resistance and print the report
    #[structopt(name = "eval")]
    Eval {
        #[structopt(flatten)]
        selection: SelectionOpt,
        /// Also print the values with SI prefixes
        #[structopt(short = "d", long = "detailed")]
        detailed: bool,
    },
    /// Read slider/entry/set commands from stdin
    #[structopt(name = "interactive")]
    Interactive {
        #[structopt(flatten)]
        selection: SelectionOpt,
    },
}

#[derive(StructOpt, Debug)]
#[structopt(name = "source-load-line")]
pub struct CliOpt {
    /// Open-circuit voltage U0 [V]
    #[structopt(long = "u0", default_value = "4.95")]
    pub open_circuit_voltage: f64,
    /// Internal resistance Ri [Ω]
    #[structopt(long = "ri", default_value = "0.496")]
    pub internal_resistance: f64,
    /// Number of current samples per curve
    #[structopt(long = "samples", default_value = "400")]
    pub samples: usize,
    /// Smallest accepted load resistance [Ω]
    #[structopt(long = "min-load", default_value = "0.001")]
    pub min_load: f64,
    /// Largest accepted load resistance [Ω]
    #[structopt(long = "max-load", default_value = "10.0")]
    pub max_load: f64,
    /// Write the sampled curves here, gzip-compressed for *.gz
    #[structopt(long = "csv", parse(from_os_str))]
    pub csv: Option<PathBuf>,
    /// Write the chart here as PNG
    #[structopt(long = "png", parse(from_os_str))]
    pub png: Option<PathBuf>,
    /// Chart width in pixels, at least 200
    #[structopt(long = "width", default_value = "800")]
    pub width: i32,
    /// Chart height in pixels, at least 150
    #[structopt(long = "height", default_value = "600")]
    pub height: i32,
    /// Verbosity, repeat for more
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
    #[structopt(subcommand)]
    pub command: Option<CliCommand>,
}

impl Opt for CliOpt {
    fn initialize_logging(&self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        // stdout carries the report and the session prompt, keep logs off it
        simplelog::WriteLogger::init(level, Config::default(), std::io::stderr())
            .map_err(|e| failure::err_msg(format!("Can't initialize logging: {:?}", e)))?;
        Ok(())
    }
}

impl CliOpt {
    pub fn source(&self) -> Result<SourceParameters> {
        Ok(SourceParameters::new(self.open_circuit_voltage, self.internal_resistance)?)
    }

    pub fn load_range(&self) -> Result<LoadResistanceRange> {
        Ok(LoadResistanceRange::new(self.min_load, self.max_load)?)
    }

    /// The requested subcommand, a default `eval` when none was given.
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Eval {
            selection: SelectionOpt {
                slider: DEFAULT_LOAD_RESISTANCE,
                entry: DEFAULT_LOAD_RESISTANCE,
                set: false,
            },
            detailed: false,
        })
    }

    /// File outputs requested on the command line.
    pub fn file_renderers(&self) -> Result<Renderers> {
        let mut renderers = Renderers::new();
        if let Some(path) = &self.csv {
            renderers.push(CsvRenderer::new(path.clone()));
        }
        if let Some(path) = &self.png {
            self.push_png(&mut renderers, path.clone())?;
        }
        Ok(renderers)
    }

    #[cfg(feature = "png")]
    fn push_png(&self, renderers: &mut Renderers, path: PathBuf) -> Result<()> {
        renderers.push(PngRenderer::new(path, self.width, self.height)?);
        Ok(())
    }

    #[cfg(not(feature = "png"))]
    fn push_png(&self, _: &mut Renderers, _: PathBuf) -> Result<()> {
        Err(failure::err_msg("Built without PNG support"))
    }
}

impl Default for CliOpt {
    fn default() -> Self {
        CliOpt {
            open_circuit_voltage: DEFAULT_OPEN_CIRCUIT_VOLTAGE,
            internal_resistance: DEFAULT_INTERNAL_RESISTANCE,
            samples: DEFAULT_SAMPLE_COUNT,
            min_load: LoadResistanceRange::default().min,
            max_load: LoadResistanceRange::default().max,
            csv: None,
            png: None,
            width: 800,
            height: 600,
            verbose: 0,
            command: None,
        }
    }
}
