#[macro_use]
extern crate log;

use std::io;

use failure::Error;
use source_load_line::evaluate;
use source_load_line::input::LoadSelection;
use source_load_line::options::{CliCommand, CliOpt, Opt};
use source_load_line::render::{Renderer, ReportRenderer};
use source_load_line::session::Session;
use structopt::StructOpt;

fn main() -> Result<(), Error> {
    let opt = CliOpt::from_args();
    opt.initialize_logging()?;

    let source = opt.source()?;
    let range = opt.load_range()?;
    let mut renderers = opt.file_renderers()?;
    info!(
        "Source: U0={} V, Ri={} Ω",
        source.open_circuit_voltage(),
        source.internal_resistance()
    );

    match opt.command() {
        CliCommand::Eval {
            selection,
            detailed,
        } => {
            let load_resistance = LoadSelection::from(selection).resolve(&range)?;
            let evaluation = evaluate(&source, load_resistance, opt.samples)?;
            ReportRenderer::new(io::stdout())
                .detailed(detailed)
                .render(&evaluation)?;
            renderers.render(&evaluation)?;
        }
        CliCommand::Interactive { selection } => {
            let stdin = io::stdin();
            let mut session = Session::new(source, range, opt.samples, selection.into());
            session.run(stdin.lock(), io::stdout(), &mut renderers)?;
        }
    }
    Ok(())
}
