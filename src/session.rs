use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::evaluation::{evaluate, Evaluation};
use crate::input::LoadSelection;
use crate::model::{LoadResistanceRange, SourceParameters};
use crate::render::Renderer;
use crate::Result;

pub const HELP: &str = "\
commands:
  slider <ohms>   move the load resistance slider
  entry <ohms>    type a load resistance into the entry field
  set             use the entry value for this evaluation
  show            evaluate again with the current inputs
  help            print this text
  quit            leave the session";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Slider(f64),
    Entry(f64),
    Set,
    Show,
    Help,
    Quit,
}

fn parse_value(name: &str, arg: Option<&str>) -> Result<f64> {
    let arg = arg.ok_or_else(|| failure::err_msg(format!("{} needs a resistance", name)))?;
    arg.parse::<f64>()
        .map_err(|_| failure::err_msg(format!("{}: not a number: {}", name, arg)))
}

impl FromStr for Command {
    type Err = failure::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some("slider") => Command::Slider(parse_value("slider", words.next())?),
            Some("entry") => Command::Entry(parse_value("entry", words.next())?),
            Some("set") => Command::Set,
            Some("show") | None => Command::Show,
            Some("help") | Some("?") => Command::Help,
            Some("quit") | Some("exit") => Command::Quit,
            Some(other) => return Err(failure::err_msg(format!("Unknown command {}", other))),
        };
        if let Some(extra) = words.next() {
            return Err(failure::err_msg(format!("Unexpected argument {}", extra)));
        }
        Ok(command)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Evaluated(Evaluation),
    Help,
    Quit,
}

/// Slider, entry field and "set" button driving repeated evaluations.
///
/// Every input change triggers a fresh evaluation. A confirmation only holds
/// for the evaluation it triggers; the next change falls back to the slider.
pub struct Session {
    source: SourceParameters,
    range: LoadResistanceRange,
    sample_count: usize,
    selection: LoadSelection,
}

impl Session {
    pub fn new(
        source: SourceParameters,
        range: LoadResistanceRange,
        sample_count: usize,
        selection: LoadSelection,
    ) -> Self {
        Session {
            source,
            range,
            sample_count,
            selection: LoadSelection {
                confirmed: false,
                ..selection
            },
        }
    }

    pub fn selection(&self) -> LoadSelection {
        self.selection
    }

    fn evaluate(&self, selection: LoadSelection) -> Result<Evaluation> {
        let load_resistance = selection.resolve(&self.range)?;
        Ok(evaluate(&self.source, load_resistance, self.sample_count)?)
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        let selection = match command {
            Command::Slider(value) => {
                self.selection.slider = self.range.check(value)?;
                self.selection
            }
            Command::Entry(value) => {
                self.selection.entry = self.range.check(value)?;
                self.selection
            }
            Command::Set => LoadSelection {
                confirmed: true,
                ..self.selection
            },
            Command::Show => self.selection,
            Command::Help => return Ok(Outcome::Help),
            Command::Quit => return Ok(Outcome::Quit),
        };
        debug!("{:?} -> {:?}", command, selection);
        Ok(Outcome::Evaluated(self.evaluate(selection)?))
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Bad commands are reported on `out` and the session carries on.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let initial = self.evaluate(self.selection)?;
        renderer.render(&initial)?;
        writeln!(out, "Power P: {}", initial.power_label())?;

        for line in input.lines() {
            let line = line?;
            let outcome = line.parse::<Command>().and_then(|command| self.apply(command));
            match outcome {
                Ok(Outcome::Evaluated(evaluation)) => {
                    renderer.render(&evaluation)?;
                    writeln!(out, "Power P: {}", evaluation.power_label())?;
                }
                Ok(Outcome::Help) => writeln!(out, "{}", HELP)?,
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    warn!("Rejected input {:?}: {}", line, e);
                    writeln!(out, "error: {}", e)?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}
