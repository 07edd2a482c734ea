use std::io::Write;

use crate::evaluation::Evaluation;
use crate::model::LoadCharacteristic;
use crate::render::Renderer;
use crate::Result;

/// Plain text summary of an evaluation.
pub struct ReportRenderer<W: Write> {
    out: W,
    detailed: bool,
}

impl<W: Write> ReportRenderer<W> {
    pub fn new(out: W) -> Self {
        ReportRenderer {
            out,
            detailed: false,
        }
    }

    /// Also print the source, load and operating point with SI prefixes.
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ReportRenderer<W> {
    fn render(&mut self, evaluation: &Evaluation) -> Result<()> {
        let op = &evaluation.operating_point;
        let out = &mut self.out;

        writeln!(
            out,
            "U_0 = {:.2} V, R_i = {:.3} Ω, R_L = {:.3} Ω",
            evaluation.source.open_circuit_voltage(),
            evaluation.source.internal_resistance(),
            evaluation.load_resistance
        )?;
        writeln!(out, "I_A = {:.2} A", op.current)?;
        writeln!(out, "U_A = {:.2} V", op.load_voltage)?;
        writeln!(out, "U_i = {:.2} V", op.internal_voltage_drop)?;
        writeln!(out, "I_K = {:.2} A", evaluation.short_circuit_current)?;
        writeln!(out, "Power P: {}", evaluation.power_label())?;

        if self.detailed {
            write!(out, "{}", evaluation.source.characteristic())?;
            write!(out, "{}", LoadCharacteristic::new(evaluation.load_resistance)?)?;
            write!(out, "{}", op)?;
        }
        out.flush()?;
        Ok(())
    }
}
