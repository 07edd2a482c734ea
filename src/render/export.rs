use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libflate::gzip;

use crate::evaluation::Evaluation;
use crate::render::Renderer;
use crate::Result;

/// Export target, gzip-compressed when the file name ends in `.gz`.
enum Sink {
    Plain(File),
    Gz(gzip::Encoder<File>),
}

impl Sink {
    fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(if path.extension().and_then(OsStr::to_str) == Some("gz") {
            Sink::Gz(gzip::Encoder::new(file)?)
        } else {
            Sink::Plain(file)
        })
    }

    fn finish(self) -> Result<()> {
        match self {
            Sink::Plain(mut file) => file.flush()?,
            Sink::Gz(encoder) => {
                encoder.finish().into_result()?;
            }
        }
        Ok(())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Plain(file) => file.write(buf),
            Sink::Gz(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Plain(file) => file.flush(),
            Sink::Gz(encoder) => encoder.flush(),
        }
    }
}

/// One exported row; field names double as the header.
#[derive(Serialize)]
struct CurveRecord {
    i: f64,
    u_source: f64,
    u_load: f64,
}

/// Writes the sampled characteristics as tab-separated `i`, `u_source`,
/// `u_load` columns.
pub struct CsvRenderer {
    path: PathBuf,
}

impl CsvRenderer {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CsvRenderer { path: path.into() }
    }
}

impl Renderer for CsvRenderer {
    fn render(&mut self, evaluation: &Evaluation) -> Result<()> {
        debug_time!("csv export");
        let mut out = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Sink::create(&self.path)?);

        for (i, u_source, u_load) in evaluation.curves.iter() {
            out.serialize(CurveRecord { i, u_source, u_load })?;
        }
        out.into_inner()
            .map_err(|_| failure::err_msg("Error writing the file"))?
            .finish()?;

        info!(
            "Wrote {} samples to {}",
            evaluation.curves.currents.len(),
            self.path.display()
        );
        Ok(())
    }
}
