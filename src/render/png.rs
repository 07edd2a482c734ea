use std::f64::consts::PI;
use std::fs::File;
use std::path::PathBuf;

use cairo::enums::FontSlant;
use cairo::enums::FontWeight;
use cairo::Context;
use cairo::Format;
use cairo::ImageSurface;
use itertools_num::linspace;

use crate::aoi::AreaOfInterest;
use crate::evaluation::Evaluation;
use crate::render::Renderer;
use crate::Result;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 60.0;
const GRIDLINES: usize = 11;

const BLUE: (f64, f64, f64) = (57.0 / 255.0, 106.0 / 255.0, 177.0 / 255.0);
const GREEN: (f64, f64, f64) = (62.0 / 255.0, 150.0 / 255.0, 81.0 / 255.0);
const RED: (f64, f64, f64) = (204.0 / 255.0, 37.0 / 255.0, 41.0 / 255.0);
const ORANGE: (f64, f64, f64) = (218.0 / 255.0, 124.0 / 255.0, 48.0 / 255.0);

/// Maps currents and voltages onto pixel coordinates inside the plot frame.
#[derive(Copy, Clone, Debug)]
struct Frame {
    aoi: AreaOfInterest,
    width: f64,
    height: f64,
}

impl Frame {
    fn plot_width(&self) -> f64 {
        self.width - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, i: f64) -> f64 {
        MARGIN_LEFT + (i - self.aoi.min_i) / self.aoi.i_span() * self.plot_width()
    }

    fn y(&self, v: f64) -> f64 {
        self.height - MARGIN_BOTTOM - (v - self.aoi.min_v) / self.aoi.v_span() * self.plot_height()
    }
}

/// Chart of both characteristics with the operating point marked, written as PNG.
pub struct PngRenderer {
    path: PathBuf,
    width: i32,
    height: i32,
}

impl PngRenderer {
    pub fn new<P: Into<PathBuf>>(path: P, width: i32, height: i32) -> Result<Self> {
        if width < 200 || height < 150 {
            return Err(failure::err_msg(format!(
                "Chart size {}x{} is too small",
                width, height
            )));
        }
        Ok(PngRenderer {
            path: path.into(),
            width,
            height,
        })
    }

    fn draw(&self, cr: &Context, evaluation: &Evaluation) {
        let frame = Frame {
            aoi: evaluation.area_of_interest,
            width: f64::from(self.width),
            height: f64::from(self.height),
        };
        let op = &evaluation.operating_point;
        let u0 = evaluation.source.open_circuit_voltage();

        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint();

        draw_grid(cr, &frame);

        cr.save();
        cr.rectangle(MARGIN_LEFT, MARGIN_TOP, frame.plot_width(), frame.plot_height());
        cr.clip();

        // Power delivered to the load.
        cr.set_source_rgba(RED.0, RED.1, RED.2, 0.2);
        cr.rectangle(
            frame.x(0.0),
            frame.y(op.load_voltage),
            frame.x(op.current) - frame.x(0.0),
            frame.y(0.0) - frame.y(op.load_voltage),
        );
        cr.fill();

        cr.set_line_width(2.0);
        cr.set_source_rgb(BLUE.0, BLUE.1, BLUE.2);
        polyline(
            cr,
            &frame,
            evaluation
                .curves
                .currents
                .iter()
                .cloned()
                .zip(evaluation.curves.source_voltages.iter().cloned()),
        );
        cr.set_source_rgb(GREEN.0, GREEN.1, GREEN.2);
        polyline(
            cr,
            &frame,
            evaluation
                .curves
                .currents
                .iter()
                .cloned()
                .zip(evaluation.curves.load_voltages.iter().cloned()),
        );

        cr.set_source_rgb(RED.0, RED.1, RED.2);
        cr.arc(frame.x(op.current), frame.y(op.load_voltage), 5.0, 0.0, PI * 2.0);
        cr.fill();

        cr.set_line_width(2.0);
        cr.set_source_rgb(GREEN.0, GREEN.1, GREEN.2);
        double_arrow(cr, frame.x(0.0) + 6.0, frame.y(0.0), frame.y(op.load_voltage));
        cr.set_source_rgb(ORANGE.0, ORANGE.1, ORANGE.2);
        double_arrow(cr, frame.x(0.0) + 6.0, frame.y(op.load_voltage), frame.y(u0));
        cr.restore();

        cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
        cr.set_font_size(13.0);

        cr.set_source_rgb(GREEN.0, GREEN.1, GREEN.2);
        cr.move_to(frame.x(0.0) + 14.0, frame.y(op.load_voltage / 2.0) + 4.0);
        cr.show_text(&format!("U_A = {:.2} V", op.load_voltage));

        cr.set_source_rgb(ORANGE.0, ORANGE.1, ORANGE.2);
        cr.move_to(
            frame.x(0.0) + 14.0,
            frame.y(op.load_voltage + op.internal_voltage_drop / 2.0) + 4.0,
        );
        cr.show_text(&format!("U_i = {:.2} V", op.internal_voltage_drop));

        cr.set_source_rgb(BLUE.0, BLUE.1, BLUE.2);
        let text = format!("U_0 = {:.2} V", u0);
        let extents = cr.text_extents(&text);
        cr.move_to(frame.x(0.0) - extents.width - 4.0, frame.y(u0) - 2.0);
        cr.show_text(&text);

        let text = format!("I_K = {:.2} A", evaluation.short_circuit_current);
        let extents = cr.text_extents(&text);
        cr.move_to(
            frame.x(evaluation.short_circuit_current) - extents.width / 2.0,
            frame.y(0.0) + 34.0,
        );
        cr.show_text(&text);

        draw_axis_titles(cr, &frame);
        draw_legend(cr, &frame, evaluation.load_resistance);
    }
}

fn polyline<I: Iterator<Item = (f64, f64)>>(cr: &Context, frame: &Frame, points: I) {
    for (ix, (i, v)) in points.enumerate() {
        if ix == 0 {
            cr.move_to(frame.x(i), frame.y(v));
        } else {
            cr.line_to(frame.x(i), frame.y(v));
        }
    }
    cr.stroke();
}

fn arrow_head(cr: &Context, x: f64, y: f64, pointing_up: bool) {
    let dy = if pointing_up { 8.0 } else { -8.0 };
    cr.move_to(x, y);
    cr.line_to(x - 4.0, y + dy);
    cr.line_to(x + 4.0, y + dy);
    cr.close_path();
    cr.fill();
}

/// Vertical `<->` arrow; `y_to` is above `y_from` on screen.
fn double_arrow(cr: &Context, x: f64, y_from: f64, y_to: f64) {
    if (y_from - y_to).abs() < 16.0 {
        return;
    }
    cr.move_to(x, y_from - 8.0);
    cr.line_to(x, y_to + 8.0);
    cr.stroke();
    arrow_head(cr, x, y_to, true);
    arrow_head(cr, x, y_from, false);
}

fn draw_grid(cr: &Context, frame: &Frame) {
    let aoi = frame.aoi;

    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.set_line_width(1.0);
    for (ix, i_gridline) in linspace(aoi.min_i, aoi.max_i, GRIDLINES).enumerate() {
        set_grid_dash(cr, ix);
        cr.move_to(frame.x(i_gridline), frame.y(aoi.min_v));
        cr.line_to(frame.x(i_gridline), frame.y(aoi.max_v));
        cr.stroke();
    }
    for (ix, v_gridline) in linspace(aoi.min_v, aoi.max_v, GRIDLINES).enumerate() {
        set_grid_dash(cr, ix);
        cr.move_to(frame.x(aoi.min_i), frame.y(v_gridline));
        cr.line_to(frame.x(aoi.max_i), frame.y(v_gridline));
        cr.stroke();
    }
    cr.set_dash(&[], 0.0);

    cr.select_font_face("Monospace", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(11.0);
    for (ix, i_gridline) in linspace(aoi.min_i, aoi.max_i, GRIDLINES).enumerate() {
        if ix % 2 == 0 {
            let text = format!("{:.1}", i_gridline);
            let extents = cr.text_extents(&text);
            cr.move_to(
                frame.x(i_gridline) - extents.width / 2.0,
                frame.y(aoi.min_v) + extents.height + 4.0,
            );
            cr.show_text(&text);
        }
    }
    for (ix, v_gridline) in linspace(aoi.min_v, aoi.max_v, GRIDLINES).enumerate() {
        if ix % 2 == 0 {
            let text = format!("{:.2}", v_gridline);
            let extents = cr.text_extents(&text);
            cr.move_to(
                frame.x(aoi.min_i) - extents.width - 4.0,
                frame.y(v_gridline) + extents.height / 2.0,
            );
            cr.show_text(&text);
        }
    }
}

fn set_grid_dash(cr: &Context, ix: usize) {
    match ix {
        0 | 10 => cr.set_dash(&[], 0.0),
        5 => cr.set_dash(&[1.0, 2.0], 0.0),
        _ => cr.set_dash(&[1.0, 3.0], 0.0),
    }
}

fn draw_axis_titles(cr: &Context, frame: &Frame) {
    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(13.0);

    let text = "Current I_A [A]";
    let extents = cr.text_extents(text);
    cr.move_to(
        MARGIN_LEFT + frame.plot_width() / 2.0 - extents.width / 2.0,
        frame.height - 6.0,
    );
    cr.show_text(text);

    let text = "Voltage [V]";
    let extents = cr.text_extents(text);
    cr.save();
    cr.move_to(16.0, MARGIN_TOP + frame.plot_height() / 2.0 + extents.width / 2.0);
    cr.rotate(-PI / 2.0);
    cr.show_text(text);
    cr.restore();
}

fn draw_legend(cr: &Context, frame: &Frame, load_resistance: f64) {
    let entries = [
        (BLUE, "Source characteristic".to_string()),
        (
            GREEN,
            format!("Load characteristic (R_L={:.3} Ω)", load_resistance),
        ),
        (RED, "Operating point".to_string()),
    ];

    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(12.0);
    let text_width = entries
        .iter()
        .map(|(_, text)| cr.text_extents(text).width)
        .fold(0.0, f64::max);

    let row = 18.0;
    let box_width = text_width + 44.0;
    let box_height = row * entries.len() as f64 + 8.0;
    let left = frame.width - MARGIN_RIGHT - box_width - 8.0;
    let top = MARGIN_TOP + 8.0;

    cr.set_source_rgba(1.0, 1.0, 1.0, 0.85);
    cr.rectangle(left, top, box_width, box_height);
    cr.fill_preserve();
    cr.set_source_rgb(0.7, 0.7, 0.7);
    cr.set_line_width(1.0);
    cr.stroke();

    for (ix, (color, text)) in entries.iter().enumerate() {
        let y = top + 4.0 + row * (ix as f64 + 0.5);
        cr.set_source_rgb(color.0, color.1, color.2);
        cr.set_line_width(2.0);
        cr.move_to(left + 8.0, y);
        cr.line_to(left + 30.0, y);
        cr.stroke();
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.move_to(left + 36.0, y + 4.0);
        cr.show_text(text);
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, evaluation: &Evaluation) -> Result<()> {
        debug_time!("png render");
        let surface = ImageSurface::create(Format::ARgb32, self.width, self.height)
            .map_err(|status| failure::err_msg(format!("Can't create a surface: {:?}", status)))?;
        let cr = Context::new(&surface);
        self.draw(&cr, evaluation);
        drop(cr);

        let mut file = File::create(&self.path)?;
        surface
            .write_to_png(&mut file)
            .map_err(|e| failure::err_msg(format!("Can't write the chart: {:?}", e)))?;

        info!("Wrote chart to {}", self.path.display());
        Ok(())
    }
}
