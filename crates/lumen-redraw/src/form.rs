//! Form controls drawn by the redraw pass itself: checkbox, radio button
//! and file input.

use lumen_types::color::{self, Color};
use lumen_types::config::RedrawTheme;
use lumen_types::error::{RedrawError, Result};
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{PlotStyle, Plotter};

use crate::collab::FontMetrics;
use crate::style::BoxStyle;

/// Draw a checkbox filling `(x, y, width, height)`.
///
/// Small boxes get a solid blob when checked; from 12 px up a tick fits.
#[allow(clippy::too_many_arguments)]
pub fn paint_checkbox(
    plotter: &mut dyn Plotter,
    theme: &RedrawTheme,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    selected: bool,
) -> Result<()> {
    let mut z = f64::from(width) * 0.15;
    if z == 0.0 {
        z = 1.0;
    }
    let base = theme.widget_base;
    let dark = PlotStyle::solid_line(color::double_darken(base));
    let light = PlotStyle::solid_line(color::double_lighten(base));

    plotter.rectangle(
        &Rect::new(x, y, x + width, y + height),
        &PlotStyle::fill(base),
    )?;
    plotter.line(Point::new(x, y), Point::new(x + width, y), &dark)?;
    plotter.line(Point::new(x, y), Point::new(x, y + height), &dark)?;
    plotter.line(
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        &light,
    )?;
    plotter.line(
        Point::new(x, y + height),
        Point::new(x + width, y + height),
        &light,
    )?;

    if !selected {
        return Ok(());
    }
    let at = |v: i32, d: f64| (f64::from(v) + d) as i32;
    let (w, h) = (f64::from(width), f64::from(height));
    if width < 12 || height < 12 {
        plotter.rectangle(
            &Rect::new(at(x, z + z), at(y, z + z), at(x, w - z), at(y, h - z)),
            &PlotStyle::fill(theme.widget_blob),
        )
    } else {
        let tick = PlotStyle::solid_line(theme.widget_blob);
        plotter.line(
            Point::new(at(x, w - z), at(y, z)),
            Point::new(at(x, z * 3.0), at(y, h - z)),
            &tick,
        )?;
        plotter.line(
            Point::new(at(x, z * 3.0), at(y, h - z)),
            Point::new(at(x, z + z), y + height / 2),
            &tick,
        )
    }
}

/// Draw a radio button filling `(x, y, width, height)`.
pub fn paint_radio(
    plotter: &mut dyn Plotter,
    theme: &RedrawTheme,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    selected: bool,
) -> Result<()> {
    let w = f64::from(width);
    let cx = (f64::from(x) + w * 0.5) as i32;
    let cy = (f64::from(y) + f64::from(height) * 0.5) as i32;
    let r = (w * 0.5 - 1.0) as i32;
    let base = theme.widget_base;

    plotter.disc(cx, cy, r, &PlotStyle::fill(base))?;
    plotter.arc(cx, cy, r, 45, 225, &PlotStyle::fill(color::double_darken(base)))?;
    plotter.arc(cx, cy, r, 225, 45, &PlotStyle::fill(color::double_lighten(base)))?;
    if selected {
        let blob = (w * 0.3 - 1.0) as i32;
        plotter.disc(cx, cy, blob, &PlotStyle::fill(theme.widget_blob))?;
    }
    Ok(())
}

/// Draw a file input: its current value, or the theme's placeholder.
///
/// Text that does not fit is right-aligned so the end of the path stays
/// visible. The text must be measurable.
#[allow(clippy::too_many_arguments)]
pub fn paint_file(
    plotter: &mut dyn Plotter,
    fonts: &dyn FontMetrics,
    theme: &RedrawTheme,
    style: &BoxStyle,
    value: Option<&str>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    scale: f32,
    background: Color,
) -> Result<()> {
    let text = value.unwrap_or(&theme.file_drop_label);
    let text_width = fonts.width(&style.font, text).ok_or_else(|| {
        RedrawError::FontMetrics(format!("cannot measure file input text {text:?}"))
    })?;
    let text_width = (text_width as f32 * scale) as i32;
    let tx = if width < text_width + 8 {
        x + width - text_width - 4
    } else {
        x + 4
    };
    let ty = (f64::from(y) + f64::from(height) * 0.75) as i32;
    plotter.text(tx, ty, &style.font, text, background, style.color)
}
