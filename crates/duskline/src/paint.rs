//! Paints the retained scene into a ratatui buffer.
//!
//! One terminal cell is the unit of both axes, so `1vw` is a hundredth of
//! the area width and `1vh` a hundredth of its height. Layers are painted
//! back to front: sky, stars, clouds, sun, meteors, waves, reflection.

use duskline_config::SceneConfig;
use duskline_core::{HexColor, Length};
use duskline_scene::{ElementId, mix};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::glyphs::{CLOUD_GLYPHS, GLINT_GLYPHS, METEOR_GLYPHS, STAR_GLYPHS, by_level};
use crate::surface::{Element, TerminalSurface};

/// Disc color of the sun.
pub const SUN_CORE: HexColor = HexColor::new(0xff, 0xe4, 0x9c);

/// Wave fills, back to front.
pub const WAVE_FILLS: [HexColor; 3] = [
    HexColor::new(0x1d, 0x4e, 0x7a),
    HexColor::new(0x15, 0x3b, 0x62),
    HexColor::new(0x0c, 0x28, 0x47),
];

/// Puffs of one viewport-wide tile of the cloud band: left and width in
/// vw from the tile edge, top and height in vh.
const CLOUD_PUFFS: &[(f64, f64, f64, f64)] = &[
    (4.0, 10.0, 22.0, 7.0),
    (38.0, 18.0, 28.0, 8.0),
    (74.0, 6.0, 18.0, 6.0),
];

/// Sun disc radius in vh; cells are about twice as tall as wide.
const SUN_RADIUS_VH: f64 = 6.0;

/// Opacity below which an element is not drawn.
const INVISIBLE: f64 = 0.02;

/// The whole scene as a widget.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    surface: &'a TerminalSurface,
    config: &'a SceneConfig,
}

impl<'a> SceneView<'a> {
    pub fn new(surface: &'a TerminalSurface, config: &'a SceneConfig) -> Self {
        Self { surface, config }
    }
}

/// Maps viewport units onto the cells of `area`.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    area: Rect,
}

impl Viewport {
    fn width(self) -> f64 {
        f64::from(self.area.width)
    }

    fn height(self) -> f64 {
        f64::from(self.area.height)
    }

    fn vw(self, v: f64) -> f64 {
        v / 100.0 * self.width()
    }

    fn vh(self, v: f64) -> f64 {
        v / 100.0 * self.height()
    }

    fn left(self, length: Option<Length>) -> f64 {
        length.map_or(0.0, |l| l.resolve(self.width(), self.height(), self.width()))
    }

    fn top(self, length: Option<Length>) -> f64 {
        length.map_or(0.0, |l| l.resolve(self.width(), self.height(), self.height()))
    }

    /// The cell covering viewport position `(x, y)`, if it is on screen.
    fn cell<'b>(self, buf: &'b mut Buffer, x: f64, y: f64) -> Option<&'b mut Cell> {
        if !(x >= 0.0 && y >= 0.0 && x < self.width() && y < self.height()) {
            return None;
        }
        let col = self.area.x + x as u16;
        let row = self.area.y + y as u16;
        buf.cell_mut((col, row))
    }
}

fn to_hex(color: Color) -> HexColor {
    match color {
        Color::Rgb(r, g, b) => HexColor::new(r, g, b),
        _ => HexColor::BLACK,
    }
}

/// Blend `color` into the cell background.
fn tint(cell: &mut Cell, color: HexColor, alpha: f64) {
    let bg = mix(to_hex(cell.bg), color, alpha.clamp(0.0, 1.0));
    cell.set_bg(bg.into());
}

/// Draw a glyph whose color is blended over the cell background.
fn glyph(cell: &mut Cell, ch: char, color: HexColor, alpha: f64) {
    let fg = mix(to_hex(cell.bg), color, alpha.clamp(0.0, 1.0));
    cell.set_char(ch);
    cell.set_fg(fg.into());
}

/// One elliptical puff, densest at its center.
fn paint_puff(
    view: Viewport,
    buf: &mut Buffer,
    center: (f64, f64),
    radius: (f64, f64),
    opacity: f64,
) {
    let ((cx, cy), (rx, ry)) = (center, radius);
    let mut y = (cy - ry).floor();
    while y <= (cy + ry).ceil() {
        let mut x = (cx - rx).floor();
        while x <= (cx + rx).ceil() {
            let dx = (x + 0.5 - cx) / rx;
            let dy = (y + 0.5 - cy) / ry;
            let density = 1.0 - (dx * dx + dy * dy).sqrt();
            if density > 0.0 {
                if let Some(cell) = view.cell(buf, x, y) {
                    let level = (density * 2.0).min(1.0);
                    let ch = by_level(CLOUD_GLYPHS, level);
                    glyph(cell, ch, HexColor::WHITE, opacity * level);
                }
            }
            x += 1.0;
        }
        y += 1.0;
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let view = Viewport { area };
        let now = self.surface.clock_ms();

        self.paint_sky(view, buf);
        for (id, element) in self.surface.elements() {
            if let ElementId::Star(_) = id {
                self.paint_star(view, buf, element, now);
            }
        }
        if let Some(clouds) = self.surface.element(ElementId::Clouds) {
            self.paint_clouds(view, buf, clouds, now);
        }
        if let Some(sun) = self.surface.element(ElementId::Sun) {
            self.paint_sun(view, buf, sun);
        }
        for (id, element) in self.surface.elements() {
            if let ElementId::Meteor(_) = id {
                self.paint_meteor(view, buf, element, now);
            }
        }
        for (id, element) in self.surface.elements() {
            if let ElementId::Wave(layer) = id {
                self.paint_wave(view, buf, layer, element);
            }
        }
        if let Some(reflection) = self.surface.element(ElementId::Reflection) {
            self.paint_reflection(view, buf, reflection, now);
        }
    }
}

impl SceneView<'_> {
    fn horizon_row(&self, view: Viewport) -> f64 {
        view.vh(self.config.timing.horizon_vh)
    }

    fn paint_sky(&self, view: Viewport, buf: &mut Buffer) {
        let Some(gradient) = self
            .surface
            .element(ElementId::Sky)
            .and_then(|sky| sky.background.as_ref())
        else {
            return;
        };
        let last_row = (view.area.height.saturating_sub(1)).max(1);
        for row in 0..view.area.height {
            let color: Color = gradient.sample(f64::from(row) / f64::from(last_row)).into();
            for col in 0..view.area.width {
                if let Some(cell) = buf.cell_mut((view.area.x + col, view.area.y + row)) {
                    cell.set_char(' ');
                    cell.set_bg(color);
                }
            }
        }
    }

    fn paint_star(&self, view: Viewport, buf: &mut Buffer, star: &Element, now: f64) {
        let opacity = star.effective_opacity(now);
        if opacity < INVISIBLE {
            return;
        }
        let x = view.left(star.left);
        let y = view.top(star.top);
        if let Some(cell) = view.cell(buf, x, y) {
            glyph(cell, by_level(STAR_GLYPHS, opacity), HexColor::WHITE, opacity);
        }
    }

    /// The cloud band is `travel_vw` wide, tiled with [`CLOUD_PUFFS`] once
    /// per viewport width, so it spans the screen from its parked offset.
    fn paint_clouds(&self, view: Viewport, buf: &mut Buffer, clouds: &Element, now: f64) {
        let opacity = clouds.effective_opacity(now);
        if opacity < INVISIBLE {
            return;
        }
        let pose = clouds.pose(now);
        let band_left = view.left(clouds.left) + view.vw(pose.dx_vw);
        let band_top = view.top(clouds.top) + view.vh(pose.dy_vh);
        let band_width = view.vw(self.config.clouds.travel_vw);

        let tiles = (self.config.clouds.travel_vw / 100.0).ceil().max(1.0) as usize;
        for tile in 0..tiles {
            let tile_left = band_left + view.vw(tile as f64 * 100.0);
            for &(left, top, width, height) in CLOUD_PUFFS {
                let cx = tile_left + view.vw(left + width / 2.0);
                if cx - band_left > band_width {
                    continue;
                }
                let cy = band_top + view.vh(top + height / 2.0);
                let rx = view.vw(width / 2.0).max(1.0);
                let ry = view.vh(height / 2.0).max(0.5);
                paint_puff(view, buf, (cx, cy), (rx, ry), opacity);
            }
        }
    }

    fn paint_sun(&self, view: Viewport, buf: &mut Buffer, sun: &Element) {
        let ry = view.vh(SUN_RADIUS_VH).max(0.5);
        let rx = ry * 2.0;
        let cx = view.width() / 2.0;
        let cy = view.top(sun.top) + ry;
        let horizon = self.horizon_row(view);

        let y_end = (cy + ry * 1.4).ceil().min(horizon);
        let mut y = (cy - ry * 1.4).floor().max(0.0);
        while y < y_end {
            let mut x = (cx - rx * 1.4).floor();
            while x <= (cx + rx * 1.4).ceil() {
                let dx = (x + 0.5 - cx) / rx;
                let dy = (y + 0.5 - cy) / ry;
                let d = (dx * dx + dy * dy).sqrt();
                if let Some(cell) = view.cell(buf, x, y) {
                    if d <= 1.0 {
                        tint(cell, SUN_CORE, 1.0);
                    } else if d <= 1.4 {
                        tint(cell, SUN_CORE, (1.4 - d) / 0.4 * 0.5);
                    }
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }

    fn paint_meteor(&self, view: Viewport, buf: &mut Buffer, meteor: &Element, now: f64) {
        let opacity = meteor.effective_opacity(now);
        if opacity < INVISIBLE {
            return;
        }
        let pose = meteor.pose(now);
        let x = view.left(meteor.left) + view.vw(pose.dx_vw);
        let y = view.top(meteor.top) + view.vh(pose.dy_vh);

        // trail points back along the flight direction
        let travel = &self.config.meteors;
        let (tx, ty) = (view.vw(travel.travel_vw), view.vh(travel.travel_vh));
        let length = (tx * tx + ty * ty).sqrt().max(f64::EPSILON);
        let (ux, uy) = (tx / length, ty / length);

        for (k, &ch) in METEOR_GLYPHS.iter().enumerate() {
            let back = k as f64;
            let fade = 1.0 - back / METEOR_GLYPHS.len() as f64;
            if let Some(cell) = view.cell(buf, x - ux * back * 2.0, y - uy * back) {
                glyph(cell, ch, HexColor::WHITE, opacity * fade);
            }
        }
    }

    fn paint_wave(&self, view: Viewport, buf: &mut Buffer, layer: usize, wave: &Element) {
        let Some(path) = &wave.path else {
            return;
        };
        let Some(&fill) = WAVE_FILLS.get(layer).or(WAVE_FILLS.last()) else {
            return;
        };
        let horizon = self.horizon_row(view);
        let depth = view.height() - horizon;
        if depth <= 0.0 || path.height <= 0.0 {
            return;
        }
        for col in 0..view.area.width {
            let x = f64::from(col) + 0.5;
            let crest_y = path.height_at(x / view.width() * path.width);
            let crest = horizon + crest_y / path.height * depth;
            for row in 0..view.area.height {
                let y = f64::from(row) + 0.5;
                if y < crest {
                    continue;
                }
                if let Some(cell) = view.cell(buf, x, y) {
                    cell.set_char(' ');
                    tint(cell, fill, 1.0);
                }
            }
        }
    }

    fn paint_reflection(&self, view: Viewport, buf: &mut Buffer, reflection: &Element, now: f64) {
        let opacity = reflection.effective_opacity(now);
        if opacity < INVISIBLE {
            return;
        }
        let horizon = self.horizon_row(view).ceil();
        let depth = view.height() - horizon;
        if depth <= 0.0 {
            return;
        }
        let cx = view.width() / 2.0;
        let mut y = horizon;
        while y < view.height() {
            let along = (y - horizon) / depth;
            let half_width = view.vw(6.0) * (1.0 - along * 0.6);
            let shimmer = (now / 300.0 + y * 1.7).sin();
            let mut x = (cx - half_width + shimmer).floor();
            while x <= cx + half_width + shimmer {
                let edge = 1.0 - ((x + 0.5 - cx) / half_width.max(1.0)).abs();
                if edge > 0.0 {
                    if let Some(cell) = view.cell(buf, x, y) {
                        let level = edge * (1.0 - along * 0.5);
                        glyph(cell, by_level(GLINT_GLYPHS, level), SUN_CORE, opacity * level);
                    }
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }
}
