//! Drawing surface
//!
//! The session only talks to the surface through [`RasterSurface`]: it asks
//! for snapshots and hands snapshots back, never touching pixels itself. In
//! the browser the surface is an HTML canvas owned by JavaScript; [`Canvas`]
//! is the in-memory implementation used natively and in tests.

use crate::models::raster::BYTES_PER_PIXEL;
use crate::models::{FontError, RasterSnapshot, Result, SessionConfig};

/// Pointer position in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Contract of a free-hand raster drawing surface
pub trait RasterSurface {
    fn begin_stroke(&mut self);

    fn extend_stroke(&mut self, point: Point);

    fn end_stroke(&mut self);

    /// Erase everything
    fn clear(&mut self);

    /// Capture the current pixels as an immutable snapshot
    fn snapshot(&self) -> RasterSnapshot;

    /// Replace the current pixels with a snapshot of the same size
    fn restore(&mut self, raster: &RasterSnapshot) -> Result<()>;

    /// Mirror the drawing left to right
    fn flip_horizontal(&mut self);
}

/// RGBA canvas with a round brush
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    brush_size: u32,
    brush_color: [u8; 4],
    drawing: bool,
    last_point: Option<Point>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = RasterSnapshot::buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            brush_size: 5,
            brush_color: [0, 0, 0, 255],
            drawing: false,
            last_point: None,
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let mut canvas = Self::new(config.canvas_width, config.canvas_height)?;
        canvas.set_brush(config.brush_size, config.brush_color);
        Ok(canvas)
    }

    pub fn set_brush(&mut self, size: u32, color: [u8; 4]) {
        self.brush_size = size.max(1);
        self.brush_color = color;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// RGBA of one pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(px)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Paint a filled disc of the brush diameter centred on `center`
    fn stamp(&mut self, center: Point) {
        let radius = self.brush_size as f32 / 2.0;
        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius * radius {
                    let idx = self.index(x as u32, y as u32);
                    self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&self.brush_color);
                }
            }
        }
    }

    /// Stamp along a segment at one-pixel spacing. Only the part of the
    /// segment a stamp can reach from inside the canvas is walked.
    fn draw_segment(&mut self, from: Point, to: Point) {
        let margin = self.brush_size as f32;
        let Some((from, to)) = clip_segment(
            from,
            to,
            (-margin, -margin),
            (self.width as f32 + margin, self.height as f32 + margin),
        ) else {
            return;
        };
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        // clipped length can still exceed the box through f32 rounding
        let max_steps = self.width as f32 + self.height as f32 + 4.0 * margin;
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, max_steps.max(1.0)) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(Point::new(from.x + dx * t, from.y + dy * t));
        }
    }
}

/// Liang-Barsky clip of `from..to` against the box `min..max`
fn clip_segment(from: Point, to: Point, min: (f32, f32), max: (f32, f32)) -> Option<(Point, Point)> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, from.x - min.0),
        (dx, max.0 - from.x),
        (-dy, from.y - min.1),
        (dy, max.1 - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(from.x + dx * t0, from.y + dy * t0),
        Point::new(from.x + dx * t1, from.y + dy * t1),
    ))
}

impl RasterSurface for Canvas {
    fn begin_stroke(&mut self) {
        self.drawing = true;
        self.last_point = None;
    }

    fn extend_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        match self.last_point {
            Some(last) => self.draw_segment(last, point),
            None => self.stamp(point),
        }
        self.last_point = Some(point);
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot::from_buffer(self.width, self.height, &self.pixels)
    }

    fn restore(&mut self, raster: &RasterSnapshot) -> Result<()> {
        if raster.width() != self.width || raster.height() != self.height {
            return Err(FontError::RasterSizeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: raster.width(),
                actual_height: raster.height(),
            });
        }
        self.pixels.copy_from_slice(raster.as_rgba());
        Ok(())
    }

    fn flip_horizontal(&mut self) {
        let row_len = self.width as usize * BYTES_PER_PIXEL;
        if row_len == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(row_len) {
            let mut left = 0;
            let mut right = self.width as usize - 1;
            while left < right {
                for c in 0..BYTES_PER_PIXEL {
                    row.swap(left * BYTES_PER_PIXEL + c, right * BYTES_PER_PIXEL + c);
                }
                left += 1;
                right -= 1;
            }
        }
    }
}
