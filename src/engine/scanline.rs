//! CPU scanline renderer for the grid overlay.
//!
//! Shades a W×H surface quad by quad, so every pixel gets GPU-style
//! derivatives from its 2×2 neighbourhood. Work is split by quad rows (pairs
//! of scanlines):
//! - single-threaded: every quad row in order
//! - Web Workers: worker `k` of `n` takes quad rows `k, k + n, k + 2n, …`
//! - native: quad rows fanned out with rayon
//!
//! Every split produces the same pixels, since no quad row reads another.

use log::{debug, warn};

use crate::engine::derivative::{DerivativeSource, QuadCoords, QUAD_LANES};
use crate::engine::error::{GridError, Result};
use crate::engine::types::{GridConfiguration, Rgba, Vec2};
use crate::math::utils;
use crate::shading::shade_at;

/// Render target dimensions in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Saturates instead of overflowing; see [`Surface::buffer_len`].
    pub fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Elements a full-surface buffer of `channels` values per pixel needs,
    /// or `None` if that does not fit in `usize`.
    pub fn buffer_len(&self, channels: usize) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(channels)
    }

    /// Number of scanline pairs, the last one possibly a single row.
    pub fn quad_rows(&self) -> u32 {
        self.height.div_ceil(2)
    }

    /// Surface coordinate of the center of pixel (x, y).
    #[inline(always)]
    pub fn uv(&self, x: u32, y: u32) -> Vec2 {
        Vec2 {
            x: (x as f32 + 0.5) / self.width as f32,
            y: (y as f32 + 0.5) / self.height as f32,
        }
    }

    /// Pixel index range covered by a quad row.
    pub fn quad_row_span(&self, quad_row: u32) -> std::ops::Range<usize> {
        let w = self.width as usize;
        let first = (quad_row as usize * 2).min(self.height as usize);
        let last = (first + 2).min(self.height as usize);
        first * w..last * w
    }
}

/// Shade one quad row into `rows`, which holds that row pair's pixels (row-major).
pub fn shade_quad_row(
    config: &GridConfiguration,
    surface: &Surface,
    source: &dyn DerivativeSource,
    quad_row: u32,
    rows: &mut [Rgba],
) {
    let w = surface.width;
    let y0 = quad_row * 2;

    let mut x0 = 0;
    while x0 < w {
        let quad = QuadCoords::new(surface, config, x0, y0);
        let footprint = source.derivatives(&quad, surface, config).footprint();

        for (coord, (dx, dy)) in quad.coords.iter().zip(QUAD_LANES) {
            let x = x0 + dx;
            let y = y0 + dy;
            // Helper lanes past the edge only feed the derivatives
            if x >= w || y >= surface.height {
                continue;
            }
            let idx = (dy * w + x) as usize;
            if let Some(pixel) = rows.get_mut(idx) {
                *pixel = shade_at(*coord, footprint, config);
            }
        }
        x0 += 2;
    }
}

fn check_len(surface: &Surface, channels: usize, actual: usize) -> Result<()> {
    // An unaddressable surface needs more than any buffer can hold
    let expected = surface.buffer_len(channels).unwrap_or(usize::MAX);
    if actual < expected {
        return Err(GridError::BufferTooSmall { expected, actual });
    }
    Ok(())
}

fn worker_in_range(worker_id: u32, stride: u32) -> bool {
    if worker_id >= stride {
        warn!("worker {} is outside a split of {} workers; nothing rendered", worker_id, stride);
        return false;
    }
    true
}

/// Render the quad rows assigned to one worker into the full-surface buffer.
///
/// Returns the number of quad rows rendered. A `worker_count` of 0 is
/// treated as 1; a `worker_id` outside the split renders nothing.
pub fn render_scanlines(
    config: &GridConfiguration,
    surface: &Surface,
    source: &dyn DerivativeSource,
    out: &mut [Rgba],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32> {
    check_len(surface, 1, out.len())?;

    let stride = worker_count.max(1);
    if !worker_in_range(worker_id, stride) {
        return Ok(0);
    }
    debug!(
        "shading {}x{} grid overlay, worker {}/{}, {} derivatives",
        surface.width,
        surface.height,
        worker_id,
        stride,
        source.name()
    );

    let mut rendered = 0;
    let mut quad_row = worker_id;
    while quad_row < surface.quad_rows() {
        let span = surface.quad_row_span(quad_row);
        shade_quad_row(config, surface, source, quad_row, &mut out[span]);
        rendered += 1;
        quad_row += stride;
    }
    Ok(rendered)
}

/// Render the whole surface on the calling thread.
pub fn render_surface(
    config: &GridConfiguration,
    surface: &Surface,
    source: &dyn DerivativeSource,
    out: &mut [Rgba],
) -> Result<()> {
    render_scanlines(config, surface, source, out, 0, 1).map(|_| ())
}

/// Render the whole surface with one rayon task per quad row.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_surface_parallel(
    config: &GridConfiguration,
    surface: &Surface,
    source: &dyn DerivativeSource,
    out: &mut [Rgba],
) -> Result<()> {
    use rayon::prelude::*;

    check_len(surface, 1, out.len())?;
    let total = surface.pixel_count();
    if total == 0 {
        return Ok(());
    }

    debug!(
        "shading {}x{} grid overlay in parallel, {} derivatives",
        surface.width,
        surface.height,
        source.name()
    );

    out[..total]
        .par_chunks_mut(surface.width as usize * 2)
        .enumerate()
        .for_each(|(quad_row, rows)| {
            shade_quad_row(config, surface, source, quad_row as u32, rows);
        });
    Ok(())
}

/// Render one worker's quad rows straight into an 8-bit RGBA buffer.
///
/// Same row assignment as [`render_scanlines`]; each quad row is shaded into
/// a scratch buffer and quantized with [`write_rgba8`].
pub fn render_scanlines_rgba8(
    config: &GridConfiguration,
    surface: &Surface,
    source: &dyn DerivativeSource,
    rgba_out: &mut [u8],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32> {
    check_len(surface, 4, rgba_out.len())?;

    let stride = worker_count.max(1);
    if !worker_in_range(worker_id, stride) {
        return Ok(0);
    }
    let mut scratch = vec![Rgba::TRANSPARENT; surface.width as usize * 2];
    let mut rendered = 0;
    let mut quad_row = worker_id;
    while quad_row < surface.quad_rows() {
        let span = surface.quad_row_span(quad_row);
        let rows = &mut scratch[..span.len()];
        shade_quad_row(config, surface, source, quad_row, rows);
        write_rgba8(rows, &mut rgba_out[span.start * 4..span.end * 4]);
        rendered += 1;
        quad_row += stride;
    }
    Ok(rendered)
}

/// Quantize straight-alpha float pixels to 8-bit RGBA, clamping each channel.
pub fn write_rgba8(pixels: &[Rgba], rgba_out: &mut [u8]) {
    for (pixel, out) in pixels.iter().zip(rgba_out.chunks_exact_mut(4)) {
        out[0] = utils::float_to_byte(pixel.r);
        out[1] = utils::float_to_byte(pixel.g);
        out[2] = utils::float_to_byte(pixel.b);
        out[3] = utils::float_to_byte(pixel.a);
    }
}
