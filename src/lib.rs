use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod layout;
pub mod math;
pub mod shading;

pub use engine::config::GridUniform;
pub use engine::derivative::{DerivativeSource, Derivatives, FootprintMode};
pub use engine::error::GridError;
pub use engine::scanline::Surface;
pub use engine::types::{GridConfiguration, PixelSample, Rgba, Vec2};
pub use layout::{CellPosition, Direction, GridLayout};
pub use shading::shade;

/// Initialize the WASM module: panic messages and `log` records go to the
/// browser console. Safe to call more than once.
#[wasm_bindgen(start)]
pub fn init() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
        }
    });
}

fn to_js_error(err: GridError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Parse and validate the flat configuration buffer at the host boundary.
fn load_config(config_params: &[f64]) -> Result<GridConfiguration, JsValue> {
    GridConfiguration::from_buffer_checked(config_params).map_err(to_js_error)
}

/// Shade a single pixel. Returns [r, g, b, a].
///
/// `config_params` — Float64Array, see `GridConfiguration::from_buffer`
/// `u` / `v` — surface coordinate in [0, 1]
/// `footprint` — anti-aliasing footprint in pixel units
///
/// The configuration is not validated; this is the raw shading function.
#[wasm_bindgen]
pub fn shade_pixel(config_params: &[f64], u: f32, v: f32, footprint: f32) -> Vec<f32> {
    let config = GridConfiguration::from_buffer(config_params);
    let c = shade(Vec2::new(u, v), footprint, &config);
    vec![c.r, c.g, c.b, c.a]
}

/// Shade scanlines into a shared float RGBA buffer.
///
/// Called from each Web Worker with its assigned scanline pairs.
///
/// `config_params` — Float64Array of grid parameters
/// `footprint_mode` — 0 = analytic derivatives, 1 = quad finite differences
/// `rgba_out` — Float32Array view (width * height * 4), straight alpha
/// `worker_id` / `worker_count` — interleaved quad-row assignment
///
/// Returns the number of quad rows rendered.
#[wasm_bindgen]
pub fn shade_scanlines(
    config_params: &[f64],
    width: u32,
    height: u32,
    footprint_mode: u32,
    rgba_out: &mut [f32],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, JsValue> {
    let config = load_config(config_params)?;
    let surface = Surface::new(width, height);
    let source = FootprintMode::from_u32(footprint_mode).create();

    let len = rgba_out.len();
    let pixels: &mut [Rgba] = bytemuck::try_cast_slice_mut(rgba_out)
        .map_err(|_| to_js_error(GridError::MisalignedBuffer(len)))?;

    engine::scanline::render_scanlines(&config, &surface, source.as_ref(), pixels, worker_id, worker_count)
        .map_err(to_js_error)
}

/// Same as `shade_scanlines`, quantized to 8-bit RGBA (canvas `ImageData` layout).
#[wasm_bindgen]
pub fn shade_scanlines_rgba8(
    config_params: &[f64],
    width: u32,
    height: u32,
    footprint_mode: u32,
    rgba_out: &mut [u8],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, JsValue> {
    let config = load_config(config_params)?;
    let surface = Surface::new(width, height);
    let source = FootprintMode::from_u32(footprint_mode).create();

    engine::scanline::render_scanlines_rgba8(&config, &surface, source.as_ref(), rgba_out, worker_id, worker_count)
        .map_err(to_js_error)
}

/// Quick render — the whole surface in one call on one thread.
/// Useful for previews and small surfaces.
///
/// Writes 8-bit RGBA into `rgba_out` (width * height * 4).
#[wasm_bindgen]
pub fn shade_quick(
    config_params: &[f64],
    width: u32,
    height: u32,
    footprint_mode: u32,
    rgba_out: &mut [u8],
) -> Result<(), JsValue> {
    shade_scanlines_rgba8(config_params, width, height, footprint_mode, rgba_out, 0, 1).map(|_| ())
}

/// Throws if the configuration buffer breaks an invariant.
#[wasm_bindgen]
pub fn validate_config(config_params: &[f64]) -> Result<(), JsValue> {
    load_config(config_params).map(|_| ())
}

/// Parse a JSON configuration into the flat Float64Array layout.
#[wasm_bindgen]
pub fn config_from_json(json: &str) -> Result<Vec<f64>, JsValue> {
    let config = GridConfiguration::from_json(json).map_err(to_js_error)?;
    Ok(config.to_buffer().to_vec())
}

/// 48-byte uniform block for hosts that shade the grid on the GPU.
#[wasm_bindgen]
pub fn config_uniform_bytes(config_params: &[f64]) -> Result<Vec<u8>, JsValue> {
    let config = load_config(config_params)?;
    Ok(config.to_uniform().as_bytes().to_vec())
}

/// Overlay parameters matching a world grid of `scale` units per cell.
#[wasm_bindgen]
pub fn layout_overlay_config(scale: f32, base_offset: f32, width: f32, height: f32) -> Vec<f64> {
    GridLayout::new(scale, base_offset)
        .overlay_config(width, height)
        .to_buffer()
        .to_vec()
}

/// Cell containing a world position. Returns [cell_x, cell_y].
#[wasm_bindgen]
pub fn world_to_cell(scale: f32, base_offset: f32, x: f32, y: f32) -> Vec<f64> {
    let cell = GridLayout::new(scale, base_offset).world_to_cell(Vec2::new(x, y));
    vec![cell.x as f64, cell.y as f64]
}
