#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod params;
pub mod session;

use std::fmt;
use std::sync::Arc;

use geom::{Point2, VesselMesh};
use params::CurveType;
use serde::Serialize;
use session::Session;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

/// Mesh buffers in the shape the viewer uploads to the GPU.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeshExport<'a> {
    positions: &'a [f64],
    indices: &'a [u32],
    bounds_min: [f64; 3],
    bounds_max: [f64; 3],
    vertical_offset: f64,
    /// Outer profile as `[radius, height]` pairs for the 2D editor overlay.
    profile: Vec<[f64; 2]>,
}

impl<'a> MeshExport<'a> {
    fn from_vessel(vessel: &'a VesselMesh) -> Self {
        Self {
            positions: vessel.mesh.positions_flat(),
            indices: &vessel.mesh.indices,
            bounds_min: vessel.bounds.min.to_array(),
            bounds_max: vessel.bounds.max.to_array(),
            vertical_offset: vessel.vertical_offset,
            profile: vessel
                .outer_profile
                .points()
                .iter()
                .map(|p| p.to_array())
                .collect(),
        }
    }
}

/// Publieke ingang voor de vaas-editor in de browser.
#[wasm_bindgen]
pub struct VesselEngine {
    session: Session,
}

#[wasm_bindgen]
impl VesselEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> VesselEngine {
        VesselEngine {
            session: Session::new(),
        }
    }

    /// Stel een numerieke parameter in op basis van de slidernaam.
    #[wasm_bindgen]
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.session
            .set_param_by_name(name, value)
            .map_err(to_js_error)
    }

    /// Kies tussen `spline` en `polyline`.
    #[wasm_bindgen]
    pub fn set_curve_type(&mut self, name: &str) -> Result<(), JsValue> {
        let curve_type: CurveType = name.parse().map_err(to_js_error)?;
        self.session.set_curve_type(curve_type);
        Ok(())
    }

    /// Huidige parameters als JS-object.
    #[wasm_bindgen]
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.params())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Controlepunten als lijst van `{x, y}`.
    #[wasm_bindgen]
    pub fn control_points(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.control_points().as_slice())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Verplaats een controlepunt; geeft het (begrensde) punt terug.
    #[wasm_bindgen]
    pub fn move_control_point(&mut self, index: usize, x: f64, y: f64) -> Result<Vec<f64>, JsValue> {
        let moved = self
            .session
            .move_control_point(index, Point2::new(x, y))
            .map_err(to_js_error)?;
        Ok(moved.to_array().to_vec())
    }

    #[wasm_bindgen]
    pub fn add_control_point(&mut self) -> Result<(), JsValue> {
        self.session.add_control_point().map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn remove_control_point(&mut self) -> Result<(), JsValue> {
        self.session
            .remove_control_point()
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Genereer de vaas. Bij een fout blijft de vorige mesh beschikbaar.
    #[wasm_bindgen]
    pub fn generate(&mut self) -> Result<JsValue, JsValue> {
        let vessel = self.session.regenerate().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&MeshExport::from_vessel(&vessel))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// `[breedte, hoogte, diepte]` in millimeter.
    #[wasm_bindgen]
    pub fn dimensions_mm(&mut self) -> Result<Vec<f64>, JsValue> {
        let vessel = self.current_vessel()?;
        Ok(vessel.dimensions_mm().to_vec())
    }

    /// OBJ-tekst van de laatste geldige mesh, Z-omhoog in millimeter.
    #[wasm_bindgen]
    pub fn export_obj(&mut self, name: &str) -> Result<String, JsValue> {
        self.current_vessel()?;
        self.session.export_obj(name).map_err(to_js_error)
    }
}

impl Default for VesselEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VesselEngine {
    /// The mesh for the current state, or the last valid one if the current
    /// state does not generate.
    fn current_vessel(&mut self) -> Result<Arc<VesselMesh>, JsValue> {
        match self.session.regenerate() {
            Ok(vessel) => Ok(vessel),
            Err(err) => self
                .session
                .last_mesh()
                .cloned()
                .ok_or_else(|| to_js_error(err)),
        }
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{MeshExport, VesselEngine};
    use crate::geom::generate;
    use crate::params::GenerationParams;
    use crate::session::ControlPoints;

    #[test]
    fn mesh_export_flattens_buffers() {
        let vessel = generate(ControlPoints::defaults().as_slice(), &GenerationParams::default())
            .expect("vessel");
        let export = MeshExport::from_vessel(&vessel);
        assert_eq!(export.positions.len(), vessel.mesh.vertex_count() * 3);
        assert_eq!(export.indices.len(), vessel.mesh.indices.len());
        assert_eq!(export.profile.len(), vessel.outer_profile.len());
        assert_eq!(export.bounds_min[1], 0.0);
    }

    #[test]
    fn engine_reports_dimensions_and_rejects_bad_input() {
        let mut engine = VesselEngine::new();
        assert!(engine.set_param("dimensions.width", 2.0).is_ok());
        assert!(engine.set_param("glazuur", 1.0).is_err());
        assert!(engine.set_curve_type("bezier").is_err());
        assert!(engine.set_curve_type("polyline").is_ok());

        let dims = engine.dimensions_mm().expect("dimensions");
        assert_eq!(dims.len(), 3);
        assert!((dims[1] - 50.0).abs() < 1e-6);
        assert!(dims[0] > dims[2]);
    }

    #[test]
    fn engine_keeps_last_mesh_for_export() {
        let mut engine = VesselEngine::new();
        assert!(engine.export_obj("vaas").is_ok());
        assert!(engine.set_param("wallThickness", 0.5).is_ok());
        // The new thickness does not fit; export falls back to the last mesh.
        let obj = engine.export_obj("vaas").expect("obj");
        assert!(obj.contains("o vaas"));

        assert!(engine.move_control_point(9, 0.2, 0.2).is_err());
        assert_eq!(engine.move_control_point(0, 0.25, 0.4).expect("move"), vec![0.25, 0.0]);
        assert!(engine.add_control_point().is_ok());
        assert!(engine.remove_control_point().is_ok());
    }
}
