//! Editing state behind the interactive designer: the control points the user
//! drags, the current parameters, and the last mesh that generated cleanly.

use std::sync::Arc;

use crate::geom::{
    ExportError, ExportTransform, GenerationError, GeomCacheStats, GeomContext, Point2,
    VesselMemo, VesselMesh, generate_with_context, obj_string,
};
use crate::params::{CurveType, GenerationParams, ParamError, ParamKey};

pub const MIN_CONTROL_POINTS: usize = 2;
pub const MAX_CONTROL_POINTS: usize = 10;

/// Allowed control-point radius, normalised to the vessel width.
pub const RADIUS_RANGE: (f64, f64) = (0.01, 1.5);
/// Allowed control-point height.
pub const HEIGHT_RANGE: (f64, f64) = (0.0, 3.0);

/// Lift applied to a point inserted between the last two.
const INSERT_LIFT: f64 = 0.05;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a profile holds at most {max} control points")]
    TooManyControlPoints { max: usize },
    #[error("a profile needs at least {min} control points")]
    TooFewControlPoints { min: usize },
    #[error("control point {index} does not exist ({len} points)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("control point coordinates must be finite")]
    NonFinitePoint,
    #[error("no vessel has been generated yet")]
    NoMesh,
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Ordered profile control points, kept inside the editable range.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints {
    points: Vec<Point2>,
}

impl ControlPoints {
    /// The starter vase profile.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            points: vec![
                Point2::new(0.1, 0.0),
                Point2::new(0.22, 0.2),
                Point2::new(0.3, 0.5),
                Point2::new(0.2, 0.8),
                Point2::new(0.3, 1.0),
            ],
        }
    }

    /// Takes `points` as given, clamped into range. At most
    /// [`MAX_CONTROL_POINTS`] are accepted.
    ///
    /// # Errors
    ///
    /// Fails for too many points or non-finite coordinates.
    pub fn from_points(points: &[Point2]) -> Result<Self, SessionError> {
        if points.len() > MAX_CONTROL_POINTS {
            return Err(SessionError::TooManyControlPoints {
                max: MAX_CONTROL_POINTS,
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SessionError::NonFinitePoint);
        }
        Ok(Self {
            points: points.iter().copied().map(clamp_point).collect(),
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds a point near the top of the profile.
    ///
    /// With two or more points, the midpoint of the last two (raised slightly)
    /// is inserted before the last point. A single point gets a neighbour above
    /// and to the right; an empty profile is seeded with two points.
    ///
    /// # Errors
    ///
    /// Fails when the profile already holds [`MAX_CONTROL_POINTS`].
    pub fn add(&mut self) -> Result<(), SessionError> {
        if self.points.len() >= MAX_CONTROL_POINTS {
            return Err(SessionError::TooManyControlPoints {
                max: MAX_CONTROL_POINTS,
            });
        }

        match self.points.as_slice() {
            [] => {
                self.points.push(Point2::new(0.1, 0.0));
                self.points.push(Point2::new(0.2, 0.5));
            }
            [only] => {
                let next = Point2::new(only.x + 0.1, only.y + 0.2);
                self.points.push(clamp_point(next));
            }
            [.., before_last, last] => {
                let mid = before_last.lerp(*last, 0.5);
                let inserted = clamp_point(Point2::new(mid.x, mid.y + INSERT_LIFT));
                let at = self.points.len() - 1;
                self.points.insert(at, inserted);
            }
        }
        Ok(())
    }

    /// Removes the second-to-last point, keeping the rim where it is.
    ///
    /// # Errors
    ///
    /// Fails when only [`MIN_CONTROL_POINTS`] remain.
    pub fn remove(&mut self) -> Result<Point2, SessionError> {
        if self.points.len() <= MIN_CONTROL_POINTS {
            return Err(SessionError::TooFewControlPoints {
                min: MIN_CONTROL_POINTS,
            });
        }
        let at = self.points.len() - 2;
        Ok(self.points.remove(at))
    }

    /// Moves point `index` to `to`, clamped into range. The first point stays
    /// on the ground.
    ///
    /// # Errors
    ///
    /// Fails for an unknown index or a non-finite target.
    pub fn move_point(&mut self, index: usize, to: Point2) -> Result<Point2, SessionError> {
        if !to.is_finite() {
            return Err(SessionError::NonFinitePoint);
        }
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;

        let mut moved = clamp_point(to);
        if index == 0 {
            moved.y = HEIGHT_RANGE.0;
        }
        *slot = moved;
        Ok(moved)
    }
}

impl Default for ControlPoints {
    fn default() -> Self {
        Self::defaults()
    }
}

fn clamp_point(p: Point2) -> Point2 {
    Point2::new(
        p.x.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1),
        p.y.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1),
    )
}

/// One designer session.
///
/// Generation results are memoised by content, so dragging a slider back to
/// an earlier value reuses the earlier mesh. When a generation fails the last
/// valid mesh stays available.
#[derive(Debug, Default)]
pub struct Session {
    points: ControlPoints,
    params: GenerationParams,
    ctx: GeomContext,
    memo: VesselMemo,
    last_valid: Option<Arc<VesselMesh>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(points: ControlPoints, params: GenerationParams) -> Self {
        Self {
            points,
            params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    #[must_use]
    pub fn control_points(&self) -> &ControlPoints {
        &self.points
    }

    /// Sets a numeric parameter by key.
    ///
    /// # Errors
    ///
    /// Fails for non-finite values.
    pub fn set_param(&mut self, key: ParamKey, value: f64) -> Result<(), SessionError> {
        self.params.set(key, value)?;
        Ok(())
    }

    /// Sets a numeric parameter by its front-end name, e.g. `curve.tension`.
    ///
    /// # Errors
    ///
    /// Fails for unknown names or non-finite values.
    pub fn set_param_by_name(&mut self, name: &str, value: f64) -> Result<(), SessionError> {
        let key: ParamKey = name.parse()?;
        self.set_param(key, value)
    }

    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        self.params.curve_type = curve_type;
    }

    /// # Errors
    ///
    /// See [`ControlPoints::add`].
    pub fn add_control_point(&mut self) -> Result<(), SessionError> {
        self.points.add()
    }

    /// # Errors
    ///
    /// See [`ControlPoints::remove`].
    pub fn remove_control_point(&mut self) -> Result<Point2, SessionError> {
        self.points.remove()
    }

    /// # Errors
    ///
    /// See [`ControlPoints::move_point`].
    pub fn move_control_point(&mut self, index: usize, to: Point2) -> Result<Point2, SessionError> {
        self.points.move_point(index, to)
    }

    /// Generates the vessel for the current state.
    ///
    /// # Errors
    ///
    /// Returns the generation error; the previous mesh stays in
    /// [`last_mesh`](Self::last_mesh).
    pub fn regenerate(&mut self) -> Result<Arc<VesselMesh>, SessionError> {
        let Self {
            points,
            params,
            ctx,
            memo,
            last_valid,
        } = self;

        let (points, params) = (points.as_slice(), &*params);
        match memo.get_or_try_insert(points, params, || generate_with_context(points, params, ctx)) {
            Ok(vessel) => {
                *last_valid = Some(Arc::clone(&vessel));
                Ok(vessel)
            }
            Err(err) => {
                log::warn!("vessel generation failed, keeping the previous mesh: {err}");
                Err(err.into())
            }
        }
    }

    /// The most recent mesh that generated without error.
    #[must_use]
    pub fn last_mesh(&self) -> Option<&Arc<VesselMesh>> {
        self.last_valid.as_ref()
    }

    /// OBJ text of the last valid mesh, in Z-up millimetres.
    ///
    /// # Errors
    ///
    /// Fails when nothing has been generated yet.
    pub fn export_obj(&self, name: &str) -> Result<String, SessionError> {
        let vessel = self.last_valid.as_ref().ok_or(SessionError::NoMesh)?;
        Ok(obj_string(&vessel.mesh, ExportTransform::default(), name)?)
    }

    #[must_use]
    pub fn cache_stats(&self) -> GeomCacheStats {
        self.ctx.cache.stats()
    }
}
