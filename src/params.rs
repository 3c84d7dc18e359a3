//! Generation parameters and the names the front-end uses to address them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::{GenerationError, checked_vertex_count};

/// How control points become the outer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// Smooth Catmull-Rom spline through every control point.
    #[default]
    Spline,
    /// Straight segments with rounded interior corners.
    Polyline,
}

impl CurveType {
    /// Minimum number of control points the mode can build a curve from.
    #[must_use]
    pub const fn min_control_points(self) -> usize {
        match self {
            Self::Spline => 2,
            Self::Polyline => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spline" => Ok(Self::Spline),
            "polyline" => Ok(Self::Polyline),
            _ => Err(ParamError::UnknownCurveType { name: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown curve type `{name}` (expected `spline` or `polyline`)")]
    UnknownCurveType { name: String },
    #[error("unknown parameter `{name}`")]
    UnknownParameter { name: String },
    #[error("parameter `{name}` must be a finite number, got {value}")]
    NonFiniteValue { name: &'static str, value: f64 },
}

/// Numeric parameters addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Width,
    Depth,
    BaseFilletRadius,
    Tension,
    FilletRadius,
    Segments,
    HeightSegments,
    WallThickness,
    DrainageHoleScale,
}

impl ParamKey {
    pub const ALL: [Self; 9] = [
        Self::Width,
        Self::Depth,
        Self::BaseFilletRadius,
        Self::Tension,
        Self::FilletRadius,
        Self::Segments,
        Self::HeightSegments,
        Self::WallThickness,
        Self::DrainageHoleScale,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Depth => "depth",
            Self::BaseFilletRadius => "baseFilletRadius",
            Self::Tension => "tension",
            Self::FilletRadius => "filletRadius",
            Self::Segments => "segments",
            Self::HeightSegments => "heightSegments",
            Self::WallThickness => "wallThickness",
            Self::DrainageHoleScale => "drainageHoleScale",
        }
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    /// Accepts plain names (`wallThickness`, `wall_thickness`) as well as the
    /// grouped slider paths (`curve.wallThickness`, `dimensions.width`,
    /// `base.filletRadius`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let key = match normalized.as_str() {
            "width" | "dimensions.width" => Self::Width,
            "depth" | "dimensions.depth" => Self::Depth,
            "basefilletradius" | "base.filletradius" => Self::BaseFilletRadius,
            "tension" | "curve.tension" => Self::Tension,
            "filletradius" | "curve.filletradius" => Self::FilletRadius,
            "segments" | "curve.segments" => Self::Segments,
            "heightsegments" | "curve.heightsegments" => Self::HeightSegments,
            "wallthickness" | "curve.wallthickness" => Self::WallThickness,
            "drainageholescale" => Self::DrainageHoleScale,
            _ => return Err(ParamError::UnknownParameter { name: s.to_owned() }),
        };
        Ok(key)
    }
}

/// Immutable snapshot of everything that shapes the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParams {
    /// Footprint scale along X.
    pub width: f64,
    /// Footprint scale along Z.
    pub depth: f64,
    /// Cross-section corner radius as a fraction of the half-extent, `[0, 1]`.
    pub base_fillet_radius: f64,
    pub curve_type: CurveType,
    /// Spline tension; only used in spline mode.
    pub tension: f64,
    /// Corner radius for polyline mode.
    pub fillet_radius: f64,
    /// Points per cross-section ring.
    pub segments: usize,
    /// Number of wall bands between the base slab and the rim.
    pub height_segments: usize,
    pub wall_thickness: f64,
    /// Drainage hole radius as a fraction of the cavity floor radius, `[0, 1]`.
    pub drainage_hole_scale: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            depth: 1.0,
            base_fillet_radius: 0.8,
            curve_type: CurveType::Spline,
            tension: 0.5,
            fillet_radius: 0.5,
            segments: 20,
            height_segments: 60,
            wall_thickness: 0.04,
            drainage_hole_scale: 0.5,
        }
    }
}

impl GenerationParams {
    /// Sets one numeric parameter. Counts are rounded to the nearest integer
    /// and negative counts become zero; range checks happen at generation.
    pub fn set(&mut self, key: ParamKey, value: f64) -> Result<(), ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteValue {
                name: key.name(),
                value,
            });
        }
        match key {
            ParamKey::Width => self.width = value,
            ParamKey::Depth => self.depth = value,
            ParamKey::BaseFilletRadius => self.base_fillet_radius = value,
            ParamKey::Tension => self.tension = value,
            ParamKey::FilletRadius => self.fillet_radius = value,
            ParamKey::Segments => self.segments = round_count(value),
            ParamKey::HeightSegments => self.height_segments = round_count(value),
            ParamKey::WallThickness => self.wall_thickness = value,
            ParamKey::DrainageHoleScale => self.drainage_hole_scale = value,
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::Width => self.width,
            ParamKey::Depth => self.depth,
            ParamKey::BaseFilletRadius => self.base_fillet_radius,
            ParamKey::Tension => self.tension,
            ParamKey::FilletRadius => self.fillet_radius,
            ParamKey::Segments => self.segments as f64,
            ParamKey::HeightSegments => self.height_segments as f64,
            ParamKey::WallThickness => self.wall_thickness,
            ParamKey::DrainageHoleScale => self.drainage_hole_scale,
        }
    }

    /// Checks value ranges that do not depend on the profile shape, including
    /// the vertex budget `segments x rings`.
    ///
    /// The minimum cross-section point count is checked by the cross-section
    /// builder.
    pub fn validate(&self) -> Result<(), GenerationError> {
        positive("width", self.width)?;
        positive("depth", self.depth)?;
        positive("wall_thickness", self.wall_thickness)?;
        unit_interval("base_fillet_radius", self.base_fillet_radius)?;
        unit_interval("drainage_hole_scale", self.drainage_hole_scale)?;
        non_negative("tension", self.tension)?;
        non_negative("fillet_radius", self.fillet_radius)?;
        if self.height_segments < 1 {
            return Err(GenerationError::InvalidParameter {
                name: "height_segments",
                value: self.height_segments as f64,
                expected: "at least 1",
            });
        }
        checked_vertex_count(self.segments, self.height_segments)?;
        Ok(())
    }
}

impl Hash for GenerationParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for key in ParamKey::ALL {
            hash_bits(self.get(key)).hash(state);
        }
        self.curve_type.hash(state);
    }
}

/// Bit pattern of `value` with `-0.0` folded onto `0.0`, so values that
/// compare equal hash alike.
pub(crate) fn hash_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

// Counts come from slider values; anything beyond u32 is not meaningful.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_count(value: f64) -> usize {
    value.round().clamp(0.0, f64::from(u32::MAX)) as usize
}

fn positive(name: &'static str, value: f64) -> Result<(), GenerationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GenerationError::InvalidParameter {
            name,
            value,
            expected: "a finite value greater than 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), GenerationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GenerationError::InvalidParameter {
            name,
            value,
            expected: "a finite value of at least 0",
        })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), GenerationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::InvalidParameter {
            name,
            value,
            expected: "a value in [0, 1]",
        })
    }
}
