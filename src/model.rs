//! Data models for the 3D container loading problem.
//!
//! This module defines the fundamental data structures:
//! - `Box3D`: an object to be packed, with dimensions, weight, and shipment metadata
//! - `Placement`: a box's resolved origin and orientation inside a container
//! - `Container`: the voxel extents, weight budget, and weight zones of the bin
//! - `Solution`: the placements produced by one RCH iteration and their score

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::types::IVec3;

/// Validation error for box, container, or zone construction.
#[derive(Debug, Clone)]
pub enum ValidationError {
    InvalidDimension(String),
    InvalidWeight(String),
    InvalidZone(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidDimension(msg) => write!(f, "Invalid dimension: {}", msg),
            ValidationError::InvalidWeight(msg) => write!(f, "Invalid weight: {}", msg),
            ValidationError::InvalidZone(msg) => write!(f, "Invalid zone: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_dimension(value: i64, name: &str) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::InvalidDimension(format!(
            "{} must be positive, got: {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_weight_value(value: f64) -> Result<(), ValidationError> {
    if value < 0.0 || value.is_nan() || value.is_infinite() {
        return Err(ValidationError::InvalidWeight(format!(
            "Weight must be a finite, non-negative number, got: {}",
            value
        )));
    }
    Ok(())
}

fn validate_box_params(dims: (i64, i64, i64), weight: f64) -> Result<(), ValidationError> {
    validate_dimension(dims.0, "Length")?;
    validate_dimension(dims.1, "Width")?;
    validate_dimension(dims.2, "Height")?;
    validate_weight_value(weight)?;
    Ok(())
}

/// A box to be packed into the container.
///
/// # Fields
/// * `id` - opaque identifier, pre-assigned by the caller and used as the voxel label
/// * `customer_id` - groups boxes belonging to the same shipment/customer
/// * `priority` - higher priority boxes are ordered earlier within a customer's group
/// * `fragility` - carried through for downstream handling; not consulted by the engine
/// * `dims` - base dimensions (length, width, height) before any orientation is chosen
/// * `weight` - non-negative weight
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Box3D {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub fragility: bool,
    #[schema(value_type = [i64; 3], example = json!([30, 40, 20]))]
    pub dims: (i64, i64, i64),
    pub weight: f64,
}

impl Box3D {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        priority: i32,
        fragility: bool,
        dims: (i64, i64, i64),
        weight: f64,
    ) -> Result<Self, ValidationError> {
        validate_box_params(dims, weight)?;
        Ok(Self {
            id: id.into(),
            customer_id: customer_id.into(),
            priority,
            fragility,
            dims,
            weight,
        })
    }

    #[inline]
    pub fn dims_vec(&self) -> IVec3 {
        IVec3::from_tuple(self.dims)
    }

    #[inline]
    pub fn volume(&self) -> i64 {
        self.dims_vec().volume()
    }

    /// The six axis permutations of the base dimensions, sorted ascending by
    /// base area (`o0 * o1`), stable so equal-area orientations keep their
    /// natural insertion order.
    pub fn allowed_orientations(&self) -> Vec<IVec3> {
        let (l, w, h) = self.dims;
        let mut orientations = vec![
            IVec3::new(l, w, h),
            IVec3::new(w, l, h),
            IVec3::new(l, h, w),
            IVec3::new(w, h, l),
            IVec3::new(h, l, w),
            IVec3::new(h, w, l),
        ];
        orientations.sort_by_key(|o| o.base_area());
        orientations
    }
}

/// An inclusive-exclusive interval along the X axis with a weight budget.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct WeightZone {
    pub x_lo: i64,
    pub x_hi: i64,
    pub budget: f64,
}

impl WeightZone {
    pub fn new(x_lo: i64, x_hi: i64, budget: f64) -> Result<Self, ValidationError> {
        if x_hi <= x_lo {
            return Err(ValidationError::InvalidZone(format!(
                "zone upper bound {} must exceed lower bound {}",
                x_hi, x_lo
            )));
        }
        validate_weight_value(budget)?;
        Ok(Self {
            x_lo,
            x_hi,
            budget,
        })
    }

    #[inline]
    pub fn contains_x(&self, x: i64) -> bool {
        x >= self.x_lo && x < self.x_hi
    }
}

/// The container to be loaded: voxel extents, weight budget, and weight zones.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Container {
    #[schema(value_type = [i64; 3], example = json!([100, 100, 100]))]
    pub dims: (i64, i64, i64),
    pub max_weight: f64,
    pub zones: Vec<WeightZone>,
}

impl Container {
    pub fn new(
        dims: (i64, i64, i64),
        max_weight: f64,
        zones: Vec<WeightZone>,
    ) -> Result<Self, ValidationError> {
        validate_dimension(dims.0, "Container length")?;
        validate_dimension(dims.1, "Container width")?;
        validate_dimension(dims.2, "Container height")?;
        validate_weight_value(max_weight)?;
        Ok(Self {
            dims,
            max_weight,
            zones,
        })
    }

    /// Default single-zone container: `[0, X)` carries the whole `max_weight` budget.
    pub fn single_zone(dims: (i64, i64, i64), max_weight: f64) -> Result<Self, ValidationError> {
        let zone = WeightZone::new(0, dims.0, max_weight)?;
        Self::new(dims, max_weight, vec![zone])
    }

    #[inline]
    pub fn dims_vec(&self) -> IVec3 {
        IVec3::from_tuple(self.dims)
    }

    #[inline]
    pub fn volume(&self) -> i64 {
        self.dims_vec().volume()
    }

    /// The zone whose interval contains `x`, if any.
    pub fn zone_for_x(&self, x: i64) -> Option<usize> {
        self.zones.iter().position(|z| z.contains_x(x))
    }
}

/// One box's resolved origin and orientation inside the container.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Placement {
    pub box_id: String,
    #[schema(value_type = [i64; 3], example = json!([0, 0, 0]))]
    pub origin: (i64, i64, i64),
    #[schema(value_type = [i64; 3], example = json!([30, 40, 20]))]
    pub orientation: (i64, i64, i64),
    pub weight: f64,
}

impl Placement {
    #[inline]
    pub fn origin_vec(&self) -> IVec3 {
        IVec3::from_tuple(self.origin)
    }

    #[inline]
    pub fn orientation_vec(&self) -> IVec3 {
        IVec3::from_tuple(self.orientation)
    }

    #[inline]
    pub fn volume(&self) -> i64 {
        self.orientation_vec().volume()
    }
}

/// The outcome of scoring a single RCH iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum Score {
    NotDefined,
    Infeasible,
    Value(f64),
}

impl Score {
    pub fn is_feasible(&self) -> bool {
        !matches!(self, Score::Infeasible)
    }

    pub fn value(&self) -> f64 {
        match self {
            Score::Value(v) => *v,
            _ => 0.0,
        }
    }
}

/// One RCH iteration's result: the placements it produced, plus its score.
#[derive(Clone, Debug)]
pub struct Solution {
    pub placements: Vec<Placement>,
    pub score: Score,
}

impl Solution {
    pub fn empty() -> Self {
        Self {
            placements: Vec::new(),
            score: Score::NotDefined,
        }
    }

    pub fn placed_ids(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(|p| p.box_id.as_str())
    }
}
