//! Uniform calling convention for derived functions.
//!
//! The evaluation engine locates a unit by name and calls it with a list of
//! already-loaded [`Value`]s; every unit returns one [`Value`]. The engine
//! never needs to know an individual unit's signature.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::addition::add;
use crate::config::DerivedParamConfig;
use crate::deformation::deformation;
use crate::error::{DerivParamError, Result};
use crate::functions::{
    ceiling_height, prepend_surface_level, scaled_pressure_height, sky_layer_height_ft,
    CeilingPressure, PressureToHeight, StandardAtmosphere,
};
use crate::value::Value;
use crate::vector::VectorField;
use crate::world_wrap::WorldWrap;

/// Per-invocation metadata supplied by the evaluation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalContext {
    /// The source grid wraps around the globe in longitude.
    pub world_wrapped: bool,
}

impl EvalContext {
    pub fn world_wrapped() -> Self {
        Self {
            world_wrapped: true,
        }
    }
}

/// A derived parameter function callable by name.
pub trait DerivedFunction: Send + Sync {
    /// Name the evaluation engine refers to this function by.
    fn name(&self) -> &str;

    /// Evaluate with positional arguments.
    fn execute(&self, args: Vec<Value>, ctx: &EvalContext) -> Result<Value>;
}

/// One pending function call.
#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Name-indexed set of derived functions.
pub struct FunctionRegistry {
    functions: HashMap<String, Box<dyn DerivedFunction>>,
    config: DerivedParamConfig,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new(config: DerivedParamConfig) -> Self {
        Self {
            functions: HashMap::new(),
            config,
        }
    }

    /// A registry holding every built-in function.
    pub fn with_defaults(config: DerivedParamConfig) -> Self {
        let wrap_columns = config.wrap_columns;
        let mut registry = Self::new(config);
        registry.register(Add);
        registry.register(DeformationComponent { wrap_columns });
        registry.register(SurfaceLevel);
        registry.register(SkyLayerHeight);
        registry.register(PressureHeight::new(StandardAtmosphere));
        registry
    }

    /// A registry holding every built-in function, after validating
    /// `config`.
    pub fn from_config(config: DerivedParamConfig) -> Result<Self> {
        config.validate().map_err(DerivParamError::Config)?;
        Ok(Self::with_defaults(config))
    }

    /// Register a function, replacing any previous one with the same name.
    pub fn register(&mut self, function: impl DerivedFunction + 'static) {
        self.functions
            .insert(function.name().to_string(), Box::new(function));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DerivedFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn config(&self) -> &DerivedParamConfig {
        &self.config
    }

    /// Evaluate the named function.
    pub fn execute(&self, name: &str, args: Vec<Value>, ctx: &EvalContext) -> Result<Value> {
        let function = self
            .get(name)
            .ok_or_else(|| DerivParamError::unknown_function(name))?;

        let start = Instant::now();
        let result = function.execute(args, ctx);
        if self.config.log_durations {
            debug!(
                function = name,
                duration_ms = start.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "executed derived function"
            );
        }

        result
    }

    /// Evaluate independent calls in parallel, returning results in call
    /// order.
    pub fn execute_batch(&self, calls: Vec<Call>, ctx: &EvalContext) -> Vec<Result<Value>> {
        calls
            .into_par_iter()
            .map(|call| self.execute(&call.name, call.args, ctx))
            .collect()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_defaults(DerivedParamConfig::default())
    }
}

fn arity_error(name: &str, expected: &str, got: usize) -> DerivParamError {
    DerivParamError::invalid_argument(format!(
        "{} expects {} arguments, got {}",
        name, expected, got
    ))
}

/// Scalar or vector addition.
pub struct Add;

impl DerivedFunction for Add {
    fn name(&self) -> &str {
        "Add"
    }

    fn execute(&self, args: Vec<Value>, _ctx: &EvalContext) -> Result<Value> {
        add(args)
    }
}

/// Deformation components, with world-wrap correction on global grids.
///
/// Arguments: `(vector, dx, dy)` or `(u, v, dx, dy)`.
pub struct DeformationComponent {
    pub wrap_columns: usize,
}

impl DerivedFunction for DeformationComponent {
    fn name(&self) -> &str {
        "DeformationComponent"
    }

    fn execute(&self, args: Vec<Value>, ctx: &EvalContext) -> Result<Value> {
        let (field, dx, dy) = match <[Value; 3]>::try_from(args) {
            Ok([field, dx, dy]) => (field.into_vector()?, dx, dy),
            Err(args) => match <[Value; 4]>::try_from(args) {
                Ok([u, v, dx, dy]) => (
                    VectorField::from_components(u.into_grid()?, v.into_grid()?)?,
                    dx,
                    dy,
                ),
                Err(args) => return Err(arity_error(self.name(), "3 or 4", args.len())),
            },
        };

        let wrap = WorldWrap::from_flag(ctx.world_wrapped, self.wrap_columns);
        let result = deformation(&field, &dx.into_spacing()?, &dy.into_spacing()?, wrap)?;
        Ok(Value::Vector(result))
    }
}

/// Level data with the surface value prepended to each column.
///
/// Arguments: `(levels, surface)`.
pub struct SurfaceLevel;

impl DerivedFunction for SurfaceLevel {
    fn name(&self) -> &str {
        "vW"
    }

    fn execute(&self, args: Vec<Value>, _ctx: &EvalContext) -> Result<Value> {
        let [levels, surface] = <[Value; 2]>::try_from(args)
            .map_err(|args| arity_error(self.name(), "2", args.len()))?;
        let joined = prepend_surface_level(&levels.into_grid()?, &surface.into_grid()?)?;
        Ok(Value::Grid(joined))
    }
}

/// Sky layer base height above sea level in feet.
///
/// Arguments: `(sky_layer_base, elevation_m, index)`.
pub struct SkyLayerHeight;

impl DerivedFunction for SkyLayerHeight {
    fn name(&self) -> &str {
        "MSL"
    }

    fn execute(&self, args: Vec<Value>, _ctx: &EvalContext) -> Result<Value> {
        let [bases, elevation, index] = <[Value; 3]>::try_from(args)
            .map_err(|args| arity_error(self.name(), "3", args.len()))?;

        let index = index.into_number()?;
        if !index.is_finite() || index < 0.0 {
            return Err(DerivParamError::invalid_argument(format!(
                "sky layer index must be a non-negative number, got {}",
                index
            )));
        }

        let heights = sky_layer_height_ft(
            &bases.into_grid()?,
            &elevation.into_grid()?,
            index.trunc() as usize,
        )?;
        Ok(Value::Grid(heights))
    }
}

/// Standard-atmosphere height from pressure.
///
/// Arguments: `(pressure)`, a grid or a number in hPa, giving four times
/// the standard height; or `(present, low, mid, high)` cloud reports, giving
/// the height of the cloud ceiling. The cloud form needs a
/// [`CeilingPressure`] source.
pub struct PressureHeight {
    atmosphere: Box<dyn PressureToHeight>,
    ceiling: Option<Box<dyn CeilingPressure>>,
}

impl PressureHeight {
    pub fn new(atmosphere: impl PressureToHeight + 'static) -> Self {
        Self {
            atmosphere: Box::new(atmosphere),
            ceiling: None,
        }
    }

    /// Enable the cloud-ceiling form.
    pub fn with_ceiling(mut self, ceiling: impl CeilingPressure + 'static) -> Self {
        self.ceiling = Some(Box::new(ceiling));
        self
    }

    fn pressure_form(&self, pressure: Value) -> Result<Value> {
        match pressure {
            Value::Number(p) => Ok(Value::Number(
                self.atmosphere.pressure_to_height(p) * 4.0,
            )),
            other => Ok(Value::Grid(scaled_pressure_height(
                &other.into_grid()?,
                self.atmosphere.as_ref(),
            ))),
        }
    }

    fn cloud_ceiling_form(&self, [present, low, mid, high]: [Value; 4]) -> Result<Value> {
        let ceiling = self.ceiling.as_deref().ok_or_else(|| {
            DerivParamError::invalid_argument("GH cloud ceiling form has no ceiling pressure source")
        })?;

        let heights = ceiling_height(
            &present.into_grid()?,
            &low.into_grid()?,
            &mid.into_grid()?,
            &high.into_grid()?,
            ceiling,
            self.atmosphere.as_ref(),
        )?;
        Ok(Value::Grid(heights))
    }
}

impl DerivedFunction for PressureHeight {
    fn name(&self) -> &str {
        "GH"
    }

    fn execute(&self, args: Vec<Value>, _ctx: &EvalContext) -> Result<Value> {
        match <[Value; 1]>::try_from(args) {
            Ok([pressure]) => self.pressure_form(pressure),
            Err(args) => match <[Value; 4]>::try_from(args) {
                Ok(clouds) => self.cloud_ceiling_form(clouds),
                Err(args) => Err(arity_error(self.name(), "1 or 4", args.len())),
            },
        }
    }
}
