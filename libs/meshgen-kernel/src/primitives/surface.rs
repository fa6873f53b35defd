//! Height field `z = f(x, y)` sampled on a centered grid.

use super::{finish, prepare, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_at_least, require_positive, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use config::constants::{KernelConfig, MIN_GRID_DIVISIONS};
use meshgen_expr::Expression;
use serde::{Deserialize, Serialize};

/// Parameters of [`function_surface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSurfaceParams {
    /// Samples along X, edges included.
    pub div_x: u32,
    /// Samples along Y, edges included.
    pub div_y: u32,
    pub size_x: f64,
    pub size_y: f64,
    /// Height expression over the bound variables `x` and `y`.
    pub expression: String,
}

impl Default for FunctionSurfaceParams {
    fn default() -> Self {
        Self {
            div_x: 16,
            div_y: 16,
            size_x: 2.0,
            size_y: 2.0,
            expression: "1 - x**2 - y**2".to_string(),
        }
    }
}

impl PrimitiveParams for FunctionSurfaceParams {
    const NAME: &'static str = "function surface";

    fn validate(&self) -> KernelResult<()> {
        require_at_least("div_x", self.div_x, MIN_GRID_DIVISIONS)?;
        require_at_least("div_y", self.div_y, MIN_GRID_DIVISIONS)?;
        require_positive("size_x", self.size_x)?;
        require_positive("size_y", self.size_y)
    }

    fn vertex_count(&self) -> usize {
        self.div_x as usize * self.div_y as usize
    }

    fn face_count(&self) -> usize {
        (self.div_x as usize - 1) * (self.div_y as usize - 1)
    }

    fn build(&self) -> KernelResult<Mesh> {
        function_surface(self)
    }
}

/// Builds a function surface with the default expression budget.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{function_surface, FunctionSurfaceParams};
///
/// let params = FunctionSurfaceParams {
///     div_x: 3,
///     div_y: 3,
///     expression: "x + y".to_string(),
///     ..FunctionSurfaceParams::default()
/// };
/// let mesh = function_surface(&params).unwrap();
/// assert_eq!(mesh.face_count(), 4);
/// assert_eq!(mesh.verts[0].z, -2.0);
/// ```
pub fn function_surface(params: &FunctionSurfaceParams) -> KernelResult<Mesh> {
    function_surface_with(params, &KernelConfig::default())
}

/// Builds a function surface, nesting the expression at most
/// `config.max_expression_depth` deep.
///
/// The expression is compiled before any vertex is emitted, so a rejected
/// name costs no sampling. Rows run along X; row `i` holds the `div_y`
/// samples at `x_i`, and each pair of rows is bridged into an open strip
/// facing +Z. Any non-real sample fails the whole build.
pub fn function_surface_with(
    params: &FunctionSurfaceParams,
    config: &KernelConfig,
) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let expression = Expression::compile_with_depth(&params.expression, config.max_expression_depth)?;

    let step_x = params.size_x / f64::from(params.div_x - 1);
    let step_y = params.size_y / f64::from(params.div_y - 1);
    let start_x = -params.size_x / 2.0;
    let start_y = -params.size_y / 2.0;

    let mut previous: Option<Vec<usize>> = None;
    for i in 0..params.div_x {
        let x = start_x + step_x * f64::from(i);
        let mut row = Vec::with_capacity(params.div_y as usize);
        for j in 0..params.div_y {
            let y = start_y + step_y * f64::from(j);
            let z = expression.eval(x, y)?;
            row.push(mesh.add_vertex(Vector3::new(x, y, z)));
        }
        if let Some(prev) = &previous {
            mesh.extend_faces(bridge(prev, &row, false, false)?);
        }
        previous = Some(row);
    }

    Ok(finish::<FunctionSurfaceParams>(mesh))
}
