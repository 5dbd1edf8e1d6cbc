use tracing::debug;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::tabulated::functionpoint::FunctionPoint;
use crate::tabulated::tabulatedfunction::{
    uniform_grid,
    TabulatedFunction
};

/// 在 `[left_x, right_x]` 上等距取 `points_count` 點（含兩端）對 `function` 取樣，
/// 步長為 `(right_x - left_x) / (points_count - 1)`。
///
/// 取樣區間必須落在 `function` 的定義域內。
pub fn tabulate<T, F>(function: &F,
                      left_x: f64,
                      right_x: f64,
                      points_count: usize) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          F: Function + ?Sized {
    if left_x < function.left_domain_border() || right_x > function.right_domain_border() {
        return Err(FunctionError::invalid_argument(
            format!("[{}, {}] is outside the function domain [{}, {}]",
                    left_x,
                    right_x,
                    function.left_domain_border(),
                    function.right_domain_border())
        ));
    }
    let grid = uniform_grid(left_x, right_x, points_count)?;
    let points = grid
        .into_iter()
        .map(|x| FunctionPoint::new(x, function.evaluate(x)))
        .collect();
    debug!(left_x, right_x, points_count, "function tabulated");
    T::from_points(points)
}
