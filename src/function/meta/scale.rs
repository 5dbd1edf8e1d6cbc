use crate::function::function::Function;
use crate::function::functionerror::FunctionError;

/// 沿兩軸縮放：`y_factor * f(x / x_factor)`。
///
/// 定義域邊界乘上 `x_factor`，負的倍率會左右對調。
#[derive(Clone, Debug)]
pub struct Scale<F> {
    function: F,
    x_factor: f64,
    y_factor: f64
}

impl<F: Function> Scale<F> {
    pub fn new(function: F, x_factor: f64, y_factor: f64) -> Result<Scale<F>, FunctionError> {
        if x_factor == 0.0 || !x_factor.is_finite() {
            return Err(FunctionError::invalid_argument(
                format!("x scale factor must be finite and non-zero, got {}", x_factor)
            ));
        }
        Ok(Scale { function, x_factor, y_factor })
    }

    fn scaled_borders(&self) -> (f64, f64) {
        let lhs = self.function.left_domain_border() * self.x_factor;
        let rhs = self.function.right_domain_border() * self.x_factor;
        if self.x_factor > 0.0 { (lhs, rhs) } else { (rhs, lhs) }
    }
}

impl<F: Function> Function for Scale<F> {
    fn evaluate(&self, x: f64) -> f64 {
        self.y_factor * self.function.evaluate(x / self.x_factor)
    }

    fn left_domain_border(&self) -> f64 {
        self.scaled_borders().0
    }

    fn right_domain_border(&self) -> f64 {
        self.scaled_borders().1
    }
}
