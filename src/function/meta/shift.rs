use crate::function::function::Function;

/// 沿兩軸平移：`f(x - x_shift) + y_shift`。
#[derive(Clone, Debug)]
pub struct Shift<F> {
    function: F,
    x_shift: f64,
    y_shift: f64
}

impl<F: Function> Shift<F> {
    pub fn new(function: F, x_shift: f64, y_shift: f64) -> Shift<F> {
        Shift { function, x_shift, y_shift }
    }
}

impl<F: Function> Function for Shift<F> {
    fn evaluate(&self, x: f64) -> f64 {
        self.function.evaluate(x - self.x_shift) + self.y_shift
    }

    fn left_domain_border(&self) -> f64 {
        self.function.left_domain_border() + self.x_shift
    }

    fn right_domain_border(&self) -> f64 {
        self.function.right_domain_border() + self.x_shift
    }
}
