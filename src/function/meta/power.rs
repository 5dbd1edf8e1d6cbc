use crate::function::function::Function;

/// `f(x)^n`，n 為任意整數（0 次方為 1，負次方為倒數）。
#[derive(Clone, Debug)]
pub struct Power<F> {
    base: F,
    exponent: i32
}

impl<F: Function> Power<F> {
    pub fn new(base: F, exponent: i32) -> Power<F> {
        Power { base, exponent }
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }
}

impl<F: Function> Function for Power<F> {
    fn evaluate(&self, x: f64) -> f64 {
        self.base.evaluate(x).powi(self.exponent)
    }

    fn left_domain_border(&self) -> f64 {
        self.base.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.base.right_domain_border()
    }
}
