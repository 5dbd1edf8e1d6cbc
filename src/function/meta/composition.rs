use crate::function::function::Function;

/// `outer(inner(x))`，定義域取內層函數的定義域。
#[derive(Clone, Debug)]
pub struct Composition<F, G> {
    outer: F,
    inner: G
}

impl<F: Function, G: Function> Composition<F, G> {
    pub fn new(outer: F, inner: G) -> Composition<F, G> {
        Composition { outer, inner }
    }
}

impl<F: Function, G: Function> Function for Composition<F, G> {
    fn evaluate(&self, x: f64) -> f64 {
        self.outer.evaluate(self.inner.evaluate(x))
    }

    fn left_domain_border(&self) -> f64 {
        self.inner.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.inner.right_domain_border()
    }
}
