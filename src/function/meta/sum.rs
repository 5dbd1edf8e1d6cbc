use crate::function::function::Function;

/// `f(x) + g(x)`，定義域為兩者的交集。每次求值都重新呼叫兩個運算元。
#[derive(Clone, Debug)]
pub struct Sum<F, G> {
    lhs: F,
    rhs: G
}

impl<F: Function, G: Function> Sum<F, G> {
    pub fn new(lhs: F, rhs: G) -> Sum<F, G> {
        Sum { lhs, rhs }
    }
}

impl<F: Function, G: Function> Function for Sum<F, G> {
    fn evaluate(&self, x: f64) -> f64 {
        self.lhs.evaluate(x) + self.rhs.evaluate(x)
    }

    fn left_domain_border(&self) -> f64 {
        self.lhs.left_domain_border().max(self.rhs.left_domain_border())
    }

    fn right_domain_border(&self) -> f64 {
        self.lhs.right_domain_border().min(self.rhs.right_domain_border())
    }
}
