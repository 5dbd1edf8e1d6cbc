use crate::function::function::Function;

#[derive(Clone, Copy, Debug, Default)]
pub struct Exp;

impl Function for Exp {
    fn evaluate(&self, x: f64) -> f64 {
        x.exp()
    }
}
