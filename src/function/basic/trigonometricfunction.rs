use crate::function::function::Function;

// 三角函數，定義域為整個實數線（Tan 在奇點附近回傳極大值或 inf）。

#[derive(Clone, Copy, Debug, Default)]
pub struct Sin;

#[derive(Clone, Copy, Debug, Default)]
pub struct Cos;

#[derive(Clone, Copy, Debug, Default)]
pub struct Tan;

impl Function for Sin {
    fn evaluate(&self, x: f64) -> f64 {
        x.sin()
    }
}

impl Function for Cos {
    fn evaluate(&self, x: f64) -> f64 {
        x.cos()
    }
}

impl Function for Tan {
    fn evaluate(&self, x: f64) -> f64 {
        x.tan()
    }
}
