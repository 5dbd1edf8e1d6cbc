use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::function::meta::composition::Composition;
use crate::function::meta::power::Power;
use crate::function::meta::scale::Scale;
use crate::function::meta::shift::Shift;
use crate::function::meta::sum::Sum;

// ─────────────────────────────────────────────────────────────────────────────
// 函數組合子
// ─────────────────────────────────────────────────────────────────────────────
//
// 回傳的函數都是惰性的：不預先計算任何值，每次 evaluate 都重新呼叫運算元，
// 也不持有任何可變狀態。運算元可以是值、參考、Box 或 Rc/Arc。

pub fn sum<F: Function, G: Function>(lhs: F, rhs: G) -> Sum<F, G> {
    Sum::new(lhs, rhs)
}

pub fn power<F: Function>(base: F, exponent: i32) -> Power<F> {
    Power::new(base, exponent)
}

/// `outer(inner(x))`
pub fn composition<F: Function, G: Function>(outer: F, inner: G) -> Composition<F, G> {
    Composition::new(outer, inner)
}

pub fn scale<F: Function>(function: F,
                          x_factor: f64,
                          y_factor: f64) -> Result<Scale<F>, FunctionError> {
    Scale::new(function, x_factor, y_factor)
}

pub fn shift<F: Function>(function: F, x_shift: f64, y_shift: f64) -> Shift<F> {
    Shift::new(function, x_shift, y_shift)
}
