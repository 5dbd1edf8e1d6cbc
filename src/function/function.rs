use std::rc::Rc;
use std::sync::Arc;

/// 任何可在實數上求值的函數。
///
/// 解析函數、表格函數與 `functions` 模組的組合子都實作此 trait，
/// 因此 `sum` / `power` / `composition` 可以透明地包裝其中任何一種。
pub trait Function {
    fn evaluate(&self, x: f64) -> f64;

    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }
}

impl<F: Function + ?Sized> Function for &F {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }
}

impl<F: Function + ?Sized> Function for Rc<F> {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }
}

impl<F: Function + ?Sized> Function for Arc<F> {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }
}
