use crate::function::function::Function;
use crate::function::functionerror::FunctionError;

/// 以 `base` 為底的對數，定義域 `[0, +inf)`（`evaluate(0)` 為 -inf）。
#[derive(Clone, Copy, Debug)]
pub struct Log {
    base: f64,
    ln_base: f64
}

impl Log {
    pub fn new(base: f64) -> Result<Log, FunctionError> {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return Err(FunctionError::invalid_argument(
                format!("logarithm base must be positive, finite and not 1, got {}", base)
            ));
        }
        Ok(Log { base, ln_base: base.ln() })
    }

    pub fn natural() -> Log {
        Log { base: std::f64::consts::E, ln_base: 1.0 }
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Function for Log {
    fn evaluate(&self, x: f64) -> f64 {
        x.ln() / self.ln_base
    }

    fn left_domain_border(&self) -> f64 {
        0.0
    }
}
