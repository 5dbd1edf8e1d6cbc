use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

/// 表格函數的一個取樣點 (x, y)。
///
/// `Copy` 語義：容器對外回傳與存入的永遠是獨立副本，不會與內部狀態共用。
/// 本身不做任何檢查，順序驗證由容器負責。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionPoint {
    x: f64,
    y: f64
}

impl FunctionPoint {
    pub fn new(x: f64, y: f64) -> FunctionPoint {
        FunctionPoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn with_x(&self, x: f64) -> FunctionPoint {
        FunctionPoint::new(x, self.y)
    }
}

impl From<(f64, f64)> for FunctionPoint {
    fn from((x, y): (f64, f64)) -> FunctionPoint {
        FunctionPoint::new(x, y)
    }
}

impl fmt::Display for FunctionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}
