use std::fmt;

use serde::{
    Deserialize,
    Serialize
};
use tracing::debug;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::tabulated::functionpoint::FunctionPoint;
use crate::tabulated::tabulatedfunction::{
    check_deletable,
    check_index,
    check_neighbors,
    check_ordered,
    evaluate_points,
    fmt_points,
    TabulatedFunction,
    EPSILON
};

/// 以連續陣列存放點的表格函數，索引存取 O(1)。
///
/// 插入與刪除會平移尾段；容量不足時倍增（由 `Vec` 負責，尾端附加為攤銷 O(1)），
/// 使用量低於容量四分之一時縮回一半。
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<FunctionPoint>", into = "Vec<FunctionPoint>")]
pub struct ArrayTabulatedFunction {
    points: Vec<FunctionPoint>
}

impl ArrayTabulatedFunction {
    fn shrink_if_sparse(&mut self) {
        let capacity = self.points.capacity();
        if capacity > 16 && self.points.len() < capacity / 4 {
            self.points.shrink_to(capacity / 2);
        }
    }
}

impl Function for ArrayTabulatedFunction {
    fn evaluate(&self, x: f64) -> f64 {
        evaluate_points(self.points.iter().copied(),
                        self.left_domain_border(),
                        self.right_domain_border(),
                        x)
    }

    fn left_domain_border(&self) -> f64 {
        self.points.first().map_or(f64::NAN, |pt| pt.x())
    }

    fn right_domain_border(&self) -> f64 {
        self.points.last().map_or(f64::NAN, |pt| pt.x())
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn from_points(points: Vec<FunctionPoint>) -> Result<ArrayTabulatedFunction, FunctionError> {
        check_ordered(&points)?;
        Ok(ArrayTabulatedFunction { points })
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError> {
        check_index(index, self.points.len())?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError> {
        check_index(index, self.points.len())?;
        let left = index.checked_sub(1).map(|i| self.points[i].x());
        let right = self.points.get(index + 1).map(|pt| pt.x());
        check_neighbors(point.x(), left, right)?;
        self.points[index] = point;
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        check_index(index, self.points.len())?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError> {
        let x = point.x();
        if !x.is_finite() {
            return Err(FunctionError::InappropriateOrder { x });
        }

        let index = self.points
            .iter()
            .position(|pt| pt.x() >= x - EPSILON)
            .unwrap_or(self.points.len());
        let left = index.checked_sub(1).map(|i| self.points[i].x());
        let right = self.points.get(index).map(|pt| pt.x());
        check_neighbors(x, left, right)?;

        self.points.insert(index, point);
        debug!(index, x, count = self.points.len(), "point inserted into array table");
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError> {
        check_index(index, self.points.len())?;
        check_deletable(self.points.len())?;
        let removed = self.points.remove(index);
        self.shrink_if_sparse();
        debug!(index, x = removed.x(), count = self.points.len(), "point removed from array table");
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.points.clone()
    }
}

impl TryFrom<Vec<FunctionPoint>> for ArrayTabulatedFunction {
    type Error = FunctionError;

    fn try_from(points: Vec<FunctionPoint>) -> Result<ArrayTabulatedFunction, FunctionError> {
        ArrayTabulatedFunction::from_points(points).map_err(FunctionError::into_decode)
    }
}

impl From<ArrayTabulatedFunction> for Vec<FunctionPoint> {
    fn from(function: ArrayTabulatedFunction) -> Vec<FunctionPoint> {
        function.points
    }
}

impl PartialEq for ArrayTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.points.iter().copied())
    }
}
