use std::fmt;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::tabulated::functionpoint::FunctionPoint;

/// 所有排序與相等判斷共用的容差。
///
/// 插入、查找與求值都必須使用同一個常數，否則邊界行為會不一致。
pub const EPSILON: f64 = 1e-10;

/// 以有限個遞增取樣點加上線性插值表示的函數。
///
/// 不變量：
///   - 點數永遠 >= 2（建構時檢查，刪除到 2 點後拒絕再刪）
///   - x 依索引嚴格遞增（在 `EPSILON` 容差內），每次變更後仍成立
///   - 左右定義域邊界分別為第一點與最後一點的 x
///
/// 兩種實作（鏈結串列與連續陣列）必須對相同點序列回傳完全相同的 `evaluate` 結果。
pub trait TabulatedFunction: Function {
    /// 以已排序的點建構，至少兩點且 x 嚴格遞增。
    fn from_points(points: Vec<FunctionPoint>) -> Result<Self, FunctionError>
        where Self: Sized;

    /// 在 `[left_x, right_x]` 上均勻分布 `points_count` 個點，y 皆為 0。
    fn with_count(left_x: f64,
                  right_x: f64,
                  points_count: usize) -> Result<Self, FunctionError>
        where Self: Sized {
        let grid = uniform_grid(left_x, right_x, points_count)?;
        Self::from_points(grid.into_iter().map(|x| FunctionPoint::new(x, 0.0)).collect())
    }

    /// 在 `[left_x, right_x]` 上均勻分布 `values.len()` 個點，y 依序取自 `values`。
    fn with_values(left_x: f64,
                   right_x: f64,
                   values: &[f64]) -> Result<Self, FunctionError>
        where Self: Sized {
        let grid = uniform_grid(left_x, right_x, values.len())?;
        Self::from_points(
            grid.into_iter()
                .zip(values.iter())
                .map(|(x, &y)| FunctionPoint::new(x, y))
                .collect()
        )
    }

    fn point_count(&self) -> usize;

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError>;

    /// 取代第 `index` 點；新 x 必須落在左右鄰點之間（各保留 `EPSILON`）。
    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError>;

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError>;

    /// 依 x 找出插入位置；若已有 x 在 `EPSILON` 內相同則拒絕。
    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError>;

    /// 點數少於 3 時拒絕刪除，因此可達到的最少點數為 2。
    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError>;

    fn points(&self) -> Vec<FunctionPoint>;

    fn point_x(&self, index: usize) -> Result<f64, FunctionError> {
        Ok(self.point(index)?.x())
    }

    fn point_y(&self, index: usize) -> Result<f64, FunctionError> {
        Ok(self.point(index)?.y())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), FunctionError> {
        let current = self.point(index)?;
        self.set_point(index, current.with_x(x))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 兩種容器共用的檢查與求值
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn check_index(index: usize, count: usize) -> Result<(), FunctionError> {
    if index >= count {
        Err(FunctionError::IndexOutOfBounds { index, count })
    } else {
        Ok(())
    }
}

pub(crate) fn check_deletable(count: usize) -> Result<(), FunctionError> {
    if count < 3 {
        Err(FunctionError::IllegalState { count })
    } else {
        Ok(())
    }
}

/// 建構用：至少兩點、x 有限且嚴格遞增。
pub(crate) fn check_ordered(points: &[FunctionPoint]) -> Result<(), FunctionError> {
    if points.len() < 2 {
        return Err(FunctionError::invalid_argument(
            format!("at least 2 points are required, got {}", points.len())
        ));
    }
    if let Some(pt) = points.iter().find(|pt| !pt.x().is_finite()) {
        return Err(FunctionError::invalid_argument(format!("non-finite x = {}", pt.x())));
    }
    for pair in points.windows(2) {
        if pair[0].x() >= pair[1].x() - EPSILON {
            return Err(FunctionError::invalid_argument(
                format!("points must be ordered by strictly increasing x ({} then {})",
                        pair[0].x(), pair[1].x())
            ));
        }
    }
    Ok(())
}

/// 變更用：新 x 必須嚴格大於左鄰點、嚴格小於右鄰點（各保留 `EPSILON`）。
/// 第一點沒有左鄰、最後一點沒有右鄰。
/// 比較式與 `check_ordered` 相同，通過檢查的表必定能重新建構。
pub(crate) fn check_neighbors(x: f64,
                              left: Option<f64>,
                              right: Option<f64>) -> Result<(), FunctionError> {
    if !x.is_finite() {
        return Err(FunctionError::InappropriateOrder { x });
    }
    if left.is_some_and(|lx| lx >= x - EPSILON) {
        return Err(FunctionError::InappropriateOrder { x });
    }
    if right.is_some_and(|rx| x >= rx - EPSILON) {
        return Err(FunctionError::InappropriateOrder { x });
    }
    Ok(())
}

/// `[left_x, right_x]` 上的均勻格點，步長 `(right_x - left_x) / (count - 1)`，
/// 最後一點固定為 `right_x`。
pub(crate) fn uniform_grid(left_x: f64,
                           right_x: f64,
                           count: usize) -> Result<Vec<f64>, FunctionError> {
    if !left_x.is_finite() || !right_x.is_finite() {
        return Err(FunctionError::invalid_argument(
            format!("domain borders must be finite, got [{}, {}]", left_x, right_x)
        ));
    }
    if left_x >= right_x - EPSILON {
        return Err(FunctionError::invalid_argument(
            format!("left border {} must be less than right border {}", left_x, right_x)
        ));
    }
    if count < 2 {
        return Err(FunctionError::invalid_argument(
            format!("at least 2 points are required, got {}", count)
        ));
    }
    let step = (right_x - left_x) / (count - 1) as f64;
    let mut grid: Vec<f64> = (0..count).map(|i| left_x + i as f64 * step).collect();
    grid[count - 1] = right_x;
    Ok(grid)
}

/// 兩段式求值：先找 x 在 `EPSILON` 內相同的點直接回傳其 y，
/// 否則找包含 x 的相鄰區間做線性插值：
///
///   y = y1 + (y2 - y1) * (x - x1) / (x2 - x1)
///
/// x 在 `[left - EPSILON, right + EPSILON]` 之外或點序列為空時回傳 NaN。
pub(crate) fn evaluate_points<I>(points: I, left: f64, right: f64, x: f64) -> f64
    where I: Iterator<Item = FunctionPoint> + Clone {
    if x < left - EPSILON || x > right + EPSILON {
        return f64::NAN;
    }

    if let Some(hit) = points.clone().find(|pt| (pt.x() - x).abs() < EPSILON) {
        return hit.y();
    }

    let mut iter = points;
    let Some(mut lhs) = iter.next() else {
        return f64::NAN;
    };
    for rhs in iter {
        if x >= lhs.x() - EPSILON && x <= rhs.x() + EPSILON {
            return lhs.y() + (rhs.y() - lhs.y()) * (x - lhs.x()) / (rhs.x() - lhs.x());
        }
        lhs = rhs;
    }
    f64::NAN
}

pub(crate) fn fmt_points<I>(f: &mut fmt::Formatter<'_>, points: I) -> fmt::Result
    where I: Iterator<Item = FunctionPoint> {
    write!(f, "{{")?;
    for (i, pt) in points.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pt)?;
    }
    write!(f, "}}")
}
