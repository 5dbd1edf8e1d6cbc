use std::fmt;

use serde::{
    Deserialize,
    Serialize
};
use tracing::{
    debug,
    trace
};

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

// ─────────────────────────────────────────────────────────────────────────────
// LinkedListTabulatedFunction - 環狀雙向鏈結串列（arena 版本）
// ─────────────────────────────────────────────────────────────────────────────
//
// 節點存放在 `nodes` 中，以索引互相連結；slot 0 是不帶資料的哨兵節點，
// 將串列閉合成環：
//
//   nodes[HEAD].next = 第一點，nodes[HEAD].prev = 最後一點
//
// 不變量：從 nodes[HEAD].next 沿 next 走 `count` 步必回到 HEAD。
// 刪除後的 slot 放入 `vacant`，下次配置時重用；空 slot 多於存活節點時整理 arena。

const HEAD: usize = 0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct FunctionNode {
    point: FunctionPoint,
    prev: usize,
    next: usize
}

impl FunctionNode {
    fn sentinel() -> FunctionNode {
        FunctionNode { point: FunctionPoint::default(), prev: HEAD, next: HEAD }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "LinkedListGraph")]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<FunctionNode>,
    vacant: Vec<usize>,
    count: usize
}

/// 反序列化時的原始節點圖，驗證環結構後才轉成 `LinkedListTabulatedFunction`。
#[derive(Deserialize)]
struct LinkedListGraph {
    nodes: Vec<FunctionNode>,
    count: usize
}

#[derive(Clone)]
struct NodeIter<'a> {
    nodes: &'a [FunctionNode],
    cursor: usize
}

impl Iterator for NodeIter<'_> {
    type Item = FunctionPoint;

    fn next(&mut self) -> Option<FunctionPoint> {
        if self.cursor == HEAD {
            return None;
        }
        let node = &self.nodes[self.cursor];
        self.cursor = node.next;
        Some(node.point)
    }
}

impl LinkedListTabulatedFunction {
    fn empty() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction {
            nodes: vec![FunctionNode::sentinel()],
            vacant: Vec::new(),
            count: 0
        }
    }

    fn iter(&self) -> NodeIter<'_> {
        NodeIter { nodes: &self.nodes, cursor: self.nodes[HEAD].next }
    }

    /// 由較近的一端開始走訪：前半段從頭往後，後半段從尾往前，
    /// 最壞情況只需走 count / 2 步。
    fn node_at(&self, index: usize) -> Result<usize, FunctionError> {
        check_index(index, self.count)?;
        let mut cursor;
        if index < self.count / 2 {
            trace!(index, "walking forward");
            cursor = self.nodes[HEAD].next;
            for _ in 0..index {
                cursor = self.nodes[cursor].next;
            }
        } else {
            trace!(index, "walking backward");
            cursor = self.nodes[HEAD].prev;
            for _ in index..(self.count - 1) {
                cursor = self.nodes[cursor].prev;
            }
        }
        Ok(cursor)
    }

    fn allocate(&mut self, point: FunctionPoint) -> usize {
        let node = FunctionNode { point, prev: HEAD, next: HEAD };
        match self.vacant.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            },
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn link_before(&mut self, successor: usize, point: FunctionPoint) -> usize {
        let slot = self.allocate(point);
        let predecessor = self.nodes[successor].prev;
        self.nodes[slot].prev = predecessor;
        self.nodes[slot].next = successor;
        self.nodes[predecessor].next = slot;
        self.nodes[successor].prev = slot;
        self.count += 1;
        slot
    }

    /// O(1)：接在哨兵之前。
    fn append_tail(&mut self, point: FunctionPoint) -> usize {
        self.link_before(HEAD, point)
    }

    fn insert_at(&mut self, index: usize, point: FunctionPoint) -> Result<usize, FunctionError> {
        if index == self.count {
            return Ok(self.append_tail(point));
        }
        let successor = self.node_at(index)?;
        Ok(self.link_before(successor, point))
    }

    fn remove_at(&mut self, index: usize) -> Result<FunctionPoint, FunctionError> {
        let slot = self.node_at(index)?;
        let FunctionNode { point, prev, next } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[slot] = FunctionNode::sentinel();
        self.vacant.push(slot);
        self.count -= 1;
        if self.vacant.len() > self.count {
            self.compact();
        }
        Ok(point)
    }

    /// 空 slot 多於存活節點時，依串列順序重建 arena 並釋放多餘空間。
    fn compact(&mut self) {
        let released = self.vacant.len();
        let mut compacted = LinkedListTabulatedFunction::empty();
        compacted.nodes.reserve_exact(self.count);
        for point in self.iter() {
            compacted.append_tail(point);
        }
        *self = compacted;
        trace!(released, count = self.count, "linked list arena compacted");
    }
}

impl Function for LinkedListTabulatedFunction {
    fn evaluate(&self, x: f64) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        evaluate_points(self.iter(), self.left_domain_border(), self.right_domain_border(), x)
    }

    fn left_domain_border(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.nodes[self.nodes[HEAD].next].point.x()
    }

    fn right_domain_border(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.nodes[self.nodes[HEAD].prev].point.x()
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn from_points(points: Vec<FunctionPoint>) -> Result<LinkedListTabulatedFunction, FunctionError> {
        check_ordered(&points)?;
        let mut function = LinkedListTabulatedFunction::empty();
        function.nodes.reserve(points.len());
        for point in points {
            function.append_tail(point);
        }
        Ok(function)
    }

    fn point_count(&self) -> usize {
        self.count
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError> {
        let slot = self.node_at(index)?;
        Ok(self.nodes[slot].point)
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError> {
        let slot = self.node_at(index)?;
        let node = &self.nodes[slot];
        let left = (index > 0).then(|| self.nodes[node.prev].point.x());
        let right = (index + 1 < self.count).then(|| self.nodes[node.next].point.x());
        check_neighbors(point.x(), left, right)?;
        self.nodes[slot].point = point;
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        let slot = self.node_at(index)?;
        self.nodes[slot].point.set_y(y);
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError> {
        let x = point.x();
        if !x.is_finite() {
            return Err(FunctionError::InappropriateOrder { x });
        }

        let mut cursor = self.nodes[HEAD].next;
        let mut index = 0;
        while cursor != HEAD && self.nodes[cursor].point.x() < x - EPSILON {
            index += 1;
            cursor = self.nodes[cursor].next;
        }
        let prev = self.nodes[cursor].prev;
        let left = (prev != HEAD).then(|| self.nodes[prev].point.x());
        let right = (cursor != HEAD).then(|| self.nodes[cursor].point.x());
        check_neighbors(x, left, right)?;

        self.insert_at(index, point)?;
        debug!(index, x, count = self.count, "point inserted into linked list table");
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError> {
        check_index(index, self.count)?;
        check_deletable(self.count)?;
        let removed = self.remove_at(index)?;
        debug!(index, x = removed.x(), count = self.count, "point removed from linked list table");
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.iter().collect()
    }
}

impl TryFrom<LinkedListGraph> for LinkedListTabulatedFunction {
    type Error = FunctionError;

    /// 沿 next 走完整個環，逐步確認 prev 連結一致，再以取得的點重新建構
    /// （重新驗證排序並壓縮 arena）。
    fn try_from(graph: LinkedListGraph) -> Result<LinkedListTabulatedFunction, FunctionError> {
        let nodes = graph.nodes;
        if nodes.is_empty() {
            return Err(FunctionError::decode("node graph has no sentinel"));
        }

        let mut points = Vec::with_capacity(graph.count.min(nodes.len()));
        let mut previous = HEAD;
        let mut cursor = nodes[HEAD].next;
        for _ in 0..graph.count {
            if cursor == HEAD || cursor >= nodes.len() || nodes[cursor].prev != previous {
                return Err(FunctionError::decode("broken link in node graph"));
            }
            points.push(nodes[cursor].point);
            previous = cursor;
            cursor = nodes[cursor].next;
        }
        if cursor != HEAD || nodes[HEAD].prev != previous {
            return Err(FunctionError::decode("node graph does not close into a ring"));
        }

        LinkedListTabulatedFunction::from_points(points).map_err(FunctionError::into_decode)
    }
}

impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_table() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::with_values(0.0, 4.0, &[0.0, 1.0, 4.0, 9.0, 16.0]).unwrap()
    }

    /// 檢查環結構：next/prev 互相一致，且走 count 步回到哨兵
    fn assert_ring(function: &LinkedListTabulatedFunction) {
        let mut previous = HEAD;
        let mut cursor = function.nodes[HEAD].next;
        for _ in 0..function.count {
            assert_ne!(cursor, HEAD);
            assert_eq!(function.nodes[cursor].prev, previous);
            previous = cursor;
            cursor = function.nodes[cursor].next;
        }
        assert_eq!(cursor, HEAD);
        assert_eq!(function.nodes[HEAD].prev, previous);
    }

    fn assert_ascend(function: &LinkedListTabulatedFunction) {
        let points = function.points();
        for i in 0..points.len() - 1 {
            assert!(points[i].x() < points[i + 1].x() - EPSILON);
        }
    }

    #[test]
    fn test_node_at_from_both_ends() {
        let function = test_table();
        for i in 0..5 {
            let slot = function.node_at(i).unwrap();
            assert_eq!(function.nodes[slot].point.x(), i as f64);
        }
        assert!(matches!(function.node_at(5),
                         Err(FunctionError::IndexOutOfBounds { index: 5, count: 5 })));
    }

    #[test]
    fn test_with_count() {
        let function = LinkedListTabulatedFunction::with_count(-1.0, 1.0, 3).unwrap();
        assert_eq!(function.points(), vec![
            FunctionPoint::new(-1.0, 0.0),
            FunctionPoint::new(0.0, 0.0),
            FunctionPoint::new(1.0, 0.0),
        ]);
        assert_ring(&function);
    }

    #[test]
    fn test_insert_at_head_middle_tail() {
        let mut function = test_table();
        function.insert_at(0, FunctionPoint::new(-1.0, 1.0)).unwrap();
        function.insert_at(3, FunctionPoint::new(1.5, 2.25)).unwrap();
        let count = function.count;
        function.insert_at(count, FunctionPoint::new(5.0, 25.0)).unwrap();

        assert_eq!(function.point_count(), 8);
        assert_eq!(function.left_domain_border(), -1.0);
        assert_eq!(function.right_domain_border(), 5.0);
        assert_eq!(function.point(3).unwrap(), FunctionPoint::new(1.5, 2.25));
        assert_ring(&function);
        assert!(function.insert_at(10, FunctionPoint::default()).is_err());
    }

    #[test]
    fn test_vacant_slots_reused() {
        let mut function = test_table();
        function.delete_point(2).unwrap();
        function.delete_point(0).unwrap();
        assert_eq!(function.vacant.len(), 2);
        let arena_size = function.nodes.len();

        function.add_point(FunctionPoint::new(2.0, 4.0)).unwrap();
        function.add_point(FunctionPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(function.nodes.len(), arena_size);
        assert!(function.vacant.is_empty());
        assert_eq!(function, test_table());
        assert_ring(&function);
    }

    #[test]
    fn test_arena_compacts_when_mostly_vacant() {
        let mut function = LinkedListTabulatedFunction::with_count(0.0, 9.0, 10).unwrap();
        for _ in 0..5 {
            function.delete_point(0).unwrap();
        }
        assert_eq!(function.vacant.len(), 5);
        assert_eq!(function.nodes.len(), 11);

        function.delete_point(0).unwrap();
        assert!(function.vacant.is_empty());
        assert_eq!(function.nodes.len(), 5);
        assert_eq!(function.points().iter().map(|pt| pt.x()).collect::<Vec<_>>(),
                   vec![6.0, 7.0, 8.0, 9.0]);
        assert_ring(&function);

        function.add_point(FunctionPoint::new(10.0, 1.0)).unwrap();
        assert_eq!(function.nodes.len(), 6);
        assert_ring(&function);
    }

    #[test]
    fn test_set_point_checks_neighbors() {
        let mut function = test_table();
        function.set_point(2, FunctionPoint::new(2.5, 0.0)).unwrap();
        assert_eq!(function.point(2).unwrap(), FunctionPoint::new(2.5, 0.0));

        assert!(matches!(function.set_point(2, FunctionPoint::new(3.0, 0.0)),
                         Err(FunctionError::InappropriateOrder { .. })));
        assert!(matches!(function.set_point_x(1, 0.0),
                         Err(FunctionError::InappropriateOrder { .. })));

        function.set_point_x(0, -10.0).unwrap();
        function.set_point_x(4, 10.0).unwrap();
        assert_eq!(function.left_domain_border(), -10.0);
        assert_eq!(function.right_domain_border(), 10.0);
        assert_ascend(&function);
    }

    #[test]
    fn test_set_point_y() {
        let mut function = test_table();
        function.set_point_y(4, -1.0).unwrap();
        assert_eq!(function.point_y(4).unwrap(), -1.0);
        assert!(function.set_point_y(5, 0.0).is_err());
    }

    #[test]
    fn test_add_point() {
        let mut function = test_table();
        function.add_point(FunctionPoint::new(0.5, 0.25)).unwrap();
        function.add_point(FunctionPoint::new(-3.0, 9.0)).unwrap();
        function.add_point(FunctionPoint::new(7.0, 49.0)).unwrap();
        assert_eq!(function.point_count(), 8);
        assert_eq!(function.point_x(2).unwrap(), 0.5);
        assert_ascend(&function);
        assert_ring(&function);

        let err = function.add_point(FunctionPoint::new(1.0 + 1e-11, 0.0));
        assert!(matches!(err, Err(FunctionError::InappropriateOrder { .. })));
        assert_eq!(function.point_count(), 8);
    }

    #[test]
    fn test_add_point_between_close_neighbors() {
        let mut function = LinkedListTabulatedFunction::from_points(vec![
            FunctionPoint::new(-1.0, 0.0),
            FunctionPoint::new(1e-10, 0.0),
            FunctionPoint::new(1.0, 0.0),
        ]).unwrap();
        let err = function.add_point(FunctionPoint::new(0.0, 5.0));
        assert!(matches!(err, Err(FunctionError::InappropriateOrder { .. })));
        assert_eq!(function.point_count(), 3);
        assert_ring(&function);

        let rebuilt = LinkedListTabulatedFunction::from_points(function.points()).unwrap();
        assert_eq!(rebuilt, function);
        function.set_point_x(1, 0.0).unwrap();
    }

    #[test]
    fn test_delete_point_floor() {
        let mut function =
            LinkedListTabulatedFunction::with_values(0.0, 2.0, &[1.0, 2.0, 3.0]).unwrap();
        function.delete_point(1).unwrap();
        assert_eq!(function.point_count(), 2);
        assert!(matches!(function.delete_point(0),
                         Err(FunctionError::IllegalState { count: 2 })));
        assert_eq!(function.point_count(), 2);
        assert!(matches!(function.delete_point(7),
                         Err(FunctionError::IndexOutOfBounds { .. })));
        assert_ring(&function);
    }

    #[test]
    fn test_evaluate() {
        let function = test_table();
        assert_eq!(function.evaluate(3.0), 9.0);
        assert_eq!(function.evaluate(2.5), 6.5);
        assert!(function.evaluate(-1.0).is_nan());
        assert!(function.evaluate(4.1).is_nan());
    }

    #[test]
    fn test_graph_round_trip() {
        let mut function = test_table();
        function.delete_point(1).unwrap();
        let json = serde_json::to_string(&function).unwrap();
        let restored: LinkedListTabulatedFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, function);
        assert!(restored.vacant.is_empty());
        assert_ring(&restored);
    }

    #[test]
    fn test_graph_rejects_broken_ring() {
        let json = r#"{
            "nodes": [
                {"point": {"x": 0.0, "y": 0.0}, "prev": 2, "next": 1},
                {"point": {"x": 0.0, "y": 1.0}, "prev": 0, "next": 2},
                {"point": {"x": 1.0, "y": 2.0}, "prev": 0, "next": 0}
            ],
            "vacant": [],
            "count": 2
        }"#;
        assert!(serde_json::from_str::<LinkedListTabulatedFunction>(json).is_err());
    }

    #[test]
    fn test_display() {
        let function = LinkedListTabulatedFunction::with_values(0.0, 1.0, &[2.0, 3.5]).unwrap();
        assert_eq!(function.to_string(), "{(0; 2), (1; 3.5)}");
    }
}
