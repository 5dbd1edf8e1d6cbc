use proptest::prelude::*;

use tabfunc::function::basic::exp::Exp;
use tabfunc::function::basic::log::Log;
use tabfunc::function::functionerror::FunctionError;
use tabfunc::function::functions::composition;
use tabfunc::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfunc::tabulated::functionpoint::FunctionPoint;
use tabfunc::tabulated::io::binaryformat::{
    encoded_len,
    read_binary,
    read_binary_file,
    write_binary,
    write_binary_file
};
use tabfunc::tabulated::io::genericformat::{
    read_generic,
    write_generic,
    write_generic_file
};
use tabfunc::tabulated::io::textformat::{
    read_text,
    read_text_file,
    write_text,
    write_text_file
};
use tabfunc::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::tabulated::tabulatedfunction::TabulatedFunction;
use tabfunc::tabulated::tabulatedfunctions::tabulate;

fn points_strategy() -> impl Strategy<Value = Vec<FunctionPoint>> {
    (-1e6f64..1e6, prop::collection::vec((1e-6f64..1e3, -1e300f64..1e300), 2..50))
        .prop_map(|(start, steps)| {
            let mut x = start;
            steps
                .into_iter()
                .map(|(gap, y)| {
                    x += gap;
                    FunctionPoint::new(x, y)
                })
                .collect()
        })
}

fn assert_same_points<F: TabulatedFunction, G: TabulatedFunction>(lhs: &F, rhs: &G) {
    assert_eq!(lhs.point_count(), rhs.point_count());
    for (a, b) in lhs.points().iter().zip(rhs.points().iter()) {
        assert!((a.x() - b.x()).abs() < 1e-10);
        assert!((a.y() - b.y()).abs() < 1e-10 * (1.0 + a.y().abs()));
    }
}

proptest! {
    /// Property: text encoding restores every point exactly
    #[test]
    fn text_round_trip(points in points_strategy()) {
        let original = LinkedListTabulatedFunction::from_points(points).unwrap();
        let mut buffer = Vec::new();
        write_text(&original, &mut buffer).unwrap();
        let restored: ArrayTabulatedFunction = read_text(buffer.as_slice()).unwrap();
        prop_assert_eq!(original.points(), restored.points());
    }

    /// Property: binary encoding restores every point exactly, with a fixed size
    #[test]
    fn binary_round_trip(points in points_strategy()) {
        let original = ArrayTabulatedFunction::from_points(points).unwrap();
        let mut buffer = Vec::new();
        write_binary(&original, &mut buffer).unwrap();
        prop_assert_eq!(buffer.len(), encoded_len(original.point_count()));
        let restored: LinkedListTabulatedFunction = read_binary(buffer.as_slice()).unwrap();
        prop_assert_eq!(original.points(), restored.points());
    }

    /// Property: generic encoding of a mutated linked list restores the same table
    #[test]
    fn generic_round_trip(points in points_strategy(), delete in 0usize..50) {
        let mut original = LinkedListTabulatedFunction::from_points(points).unwrap();
        let count = original.point_count();
        let deleted = original.delete_point(delete % count);
        if count >= 3 {
            prop_assert!(deleted.is_ok());
            prop_assert_eq!(original.point_count(), count - 1);
        } else {
            prop_assert!(matches!(deleted, Err(FunctionError::IllegalState { count: 2 })), "expected IllegalState {{ count: 2 }}, got {:?}", deleted);
        }
        let mut buffer = Vec::new();
        write_generic(&original, &mut buffer).unwrap();
        let restored: LinkedListTabulatedFunction = read_generic(buffer.as_slice()).unwrap();
        prop_assert_eq!(restored, original);
    }

    /// Property: any prefix of a binary table is rejected as malformed
    #[test]
    fn binary_truncation_is_rejected(points in points_strategy(), cut in 1usize..64) {
        let original = ArrayTabulatedFunction::from_points(points).unwrap();
        let mut buffer = Vec::new();
        write_binary(&original, &mut buffer).unwrap();
        let keep = buffer.len().saturating_sub(cut);
        let result = read_binary::<ArrayTabulatedFunction, _>(&buffer[..keep]);
        prop_assert!(matches!(result, Err(FunctionError::Decode(_))));
    }
}

#[test]
fn test_exp_text_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exp_function.txt");

    let exp: ArrayTabulatedFunction = tabulate(&Exp, 0.0, 10.0, 11).unwrap();
    write_text_file(&exp, &path).unwrap();
    let restored: LinkedListTabulatedFunction = read_text_file(&path).unwrap();
    assert_same_points(&exp, &restored);
}

#[test]
fn test_log_binary_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log_function.bin");

    let log: LinkedListTabulatedFunction = tabulate(&Log::natural(), 0.1, 10.0, 11).unwrap();
    write_binary_file(&log, &path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 4 + 16 * 11);
    let restored: ArrayTabulatedFunction = read_binary_file(&path).unwrap();
    assert_same_points(&log, &restored);
}

#[test]
fn test_binary_is_smaller_than_generic() {
    let dir = tempfile::tempdir().unwrap();
    let identity = composition(Log::natural(), Exp);
    let linked: LinkedListTabulatedFunction = tabulate(&identity, 0.0, 10.0, 11).unwrap();
    let array = ArrayTabulatedFunction::from_points(linked.points()).unwrap();

    let generic_path = dir.path().join("linked_list.json");
    let binary_path = dir.path().join("array.bin");
    write_generic_file(&linked, &generic_path).unwrap();
    write_binary_file(&array, &binary_path).unwrap();

    let generic_size = std::fs::metadata(&generic_path).unwrap().len();
    let binary_size = std::fs::metadata(&binary_path).unwrap().len();
    assert!(binary_size < generic_size, "binary {} vs generic {}", binary_size, generic_size);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_binary_file::<ArrayTabulatedFunction, _>(dir.path().join("missing.bin"));
    assert!(matches!(result, Err(FunctionError::Io(_))));
}
