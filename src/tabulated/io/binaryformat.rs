use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
    ErrorKind,
    Read,
    Write
};
use std::path::Path;

use tracing::{
    debug,
    warn
};

use crate::function::functionerror::FunctionError;
use crate::tabulated::functionpoint::FunctionPoint;
use crate::tabulated::tabulatedfunction::TabulatedFunction;

// ─────────────────────────────────────────────────────────────────────────────
// 二進位格式（big-endian）
// ─────────────────────────────────────────────────────────────────────────────
//
//   [count: i32][x0: f64][y0: f64] ... [x(n-1): f64][y(n-1): f64]
//
// 沒有任何型別或物件圖的描述資訊，長度固定為 4 + 16 * n 位元組。
// 讀取只消耗自身的編碼，串流後續內容保持不動。

const COUNT_SIZE: usize = 4;
const VALUE_SIZE: usize = 8;
const POINT_SIZE: usize = 2 * VALUE_SIZE;
/// 讀取時預先配置的上限，避免損毀的點數造成過大的配置。
const MAX_PREALLOCATED_POINTS: usize = 4096;

pub fn encoded_len(points_count: usize) -> usize {
    COUNT_SIZE + POINT_SIZE * points_count
}

pub fn write_binary<F, W>(function: &F, writer: &mut W) -> Result<(), FunctionError>
    where F: TabulatedFunction + ?Sized,
          W: Write {
    let points = function.points();
    let count = i32::try_from(points.len()).map_err(|_| FunctionError::invalid_argument(
        format!("{} points do not fit the binary point count", points.len())
    ))?;
    writer.write_all(&count.to_be_bytes())?;
    for pt in &points {
        writer.write_all(&pt.x().to_be_bytes())?;
        writer.write_all(&pt.y().to_be_bytes())?;
    }
    debug!(count, "table written as binary");
    Ok(())
}

pub fn read_binary<T, R>(mut reader: R) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          R: Read {
    let result = parse_binary(&mut reader);
    if let Err(error) = &result {
        warn!(%error, "rejected binary table");
    }
    result
}

fn parse_binary<T, R>(reader: &mut R) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          R: Read {
    let mut count_bytes = [0u8; COUNT_SIZE];
    read_field(reader, &mut count_bytes, "point count")?;
    let count = i32::from_be_bytes(count_bytes);
    if count <= 0 {
        return Err(FunctionError::decode(format!("point count must be positive, got {}", count)));
    }
    let count = count as usize;

    let mut points = Vec::with_capacity(count.min(MAX_PREALLOCATED_POINTS));
    for index in 0..count {
        let point = read_point(reader).map_err(|error| match error {
            FunctionError::Decode(_) => FunctionError::decode(
                format!("truncated binary table: expected {} points, found {}", count, index)
            ),
            other => other
        })?;
        points.push(point);
    }

    debug!(count, "table read from binary");
    T::from_points(points).map_err(FunctionError::into_decode)
}

fn read_point<R: Read>(reader: &mut R) -> Result<FunctionPoint, FunctionError> {
    let mut x_bytes = [0u8; VALUE_SIZE];
    let mut y_bytes = [0u8; VALUE_SIZE];
    read_field(reader, &mut x_bytes, "x")?;
    read_field(reader, &mut y_bytes, "y")?;
    Ok(FunctionPoint::new(f64::from_be_bytes(x_bytes), f64::from_be_bytes(y_bytes)))
}

fn read_field<R: Read>(reader: &mut R, buffer: &mut [u8], field: &str) -> Result<(), FunctionError> {
    reader.read_exact(buffer).map_err(|error| match error.kind() {
        ErrorKind::UnexpectedEof => FunctionError::decode(format!("truncated binary table at {}", field)),
        _ => FunctionError::Io(error)
    })
}

pub fn write_binary_file<F, P>(function: &F, path: P) -> Result<(), FunctionError>
    where F: TabulatedFunction + ?Sized,
          P: AsRef<Path> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_binary(function, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_binary_file<T, P>(path: P) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          P: AsRef<Path> {
    read_binary(BufReader::new(File::open(path)?))
}
