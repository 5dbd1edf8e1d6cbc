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
// 文字格式
// ─────────────────────────────────────────────────────────────────────────────
//
//   第 1 行      點數 n
//   第 2..n+1 行 "<x> <y>"
//
// 數值以 f64 的最短可還原十進位表示寫出（與 locale 無關），讀回後逐位元相同。
// 讀取時以空白分隔 token，容許結尾的空白與換行。

pub fn write_text<F, W>(function: &F, writer: &mut W) -> Result<(), FunctionError>
    where F: TabulatedFunction + ?Sized,
          W: Write {
    let points = function.points();
    writeln!(writer, "{}", points.len())?;
    for pt in &points {
        writeln!(writer, "{} {}", pt.x(), pt.y())?;
    }
    debug!(count = points.len(), "table written as text");
    Ok(())
}

pub fn read_text<T, R>(mut reader: R) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          R: Read {
    let mut content = String::new();
    reader.read_to_string(&mut content).map_err(|error| match error.kind() {
        ErrorKind::InvalidData => FunctionError::decode("text table is not valid UTF-8"),
        _ => FunctionError::Io(error)
    })?;

    let result = parse_text(&content);
    if let Err(error) = &result {
        warn!(%error, "rejected text table");
    }
    result
}

fn parse_text<T: TabulatedFunction>(content: &str) -> Result<T, FunctionError> {
    let mut tokens = content.split_whitespace();

    let count_token = tokens.next().ok_or_else(|| FunctionError::decode("empty text table"))?;
    let count: i64 = count_token
        .parse()
        .map_err(|_| FunctionError::decode(format!("invalid point count '{}'", count_token)))?;
    if count <= 0 {
        return Err(FunctionError::decode(format!("point count must be positive, got {}", count)));
    }

    let mut next_value = |index: i64| -> Result<f64, FunctionError> {
        let token = tokens.next().ok_or_else(|| FunctionError::decode(
            format!("truncated text table: expected {} points, found {}", count, index)
        ))?;
        token
            .parse::<f64>()
            .map_err(|_| FunctionError::decode(format!("non-numeric value '{}'", token)))
    };

    let mut points = Vec::new();
    for index in 0..count {
        let x = next_value(index)?;
        let y = next_value(index)?;
        points.push(FunctionPoint::new(x, y));
    }
    if let Some(token) = tokens.next() {
        return Err(FunctionError::decode(format!("unexpected trailing data '{}'", token)));
    }

    debug!(count, "table read from text");
    T::from_points(points).map_err(FunctionError::into_decode)
}

pub fn write_text_file<F, P>(function: &F, path: P) -> Result<(), FunctionError>
    where F: TabulatedFunction + ?Sized,
          P: AsRef<Path> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_text(function, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_text_file<T, P>(path: P) -> Result<T, FunctionError>
    where T: TabulatedFunction,
          P: AsRef<Path> {
    read_text(BufReader::new(File::open(path)?))
}
