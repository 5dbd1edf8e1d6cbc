use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
    Read,
    Write
};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::function::functionerror::FunctionError;

/// 自描述的通用物件圖編碼（serde JSON）。
///
/// 容器的完整結構連同欄位名稱一起寫出；鏈結串列會寫出整個節點 arena
/// 與 prev/next 連結。僅作為與二進位格式比較大小與正確性的基準。
pub fn write_generic<T, W>(function: &T, writer: &mut W) -> Result<(), FunctionError>
    where T: Serialize + ?Sized,
          W: Write {
    serde_json::to_writer(&mut *writer, function)?;
    debug!("table written in generic encoding");
    Ok(())
}

/// 反序列化時會重新驗證容器的所有不變量。
pub fn read_generic<T, R>(reader: R) -> Result<T, FunctionError>
    where T: DeserializeOwned,
          R: Read {
    let function = serde_json::from_reader(reader)?;
    debug!("table read from generic encoding");
    Ok(function)
}

pub fn write_generic_file<T, P>(function: &T, path: P) -> Result<(), FunctionError>
    where T: Serialize + ?Sized,
          P: AsRef<Path> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_generic(function, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_generic_file<T, P>(path: P) -> Result<T, FunctionError>
    where T: DeserializeOwned,
          P: AsRef<Path> {
    read_generic(BufReader::new(File::open(path)?))
}
