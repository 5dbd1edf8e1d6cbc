use thiserror::Error;

/// 函數建構、表格變更與序列化共用的錯誤型別。
///
/// 所有錯誤都在違規當下同步回傳，不會自動重試，也不會退化為預設值
/// （`evaluate` 對定義域外回傳 NaN 是唯一的設計哨兵值，並非錯誤）。
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("index {index} out of range for {count} points")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("point with x = {x} violates the strict ordering of x")]
    InappropriateOrder { x: f64 },

    #[error("cannot delete a point from a table holding {count} points")]
    IllegalState { count: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed input: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FunctionError {
    pub fn invalid_argument(reason: impl Into<String>) -> FunctionError {
        FunctionError::InvalidArgument(reason.into())
    }

    pub fn decode(reason: impl Into<String>) -> FunctionError {
        FunctionError::Decode(reason.into())
    }

    /// 讀取時若容器建構失敗（例如檔案內 x 未遞增），統一轉為 `Decode`，
    /// 讓呼叫端只需處理一種「輸入損毀」錯誤。
    pub fn into_decode(self) -> FunctionError {
        match self {
            FunctionError::Decode(_) | FunctionError::Io(_) => self,
            other => FunctionError::Decode(other.to_string()),
        }
    }
}
