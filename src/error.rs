use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum WiperError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    /// ファイルは見つかったが表として読めない
    #[error("数据文件无法读取: {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: BoxError,
    },

    /// 车系列を特定できない
    #[error("数据格式错误: 找不到车系列 ({0})")]
    Schema(String),

    /// 検索ログの書き込み失敗（呼び出し側で握りつぶす）
    #[error("查询日志写入失败: {0}")]
    LogWrite(String),

    #[error("输入错误: {0}")]
    Prompt(String),

    #[error("Excel生成错误: {0}")]
    ExcelWrite(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl WiperError {
    pub fn load(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        WiperError::Load {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<wiper_lookup_common::Error> for WiperError {
    fn from(err: wiper_lookup_common::Error) -> Self {
        match err {
            wiper_lookup_common::Error::Schema(msg) => WiperError::Schema(msg),
            wiper_lookup_common::Error::Json(e) => WiperError::JsonParse(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, WiperError>;
