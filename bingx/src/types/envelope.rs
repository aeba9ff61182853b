use serde::{Deserialize, Serialize};

use crate::error::{BingxError, Result};

/// Standard BingX response wrapper: `{"code":0,"msg":"","data":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Unwrap the payload, mapping a non-zero `code` to [`BingxError::Api`].
    pub fn into_data(self, what: &'static str) -> Result<T> {
        if !self.is_success() {
            return Err(BingxError::Api {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or(BingxError::EmptyData(what))
    }
}
