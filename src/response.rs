use bytes::Bytes;

use crate::param::*;

/// 仪表板唯一产生的响应：200、HTML、`Connection: close`
#[derive(Debug, Clone)]
pub struct Response {
    version: HttpVersion,
    status_code: u16,
    information: String,
    content_type: String,
    content: Bytes,
}

impl Response {
    pub fn new() -> Self {
        Self {
            version: HttpVersion::V1_1,
            status_code: 200,
            information: "OK".to_string(),
            content_type: CONTENT_TYPE_HTML.to_string(),
            content: Bytes::new(),
        }
    }

    /// 以渲染完成的页面作为响应体
    pub fn from_html(body: Bytes) -> Self {
        let mut response = Self::new();
        response.content = body;
        response
    }

    /// 状态行与响应头
    pub fn header(&self) -> String {
        [
            self.version.to_string().as_str(),
            " ",
            self.status_code.to_string().as_str(),
            " ",
            self.information.as_str(),
            CRLF,
            "Content-Type: ",
            self.content_type.as_str(),
            CRLF,
            "Connection: close",
            CRLF,
            CRLF,
        ]
        .concat()
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        [self.header().as_bytes(), &self.content[..]].concat()
    }
}

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    pub fn content_length(&self) -> usize {
        self.content.len()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
