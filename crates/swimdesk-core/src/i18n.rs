//! Display-language message catalogue.
//!
//! Every message that can reach an end user (error text, connection state
//! text) is looked up here so the client speaks the application's display
//! language consistently.

use serde::{Deserialize, Serialize};

/// Application display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Th,
}

/// Keys for user-visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    MissingToken,
    MissingTenant,
    InvalidId,
    RequestFailed,
    NetworkError,
    InvalidResponse,
    SessionExpired,
    SocketUnavailable,
    NotConnected,
}

impl Language {
    /// Parses a language code such as `en`, `th`, `th-TH`.
    ///
    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code == "th" || code.starts_with("th-") || code.starts_with("th_") {
            Language::Th
        } else {
            Language::En
        }
    }

    pub fn text(self, key: MessageKey) -> &'static str {
        match self {
            Language::En => english(key),
            Language::Th => thai(key),
        }
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::MissingToken => "Please log in to continue",
        MessageKey::MissingTenant => "Please select a branch first",
        MessageKey::InvalidId => "A valid record id is required",
        MessageKey::RequestFailed => "The request could not be completed, please try again",
        MessageKey::NetworkError => "Unable to reach the server",
        MessageKey::InvalidResponse => "The server returned an unexpected response",
        MessageKey::SessionExpired => "Your session has expired, please log in again",
        MessageKey::SocketUnavailable => "Unable to connect to the notification server",
        MessageKey::NotConnected => "Not connected to the notification server",
    }
}

fn thai(key: MessageKey) -> &'static str {
    match key {
        MessageKey::MissingToken => "กรุณาเข้าสู่ระบบก่อนดำเนินการ",
        MessageKey::MissingTenant => "กรุณาเลือกสาขาก่อน",
        MessageKey::InvalidId => "รหัสรายการไม่ถูกต้อง",
        MessageKey::RequestFailed => "ไม่สามารถดำเนินการได้ กรุณาลองใหม่อีกครั้ง",
        MessageKey::NetworkError => "ไม่สามารถติดต่อเซิร์ฟเวอร์ได้",
        MessageKey::InvalidResponse => "เซิร์ฟเวอร์ตอบกลับข้อมูลไม่ถูกต้อง",
        MessageKey::SessionExpired => "เซสชันหมดอายุ กรุณาเข้าสู่ระบบใหม่",
        MessageKey::SocketUnavailable => "ไม่สามารถเชื่อมต่อเซิร์ฟเวอร์แจ้งเตือนได้",
        MessageKey::NotConnected => "ยังไม่ได้เชื่อมต่อกับเซิร์ฟเวอร์แจ้งเตือน",
    }
}
