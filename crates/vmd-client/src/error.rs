use std::fmt;

/// Shown when a save is rejected without a server detail.
pub const FALLBACK_SAVE_FAILED: &str = "Kaydetme başarısız";
/// Generic failure text.
pub const FALLBACK_GENERIC: &str = "Bir hata oluştu";
pub const FALLBACK_CONTENTS_LOAD: &str = "İçerikler yüklenemedi";
pub const FALLBACK_COURSES_LOAD: &str = "Kurslar yüklenemedi";
/// Missing or expired session.
pub const MESSAGE_NO_SESSION: &str = "Oturum bulunamadı";

/// Failures of a single backend call. No call is ever retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No credential in the session, or the server refused it.
    Unauthenticated,
    /// Request never produced a response (connect, timeout, TLS ...).
    Transport(String),
    /// Non-2xx response. `message` is the server `detail`, when present.
    Rejected { status: u16, message: Option<String> },
    /// 2xx response whose body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Text for the operator: the server detail verbatim when there is one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthenticated => MESSAGE_NO_SESSION.to_string(),
            ApiError::Rejected {
                message: Some(m), ..
            } => m.clone(),
            ApiError::Rejected { message: None, .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_) => fallback.to_string(),
        }
    }

    /// Authentication failures are blocking; the caller must re-login.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "unauthenticated"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Rejected {
                status,
                message: Some(m),
            } => write!(f, "rejected status={status}: {m}"),
            ApiError::Rejected {
                status,
                message: None,
            } => write!(f, "rejected status={status}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = ApiError::Rejected {
            status: 400,
            message: Some("Geçersiz sıralama".to_string()),
        };
        assert_eq!(err.user_message(FALLBACK_SAVE_FAILED), "Geçersiz sıralama");
        assert_eq!(err.to_string(), "rejected status=400: Geçersiz sıralama");
    }

    #[test]
    fn fallbacks_cover_the_rest() {
        let bare = ApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(bare.user_message(FALLBACK_SAVE_FAILED), FALLBACK_SAVE_FAILED);
        assert_eq!(
            ApiError::Transport("connection refused".into()).user_message(FALLBACK_GENERIC),
            FALLBACK_GENERIC
        );
        assert_eq!(
            ApiError::Unauthenticated.user_message(FALLBACK_GENERIC),
            MESSAGE_NO_SESSION
        );
        assert!(ApiError::Unauthenticated.is_auth());
    }
}
