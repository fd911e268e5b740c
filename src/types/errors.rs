use std::fmt;

use thiserror::Error;

/// Message used when a failure cannot be attributed to any operation.
pub const UNKNOWN_ERROR_MESSAGE: &str = "不明なエラーが発生しました。";

// === Operation ===

/// The five remote operations of the bookmark service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// Fixed message shown when the failure carries no server message.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Create => "ブックマークの作成に失敗しました。",
            Operation::List => "ブックマークの取得に失敗しました。",
            Operation::Get => "指定されたブックマークの取得に失敗しました。",
            Operation::Update => "ブックマークの更新に失敗しました。",
            Operation::Delete => "ブックマークの削除に失敗しました。",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

// === ServiceError ===

/// Transport failure buckets, classified before UI code ever sees them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceErrorKind {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        error_code: Option<String>,
        message: Option<String>,
    },
    /// The request went out but no usable response came back.
    #[error("no response received: {0}")]
    NoResponse(String),
    /// The request could not be constructed or sent.
    #[error("request setup failed: {0}")]
    Setup(String),
}

/// A failed call to the bookmark service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bookmark {operation} failed: {kind}")]
pub struct ServiceError {
    pub operation: Operation,
    #[source]
    pub kind: ServiceErrorKind,
}

impl ServiceError {
    pub fn new(operation: Operation, kind: ServiceErrorKind) -> Self {
        Self { operation, kind }
    }

    /// Shorthand for a server-reported failure.
    pub fn server(operation: Operation, status: u16, message: Option<&str>) -> Self {
        Self::new(
            operation,
            ServiceErrorKind::Server {
                status,
                error_code: None,
                message: message.map(str::to_string),
            },
        )
    }

    /// The string shown to the user.
    ///
    /// Only a server-supplied message is surfaced verbatim; every other
    /// failure collapses to the operation's fallback.
    pub fn user_message(&self) -> String {
        match &self.kind {
            ServiceErrorKind::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => self.operation.fallback_message().to_string(),
        }
    }

    /// True when the server reported that the record does not exist.
    pub fn is_not_found(&self) -> bool {
        match &self.kind {
            ServiceErrorKind::Server {
                status, error_code, ..
            } => *status == 404 || error_code.as_deref() == Some("BOOKMARK_NOT_FOUND"),
            _ => false,
        }
    }
}

// === FormError ===

/// Failures reported inline by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The url field is empty.
    #[error("URLは必須です。")]
    MissingUrl,
    /// The url field does not parse as a URL.
    #[error("URLの形式が正しくありません。")]
    InvalidUrl(String),
    /// The edit form has no resolved target identifier.
    #[error("編集するブックマークのIDがありません。")]
    MissingTarget,
    /// The edit target is still loading, or could not be loaded.
    #[error("ブックマークを編集できる状態ではありません。")]
    NotReady,
    /// The service rejected the submission.
    #[error("{}", .0.user_message())]
    Service(#[from] ServiceError),
}

impl FormError {
    /// Validation failures never reach the network.
    pub fn is_validation(&self) -> bool {
        !matches!(self, FormError::Service(_))
    }
}

// === SettingsError ===

/// Errors related to loading client settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading the settings file.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// The settings file is not valid JSON for `ClientSettings`.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// A value from the file or the environment is out of range.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
