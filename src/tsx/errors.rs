use thiserror::Error;

#[derive(Error, Debug)]
pub enum TsxError {
    #[error("failed to set TSX language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error at {line}:{column} (bytes {byte_start}..{byte_end})")]
    SyntaxError {
        byte_start: usize,
        byte_end: usize,
        line: usize,
        column: usize,
    },
}
