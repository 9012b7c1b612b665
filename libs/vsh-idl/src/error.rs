#[derive(Debug, Clone, thiserror::Error)]
pub enum IdlError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("line {line}: unexpected token, expected {expected}")]
    UnexpectedToken { line: usize, expected: String },
    #[error("line {line}: unknown member keyword '{keyword}'")]
    UnknownMember { line: usize, keyword: String },
    #[error("missing 'interface' declaration")]
    MissingInterface,
}
