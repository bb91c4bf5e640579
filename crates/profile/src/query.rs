use tokenview_core::AppError;

const MISSING_PARAMS: &str = "Missing required parameters: fid and tokenAddress are required";

/// A validated request for one token, seen from one Farcaster viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenQuery {
    pub fid: String,
    pub token_address: String,
}

impl TokenQuery {
    /// Both values must be present and non-blank. Their format is not checked.
    pub fn new(fid: Option<String>, token_address: Option<String>) -> Result<Self, AppError> {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        match (clean(fid), clean(token_address)) {
            (Some(fid), Some(token_address)) => Ok(Self { fid, token_address }),
            _ => Err(AppError::InvalidInput(MISSING_PARAMS.to_string())),
        }
    }
}
