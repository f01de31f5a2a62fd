use thiserror::Error;

pub type Result<T> = std::result::Result<T, PvssError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PvssError {
    /// Scalar outside the open/half-open interval its use requires.
    #[error("{what} out of range")]
    OutOfRange { what: &'static str },

    #[error("value is not invertible modulo the group order")]
    NotInvertible,

    /// Fiat-Shamir challenge reduced to zero; retry with a fresh nonce.
    #[error("challenge is zero")]
    ChallengeDegenerate,

    #[error("threshold must be at least 1")]
    InvalidThreshold,

    #[error("insufficient recipients: have {have}, need {need}")]
    InsufficientRecipients { have: usize, need: usize },

    #[error("duplicate recipient public key at position {0}")]
    DuplicateRecipient(u32),

    #[error("secret is {bits} bits, at most {max} allowed")]
    SecretTooLarge { bits: u64, max: u64 },

    #[error("no share for this public key")]
    NoMatchingShare,

    #[error("share at position {position} failed verification")]
    ShareInvalid { position: u32 },

    #[error("decrypted share at position {position} failed verification")]
    DecryptedShareInvalid { position: u32 },

    #[error("duplicate position {0}")]
    DuplicatePosition(u32),

    #[error("position 0 is reserved")]
    ReservedPosition,

    #[error("malformed distribution box: {0}")]
    MalformedBox(&'static str),

    #[error("insufficient shares: have {have}, need {need}")]
    InsufficientShares { have: usize, need: usize },

    #[error("invalid group element encoding: {0}")]
    InvalidEncoding(String),

    #[error("identity element has no coordinates")]
    IdentityElement,
}
