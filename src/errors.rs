use ark_serialize::SerializationError;

#[derive(Debug, PartialEq)]
pub enum PvssError {
    // Recovery checks
    TooFewShares,
    DifferentLengths,

    // Share verification
    EncVerification,
    DecVerification,

    // Sharing preconditions
    InvalidThreshold,
    IdentityPoint,

    // Polynomial commitment arithmetic
    DifferentBases,

    // Propagated from the group encoding layer
    Serialization,
}

impl std::fmt::Display for PvssError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewShares => write!(f, "not enough shares to recover the secret"),
            Self::DifferentLengths => write!(f, "inputs of different lengths"),
            Self::EncVerification => write!(f, "verification of encrypted share failed"),
            Self::DecVerification => write!(f, "verification of decrypted share failed"),
            Self::InvalidThreshold => write!(f, "invalid sharing threshold"),
            Self::IdentityPoint => write!(f, "unexpected identity element"),
            Self::DifferentBases => write!(f, "polynomial commitments use different base points"),
            Self::Serialization => write!(f, "canonical encoding is invalid"),
        }
    }
}

impl std::error::Error for PvssError {}

impl From<SerializationError> for PvssError {
    fn from(_: SerializationError) -> Self {
        Self::Serialization
    }
}
