use anchor_lang::prelude::*;

#[error_code]
pub enum GraphError {
    #[msg("Encrypted input rejected - proof does not match sender or program")]
    InvalidCiphertextProof,

    #[msg("Sender is already following this account")]
    AlreadyFollowing,

    #[msg("Sender is not following this account")]
    NotFollowing,

    #[msg("Index is past the end of the list")]
    IndexOutOfRange,

    #[msg("Followee must be a non-default account")]
    InvalidFollowee,

    #[msg("Follow flag is set but its entries are not an active matching pair")]
    RelationshipMismatch,

    #[msg("Account passed as co-processor is not the configured program")]
    InvalidCoprocessor,

    #[msg("Co-processor returned no data or data that does not decode")]
    MalformedCoprocessorResponse,

    #[msg("List length overflow")]
    ArithmeticOverflow,

    #[msg("Entry account is not the PDA for this list index")]
    EntryAddressMismatch,
}
