use anchor_lang::prelude::*;

// ============================================================================
// SEEDS FOR PDA DERIVATION
// ============================================================================

pub const FOLLOWERS_SEED: &[u8] = b"followers";

pub const FOLLOWING_SEED: &[u8] = b"following";

/// One PDA per follower entry: [seed, followee, index as little-endian u64]
pub const FOLLOWER_ENTRY_SEED: &[u8] = b"follower_entry";

/// One PDA per following entry: [seed, sender, index as little-endian u64]
pub const FOLLOWING_ENTRY_SEED: &[u8] = b"following_entry";

pub const FOLLOW_FLAG_SEED: &[u8] = b"follow_flag";

/// Signs co-processor CPIs on behalf of this program
pub const COPROCESSOR_AUTHORITY_SEED: &[u8] = b"coprocessor_authority";

// ============================================================================
// CO-PROCESSOR CONFIGURATION
// ============================================================================

/// Program that owns ciphertext handles, verifies input proofs and
/// records decryption grants
pub const COPROCESSOR_PROGRAM_ID: Pubkey =
    pubkey!("4FheCoprocessorAc7wXq2mTnR9vKd3YhPzL5bJsE8uW");

/// Co-processor network configuration this program was built against
pub const PROTOCOL_ID: u64 = 10_001;

/// Amount the encrypted follower count moves per follow/unfollow
pub const FOLLOW_COUNT_STEP: u32 = 1;
