use anchor_lang::prelude::*;

use crate::error::GraphError;

// ============================================================================
// CIPHERTEXT HANDLES - Opaque references into the co-processor
// ============================================================================

/// Opaque reference to an encrypted value held by the co-processor.
/// The all-zero handle means "never initialized".
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CipherHandle(pub [u8; 32]);

impl CipherHandle {
    pub const SIZE: usize = 32;

    pub fn is_unset(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

/// Plaintext type a ciphertext is expected to carry
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherType {
    Address,
    U32,
}

// ============================================================================
// LIST ENTRIES - One PDA each, append-only, deactivated in place
// ============================================================================

/// Stored at `[FOLLOWER_ENTRY_SEED, followee, index]`
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct FollowerEntry {
    /// Encrypted identity of whoever performed the follow
    pub encrypted_real_follower: CipherHandle,
    /// Sender of the follow instruction
    pub pseudo_follower: Pubkey,
    pub active: bool,
    pub timestamp: i64,
}

impl FollowerEntry {
    pub const SIZE: usize = 8 + CipherHandle::SIZE + 32 + 1 + 8;
}

/// Stored at `[FOLLOWING_ENTRY_SEED, sender, index]`
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct FollowingEntry {
    /// Account that was followed
    pub followee: Pubkey,
    /// Same handle as the matching follower entry
    pub encrypted_real_follower: CipherHandle,
    pub active: bool,
    pub timestamp: i64,
}

impl FollowingEntry {
    pub const SIZE: usize = 8 + 32 + CipherHandle::SIZE + 1 + 8;
}

// ============================================================================
// LIST HEADERS - Fixed size whatever the number of entries
// ============================================================================

/// Header of a followee's follower list; holds the encrypted follower count
#[account]
#[derive(Debug, Default)]
pub struct FollowerList {
    /// Account being followed
    pub owner: Pubkey,

    /// Encrypted number of active entries
    pub follower_count: CipherHandle,

    /// Number of entries ever appended; the next entry goes at this index
    pub length: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl FollowerList {
    pub const SIZE: usize = 8 + 32 + CipherHandle::SIZE + 8 + 1;

    pub fn claim(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn check_index(&self, index: u64) -> Result<()> {
        require!(index < self.length, GraphError::IndexOutOfRange);
        Ok(())
    }
}

/// Header of a sender's following list
#[account]
#[derive(Default)]
pub struct FollowingList {
    /// Sender whose follows this list records
    pub owner: Pubkey,

    pub length: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl FollowingList {
    pub const SIZE: usize = 8 + 32 + 8 + 1;

    pub fn claim(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn check_index(&self, index: u64) -> Result<()> {
        require!(index < self.length, GraphError::IndexOutOfRange);
        Ok(())
    }
}

/// Index the next appended entry receives, once `length` is known not to overflow
pub(crate) fn next_index(length: u64) -> Result<u64> {
    length
        .checked_add(1)
        .map(|_| length)
        .ok_or_else(|| error!(GraphError::ArithmeticOverflow))
}

// ============================================================================
// FOLLOW FLAG - Public membership bit per (followee, pseudo-follower)
// ============================================================================

#[account]
#[derive(InitSpace, Default)]
pub struct FollowFlag {
    pub followee: Pubkey,

    pub pseudo_follower: Pubkey,

    /// Never encrypted; lets the program check membership without decrypting
    pub is_following: bool,

    /// Entry of the live pair in the followee's follower list
    pub follower_index: u64,

    /// Entry of the live pair in the sender's following list
    pub following_index: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl FollowFlag {
    pub fn claim(&mut self, followee: Pubkey, pseudo_follower: Pubkey, bump: u8) {
        if self.followee == Pubkey::default() {
            self.followee = followee;
            self.pseudo_follower = pseudo_follower;
            self.bump = bump;
        }
    }
}

// ============================================================================
// EVENTS - Public fields only, never ciphertexts
// ============================================================================

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct FollowAdded {
    pub followee: Pubkey,
    pub pseudo_follower: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct FollowRemoved {
    pub followee: Pubkey,
    pub pseudo_follower: Pubkey,
    pub timestamp: i64,
}
