pub mod acl;
pub mod constants;
pub mod contexts;
pub mod coprocessor;
pub mod error;
pub mod graph;
pub mod instructions;
pub mod state;
pub mod store;

use anchor_lang::prelude::*;

pub use contexts::*;
pub use error::*;
pub use state::*;

declare_id!("5VeiLGraphq3mYvB7nKc9XwzR2hJdLpF8sA4uE6oTqNx");

/// veil-graph: Confidential Follow Graph
///
/// A follow ledger where the follower's real identity is a ciphertext:
/// - Followee and a public is-following bit are visible to everyone
/// - The real follower is an encrypted handle only followee and sender may decrypt
/// - Follower counts are kept as an encrypted aggregate, updated homomorphically
/// - Lists are append-only; unfollowed entries stay as inactive tombstones
///
/// Architecture:
/// - Ciphertext handles, proofs and decryption grants live in an external
///   FHE co-processor program reached by CPI
/// - Per-account list headers, flags and every list entry are PDAs created
///   on first write; an instruction only ever touches fixed-size accounts
#[program]
pub mod veil_graph {
    use super::*;

    /// Follow `followee`, attaching the caller's encrypted real identity
    pub fn follow(
        ctx: Context<Follow>,
        followee: Pubkey,
        encrypted_real_follower: CipherHandle,
        input_proof: Vec<u8>,
    ) -> Result<()> {
        instructions::follow::handler(ctx, followee, encrypted_real_follower, input_proof)
    }

    /// Stop following `followee`; the entry stays as an inactive tombstone
    pub fn unfollow(ctx: Context<Unfollow>, followee: Pubkey) -> Result<()> {
        instructions::unfollow::handler(ctx, followee)
    }

    pub fn get_follower_list_length(ctx: Context<ReadFollowers>, _account: Pubkey) -> Result<u64> {
        instructions::queries::follower_list_length(ctx)
    }

    pub fn get_following_list_length(
        ctx: Context<ReadFollowing>,
        _account: Pubkey,
    ) -> Result<u64> {
        instructions::queries::following_list_length(ctx)
    }

    pub fn is_follower_active(
        ctx: Context<ReadFollowerEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<bool> {
        instructions::queries::is_follower_active(ctx, index)
    }

    pub fn is_following_active(
        ctx: Context<ReadFollowingEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<bool> {
        instructions::queries::is_following_active(ctx, index)
    }

    pub fn get_encrypted_follower(
        ctx: Context<ReadFollowerEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<CipherHandle> {
        instructions::queries::encrypted_follower(ctx, index)
    }

    pub fn get_encrypted_following(
        ctx: Context<ReadFollowingEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<CipherHandle> {
        instructions::queries::encrypted_following(ctx, index)
    }

    pub fn get_follower_timestamp(
        ctx: Context<ReadFollowerEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<i64> {
        instructions::queries::follower_timestamp(ctx, index)
    }

    pub fn get_following_timestamp(
        ctx: Context<ReadFollowingEntry>,
        _account: Pubkey,
        index: u64,
    ) -> Result<i64> {
        instructions::queries::following_timestamp(ctx, index)
    }

    /// Encrypted follower count handle of `account`
    pub fn get_follower_count(
        ctx: Context<ReadFollowers>,
        _account: Pubkey,
    ) -> Result<CipherHandle> {
        instructions::queries::follower_count(ctx)
    }

    /// Public membership bit, no decryption needed
    pub fn is_following_public(
        ctx: Context<ReadFollowFlag>,
        _followee: Pubkey,
        _pseudo_follower: Pubkey,
    ) -> Result<bool> {
        instructions::queries::is_following_public(ctx)
    }

    /// Co-processor network configuration this build targets
    pub fn protocol_id(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::queries::protocol_id(ctx)
    }
}
