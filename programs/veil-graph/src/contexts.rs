use anchor_lang::prelude::*;
use crate::{constants::*, error::GraphError};

/// Follow `followee` with an encrypted real identity
#[derive(Accounts)]
#[instruction(followee: Pubkey)]
pub struct Follow<'info> {
    /// Pseudo-follower; pays rent for new entry and header accounts
    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: followee's FollowerList PDA, created on first write by `store::save`
    #[account(mut, seeds = [FOLLOWERS_SEED, followee.as_ref()], bump)]
    pub follower_list: UncheckedAccount<'info>,

    /// CHECK: sender's FollowingList PDA, created on first write by `store::save`
    #[account(mut, seeds = [FOLLOWING_SEED, sender.key().as_ref()], bump)]
    pub following_list: UncheckedAccount<'info>,

    /// CHECK: FollowerEntry PDA at the current list length, checked in the handler
    #[account(mut)]
    pub follower_entry: UncheckedAccount<'info>,

    /// CHECK: FollowingEntry PDA at the current list length, checked in the handler
    #[account(mut)]
    pub following_entry: UncheckedAccount<'info>,

    /// CHECK: FollowFlag PDA for (followee, sender), created on first write
    #[account(
        mut,
        seeds = [FOLLOW_FLAG_SEED, followee.as_ref(), sender.key().as_ref()],
        bump
    )]
    pub follow_flag: UncheckedAccount<'info>,

    /// CHECK: signs co-processor CPIs, holds no data
    #[account(seeds = [COPROCESSOR_AUTHORITY_SEED], bump)]
    pub coprocessor_authority: UncheckedAccount<'info>,

    /// CHECK: co-processor ACL state, validated by the co-processor itself
    #[account(mut)]
    pub coprocessor_acl: UncheckedAccount<'info>,

    /// CHECK: pinned to the configured co-processor
    #[account(address = COPROCESSOR_PROGRAM_ID @ GraphError::InvalidCoprocessor)]
    pub coprocessor_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Unfollow `followee`; same accounts as [`Follow`], entries taken from the flag
#[derive(Accounts)]
#[instruction(followee: Pubkey)]
pub struct Unfollow<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: followee's FollowerList PDA, read as empty if absent
    #[account(mut, seeds = [FOLLOWERS_SEED, followee.as_ref()], bump)]
    pub follower_list: UncheckedAccount<'info>,

    /// CHECK: sender's FollowingList PDA, read as empty if absent
    #[account(mut, seeds = [FOLLOWING_SEED, sender.key().as_ref()], bump)]
    pub following_list: UncheckedAccount<'info>,

    /// CHECK: FollowerEntry PDA at the flag's follower index, checked in the handler
    #[account(mut)]
    pub follower_entry: UncheckedAccount<'info>,

    /// CHECK: FollowingEntry PDA at the flag's following index, checked in the handler
    #[account(mut)]
    pub following_entry: UncheckedAccount<'info>,

    /// CHECK: FollowFlag PDA for (followee, sender), read as unset if absent
    #[account(
        mut,
        seeds = [FOLLOW_FLAG_SEED, followee.as_ref(), sender.key().as_ref()],
        bump
    )]
    pub follow_flag: UncheckedAccount<'info>,

    /// CHECK: signs co-processor CPIs, holds no data
    #[account(seeds = [COPROCESSOR_AUTHORITY_SEED], bump)]
    pub coprocessor_authority: UncheckedAccount<'info>,

    /// CHECK: co-processor ACL state, validated by the co-processor itself
    #[account(mut)]
    pub coprocessor_acl: UncheckedAccount<'info>,

    /// CHECK: pinned to the configured co-processor
    #[account(address = COPROCESSOR_PROGRAM_ID @ GraphError::InvalidCoprocessor)]
    pub coprocessor_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Read-only view of an account's follower list header
#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct ReadFollowers<'info> {
    /// CHECK: FollowerList PDA of `account`, may not exist yet
    #[account(seeds = [FOLLOWERS_SEED, account.as_ref()], bump)]
    pub follower_list: UncheckedAccount<'info>,
}

/// Read-only view of an account's following list header
#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct ReadFollowing<'info> {
    /// CHECK: FollowingList PDA of `account`, may not exist yet
    #[account(seeds = [FOLLOWING_SEED, account.as_ref()], bump)]
    pub following_list: UncheckedAccount<'info>,
}

/// Read-only view of one follower entry
#[derive(Accounts)]
#[instruction(account: Pubkey, index: u64)]
pub struct ReadFollowerEntry<'info> {
    /// CHECK: FollowerList PDA of `account`, may not exist yet
    #[account(seeds = [FOLLOWERS_SEED, account.as_ref()], bump)]
    pub follower_list: UncheckedAccount<'info>,

    /// CHECK: FollowerEntry PDA at `index`, absent past the end of the list
    #[account(
        seeds = [FOLLOWER_ENTRY_SEED, account.as_ref(), index.to_le_bytes().as_ref()],
        bump
    )]
    pub follower_entry: UncheckedAccount<'info>,
}

/// Read-only view of one following entry
#[derive(Accounts)]
#[instruction(account: Pubkey, index: u64)]
pub struct ReadFollowingEntry<'info> {
    /// CHECK: FollowingList PDA of `account`, may not exist yet
    #[account(seeds = [FOLLOWING_SEED, account.as_ref()], bump)]
    pub following_list: UncheckedAccount<'info>,

    /// CHECK: FollowingEntry PDA at `index`, absent past the end of the list
    #[account(
        seeds = [FOLLOWING_ENTRY_SEED, account.as_ref(), index.to_le_bytes().as_ref()],
        bump
    )]
    pub following_entry: UncheckedAccount<'info>,
}

/// Read-only view of the public follow flag
#[derive(Accounts)]
#[instruction(followee: Pubkey, pseudo_follower: Pubkey)]
pub struct ReadFollowFlag<'info> {
    /// CHECK: FollowFlag PDA of the pair, may not exist yet
    #[account(
        seeds = [FOLLOW_FLAG_SEED, followee.as_ref(), pseudo_follower.as_ref()],
        bump
    )]
    pub follow_flag: UncheckedAccount<'info>,
}

/// Constant queries that need no accounts
#[derive(Accounts)]
pub struct ReadConfig {}
