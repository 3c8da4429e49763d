use anchor_lang::prelude::*;
use crate::{
    constants::PROTOCOL_ID,
    contexts::{
        ReadConfig, ReadFollowFlag, ReadFollowerEntry, ReadFollowers, ReadFollowing,
        ReadFollowingEntry,
    },
    error::GraphError,
    state::{CipherHandle, FollowFlag, FollowerEntry, FollowerList, FollowingEntry, FollowingList},
    store,
};

// Headers that were never written read as empty; index lookups on them fail
// with IndexOutOfRange like any other out-of-bounds index.

pub fn read_follower_list(list: &AccountInfo) -> Result<FollowerList> {
    store::load_or_default(list)
}

pub fn read_following_list(list: &AccountInfo) -> Result<FollowingList> {
    store::load_or_default(list)
}

pub fn read_follower_entry(
    list: &AccountInfo,
    entry: &AccountInfo,
    index: u64,
) -> Result<FollowerEntry> {
    read_follower_list(list)?.check_index(index)?;
    store::load_optional(entry)?.ok_or_else(|| error!(GraphError::IndexOutOfRange))
}

pub fn read_following_entry(
    list: &AccountInfo,
    entry: &AccountInfo,
    index: u64,
) -> Result<FollowingEntry> {
    read_following_list(list)?.check_index(index)?;
    store::load_optional(entry)?.ok_or_else(|| error!(GraphError::IndexOutOfRange))
}

pub fn read_follow_flag(flag: &AccountInfo) -> Result<FollowFlag> {
    store::load_or_default(flag)
}

pub fn follower_list_length(ctx: Context<ReadFollowers>) -> Result<u64> {
    Ok(read_follower_list(&ctx.accounts.follower_list)?.len())
}

pub fn following_list_length(ctx: Context<ReadFollowing>) -> Result<u64> {
    Ok(read_following_list(&ctx.accounts.following_list)?.len())
}

fn follower_entry(ctx: &Context<ReadFollowerEntry>, index: u64) -> Result<FollowerEntry> {
    read_follower_entry(&ctx.accounts.follower_list, &ctx.accounts.follower_entry, index)
}

fn following_entry(ctx: &Context<ReadFollowingEntry>, index: u64) -> Result<FollowingEntry> {
    read_following_entry(&ctx.accounts.following_list, &ctx.accounts.following_entry, index)
}

pub fn is_follower_active(ctx: Context<ReadFollowerEntry>, index: u64) -> Result<bool> {
    Ok(follower_entry(&ctx, index)?.active)
}

pub fn is_following_active(ctx: Context<ReadFollowingEntry>, index: u64) -> Result<bool> {
    Ok(following_entry(&ctx, index)?.active)
}

pub fn encrypted_follower(ctx: Context<ReadFollowerEntry>, index: u64) -> Result<CipherHandle> {
    Ok(follower_entry(&ctx, index)?.encrypted_real_follower)
}

pub fn encrypted_following(ctx: Context<ReadFollowingEntry>, index: u64) -> Result<CipherHandle> {
    Ok(following_entry(&ctx, index)?.encrypted_real_follower)
}

pub fn follower_timestamp(ctx: Context<ReadFollowerEntry>, index: u64) -> Result<i64> {
    Ok(follower_entry(&ctx, index)?.timestamp)
}

pub fn following_timestamp(ctx: Context<ReadFollowingEntry>, index: u64) -> Result<i64> {
    Ok(following_entry(&ctx, index)?.timestamp)
}

/// Current count handle; decryption happens off-chain, subject to the ACL
pub fn follower_count(ctx: Context<ReadFollowers>) -> Result<CipherHandle> {
    Ok(read_follower_list(&ctx.accounts.follower_list)?.follower_count)
}

pub fn is_following_public(ctx: Context<ReadFollowFlag>) -> Result<bool> {
    Ok(read_follow_flag(&ctx.accounts.follow_flag)?.is_following)
}

pub fn protocol_id(_ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(PROTOCOL_ID)
}
