//! Follow/unfollow transitions over the relationship store.
//!
//! Every co-processor call is made before the store is touched, so a failed
//! call leaves headers, entries, flag and count exactly as they were. Each
//! transition reads and writes a fixed number of fixed-size records, however
//! long the lists have grown.

use anchor_lang::prelude::*;

use crate::{
    acl,
    constants::FOLLOW_COUNT_STEP,
    coprocessor::{Coprocessor, EncryptedInput},
    error::GraphError,
    state::{
        next_index, CipherType, FollowAdded, FollowFlag, FollowRemoved, FollowerEntry,
        FollowerList, FollowingEntry, FollowingList,
    },
};

/// State touched by one (followee, sender) transition
pub struct Relationship<'a> {
    pub followee: Pubkey,
    pub sender: Pubkey,
    /// Header of the followee's follower list
    pub followers: &'a mut FollowerList,
    /// Header of the sender's following list
    pub following: &'a mut FollowingList,
    pub flag: &'a mut FollowFlag,
}

/// Entries appended by a successful follow, to be stored at their indices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntries {
    pub follower_index: u64,
    pub follower: FollowerEntry,
    pub following_index: u64,
    pub following: FollowingEntry,
}

/// The two entries the flag points at
pub struct EntryPair<'a> {
    pub follower: &'a mut FollowerEntry,
    pub following: &'a mut FollowingEntry,
}

pub fn follow<C: Coprocessor>(
    coprocessor: &mut C,
    rel: Relationship<'_>,
    input: &EncryptedInput,
    now: i64,
) -> Result<(FollowAdded, NewEntries)> {
    require_keys_neq!(rel.followee, Pubkey::default(), GraphError::InvalidFollowee);
    require!(!rel.flag.is_following, GraphError::AlreadyFollowing);
    let follower_index = next_index(rel.followers.length)?;
    let following_index = next_index(rel.following.length)?;

    let handle = coprocessor
        .verify_input(input, CipherType::Address, &rel.sender)?
        .ok_or_else(|| error!(GraphError::InvalidCiphertextProof))?;

    let current = if rel.followers.follower_count.is_unset() {
        coprocessor.encrypt_scalar(0)?
    } else {
        rel.followers.follower_count
    };
    let count = coprocessor.add_scalar(current, FOLLOW_COUNT_STEP)?;

    acl::grant_follower_entry(coprocessor, handle, &rel.followee, &rel.sender)?;
    acl::grant_follower_count(coprocessor, count, &rel.followee)?;

    rel.followers.length = follower_index + 1;
    rel.following.length = following_index + 1;
    rel.followers.follower_count = count;
    rel.flag.is_following = true;
    rel.flag.follower_index = follower_index;
    rel.flag.following_index = following_index;

    Ok((
        FollowAdded {
            followee: rel.followee,
            pseudo_follower: rel.sender,
            timestamp: now,
        },
        NewEntries {
            follower_index,
            follower: FollowerEntry {
                encrypted_real_follower: handle,
                pseudo_follower: rel.sender,
                active: true,
                timestamp: now,
            },
            following_index,
            following: FollowingEntry {
                followee: rel.followee,
                encrypted_real_follower: handle,
                active: true,
                timestamp: now,
            },
        },
    ))
}

/// Deactivates the pair recorded in the flag. While the flag is set it
/// points at the newest, and only, active entry the sender holds under
/// `followee`.
pub fn unfollow<C: Coprocessor>(
    coprocessor: &mut C,
    rel: Relationship<'_>,
    entries: EntryPair<'_>,
    now: i64,
) -> Result<FollowRemoved> {
    require!(rel.flag.is_following, GraphError::NotFollowing);
    require!(
        entries.follower.active && entries.follower.pseudo_follower == rel.sender,
        GraphError::RelationshipMismatch
    );
    require!(
        entries.following.active
            && entries.following.followee == rel.followee
            && entries.following.encrypted_real_follower
                == entries.follower.encrypted_real_follower,
        GraphError::RelationshipMismatch
    );

    let count = coprocessor.sub_scalar(rel.followers.follower_count, FOLLOW_COUNT_STEP)?;
    acl::grant_follower_count(coprocessor, count, &rel.followee)?;

    entries.follower.active = false;
    entries.following.active = false;
    rel.followers.follower_count = count;
    rel.flag.is_following = false;

    Ok(FollowRemoved {
        followee: rel.followee,
        pseudo_follower: rel.sender,
        timestamp: now,
    })
}
