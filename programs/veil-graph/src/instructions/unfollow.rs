use anchor_lang::prelude::*;
use crate::{
    constants::*,
    contexts::Unfollow,
    coprocessor::CpiCoprocessor,
    graph::{self, EntryPair, Relationship},
    state::{FollowFlag, FollowerEntry, FollowerList, FollowingEntry, FollowingList},
    store,
};

pub fn handler(ctx: Context<Unfollow>, followee: Pubkey) -> Result<()> {
    let accounts = &ctx.accounts;
    let bumps = &ctx.bumps;
    let sender = accounts.sender.key();
    let clock = Clock::get()?;

    let mut followers: FollowerList = store::load_or_default(&accounts.follower_list)?;
    let mut following: FollowingList = store::load_or_default(&accounts.following_list)?;
    let mut flag: FollowFlag = store::load_or_default(&accounts.follow_flag)?;

    // An unset flag fails with NotFollowing in graph::unfollow, whatever
    // entry accounts were passed
    let (mut follower_entry, mut following_entry) = if flag.is_following {
        store::expect_entry(
            &accounts.follower_entry,
            FOLLOWER_ENTRY_SEED,
            &followee,
            flag.follower_index,
        )?;
        store::expect_entry(
            &accounts.following_entry,
            FOLLOWING_ENTRY_SEED,
            &sender,
            flag.following_index,
        )?;
        (
            store::load_or_default::<FollowerEntry>(&accounts.follower_entry)?,
            store::load_or_default::<FollowingEntry>(&accounts.following_entry)?,
        )
    } else {
        (FollowerEntry::default(), FollowingEntry::default())
    };

    let authority_bump = [bumps.coprocessor_authority];
    let authority_seeds: [&[u8]; 2] = [COPROCESSOR_AUTHORITY_SEED, &authority_bump];
    let mut coprocessor = CpiCoprocessor {
        program: accounts.coprocessor_program.to_account_info(),
        acl: accounts.coprocessor_acl.to_account_info(),
        authority: accounts.coprocessor_authority.to_account_info(),
        authority_seeds: &authority_seeds,
    };

    let event = graph::unfollow(
        &mut coprocessor,
        Relationship {
            followee,
            sender,
            followers: &mut followers,
            following: &mut following,
            flag: &mut flag,
        },
        EntryPair {
            follower: &mut follower_entry,
            following: &mut following_entry,
        },
        clock.unix_timestamp,
    )?;

    // Every account touched here already exists; nothing is created or resized
    store::write(&accounts.follower_entry, &follower_entry)?;
    store::write(&accounts.following_entry, &following_entry)?;
    store::write(&accounts.follower_list, &followers)?;
    store::write(&accounts.follow_flag, &flag)?;

    emit!(event);

    msg!("👋 Unfollow recorded: {} -/-> {}", sender, followee);
    msg!("   Follower index: {}", flag.follower_index);

    Ok(())
}
