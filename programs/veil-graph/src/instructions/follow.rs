use anchor_lang::prelude::*;
use crate::{
    constants::*,
    contexts::Follow,
    coprocessor::{CpiCoprocessor, EncryptedInput},
    graph::{self, Relationship},
    state::{CipherHandle, FollowFlag, FollowerEntry, FollowerList, FollowingEntry, FollowingList},
    store,
};

pub fn handler(
    ctx: Context<Follow>,
    followee: Pubkey,
    encrypted_real_follower: CipherHandle,
    input_proof: Vec<u8>,
) -> Result<()> {
    let accounts = &ctx.accounts;
    let bumps = &ctx.bumps;
    let sender = accounts.sender.key();
    let clock = Clock::get()?;

    let mut followers: FollowerList = store::load_or_default(&accounts.follower_list)?;
    let mut following: FollowingList = store::load_or_default(&accounts.following_list)?;
    let mut flag: FollowFlag = store::load_or_default(&accounts.follow_flag)?;
    followers.claim(followee, bumps.follower_list);
    following.claim(sender, bumps.following_list);
    flag.claim(followee, sender, bumps.follow_flag);

    // New entries land at the current lengths
    let follower_entry_bump = store::expect_entry(
        &accounts.follower_entry,
        FOLLOWER_ENTRY_SEED,
        &followee,
        followers.len(),
    )?;
    let following_entry_bump = store::expect_entry(
        &accounts.following_entry,
        FOLLOWING_ENTRY_SEED,
        &sender,
        following.len(),
    )?;

    let authority_bump = [bumps.coprocessor_authority];
    let authority_seeds: [&[u8]; 2] = [COPROCESSOR_AUTHORITY_SEED, &authority_bump];
    let mut coprocessor = CpiCoprocessor {
        program: accounts.coprocessor_program.to_account_info(),
        acl: accounts.coprocessor_acl.to_account_info(),
        authority: accounts.coprocessor_authority.to_account_info(),
        authority_seeds: &authority_seeds,
    };

    let input = EncryptedInput {
        handle: encrypted_real_follower,
        proof: input_proof,
    };
    let (event, entries) = graph::follow(
        &mut coprocessor,
        Relationship {
            followee,
            sender,
            followers: &mut followers,
            following: &mut following,
            flag: &mut flag,
        },
        &input,
        clock.unix_timestamp,
    )?;

    // =========================================================================
    // Persist two fresh entries plus the two headers and the flag
    // =========================================================================
    let payer = accounts.sender.to_account_info();
    let system_program = accounts.system_program.to_account_info();

    let follower_index = entries.follower_index.to_le_bytes();
    store::save(
        &accounts.follower_entry.to_account_info(),
        &entries.follower,
        FollowerEntry::SIZE,
        &[
            FOLLOWER_ENTRY_SEED,
            followee.as_ref(),
            &follower_index,
            &[follower_entry_bump],
        ],
        &payer,
        &system_program,
    )?;
    let following_index = entries.following_index.to_le_bytes();
    store::save(
        &accounts.following_entry.to_account_info(),
        &entries.following,
        FollowingEntry::SIZE,
        &[
            FOLLOWING_ENTRY_SEED,
            sender.as_ref(),
            &following_index,
            &[following_entry_bump],
        ],
        &payer,
        &system_program,
    )?;
    store::save(
        &accounts.follower_list.to_account_info(),
        &followers,
        FollowerList::SIZE,
        &[FOLLOWERS_SEED, followee.as_ref(), &[bumps.follower_list]],
        &payer,
        &system_program,
    )?;
    store::save(
        &accounts.following_list.to_account_info(),
        &following,
        FollowingList::SIZE,
        &[FOLLOWING_SEED, sender.as_ref(), &[bumps.following_list]],
        &payer,
        &system_program,
    )?;
    store::save(
        &accounts.follow_flag.to_account_info(),
        &flag,
        8 + FollowFlag::INIT_SPACE,
        &[
            FOLLOW_FLAG_SEED,
            followee.as_ref(),
            sender.as_ref(),
            &[bumps.follow_flag],
        ],
        &payer,
        &system_program,
    )?;

    emit!(event);

    msg!("✅ Follow recorded: {} -> {}", sender, followee);
    msg!("   Follower index: {}", entries.follower_index);
    msg!("   Following index: {}", entries.following_index);

    Ok(())
}
