//! Decryption grants for every handle the program writes into state.
//!
//! A follower entry handle is readable by the followee and the sender that
//! created it, nobody else. Each new version of a follower count is a new
//! handle and receives its own grant: the account owner, plus the program
//! authority so the next transition can compute on it.

use anchor_lang::prelude::*;

use crate::{coprocessor::Coprocessor, state::CipherHandle};

pub fn follower_entry_viewers(followee: &Pubkey, pseudo_follower: &Pubkey) -> Vec<Pubkey> {
    if followee == pseudo_follower {
        vec![*followee]
    } else {
        vec![*followee, *pseudo_follower]
    }
}

pub fn follower_count_viewers(account: &Pubkey, program_principal: &Pubkey) -> Vec<Pubkey> {
    vec![*account, *program_principal]
}

pub fn grant_follower_entry<C: Coprocessor>(
    coprocessor: &mut C,
    handle: CipherHandle,
    followee: &Pubkey,
    pseudo_follower: &Pubkey,
) -> Result<()> {
    coprocessor.grant(handle, &follower_entry_viewers(followee, pseudo_follower))
}

pub fn grant_follower_count<C: Coprocessor>(
    coprocessor: &mut C,
    handle: CipherHandle,
    account: &Pubkey,
) -> Result<()> {
    let program = coprocessor.program_principal();
    coprocessor.grant(handle, &follower_count_viewers(account, &program))
}
