//! Keyed storage for the relationship PDAs.
//!
//! Headers, entries and flags come into existence the first time they are
//! written and keep a fixed size afterwards; lists grow by adding entry
//! accounts, never by reallocating. Reading an account that was never
//! written yields the type's empty default.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::GraphError;

/// Reads a program account that may not have been created yet
pub fn load_optional<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    let mut bytes: &[u8] = &data[..];
    Ok(Some(T::try_deserialize(&mut bytes)?))
}

pub fn load_or_default<T: AccountDeserialize + Default>(info: &AccountInfo) -> Result<T> {
    Ok(load_optional(info)?.unwrap_or_default())
}

/// PDA of the entry at `index` in the list `seed` keeps for `owner`
pub fn entry_address(seed: &[u8], owner: &Pubkey, index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed, owner.as_ref(), &index.to_le_bytes()], &crate::ID)
}

/// Checks `info` is the entry PDA for `index` and returns its bump
pub fn expect_entry(info: &AccountInfo, seed: &[u8], owner: &Pubkey, index: u64) -> Result<u8> {
    let (address, bump) = entry_address(seed, owner, index);
    require_keys_eq!(*info.key, address, GraphError::EntryAddressMismatch);
    Ok(bump)
}

/// Writes `value` into the PDA at `account`, creating it with `space` bytes
/// first if it does not exist. `payer` covers the rent.
pub fn save<'info, T: AccountSerialize>(
    account: &AccountInfo<'info>,
    value: &T,
    space: usize,
    signer_seeds: &[&[u8]],
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    if account.data_is_empty() {
        create(account, space, signer_seeds, payer, system_program)?;
    }
    write(account, value)
}

/// Serializes `value` over the start of an existing account's data
pub fn write<T: AccountSerialize>(account: &AccountInfo, value: &T) -> Result<()> {
    let mut data = account.try_borrow_mut_data()?;
    let mut cursor: &mut [u8] = &mut data[..];
    value.try_serialize(&mut cursor)
}

fn create<'info>(
    account: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let rent = Rent::get()?.minimum_balance(space);
    let signer = &[signer_seeds];

    if account.lamports() == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: account.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    // Someone pre-funded the address; create_account would refuse it
    let shortfall = rent.saturating_sub(account.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: account.clone(),
                },
            ),
            shortfall,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: account.clone(),
            },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: account.clone(),
            },
            signer,
        ),
        &crate::ID,
    )
}

/// Owned backing for an `AccountInfo` in host tests
#[cfg(test)]
pub(crate) struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[cfg(test)]
impl TestAccount {
    /// An address nothing has been written to
    pub fn absent(key: Pubkey) -> Self {
        Self {
            key,
            owner: Pubkey::default(),
            lamports: 0,
            data: Vec::new(),
        }
    }

    /// A program-owned account of `space` zeroed bytes
    pub fn allocated(key: Pubkey, space: usize) -> Self {
        Self {
            key,
            owner: crate::ID,
            lamports: 1_000_000,
            data: vec![0u8; space],
        }
    }

    /// A program-owned account already holding `value`
    pub fn holding<T: AccountSerialize>(key: Pubkey, value: &T) -> Self {
        let mut data = Vec::new();
        value.try_serialize(&mut data).unwrap();
        Self {
            key,
            owner: crate::ID,
            lamports: 1_000_000,
            data,
        }
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            true,
            &mut self.lamports,
            &mut self.data[..],
            &self.owner,
            false,
            0,
        )
    }
}
