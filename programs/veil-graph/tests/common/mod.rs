#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use anchor_lang::prelude::*;
use veil_graph::{
    coprocessor::{Coprocessor, EncryptedInput},
    graph::{self, EntryPair, NewEntries, Relationship},
    CipherHandle, CipherType, FollowAdded, FollowFlag, FollowRemoved, FollowerEntry,
    FollowerList, FollowingEntry, FollowingList, GraphError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plain {
    Address(Pubkey),
    U32(u32),
}

impl Plain {
    fn ty(&self) -> CipherType {
        match self {
            Plain::Address(_) => CipherType::Address,
            Plain::U32(_) => CipherType::U32,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DecryptError {
    UnknownHandle,
    NotAllowed,
}

struct PendingInput {
    value: Plain,
    sender: Pubkey,
    contract: Pubkey,
}

/// In-memory co-processor.
///
/// Freshly produced handles are usable by the program until
/// `end_transaction`; after that the program, like everyone else, needs a
/// persistent grant. Decryption only honours persistent grants.
pub struct MockCoprocessor {
    principal: Pubkey,
    next_id: u64,
    values: HashMap<CipherHandle, Plain>,
    acl: HashMap<CipherHandle, HashSet<Pubkey>>,
    transient: HashSet<CipherHandle>,
    inputs: HashMap<CipherHandle, PendingInput>,
    pub fail_on: Option<&'static str>,
}

impl MockCoprocessor {
    pub fn new() -> Self {
        Self {
            principal: Pubkey::new_unique(),
            next_id: 0,
            values: HashMap::new(),
            acl: HashMap::new(),
            transient: HashSet::new(),
            inputs: HashMap::new(),
            fail_on: None,
        }
    }

    fn next_handle(&mut self, tag: u8) -> CipherHandle {
        self.next_id += 1;
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.next_id.to_le_bytes());
        bytes[31] = tag;
        CipherHandle(bytes)
    }

    fn fresh(&mut self, value: Plain) -> CipherHandle {
        let handle = self.next_handle(0xc0);
        self.values.insert(handle, value);
        self.transient.insert(handle);
        handle
    }

    fn check_fail(&self, op: &str) -> Result<()> {
        if self.fail_on == Some(op) {
            return Err(ProgramError::Custom(0xdead).into());
        }
        Ok(())
    }

    fn usable(&self, handle: &CipherHandle) -> Result<u32> {
        let allowed = self.transient.contains(handle)
            || self
                .acl
                .get(handle)
                .is_some_and(|set| set.contains(&self.principal));
        if !allowed {
            return Err(ProgramError::Custom(0xac10).into());
        }
        match self.values.get(handle) {
            Some(Plain::U32(v)) => Ok(*v),
            _ => Err(ProgramError::Custom(0x7e).into()),
        }
    }

    /// Client side: encrypt `value` for submission by `sender` to the program
    pub fn encrypt_input(&mut self, value: Pubkey, sender: Pubkey) -> EncryptedInput {
        self.encrypt_input_for(value, sender, veil_graph::ID)
    }

    pub fn encrypt_input_for(
        &mut self,
        value: Pubkey,
        sender: Pubkey,
        contract: Pubkey,
    ) -> EncryptedInput {
        let handle = self.next_handle(0xe0);
        self.inputs.insert(
            handle,
            PendingInput {
                value: Plain::Address(value),
                sender,
                contract,
            },
        );
        EncryptedInput {
            handle,
            proof: Self::proof(&sender, &contract),
        }
    }

    pub fn proof(sender: &Pubkey, contract: &Pubkey) -> Vec<u8> {
        let mut proof = contract.to_bytes().to_vec();
        proof.extend_from_slice(&sender.to_bytes());
        proof
    }

    pub fn decrypt(
        &self,
        handle: &CipherHandle,
        requester: &Pubkey,
    ) -> std::result::Result<Plain, DecryptError> {
        let value = self.values.get(handle).ok_or(DecryptError::UnknownHandle)?;
        match self.acl.get(handle) {
            Some(set) if set.contains(requester) => Ok(value.clone()),
            _ => Err(DecryptError::NotAllowed),
        }
    }

    /// Decrypted follower count; an unset handle is zero
    pub fn decrypt_count(&self, handle: &CipherHandle, requester: &Pubkey) -> u32 {
        if handle.is_unset() {
            return 0;
        }
        match self.decrypt(handle, requester) {
            Ok(Plain::U32(v)) => v,
            other => panic!("count handle did not decrypt: {other:?}"),
        }
    }

    pub fn grants(&self, handle: &CipherHandle) -> HashSet<Pubkey> {
        self.acl.get(handle).cloned().unwrap_or_default()
    }

    pub fn end_transaction(&mut self) {
        self.transient.clear();
    }
}

impl Coprocessor for MockCoprocessor {
    fn program_principal(&self) -> Pubkey {
        self.principal
    }

    fn verify_input(
        &mut self,
        input: &EncryptedInput,
        expected: CipherType,
        sender: &Pubkey,
    ) -> Result<Option<CipherHandle>> {
        self.check_fail("verify_input")?;
        let Some(pending) = self.inputs.get(&input.handle) else {
            return Ok(None);
        };
        let valid = pending.sender == *sender
            && pending.contract == veil_graph::ID
            && pending.value.ty() == expected
            && input.proof == Self::proof(sender, &veil_graph::ID);
        if !valid {
            return Ok(None);
        }
        let value = pending.value.clone();
        Ok(Some(self.fresh(value)))
    }

    fn encrypt_scalar(&mut self, value: u32) -> Result<CipherHandle> {
        self.check_fail("encrypt_scalar")?;
        Ok(self.fresh(Plain::U32(value)))
    }

    fn add_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle> {
        self.check_fail("add_scalar")?;
        let current = self.usable(&handle)?;
        Ok(self.fresh(Plain::U32(current.wrapping_add(delta))))
    }

    fn sub_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle> {
        self.check_fail("sub_scalar")?;
        let current = self.usable(&handle)?;
        Ok(self.fresh(Plain::U32(current.wrapping_sub(delta))))
    }

    fn grant(&mut self, handle: CipherHandle, principals: &[Pubkey]) -> Result<()> {
        self.check_fail("grant")?;
        self.acl.entry(handle).or_default().extend(principals.iter().copied());
        Ok(())
    }
}

/// Account-keyed state as the program sees it through its PDAs. Each call
/// loads copies, runs the transition and writes back only on success, the
/// way a failed Solana transaction leaves accounts untouched.
pub struct Ledger {
    pub coprocessor: MockCoprocessor,
    pub followers: HashMap<Pubkey, FollowerList>,
    pub following: HashMap<Pubkey, FollowingList>,
    pub follower_entries: HashMap<(Pubkey, u64), FollowerEntry>,
    pub following_entries: HashMap<(Pubkey, u64), FollowingEntry>,
    pub flags: HashMap<(Pubkey, Pubkey), FollowFlag>,
    pub now: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            coprocessor: MockCoprocessor::new(),
            followers: HashMap::new(),
            following: HashMap::new(),
            follower_entries: HashMap::new(),
            following_entries: HashMap::new(),
            flags: HashMap::new(),
            now: 1_700_000_000,
        }
    }

    /// `sender` follows `followee`, encrypting its own key as real identity
    pub fn follow(&mut self, sender: Pubkey, followee: Pubkey) -> Result<FollowAdded> {
        let input = self.coprocessor.encrypt_input(sender, sender);
        self.follow_with(sender, followee, &input)
    }

    pub fn follow_with(
        &mut self,
        sender: Pubkey,
        followee: Pubkey,
        input: &EncryptedInput,
    ) -> Result<FollowAdded> {
        self.follow_entries(sender, followee, input)
            .map(|(event, _)| event)
    }

    /// Like `follow_with`, also returning the entries the program would store
    pub fn follow_entries(
        &mut self,
        sender: Pubkey,
        followee: Pubkey,
        input: &EncryptedInput,
    ) -> Result<(FollowAdded, NewEntries)> {
        self.now += 1;
        let mut followers = self.follower_list(&followee);
        let mut following = self.following_list(&sender);
        let mut flag = self.flag(&followee, &sender);

        let result = graph::follow(
            &mut self.coprocessor,
            Relationship {
                followee,
                sender,
                followers: &mut followers,
                following: &mut following,
                flag: &mut flag,
            },
            input,
            self.now,
        );
        self.coprocessor.end_transaction();

        let (event, entries) = result?;
        self.follower_entries
            .insert((followee, entries.follower_index), entries.follower.clone());
        self.following_entries
            .insert((sender, entries.following_index), entries.following.clone());
        self.followers.insert(followee, followers);
        self.following.insert(sender, following);
        self.flags.insert((followee, sender), flag);
        Ok((event, entries))
    }

    pub fn unfollow(&mut self, sender: Pubkey, followee: Pubkey) -> Result<FollowRemoved> {
        self.now += 1;
        let mut followers = self.follower_list(&followee);
        let mut following = self.following_list(&sender);
        let mut flag = self.flag(&followee, &sender);
        let follower_key = (followee, flag.follower_index);
        let following_key = (sender, flag.following_index);
        let mut follower = self
            .follower_entries
            .get(&follower_key)
            .cloned()
            .unwrap_or_default();
        let mut mirror = self
            .following_entries
            .get(&following_key)
            .cloned()
            .unwrap_or_default();

        let result = graph::unfollow(
            &mut self.coprocessor,
            Relationship {
                followee,
                sender,
                followers: &mut followers,
                following: &mut following,
                flag: &mut flag,
            },
            EntryPair {
                follower: &mut follower,
                following: &mut mirror,
            },
            self.now,
        );
        self.coprocessor.end_transaction();

        let event = result?;
        self.follower_entries.insert(follower_key, follower);
        self.following_entries.insert(following_key, mirror);
        self.followers.insert(followee, followers);
        self.following.insert(sender, following);
        self.flags.insert((followee, sender), flag);
        Ok(event)
    }

    pub fn follower_list(&self, account: &Pubkey) -> FollowerList {
        self.followers.get(account).cloned().unwrap_or_default()
    }

    pub fn following_list(&self, account: &Pubkey) -> FollowingList {
        self.following.get(account).cloned().unwrap_or_default()
    }

    /// Entry at `index` with the bounds check the query instructions apply
    pub fn follower_entry(&self, account: &Pubkey, index: u64) -> Result<FollowerEntry> {
        self.follower_list(account).check_index(index)?;
        self.follower_entries
            .get(&(*account, index))
            .cloned()
            .ok_or_else(|| error!(GraphError::IndexOutOfRange))
    }

    pub fn following_entry(&self, account: &Pubkey, index: u64) -> Result<FollowingEntry> {
        self.following_list(account).check_index(index)?;
        self.following_entries
            .get(&(*account, index))
            .cloned()
            .ok_or_else(|| error!(GraphError::IndexOutOfRange))
    }

    /// Every follower entry of `account`, oldest first
    pub fn follower_entries_of(&self, account: &Pubkey) -> Vec<FollowerEntry> {
        (0..self.follower_list(account).len())
            .map(|index| self.follower_entries[&(*account, index)].clone())
            .collect()
    }

    pub fn following_entries_of(&self, account: &Pubkey) -> Vec<FollowingEntry> {
        (0..self.following_list(account).len())
            .map(|index| self.following_entries[&(*account, index)].clone())
            .collect()
    }

    pub fn flag(&self, followee: &Pubkey, pseudo_follower: &Pubkey) -> FollowFlag {
        self.flags
            .get(&(*followee, *pseudo_follower))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_following_public(&self, followee: &Pubkey, pseudo_follower: &Pubkey) -> bool {
        self.flag(followee, pseudo_follower).is_following
    }

    /// Follower count of `account` as decrypted by `account` itself
    pub fn follower_count(&self, account: &Pubkey) -> u32 {
        let handle = self.follower_list(account).follower_count;
        self.coprocessor.decrypt_count(&handle, account)
    }
}
