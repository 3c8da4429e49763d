use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::{get_return_data, invoke_signed},
};
use solana_sha256_hasher::hash;

use crate::{
    constants::COPROCESSOR_PROGRAM_ID,
    error::GraphError,
    state::{CipherHandle, CipherType},
};

/// Ciphertext produced client-side together with its proof of well-formedness
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EncryptedInput {
    pub handle: CipherHandle,
    pub proof: Vec<u8>,
}

/// Operations the program needs from the homomorphic co-processor.
///
/// Every call either completes inside the current instruction or fails it.
/// Handles returned here are fresh; none of them carry grants until
/// [`Coprocessor::grant`] is called for them.
pub trait Coprocessor {
    /// Identity the co-processor sees as the calling program
    fn program_principal(&self) -> Pubkey;

    /// Checks `input` against its proof, the sender and this program.
    /// `None` means the proof was rejected.
    fn verify_input(
        &mut self,
        input: &EncryptedInput,
        expected: CipherType,
        sender: &Pubkey,
    ) -> Result<Option<CipherHandle>>;

    /// Trivially encrypts a public u32
    fn encrypt_scalar(&mut self, value: u32) -> Result<CipherHandle>;

    fn add_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle>;

    fn sub_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle>;

    /// Allows each of `principals` to request decryption of `handle`.
    /// Granting an existing grant again is a no-op.
    fn grant(&mut self, handle: CipherHandle, principals: &[Pubkey]) -> Result<()>;
}

// ============================================================================
// CPI ARGUMENTS - Borsh payloads after the 8-byte method discriminator
// ============================================================================

#[derive(AnchorSerialize)]
struct VerifyInputArgs {
    input: EncryptedInput,
    expected: CipherType,
    sender: Pubkey,
    contract: Pubkey,
}

#[derive(AnchorSerialize)]
struct EncryptScalarArgs {
    value: u32,
    ty: CipherType,
}

#[derive(AnchorSerialize)]
struct ScalarOpArgs {
    handle: CipherHandle,
    delta: u32,
}

#[derive(AnchorSerialize)]
struct GrantArgs {
    handle: CipherHandle,
    principals: Vec<Pubkey>,
}

/// Issues co-processor calls as CPIs signed by this program's authority PDA
pub struct CpiCoprocessor<'a, 'info> {
    pub program: AccountInfo<'info>,
    pub acl: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub authority_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> CpiCoprocessor<'a, 'info> {
    fn discriminator(method: &str) -> [u8; 8] {
        let preimage = format!("global:{method}");
        let mut out = [0u8; 8];
        out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
        out
    }

    fn invoke<A: AnchorSerialize>(&self, method: &str, args: &A) -> Result<()> {
        require_keys_eq!(
            self.program.key(),
            COPROCESSOR_PROGRAM_ID,
            GraphError::InvalidCoprocessor
        );

        let mut data = Self::discriminator(method).to_vec();
        args.serialize(&mut data)
            .map_err(|_| error!(anchor_lang::error::ErrorCode::InstructionDidNotSerialize))?;

        let ix = Instruction {
            program_id: COPROCESSOR_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(self.acl.key(), false),
                AccountMeta::new_readonly(self.authority.key(), true),
            ],
            data,
        };

        invoke_signed(
            &ix,
            &[
                self.acl.clone(),
                self.authority.clone(),
                self.program.clone(),
            ],
            &[self.authority_seeds],
        )?;
        Ok(())
    }

    fn invoke_returning<A: AnchorSerialize, R: AnchorDeserialize>(
        &self,
        method: &str,
        args: &A,
    ) -> Result<R> {
        self.invoke(method, args)?;

        let (origin, data) =
            get_return_data().ok_or_else(|| error!(GraphError::MalformedCoprocessorResponse))?;
        require_keys_eq!(
            origin,
            COPROCESSOR_PROGRAM_ID,
            GraphError::MalformedCoprocessorResponse
        );
        R::try_from_slice(&data).map_err(|_| error!(GraphError::MalformedCoprocessorResponse))
    }
}

impl<'a, 'info> Coprocessor for CpiCoprocessor<'a, 'info> {
    fn program_principal(&self) -> Pubkey {
        self.authority.key()
    }

    fn verify_input(
        &mut self,
        input: &EncryptedInput,
        expected: CipherType,
        sender: &Pubkey,
    ) -> Result<Option<CipherHandle>> {
        self.invoke_returning(
            "verify_input",
            &VerifyInputArgs {
                input: input.clone(),
                expected,
                sender: *sender,
                contract: crate::ID,
            },
        )
    }

    fn encrypt_scalar(&mut self, value: u32) -> Result<CipherHandle> {
        self.invoke_returning(
            "trivial_encrypt",
            &EncryptScalarArgs {
                value,
                ty: CipherType::U32,
            },
        )
    }

    fn add_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle> {
        self.invoke_returning("add_scalar", &ScalarOpArgs { handle, delta })
    }

    fn sub_scalar(&mut self, handle: CipherHandle, delta: u32) -> Result<CipherHandle> {
        self.invoke_returning("sub_scalar", &ScalarOpArgs { handle, delta })
    }

    fn grant(&mut self, handle: CipherHandle, principals: &[Pubkey]) -> Result<()> {
        self.invoke(
            "allow",
            &GrantArgs {
                handle,
                principals: principals.to_vec(),
            },
        )
    }
}
