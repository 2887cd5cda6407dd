use anchor_lang::prelude::*;

use crate::state::ReliefError;

#[account]
pub struct DonorReceipt {
    pub fund: Pubkey,    // Fund donated to
    pub donor: Pubkey,   // Contributor's wallet
    pub amount: u64,     // Total contributed
    pub deposits: u32,   // Number of deposits made
    pub bump: u8,        // PDA bump
}

impl Space for DonorReceipt {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // fund: Pubkey
        + 32    // donor: Pubkey
        + 8     // amount: u64
        + 4     // deposits: u32
        + 1;    // bump: u8
}

impl DonorReceipt {
    pub fn record(&mut self, fund: Pubkey, donor: Pubkey, amount: u64, bump: u8) -> Result<()> {
        self.fund = fund;
        self.donor = donor;
        self.bump = bump;
        self.amount = self.amount.checked_add(amount).ok_or(ReliefError::MathOverflow)?;
        self.deposits = self.deposits.checked_add(1).ok_or(ReliefError::MathOverflow)?;
        Ok(())
    }
}
