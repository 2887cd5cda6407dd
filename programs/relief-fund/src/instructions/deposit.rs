use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{DONOR_SEED, FUND_SEED};
use crate::state::{DonorReceipt, FundPool, FundsDeposited};

#[derive(Accounts)]
pub struct DepositFunds <'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

     #[account(
        mut,
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
     )]
    pub fund: Account<'info, FundPool>,

    #[account(
        init_if_needed,
        payer = donor,
        space = DonorReceipt::INIT_SPACE,
        seeds = [DONOR_SEED, fund.key().as_ref(), donor.key().as_ref()],
        bump
    )]
    pub donor_receipt: Account<'info, DonorReceipt>,

    #[account(address = fund.mint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = donor_ata.owner == donor.key(),
        constraint = donor_ata.mint == fund.mint
    )]
    pub donor_ata: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = fund.vault,
        constraint = vault.mint == fund.mint,
        constraint = vault.owner == fund.key()
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>
}

impl <'info> DepositFunds <'info> {
    /// Anyone may donate. The pool grows by what the vault actually received,
    /// which is less than `amount` for mints that charge a transfer fee.
    pub fn deposit_funds(&mut self, amount: u64, bumps: &DepositFundsBumps) -> Result<()> {
        if amount == 0 {
            msg!("Nothing to deposit");
            return Ok(());
        }

        let before = self.vault.amount;
        let cpi_accounts = TransferChecked {
            from: self.donor_ata.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.donor.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        transfer_checked(cpi_ctx, amount, self.mint.decimals)?;

        self.vault.reload()?;
        let received = FundPool::vault_received(before, self.vault.amount)?;
        self.fund.deposit(received)?;

        let fund = self.fund.key();
        let donor = self.donor.key();
        self.donor_receipt.record(fund, donor, received, bumps.donor_receipt)?;

        emit!(FundsDeposited {
            fund,
            donor,
            amount: received,
            pool_balance: self.fund.balance,
            timestamp: Clock::get()?.unix_timestamp
        });
        Ok(())
    }
}
