use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{BENEFICIARY_SEED, FUND_SEED, ROLE_SEED, SPEND_SEED};
use crate::state::{
    check_payout_account, require_role, spend_from, CategorySpend, FundPool, FundsSpent, Role,
};

#[derive(Accounts)]
#[instruction(category: u8)]
pub struct SpendFunds<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(
        mut,
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
    )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: the signer's own beneficiary assignment, verified by `require_role`
    #[account(
        seeds=[ROLE_SEED, fund.key().as_ref(), Role::Beneficiary.seed().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub beneficiary_role: UncheckedAccount<'info>,

    /// CHECK: derived from the signer, so only the beneficiary can spend its own balance
    #[account(
        mut,
        seeds=[BENEFICIARY_SEED, fund.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub record: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer=beneficiary,
        space=CategorySpend::INIT_SPACE,
        seeds=[SPEND_SEED, record.key().as_ref(), [category].as_ref()],
        bump
    )]
    pub category_spend: Account<'info, CategorySpend>,

    #[account(address = fund.mint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        address = fund.vault,
        constraint = vault.mint == fund.mint,
        constraint = vault.owner == fund.key()
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Owner and mint are checked after the role check, so a stranger
    /// gets `Unauthorized` rather than a constraint error.
    #[account(mut)]
    pub beneficiary_ata: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> SpendFunds<'info> {
    pub fn spend_funds(&mut self, category: u8, amount: u64, bumps: &SpendFundsBumps) -> Result<()> {
        require_role(
            &self.beneficiary_role,
            &self.fund.key(),
            Role::Beneficiary,
            &self.beneficiary.key(),
        )?;
        check_payout_account(
            &self.beneficiary_ata.owner,
            &self.beneficiary_ata.mint,
            &self.beneficiary.key(),
            &self.fund.mint,
        )?;

        let record = spend_from(
            &self.record,
            &mut self.category_spend,
            &mut self.fund,
            category,
            amount,
            bumps.category_spend,
        )?;

        if amount > 0 {
            let name = self.fund.name.clone();
            let fund_seeds = &[
                FUND_SEED,
                name.as_str().as_bytes(),
                self.fund.creator.as_ref(),
                &[self.fund.bump],
            ];
            let signer = &[&fund_seeds[..]];

            let cpi_accounts = TransferChecked {
                from: self.vault.to_account_info(),
                mint: self.mint.to_account_info(),
                to: self.beneficiary_ata.to_account_info(),
                authority: self.fund.to_account_info(),
            };
            let cpi_ctx = CpiContext::new_with_signer(self.token_program.to_account_info(), cpi_accounts, signer);
            transfer_checked(cpi_ctx, amount, self.mint.decimals)?;
        }

        emit!(FundsSpent {
            fund: self.fund.key(),
            beneficiary: self.beneficiary.key(),
            category,
            amount,
            remaining_balance: record.total_funds,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
