use anchor_lang::prelude::*;

use crate::constants::BENEFICIARY_SEED;
use crate::state::{read_account, write_account, BeneficiaryRecord, FundPool, ReleasePlan, ReliefError};

/// Loads the full beneficiary set of `fund`, rejecting gaps, reordering,
/// read-only and foreign accounts.
pub fn load_beneficiaries(records: &[AccountInfo], fund: &Pubkey, count: u32) -> Result<Vec<BeneficiaryRecord>> {
    require!(records.len() == count as usize, ReliefError::BeneficiarySetMismatch);

    let mut beneficiaries = Vec::with_capacity(records.len());
    for (position, info) in records.iter().enumerate() {
        require!(info.is_writable, ReliefError::InvalidBeneficiaryAccount);
        let record = read_account::<BeneficiaryRecord>(info)?
            .ok_or(ReliefError::InvalidBeneficiaryAccount)?;
        require_keys_eq!(record.fund, *fund, ReliefError::InvalidBeneficiaryAccount);

        let expected = Pubkey::create_program_address(
            &[BENEFICIARY_SEED, fund.as_ref(), record.principal.as_ref(), &[record.bump]],
            &crate::ID,
        )
        .map_err(|_| ReliefError::InvalidBeneficiaryAccount)?;
        require_keys_eq!(expected, info.key(), ReliefError::InvalidBeneficiaryAccount);
        require!(record.index as usize == position, ReliefError::BeneficiarySetMismatch);

        beneficiaries.push(record);
    }
    Ok(beneficiaries)
}

/// Credits every record of `fund` with its share of the pool and debits the pool.
///
/// All new balances are computed before the first write, so an overflow on any
/// beneficiary leaves every record and the pool untouched.
pub fn release_to(pool: &mut FundPool, fund: &Pubkey, records: &[AccountInfo]) -> Result<ReleasePlan> {
    let mut beneficiaries = load_beneficiaries(records, fund, pool.beneficiary_count)?;
    let scores: Vec<u8> = beneficiaries
        .iter()
        .map(|record| if record.registered { record.impact_score } else { 0 })
        .collect();
    let plan = pool.plan_release(&scores)?;

    let credited = beneficiaries
        .iter()
        .zip(plan.shares.iter())
        .map(|(record, share)| record.credited(*share))
        .collect::<Result<Vec<_>>>()?;

    for ((record, info), (total_funds, total_received)) in
        beneficiaries.iter_mut().zip(records.iter()).zip(credited)
    {
        record.total_funds = total_funds;
        record.total_received = total_received;
        write_account(info, record)?;
    }
    pool.commit_release(&plan)?;
    Ok(plan)
}
